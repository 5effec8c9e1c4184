use adcraft::background::{BackgroundProvider, DirectoryProvider, RegionCatalog, SyntheticProvider};
use adcraft::brief::{self, BrandConfig, CampaignBrief};
use adcraft::config::{self, RenderConfig};
use adcraft::fonts::resolve_font;
use adcraft::output::{self, CheckReport};
use adcraft::overlay::Overlay;
use adcraft::render::{RenderOptions, render_campaign};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("ADCRAFT_RELEASE_BUILD") == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("ADCRAFT_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "adcraft")]
#[command(about = "Branded social ad creatives at every aspect ratio")]
#[command(long_about = "\
Branded social ad creatives at every aspect ratio

A campaign brief names the products, the target region and the headline.
A brand config supplies colors, the headline font, the logo and layout
rules. Every product is composited onto a regional background and branded
at three sizes:

  1x1    1080x1080   Instagram Feed, Facebook
  9x16   1080x1920   Instagram Stories, TikTok, Reels
  16x9   1920x1080   YouTube, Web Banners

Output structure:

  output/
  └── {campaign}_{region}/
      ├── generation_log.json
      └── {product id}/
          ├── 1x1.png
          ├── 9x16.png
          └── 16x9.png

Render settings are read from adcraft.toml in the working directory when
present. Run 'adcraft gen-config' to print a documented copy.

Log verbosity follows RUST_LOG (default: adcraft=info).")]
#[command(version = version_string())]
struct Cli {
    /// Render settings file (default: adcraft.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// The two input documents every campaign needs.
#[derive(clap::Args, Clone)]
struct CampaignArgs {
    /// Campaign brief (JSON)
    #[arg(long)]
    brief: PathBuf,

    /// Brand config (JSON)
    #[arg(long)]
    brand: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Render every product at every aspect ratio
    Render {
        #[command(flatten)]
        campaign: CampaignArgs,

        /// Parent directory for the campaign folder (overrides output.dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Directory of {region}.png/.jpg/.webp backgrounds (overrides backgrounds.dir)
        #[arg(long, conflicts_with = "synthetic")]
        backgrounds: Option<PathBuf>,

        /// Synthesise backgrounds even if a directory is configured
        #[arg(long)]
        synthetic: bool,
    },
    /// Validate a brief and brand config without rendering
    Check {
        #[command(flatten)]
        campaign: CampaignArgs,
    },
    /// List the known target regions
    Regions,
    /// List the output aspect ratios
    Formats,
    /// Print a stock adcraft.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("adcraft=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            campaign,
            output: output_dir,
            backgrounds,
            synthetic,
        } => {
            let config = load_render_config(cli.config.as_deref())?;
            init_thread_pool(&config.processing);
            let (brief, brand) = load_campaign(&campaign)?;

            let style = brand.overlay_style(&config.assets);
            let font = resolve_font(&style.headline_font, &config.fonts);
            tracing::info!(font = %font.describe(), "headline font");
            let overlay = Overlay::load(style, font, config.text.max_width_percent);

            let provider = select_provider(&config, backgrounds, synthetic);
            let mut options =
                RenderOptions::new(output_dir.unwrap_or_else(|| PathBuf::from(&config.output.dir)));
            options.assets = config.assets.clone();
            options.focus = config.backgrounds.focus;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_progress_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = render_campaign(&brief, &overlay, provider.as_ref(), &options, Some(tx));
            if printer.join().is_err() {
                tracing::warn!("progress printer panicked");
            }
            output::print_render_summary(&brief.campaign_name, &result?);
        }
        Command::Check { campaign } => {
            let config = load_render_config(cli.config.as_deref())?;
            let (brief, brand) = load_campaign(&campaign)?;
            let style = brand.overlay_style(&config.assets);
            let font = resolve_font(&style.headline_font, &config.fonts);
            let overlay = Overlay::load(style, font, config.text.max_width_percent);
            let catalog = RegionCatalog::default();
            let images: Vec<PathBuf> = brief
                .products
                .iter()
                .map(|p| config.assets.resolve(&p.image_path))
                .collect();
            let style = overlay.style();
            let report = CheckReport {
                brief: &brief,
                brand: &brand,
                catalog: &catalog,
                product_images: images.iter().map(|p| (p.as_path(), p.is_file())).collect(),
                font: overlay.font().describe(),
                logo: style.logo.as_deref().map(|p| (p, overlay.has_logo())),
                cta_button: style.cta_button.as_deref().map(|p| (p, overlay.has_cta_button())),
            };
            output::print_check(&report);
            println!("==> Campaign inputs are valid");
        }
        Command::Regions => {
            output::print_regions(&RegionCatalog::default());
        }
        Command::Formats => {
            output::print_formats();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load render settings: an explicit `--config` must exist; the default
/// file is optional.
fn load_render_config(path: Option<&Path>) -> Result<RenderConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_required_config(path),
        None => config::load_config(Path::new(config::CONFIG_FILE_NAME)),
    }
}

fn load_campaign(args: &CampaignArgs) -> Result<(CampaignBrief, BrandConfig), brief::ConfigError> {
    let brief = brief::load_brief(&args.brief)?;
    let brand = brief::load_brand(&args.brand)?;
    Ok((brief, brand))
}

/// Pick the background source: CLI flags win over `backgrounds.dir`.
fn select_provider(
    config: &RenderConfig,
    cli_dir: Option<PathBuf>,
    synthetic: bool,
) -> Box<dyn BackgroundProvider> {
    let dir = if synthetic {
        None
    } else {
        cli_dir.or_else(|| config.backgrounds.dir.as_ref().map(PathBuf::from))
    };
    match dir {
        Some(dir) => {
            let provider = DirectoryProvider::new(dir);
            tracing::info!(dir = %provider.dir().display(), "using background directory");
            Box::new(provider)
        }
        None => {
            tracing::info!("using synthetic backgrounds");
            Box::new(SyntheticProvider::default())
        }
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
