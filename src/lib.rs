//! # adcraft
//!
//! Branded social ad creatives from a campaign brief. For every product in
//! the brief, a regional background is fetched once, cover-cropped to each
//! output size, the product cut-out is composited on top, and the brand
//! overlay (headline pill, CTA button, logo) is drawn last.
//!
//! # Architecture: One Pass Per Product
//!
//! ```text
//! brief.json ─┐                      ┌─► 1x1.png   (1080×1080)
//! brand.json ─┼─► background fetch ──┼─► 9x16.png  (1080×1920)
//! adcraft.toml┘   (once per product) └─► 16x9.png  (1920×1080)
//!                                                 │
//!                                  generation_log.json (after all products)
//! ```
//!
//! Products are independent and render in parallel; each product's aspect
//! ratios render in a fixed order from the same background.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`brief`] | Campaign brief and brand config: JSON loading, validation, resolved [`brief::OverlayStyle`] |
//! | [`config`] | Render settings (`adcraft.toml`): stock defaults, merging, validation, `gen-config` text |
//! | [`formats`] | The fixed aspect-ratio table and per-ratio sizing rules |
//! | [`background`] | Region catalog and background providers (directory, synthetic) |
//! | [`imaging`] | Pure geometry plus raster operations: cover crop, scaled placement, rounded rects |
//! | [`text`] | Font faces, greedy word wrap, pill layout and text rasterisation |
//! | [`fonts`] | Headline font resolution through a family fallback chain |
//! | [`overlay`] | Draws the headline pill, CTA button and logo onto a composite |
//! | [`render`] | The campaign run loop, progress events and the result model |
//! | [`manifest`] | The `generation_log.json` record with per-file checksums |
//! | [`naming`] | Filesystem-safe slugs for output directories |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pure Geometry, Thin Raster Layer
//!
//! Every placement rule (crop origin, product box, pill origin, logo corner,
//! CTA offset) is a pure function in [`imaging::calculations`] over integer
//! sizes. The raster code in [`imaging::operations`] and [`text::draw`] only
//! executes positions it is handed, so layout is tested without pixels.
//!
//! ## Fonts Never Fail
//!
//! A brand's headline font is looked up by family name in configurable
//! directories, then through a fallback chain. If nothing matches, a
//! built-in bitmap face draws the text. A creative is never lost to a
//! missing font.
//!
//! ## Optional Art Is Optional
//!
//! The CTA button and the logo are skipped with a warning when missing or
//! unreadable. Product images and backgrounds are required: without them
//! the run fails and no generation log is written.
//!
//! ## Injectable Backgrounds
//!
//! [`background::BackgroundProvider`] is the seam for background sources.
//! The region catalog is data, not code, so providers can carry their own.
//! Unknown regions fall back to the catalog's first entry.

pub mod background;
pub mod brief;
pub mod config;
pub mod fonts;
pub mod formats;
pub mod imaging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod overlay;
pub mod render;
pub mod text;

#[cfg(test)]
pub(crate) mod test_helpers;
