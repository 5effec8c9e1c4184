//! Text layout: measuring, wrapping, and boxing a headline into a pill.
//!
//! The engine is font-agnostic. It works against a [`FontFace`] handle and
//! never resolves fonts itself; [`crate::fonts`] does that.
//!
//! - [`face`]: the `FontFace` trait, `OutlineFace` (`fontdue`), measurement
//! - [`basic`]: built-in bitmap face
//! - [`wrap`](mod@wrap): greedy word wrap
//! - [`pill`]: pill box geometry and placement
//! - [`draw`]: rasterising a pill and its lines

pub mod basic;
pub mod draw;
pub mod face;
pub mod pill;
pub mod wrap;

pub use basic::BasicFace;
pub use draw::{draw_line, draw_pill};
pub use face::{FontFace, GlyphMetrics, OutlineFace, text_width};
pub use pill::{LaidLine, PillLayout, layout_pill, layout_text, place_pill};
pub use wrap::wrap;
