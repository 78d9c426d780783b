//! Numbered marker image generation.
//!
//! A template SVG carries a placeholder label (`>99<`). For each label in a
//! range the template text is rewritten and handed to an external rasterizer,
//! producing `marker_<n>.png`:
//!
//! template (`template`) -> staging SVG -> rasterizer (`rasterizer`) -> PNG
//!
//! Only literal text substitution happens here; the SVG is never parsed.

pub mod job;
pub mod rasterizer;
pub mod template;

pub use job::{MarkerJob, generate_markers};
pub use rasterizer::{CommandRasterizer, Rasterizer};
pub use template::{MarkerTemplate, Substitution};
