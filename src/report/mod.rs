//! Terminal reports for tick-scale candidates.
//!
//! The selector never prints; everything shown to a user goes through here so
//! output changes stay localized.

pub mod format;

pub use format::*;
