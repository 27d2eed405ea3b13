//! Schema module - Configuration and pattern types for the Methuselah search.

mod config;
mod pattern;

pub use config::*;
pub use pattern::*;
