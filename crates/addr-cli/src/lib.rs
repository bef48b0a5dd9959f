//! CLI library components for the address standardizer.

pub mod logging;
pub mod pipeline;
pub mod progress;
