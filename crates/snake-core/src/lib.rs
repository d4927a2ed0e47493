//! Core types and utilities for the random-walk snake simulation.

pub mod types;
pub mod config;
pub mod settings;
pub mod stats;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use settings::*;
pub use stats::*;
