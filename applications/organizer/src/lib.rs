//! Soul Organizer
//!
//! Command-line front end for the library organizer: argument parsing, INI
//! configuration and logging setup.
//!
//! This library exposes the components for testing purposes.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::Cli;
pub use config::{LogSettings, OrganizerConfig};
pub use error::{ConfigError, Result};
