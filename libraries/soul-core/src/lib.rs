//! Soul Player Core
//!
//! Platform-agnostic core types, traits, and error handling shared by the
//! organizer crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `NormalizedTags`, `DialectTags`, `TagDialect`
//! - **Core Traits**: `MetadataReader`, `BitrateProbe`
//! - **Error Handling**: Unified `SoulError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soul_core::types::{NormalizedTags, TagDialect};
//!
//! let mut tags = NormalizedTags::new();
//! tags.dialect_mut(TagDialect::Vorbis).artist = Some("Prince".to_string());
//!
//! assert_eq!(tags.artist(), Some("Prince"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SoulError};
pub use traits::{BitrateProbe, MetadataReader};
pub use types::{DialectTags, NormalizedTags, TagDialect};
