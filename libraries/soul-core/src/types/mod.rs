//! Domain types

mod tags;

pub use tags::{DialectTags, NormalizedTags, TagDialect};
