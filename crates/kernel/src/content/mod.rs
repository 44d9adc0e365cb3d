//! Content block module.
//!
//! This module provides:
//! - BlockTypeRegistry: block type definitions, frozen process-wide after startup
//! - field_kinds: per-kind value checks and normalization
//! - ContentComposer: decode/encode of the flat representation and publish validation
//! - related: related-post option building

pub mod block_types;
pub mod composer;
pub mod field_kinds;
pub mod related;

pub use block_types::{BlockTypeDefinition, BlockTypeRegistry, global, install};
pub use composer::{BlockInstance, ContentComposer};
pub use related::{build_related_post_options, normalize_related_post_ids};
