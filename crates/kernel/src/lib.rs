//! Postwright Kernel Library
//!
//! The content block composer behind the blog post resource: block type
//! registry, flat-representation codec, publish validation and the blog
//! configuration every resource reads at startup.

pub mod config;
pub mod content;
pub mod error;

pub use config::BlogConfig;
pub use error::{ComposerError, ComposerResult, ValidationError, ValidationErrorKind};
