//! Postwright SDK
//!
//! Types shared between the kernel (content block composer) and the
//! resources built on top of it. Everything here serializes to the flat
//! JSON shape the storage collaborator persists.

pub mod types;

pub mod prelude {
    pub use crate::types::*;
}
