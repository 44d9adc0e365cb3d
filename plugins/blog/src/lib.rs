//! Blog plugin for Postwright.
//!
//! Defines the blog post resource the host admin panel renders: the content
//! layouts a post body is composed from, the ordered field list with its SEO
//! panel, slug rules and previews, and the scope of the post index list.
//!
//! Everything is driven by a `BlogConfig` resolved once at startup.

pub mod index;
pub mod layouts;
pub mod resource;
pub mod slug;

pub use index::IndexScope;
pub use layouts::{post_content_registry, register_post_content_layouts};
pub use resource::{PostResource, ResourceEntry, ResourceField, TemplateFields};
