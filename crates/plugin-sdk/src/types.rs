//! Core types for Postwright.
//!
//! These types cross the boundary between the host framework, the content
//! block composer and the blog resource. All of them round-trip through JSON.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a post, as assigned by the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A blog post as handed over by the host framework.
///
/// The post is owned by the host; this crate only reads it to build field
/// lists, option maps and index filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,

    pub title: String,

    /// URL path segment(s), e.g. "news/launch-day".
    pub slug: String,

    /// Locale code (e.g. "en"). None when localization is not in use.
    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_pinned: bool,

    /// Whether this record is itself an unpublished draft.
    #[serde(default)]
    pub is_draft: bool,

    /// Token granting preview access to unpublished content.
    #[serde(default)]
    pub preview_token: Option<Uuid>,

    /// Preview token of the draft that shadows this post, if one exists.
    #[serde(default)]
    pub child_draft_token: Option<Uuid>,

    /// Whether a child draft exists for this post.
    #[serde(default)]
    pub has_child_draft: bool,

    /// Flat representation of the post body.
    #[serde(default)]
    pub post_content: Vec<RawBlock>,

    /// Ids of related posts (never the post's own id, no duplicates).
    #[serde(default)]
    pub related_posts: Vec<PostId>,

    /// Remaining scalar fields (introduction, SEO metadata, ...).
    #[serde(default)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl Post {
    /// Create a post with only id, title and slug set.
    pub fn new(id: impl Into<PostId>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            locale: None,
            published_at: None,
            is_pinned: false,
            is_draft: false,
            preview_token: None,
            child_draft_token: None,
            has_child_draft: false,
            post_content: Vec::new(),
            related_posts: Vec::new(),
            fields: HashMap::new(),
        }
    }

    /// Get a field value as a specific type.
    pub fn get_field<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<T> {
        self.fields
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a field value.
    pub fn set_field<T: Serialize>(&mut self, name: &str, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(name.to_string(), v);
        }
    }
}

/// The value shape a block field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line plain text.
    Text,
    /// HTML produced by a rich-text editor.
    RichText,
    /// Multi-line text (markdown or embed code).
    LongText,
    /// Path or URL of a stored image.
    Image,
    /// Id of another record.
    Reference,
}

impl FieldKind {
    /// Machine name as used in the flat representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::RichText => "rich-text",
            FieldKind::LongText => "long-text",
            FieldKind::Image => "image",
            FieldKind::Reference => "reference",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field definition within a block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl BlockField {
    pub fn new(key: &str, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: key.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.into();
        self
    }
}

/// One record of the flat representation of a post body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub type_key: String,
    pub ordinal: i64,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl RawBlock {
    pub fn new(type_key: impl Into<String>, ordinal: i64) -> Self {
        Self {
            type_key: type_key.into(),
            ordinal,
            fields: serde_json::Map::new(),
        }
    }

    /// Add a field value.
    pub fn field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(FieldKind::RichText).unwrap(),
            serde_json::json!("rich-text")
        );
        let kind: FieldKind = serde_json::from_value(serde_json::json!("long-text")).unwrap();
        assert_eq!(kind, FieldKind::LongText);
        assert_eq!(FieldKind::Reference.to_string(), "reference");
    }

    #[test]
    fn raw_block_parses_flat_record() {
        let raw: RawBlock = serde_json::from_value(serde_json::json!({
            "type_key": "text",
            "ordinal": 3,
            "fields": { "text_content": "hi" }
        }))
        .unwrap();
        assert_eq!(raw.type_key, "text");
        assert_eq!(raw.ordinal, 3);
        assert_eq!(raw.fields["text_content"], "hi");
    }

    #[test]
    fn raw_block_fields_default_to_empty() {
        let raw: RawBlock =
            serde_json::from_value(serde_json::json!({ "type_key": "image", "ordinal": 0 }))
                .unwrap();
        assert!(raw.fields.is_empty());
    }

    #[test]
    fn post_id_is_transparent() {
        let post = Post::new(7, "Hello", "hello");
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 7);
        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, PostId(7));
    }

    #[test]
    fn post_field_accessors() {
        let mut post = Post::new(1, "Hello", "hello");
        post.set_field("seo_title", "Hello | Blog");
        assert_eq!(
            post.get_field::<String>("seo_title").as_deref(),
            Some("Hello | Blog")
        );
        assert!(post.get_field::<String>("missing").is_none());
    }

    #[test]
    fn block_field_builder() {
        let field = BlockField::new("image", FieldKind::Image)
            .label("Image")
            .required();
        assert_eq!(field.key, "image");
        assert_eq!(field.label, "Image");
        assert!(field.required);
    }
}
