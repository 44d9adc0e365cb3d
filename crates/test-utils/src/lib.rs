//! Postwright test utilities.
//!
//! Helpers for tests: post fixtures, flat block records, and assertion
//! utilities for content blocks.

use chrono::{DateTime, Utc};
use postwright_sdk::types::{Post, PostId, RawBlock};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Create a test post with default values.
pub fn test_post(id: i64, title: &str) -> TestPost {
    TestPost {
        post: Post::new(id, title, slugify(title)),
    }
}

/// Lowercase, hyphen-separated slug for fixture titles.
fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A test post builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestPost {
    pub post: Post,
}

impl TestPost {
    /// Set a custom slug.
    pub fn with_slug(mut self, slug: &str) -> Self {
        self.post.slug = slug.to_string();
        self
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.post.locale = Some(locale.to_string());
        self
    }

    /// Set the publish timestamp.
    pub fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.post.published_at = Some(at);
        self
    }

    /// Mark as a draft with a fresh preview token.
    pub fn draft(mut self) -> Self {
        self.post.is_draft = true;
        self.post.preview_token = Some(Uuid::now_v7());
        self
    }

    /// Give the post a preview token.
    pub fn with_preview_token(mut self, token: Uuid) -> Self {
        self.post.preview_token = Some(token);
        self
    }

    /// Attach a child draft with the given preview token.
    pub fn with_child_draft(mut self, token: Uuid) -> Self {
        self.post.has_child_draft = true;
        self.post.child_draft_token = Some(token);
        self
    }

    /// Set as pinned.
    pub fn pinned(mut self) -> Self {
        self.post.is_pinned = true;
        self
    }

    /// Set related post ids.
    pub fn related(mut self, ids: &[i64]) -> Self {
        self.post.related_posts = ids.iter().copied().map(PostId).collect();
        self
    }

    /// Append a raw content block.
    pub fn with_block(mut self, block: RawBlock) -> Self {
        self.post.post_content.push(block);
        self
    }

    /// Add a scalar field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        self.post.fields.insert(name.to_string(), value);
        self
    }

    /// Finish the builder.
    pub fn build(self) -> Post {
        self.post
    }
}

/// Create a flat block record from a JSON object of fields.
///
/// Non-object `fields` values produce a block without fields.
pub fn raw_block(type_key: &str, ordinal: i64, fields: JsonValue) -> RawBlock {
    RawBlock {
        type_key: type_key.to_string(),
        ordinal,
        fields: fields.as_object().cloned().unwrap_or_default(),
    }
}

/// Create a `text` block record.
pub fn text_block(ordinal: i64, content: &str) -> RawBlock {
    raw_block(
        "text",
        ordinal,
        serde_json::json!({ "text_content": content }),
    )
}

/// Create an `image` block record.
pub fn image_block(ordinal: i64, path: &str, caption: &str) -> RawBlock {
    raw_block(
        "image",
        ordinal,
        serde_json::json!({ "image": path, "caption": caption }),
    )
}

/// Assertion helpers for content blocks.
pub mod assert {
    use postwright_sdk::types::RawBlock;
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that stored ordinals run 0..n without gaps.
    pub fn dense_ordinals(blocks: &[RawBlock]) {
        let ordinals: Vec<i64> = blocks.iter().map(|b| b.ordinal).collect();
        let expected: Vec<i64> = (0..blocks.len() as i64).collect();
        assert_eq!(ordinals, expected, "Expected dense ordinals");
    }

    /// Assert the sequence of type keys.
    pub fn type_keys<'a>(keys: impl IntoIterator<Item = &'a str>, expected: &[&str]) {
        let actual: Vec<&str> = keys.into_iter().collect();
        assert_eq!(actual, expected, "Block type keys mismatch");
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_post_builder() {
        let post = test_post(3, "Hello, World!")
            .with_locale("en")
            .pinned()
            .related(&[1, 2])
            .with_block(text_block(0, "hi"))
            .build();

        assert_eq!(post.id, PostId(3));
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.locale.as_deref(), Some("en"));
        assert!(post.is_pinned);
        assert_eq!(post.related_posts, vec![PostId(1), PostId(2)]);
        assert_eq!(post.post_content.len(), 1);
    }

    #[test]
    fn draft_gets_token() {
        let post = test_post(1, "Draft").draft().build();
        assert!(post.is_draft);
        assert!(post.preview_token.is_some());
    }

    #[test]
    fn raw_block_from_json() {
        let block = image_block(2, "a.png", "Cat");
        assert_eq!(block.type_key, "image");
        assert_eq!(block.ordinal, 2);
        assert_eq!(block.fields["caption"], "Cat");

        let empty = raw_block("text", 0, serde_json::json!(null));
        assert!(empty.fields.is_empty());
    }

    #[test]
    fn test_assertions() {
        assert::has_key(&serde_json::json!({"name": "x"}), "name");
        assert::dense_ordinals(&[text_block(0, "a"), text_block(1, "b")]);
        assert::type_keys(["text", "image"], &["text", "image"]);
        assert::contains("hello world", "world");
        assert::not_contains("hello world", "foo");
    }
}
