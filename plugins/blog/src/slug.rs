//! Slug rules and preview links.

use std::sync::LazyLock;

use postwright_kernel::BlogConfig;
use postwright_sdk::types::Post;
use regex::Regex;
use serde::Serialize;

/// Letters, digits, dashes, underscores and slashes.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-/]+$").expect("valid regex literal"));

/// Check a slug against the `alpha_dash_or_slash` rule.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

/// What the list and detail views show in place of the slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugPreview {
    pub path: String,
    /// Page URL including the preview token. None without a page base URL.
    pub url: Option<String>,
    pub action_label: &'static str,
}

/// Build the slug preview for a post.
///
/// The preview token of a child draft takes precedence over the post's own.
pub fn preview(post: &Post, config: &BlogConfig) -> SlugPreview {
    let token = if post.has_child_draft {
        post.child_draft_token
    } else {
        post.preview_token
    };

    let url = config.page_base_url.as_deref().map(|base| {
        let mut url = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            post.slug.trim_start_matches('/')
        );
        if let Some(token) = token {
            url.push_str(&format!("?preview={token}"));
        }
        url
    });

    let action_label = if post.is_draft { "View draft" } else { "View" };

    SlugPreview {
        path: post.slug.clone(),
        url,
        action_label,
    }
}
