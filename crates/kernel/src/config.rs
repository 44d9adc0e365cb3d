//! Blog configuration loaded from environment variables or a TOML file.
//!
//! Every option the blog resource recognizes is listed here and resolved once
//! at startup. Nothing downstream reads the environment directly.

use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Blog resource configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Table holding posts, used by the index scope query (default: blog_posts).
    pub posts_table: String,

    /// Use a rich-text editor for the title and text sections instead of markdown.
    pub use_rich_text: bool,

    /// Offer an extra text section edited with a WYSIWYG editor.
    pub include_wysiwyg_text_layout: bool,

    /// Hide the "Is pinned" toggle.
    pub hide_pinned_post_option: bool,

    /// Show the "Include in bloglist" toggle.
    pub include_in_bloglist_option: bool,

    /// Show a featured image field.
    pub include_featured_image: bool,

    /// Hide the category selector.
    pub hide_category_selector: bool,

    /// Show the related posts multiselect.
    pub include_related_posts: bool,

    /// The host provides localization; adds a locale field and index filter.
    pub localization: bool,

    /// The host provides drafts; adds draft button and state field.
    pub drafts: bool,

    /// Base URL for post pages, used to build preview links. None disables links.
    pub page_base_url: Option<String>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_table: "blog_posts".to_string(),
            use_rich_text: false,
            include_wysiwyg_text_layout: false,
            hide_pinned_post_option: false,
            include_in_bloglist_option: false,
            include_featured_image: false,
            hide_category_selector: false,
            include_related_posts: false,
            localization: false,
            drafts: false,
            page_base_url: None,
        }
    }
}

impl BlogConfig {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` uses the process environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let flag = |key: &str, default: bool| -> Result<bool> {
            match lookup(key) {
                Some(raw) => parse_bool(&raw).with_context(|| format!("{key} must be a boolean")),
                None => Ok(default),
            }
        };

        let posts_table = lookup("BLOG_POSTS_TABLE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.posts_table);

        let page_base_url = lookup("BLOG_PAGE_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            posts_table,
            use_rich_text: flag("BLOG_USE_RICH_TEXT", defaults.use_rich_text)?,
            include_wysiwyg_text_layout: flag(
                "BLOG_INCLUDE_WYSIWYG_TEXT_LAYOUT",
                defaults.include_wysiwyg_text_layout,
            )?,
            hide_pinned_post_option: flag(
                "BLOG_HIDE_PINNED_POST_OPTION",
                defaults.hide_pinned_post_option,
            )?,
            include_in_bloglist_option: flag(
                "BLOG_INCLUDE_IN_BLOGLIST_OPTION",
                defaults.include_in_bloglist_option,
            )?,
            include_featured_image: flag(
                "BLOG_INCLUDE_FEATURED_IMAGE",
                defaults.include_featured_image,
            )?,
            hide_category_selector: flag(
                "BLOG_HIDE_CATEGORY_SELECTOR",
                defaults.hide_category_selector,
            )?,
            include_related_posts: flag(
                "BLOG_INCLUDE_RELATED_POSTS",
                defaults.include_related_posts,
            )?,
            localization: flag("BLOG_LOCALIZATION", defaults.localization)?,
            drafts: flag("BLOG_DRAFTS", defaults.drafts)?,
            page_base_url,
        })
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BlogConfig =
            toml::from_str(content).context("failed to parse blog configuration TOML")?;
        if config.posts_table.trim().is_empty() {
            bail!("posts_table must not be empty");
        }
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read blog configuration: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid blog configuration at {}", path.display()))
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognized boolean value '{other}'"),
    }
}
