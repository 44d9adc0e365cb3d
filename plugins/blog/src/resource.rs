//! The blog post resource: what the admin panel shows for a post.
//!
//! `PostResource::fields` returns the ordered field list (with panels) the
//! host renders into forms, detail pages and the index table. Which entries
//! appear is decided by `BlogConfig`; nothing here renders HTML.
//!
//! Editing goes through `save_post_content` / `save_related_posts`, which keep
//! the stored representation normalized.

use indexmap::IndexMap;
use postwright_kernel::content::{
    BlockInstance, BlockTypeRegistry, ContentComposer, build_related_post_options,
    normalize_related_post_ids,
};
use postwright_kernel::error::{ComposerResult, ValidationError};
use postwright_kernel::BlogConfig;
use postwright_sdk::types::{Post, PostId};
use serde::Serialize;
use tracing::debug;

use crate::slug::is_valid_slug;

/// Where a field is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub index: bool,
    pub detail: bool,
    pub forms: bool,
}

impl Visibility {
    pub const ALL: Self = Self {
        index: true,
        detail: true,
        forms: true,
    };

    pub fn hide_from_index(self) -> Self {
        Self {
            index: false,
            ..self
        }
    }

    pub fn hide_from_detail(self) -> Self {
        Self {
            detail: false,
            ..self
        }
    }

    pub fn only_on_forms() -> Self {
        Self {
            index: false,
            detail: false,
            forms: true,
        }
    }

    pub fn except_on_forms() -> Self {
        Self {
            index: true,
            detail: true,
            forms: false,
        }
    }
}

/// Validation rules the host applies on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    AlphaDashOrSlash,
}

impl Rule {
    /// Check a submitted string value against the rule.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::AlphaDashOrSlash => value.is_empty() || is_valid_slug(value),
        }
    }
}

/// A layout offered by the flexible content field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutOption {
    pub key: String,
    pub label: String,
}

/// Input widget the host instantiates for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Id,
    Title,
    Text,
    RichText,
    Textarea,
    Boolean,
    Slug,
    SlugPreview,
    DateTime,
    Image,
    BelongsTo {
        resource: String,
        nullable: bool,
    },
    Flexible {
        layouts: Vec<LayoutOption>,
    },
    MultiSelect {
        options: IndexMap<PostId, String>,
        selected: Vec<PostId>,
    },
    Locale,
    DraftButton,
    PublishedState,
    Heading,
}

/// One field of the resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceField {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub widget: Widget,
    pub rules: Vec<Rule>,
    pub visibility: Visibility,
    pub sortable: bool,
    /// Shown even when empty on the detail view.
    pub always_show: bool,
}

impl ResourceField {
    pub fn new(key: &str, label: &str, widget: Widget) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            widget,
            rules: Vec::new(),
            visibility: Visibility::ALL,
            sortable: false,
            always_show: false,
        }
    }

    /// A heading row; headings carry no value.
    pub fn heading(label: &str) -> Self {
        Self::new("", label, Widget::Heading)
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn hide_from_index(mut self) -> Self {
        self.visibility = self.visibility.hide_from_index();
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn always_show(mut self) -> Self {
        self.always_show = true;
        self
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub fields: Vec<ResourceField>,
}

impl Panel {
    pub fn new(title: &str, fields: Vec<ResourceField>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }
}

/// An entry of the resource's field list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceEntry {
    Field(ResourceField),
    Panel(Panel),
}

impl ResourceEntry {
    /// Key of a field entry; None for panels.
    pub fn field_key(&self) -> Option<&str> {
        match self {
            ResourceEntry::Field(field) => Some(field.key.as_str()),
            ResourceEntry::Panel(_) => None,
        }
    }
}

/// Extra fields and panels contributed by the post's page template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateFields {
    pub fields: Vec<ResourceField>,
    pub panels: Vec<Panel>,
}

/// The blog post resource bound to its configuration and content layouts.
#[derive(Debug, Clone, Copy)]
pub struct PostResource<'a> {
    config: &'a BlogConfig,
    layouts: &'a BlockTypeRegistry,
}

impl<'a> PostResource<'a> {
    pub fn new(config: &'a BlogConfig, layouts: &'a BlockTypeRegistry) -> Self {
        Self { config, layouts }
    }

    /// Composer over the post content layouts.
    pub fn composer(&self) -> ContentComposer<'a> {
        ContentComposer::new(self.layouts)
    }

    /// Ordered field list for `post` (None when creating a new post).
    ///
    /// `all_posts` supplies related-post options; it is only read when the
    /// related posts feature is enabled.
    pub fn fields(
        &self,
        post: Option<&Post>,
        all_posts: &[Post],
        template: &TemplateFields,
    ) -> Vec<ResourceEntry> {
        let config = self.config;
        let mut fields = vec![ResourceField::new("id", "ID", Widget::Id).sortable()];

        let title_widget = if config.use_rich_text {
            Widget::RichText
        } else {
            Widget::Title
        };
        fields.push(
            ResourceField::new("title", "Title", title_widget)
                .rule(Rule::Required)
                .always_show(),
        );

        if !config.hide_pinned_post_option {
            fields.push(ResourceField::new("is_pinned", "Is pinned", Widget::Boolean));
        }
        if config.include_in_bloglist_option {
            fields.push(ResourceField::new(
                "include_in_bloglist",
                "Include in bloglist",
                Widget::Boolean,
            ));
        }

        fields.push(
            ResourceField::new("slug", "Slug", Widget::Slug)
                .rule(Rule::Required)
                .rule(Rule::AlphaDashOrSlash)
                .visibility(Visibility::only_on_forms()),
        );
        fields.push(
            ResourceField::new("slug_preview", "Slug", Widget::SlugPreview)
                .visibility(Visibility::except_on_forms()),
        );
        fields.push(
            ResourceField::new("published_at", "Published at", Widget::DateTime)
                .rule(Rule::Required),
        );
        fields.push(ResourceField::new(
            "post_introduction",
            "Post introduction",
            Widget::Textarea,
        ));

        if config.include_featured_image {
            fields.push(ResourceField::new(
                "featured_image",
                "Featured image",
                Widget::Image,
            ));
        }
        if !config.hide_category_selector {
            fields.push(ResourceField::new(
                "category",
                "Category",
                Widget::BelongsTo {
                    resource: "category".to_string(),
                    nullable: true,
                },
            ));
        }

        let layouts = self
            .layouts
            .iter()
            .map(|def| LayoutOption {
                key: def.key.clone(),
                label: def.label.clone(),
            })
            .collect();
        fields.push(
            ResourceField::new("post_content", "Post content", Widget::Flexible { layouts })
                .hide_from_index(),
        );

        if config.include_related_posts {
            fields.push(related_posts_field(post, all_posts));
        }
        if config.localization {
            fields.push(ResourceField::new("locale", "Locale", Widget::Locale));
        }
        if config.drafts {
            fields.push(ResourceField::new("draft", "Draft", Widget::DraftButton));
            fields.push(ResourceField::new(
                "published",
                "State",
                Widget::PublishedState,
            ));
        }

        let mut entries: Vec<ResourceEntry> =
            fields.into_iter().map(ResourceEntry::Field).collect();
        entries.push(ResourceEntry::Panel(Panel::new("SEO", seo_fields())));

        if !template.fields.is_empty() {
            let mut page_data = vec![
                ResourceField::heading("Page data")
                    .visibility(Visibility::ALL.hide_from_detail()),
            ];
            page_data.extend(template.fields.iter().cloned());
            entries.push(ResourceEntry::Panel(Panel::new("Page data", page_data)));
        }
        entries.extend(template.panels.iter().cloned().map(ResourceEntry::Panel));

        debug!(entries = entries.len(), "built post resource fields");
        entries
    }

    /// Decode a post's stored content for editing.
    pub fn load_post_content(&self, post: &Post) -> ComposerResult<Vec<BlockInstance>> {
        self.composer().decode(&post.post_content)
    }

    /// Store edited content on the post, normalized and re-numbered.
    pub fn save_post_content(
        &self,
        post: &mut Post,
        instances: &[BlockInstance],
    ) -> ComposerResult<()> {
        post.post_content = self.composer().encode(instances)?;
        Ok(())
    }

    /// Publish-readiness problems in a post's stored content.
    pub fn publish_errors(&self, post: &Post) -> ComposerResult<Vec<ValidationError>> {
        let instances = self.load_post_content(post)?;
        Ok(self.composer().validate_for_publish(&instances))
    }
}

/// SEO metadata fields, all hidden from the index.
pub fn seo_fields() -> Vec<ResourceField> {
    vec![
        ResourceField::heading("SEO"),
        ResourceField::new("seo_title", "SEO Title", Widget::Text).hide_from_index(),
        ResourceField::new("seo_description", "SEO Description", Widget::Text).hide_from_index(),
        ResourceField::new("seo_image", "SEO Image", Widget::Image).hide_from_index(),
    ]
}

/// Related posts multiselect with options and the current selection.
fn related_posts_field(post: Option<&Post>, all_posts: &[Post]) -> ResourceField {
    let (options, selected) = match post {
        Some(post) => (
            build_related_post_options(all_posts, post.id),
            normalize_related_post_ids(post.id, post.related_posts.iter().copied()),
        ),
        None => (build_related_post_options(all_posts, None), Vec::new()),
    };

    ResourceField::new(
        "related_posts",
        "Related posts",
        Widget::MultiSelect { options, selected },
    )
}

/// Store a related-post selection, dropping self references and duplicates.
pub fn save_related_posts(post: &mut Post, ids: impl IntoIterator<Item = PostId>) {
    post.related_posts = normalize_related_post_ids(post.id, ids);
}

/// Title shown for a post in relation pickers: "Title (slug)".
pub fn display_title(post: &Post) -> String {
    format!("{} ({})", post.title, post.slug)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn visibility_helpers() {
        assert!(!Visibility::only_on_forms().index);
        assert!(Visibility::only_on_forms().forms);
        assert!(!Visibility::except_on_forms().forms);
        assert!(!Visibility::ALL.hide_from_index().index);
        assert!(Visibility::ALL.hide_from_index().detail);
    }

    #[test]
    fn seo_panel_fields() {
        let fields = seo_fields();
        assert_eq!(fields[0].widget, Widget::Heading);
        let keys: Vec<&str> = fields[1..].iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["seo_title", "seo_description", "seo_image"]);
        assert!(fields[1..].iter().all(|f| !f.visibility.index));
    }

    #[test]
    fn rules_check_values() {
        assert!(Rule::Required.check("x"));
        assert!(!Rule::Required.check("  "));
        assert!(Rule::AlphaDashOrSlash.check("news/launch-day"));
        assert!(!Rule::AlphaDashOrSlash.check("launch day"));
        // Emptiness is Required's concern
        assert!(Rule::AlphaDashOrSlash.check(""));
    }

    #[test]
    fn display_title_includes_slug() {
        let post = Post::new(1, "Launch", "news/launch");
        assert_eq!(display_title(&post), "Launch (news/launch)");
    }

    #[test]
    fn save_related_posts_drops_self() {
        let mut post = Post::new(2, "B", "b");
        save_related_posts(&mut post, [1, 2, 3, 1].map(PostId));
        assert_eq!(post.related_posts, vec![PostId(1), PostId(3)]);
    }

    #[test]
    fn field_serializes_with_widget_tag() {
        let field = ResourceField::new("slug", "Slug", Widget::Slug).rule(Rule::AlphaDashOrSlash);
        let json = serde_json::to_value(ResourceEntry::Field(field)).unwrap();
        assert_eq!(json["type"], "field");
        assert_eq!(json["widget"], "slug");
        assert_eq!(json["rules"][0], "alpha_dash_or_slash");
    }
}
