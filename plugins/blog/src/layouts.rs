//! Content layouts offered in the post body.

use postwright_kernel::BlogConfig;
use postwright_kernel::content::{BlockTypeDefinition, BlockTypeRegistry};
use postwright_kernel::error::ComposerResult;
use postwright_sdk::prelude::*;

pub const TEXT: &str = "text";
pub const IMAGE: &str = "image";
pub const OTHER_MEDIA: &str = "other_media";
pub const TEXT_WYSIWYG: &str = "text_wysiwyg";

/// Register the post content layouts selected by `config`, in editor order.
pub fn register_post_content_layouts(
    registry: &mut BlockTypeRegistry,
    config: &BlogConfig,
) -> ComposerResult<()> {
    let text_kind = if config.use_rich_text {
        FieldKind::RichText
    } else {
        FieldKind::LongText
    };

    registry.register(
        BlockTypeDefinition::new(TEXT, "Text section")
            .field(BlockField::new("text_content", text_kind).label("Text content")),
    )?;

    registry.register(
        BlockTypeDefinition::new(IMAGE, "Image section")
            .field(
                BlockField::new("image", FieldKind::Image)
                    .label("Image")
                    .required(),
            )
            .field(BlockField::new("caption", FieldKind::Text).label("Image caption"))
            .field(BlockField::new("alt", FieldKind::Text).label("Alt (image alternate text)")),
    )?;

    registry.register(
        BlockTypeDefinition::new(OTHER_MEDIA, "Other embed media section")
            .field(
                BlockField::new("media_code", FieldKind::LongText)
                    .label("Embed media code (twitter, iframe, etc.)"),
            )
            .field(BlockField::new("caption", FieldKind::Text).label("Media caption")),
    )?;

    if config.include_wysiwyg_text_layout {
        registry.register(
            BlockTypeDefinition::new(TEXT_WYSIWYG, "Text section in WYSIWYG editor").field(
                BlockField::new("text_content_wysiwyg", FieldKind::RichText)
                    .label("Text section in WYSIWYG editor"),
            ),
        )?;
    }

    Ok(())
}

/// Build a registry holding only the post content layouts.
pub fn post_content_registry(config: &BlogConfig) -> ComposerResult<BlockTypeRegistry> {
    let mut registry = BlockTypeRegistry::new();
    register_post_content_layouts(&mut registry, config)?;
    Ok(registry)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use postwright_kernel::ComposerError;

    #[test]
    fn default_layouts() {
        let registry = post_content_registry(&BlogConfig::default()).unwrap();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec![TEXT, IMAGE, OTHER_MEDIA]);

        let text = registry.get(TEXT).unwrap();
        assert_eq!(
            text.field_def("text_content").unwrap().kind,
            FieldKind::LongText
        );
    }

    #[test]
    fn rich_text_switches_text_kind() {
        let config = BlogConfig {
            use_rich_text: true,
            ..BlogConfig::default()
        };
        let registry = post_content_registry(&config).unwrap();
        assert_eq!(
            registry
                .get(TEXT)
                .unwrap()
                .field_def("text_content")
                .unwrap()
                .kind,
            FieldKind::RichText
        );
    }

    #[test]
    fn wysiwyg_layout_is_optional() {
        let config = BlogConfig {
            include_wysiwyg_text_layout: true,
            ..BlogConfig::default()
        };
        let registry = post_content_registry(&config).unwrap();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(TEXT_WYSIWYG));
    }

    #[test]
    fn image_file_is_required() {
        let registry = post_content_registry(&BlogConfig::default()).unwrap();
        let image = registry.get(IMAGE).unwrap();
        let required: Vec<&str> = image.required_fields().map(|f| f.key.as_str()).collect();
        assert_eq!(required, vec!["image"]);
    }

    #[test]
    fn registering_twice_fails() {
        let config = BlogConfig::default();
        let mut registry = post_content_registry(&config).unwrap();
        let err = register_post_content_layouts(&mut registry, &config).unwrap_err();
        assert_eq!(
            err,
            ComposerError::DuplicateKey {
                key: TEXT.to_string()
            }
        );
    }
}
