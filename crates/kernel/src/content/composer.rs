//! Content block composer.
//!
//! Converts between the flat storage representation of a post body
//! (`RawBlock` records) and ordered, schema-checked `BlockInstance`s, and
//! checks instances for publish readiness.

use postwright_sdk::types::RawBlock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::block_types::BlockTypeRegistry;
use super::field_kinds;
use crate::error::{ComposerError, ComposerResult, ValidationError};

/// One block of a post body, ready for editing or rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    pub type_key: String,
    /// Render order as stored. Re-numbered on encode.
    pub ordinal: i64,
    pub fields: Map<String, Value>,
}

impl BlockInstance {
    pub fn new(type_key: impl Into<String>) -> Self {
        Self {
            type_key: type_key.into(),
            ordinal: 0,
            fields: Map::new(),
        }
    }

    /// Add a field value.
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }
}

/// Composer bound to a block type registry.
#[derive(Debug, Clone, Copy)]
pub struct ContentComposer<'r> {
    registry: &'r BlockTypeRegistry,
}

impl<'r> ContentComposer<'r> {
    pub fn new(registry: &'r BlockTypeRegistry) -> Self {
        Self { registry }
    }

    /// The registry this composer reads.
    pub fn registry(&self) -> &'r BlockTypeRegistry {
        self.registry
    }

    /// Decode stored blocks into instances ordered by ordinal.
    ///
    /// Blocks with equal ordinals keep their stored order. Fails on the first
    /// block that names an unregistered type, carries a field outside its
    /// schema, or holds a value its field kind does not accept.
    pub fn decode(&self, raw: &[RawBlock]) -> ComposerResult<Vec<BlockInstance>> {
        let mut instances = Vec::with_capacity(raw.len());

        for (index, block) in raw.iter().enumerate() {
            let definition = self.registry.get(&block.type_key).ok_or_else(|| {
                ComposerError::UnknownBlockType {
                    index,
                    type_key: block.type_key.clone(),
                }
            })?;

            let mut fields = Map::new();
            for (key, value) in &block.fields {
                let Some(field) = definition.field_def(key) else {
                    return Err(ComposerError::SchemaMismatch {
                        index,
                        type_key: block.type_key.clone(),
                        field_key: key.clone(),
                    });
                };

                let kind = field_kinds::handler(field.kind);
                if !(kind.accepts)(value) {
                    return Err(ComposerError::InvalidFieldValue {
                        index,
                        type_key: block.type_key.clone(),
                        field_key: key.clone(),
                        kind: field.kind,
                    });
                }
                fields.insert(key.clone(), (kind.normalize)(value.clone()));
            }

            instances.push(BlockInstance {
                type_key: block.type_key.clone(),
                ordinal: block.ordinal,
                fields,
            });
        }

        // Vec::sort_by_key is stable, so colliding ordinals keep source order
        instances.sort_by_key(|instance| instance.ordinal);

        debug!(blocks = instances.len(), "decoded post content");
        Ok(instances)
    }

    /// Encode instances into stored blocks.
    ///
    /// Ordinals are re-numbered `0..n` in input order. Fields that the block
    /// type no longer declares are dropped. A declared field holding a value
    /// its kind does not accept fails, so stored content always decodes.
    pub fn encode(&self, instances: &[BlockInstance]) -> ComposerResult<Vec<RawBlock>> {
        let mut raw = Vec::with_capacity(instances.len());

        for (index, instance) in instances.iter().enumerate() {
            let definition = self.registry.get(&instance.type_key).ok_or_else(|| {
                ComposerError::UnknownBlockType {
                    index,
                    type_key: instance.type_key.clone(),
                }
            })?;

            let mut fields = Map::new();
            for (key, value) in &instance.fields {
                match definition.field_def(key) {
                    Some(field) => {
                        let kind = field_kinds::handler(field.kind);
                        if !(kind.accepts)(value) {
                            return Err(ComposerError::InvalidFieldValue {
                                index,
                                type_key: instance.type_key.clone(),
                                field_key: key.clone(),
                                kind: field.kind,
                            });
                        }
                        fields.insert(key.clone(), (kind.normalize)(value.clone()));
                    }
                    None => {
                        warn!(
                            block = index,
                            type_key = %instance.type_key,
                            field = %key,
                            "dropping field not in block type schema"
                        );
                    }
                }
            }

            raw.push(RawBlock {
                type_key: instance.type_key.clone(),
                ordinal: index as i64,
                fields,
            });
        }

        debug!(blocks = raw.len(), "encoded post content");
        Ok(raw)
    }

    /// Check instances for publish readiness.
    ///
    /// Reports every required field that is absent or empty, values of the
    /// wrong shape, and blocks of unregistered types. Never fails; an empty
    /// list means the content may be published.
    pub fn validate_for_publish(&self, instances: &[BlockInstance]) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (index, instance) in instances.iter().enumerate() {
            let Some(definition) = self.registry.get(&instance.type_key) else {
                warn!(
                    block = index,
                    type_key = %instance.type_key,
                    "publish validation met an unregistered block type"
                );
                errors.push(ValidationError::unknown_block_type(index));
                continue;
            };

            for field in &definition.fields {
                let kind = field_kinds::handler(field.kind);
                let value = instance.fields.get(&field.key);

                if let Some(v) = value
                    && !(kind.accepts)(v)
                {
                    errors.push(ValidationError::invalid_value(index, &field.key));
                    continue;
                }

                if field.required && value.is_none_or(|v| (kind.is_empty)(v)) {
                    errors.push(ValidationError::missing_required(index, &field.key));
                }
            }
        }

        errors
    }
}
