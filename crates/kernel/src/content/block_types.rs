//! Block type registry.
//!
//! Provides:
//! - `BlockTypeDefinition`: schema and label for a single block type
//! - `BlockTypeRegistry`: ordered registry of all known block types
//! - `install` / `global`: the process-wide registry, frozen after startup
//!
//! The registry is populated while the host configures itself, then handed to
//! `install`. From that point it is immutable and shared by reference, so
//! readers need no locking.

use std::collections::HashSet;
use std::sync::OnceLock;

use indexmap::IndexMap;
use postwright_sdk::types::BlockField;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ComposerError, ComposerResult};

/// Definition of a single block type (a "layout" in the post editor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeDefinition {
    /// Machine name of the block type (e.g. "text", "image").
    pub key: String,
    /// Human-readable label (e.g. "Text section").
    pub label: String,
    /// Fields in display order.
    pub fields: Vec<BlockField>,
}

impl BlockTypeDefinition {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field definition.
    pub fn field(mut self, field: BlockField) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field definition by key.
    pub fn field_def(&self, key: &str) -> Option<&BlockField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Check whether the schema declares a field.
    pub fn has_field(&self, key: &str) -> bool {
        self.field_def(key).is_some()
    }

    /// Iterate over the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &BlockField> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// Registry of block type definitions, keyed by block type key.
///
/// Iteration follows registration order, which is the order layouts are
/// offered to editors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockTypeRegistry {
    types: IndexMap<String, BlockTypeDefinition>,
}

impl BlockTypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single block type definition.
    ///
    /// Fails if the key is taken or the definition repeats a field key. The
    /// registry is unchanged on failure.
    pub fn register(&mut self, definition: BlockTypeDefinition) -> ComposerResult<()> {
        if self.types.contains_key(&definition.key) {
            return Err(ComposerError::DuplicateKey {
                key: definition.key,
            });
        }

        let mut seen = HashSet::new();
        for field in &definition.fields {
            if !seen.insert(field.key.as_str()) {
                return Err(ComposerError::DuplicateField {
                    type_key: definition.key.clone(),
                    field_key: field.key.clone(),
                });
            }
        }

        self.types.insert(definition.key.clone(), definition);
        Ok(())
    }

    /// Look up a block type by key.
    pub fn get(&self, key: &str) -> Option<&BlockTypeDefinition> {
        self.types.get(key)
    }

    /// Check whether a block type is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    /// Return the number of registered block types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Registered definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockTypeDefinition> {
        self.types.values()
    }
}

static GLOBAL_REGISTRY: OnceLock<BlockTypeRegistry> = OnceLock::new();

/// Freeze `registry` as the process-wide block type registry.
///
/// Can succeed only once per process; later calls return `RegistryFrozen`
/// and leave the installed registry untouched.
pub fn install(registry: BlockTypeRegistry) -> ComposerResult<&'static BlockTypeRegistry> {
    let count = registry.len();
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| ComposerError::RegistryFrozen)?;
    info!(block_types = count, "block type registry frozen");
    GLOBAL_REGISTRY.get().ok_or(ComposerError::RegistryFrozen)
}

/// The process-wide registry, if `install` has run.
pub fn global() -> Option<&'static BlockTypeRegistry> {
    GLOBAL_REGISTRY.get()
}
