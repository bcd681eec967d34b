use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::tag::{DefinitionKey, TagDefinition};

/// Set of recognized tags.
///
/// Lookups are case-insensitive on the tag name. Definitions keep their registration order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    /// Registered definitions, in order.
    definitions: Vec<Arc<TagDefinition>>,

    /// Index into `definitions`.
    index: HashMap<DefinitionKey, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// A definition with the same name and option usage replaces the previous one.
    pub fn register(&mut self, definition: TagDefinition) {
        let key = definition.key();
        let definition = Arc::new(definition);
        match self.index.get(&key) {
            Some(idx) => {
                debug!("replacing tag definition {key:?}");
                self.definitions[*idx] = definition;
            }
            None => {
                debug!("registering tag definition {key:?}");
                self.index.insert(key, self.definitions.len());
                self.definitions.push(definition);
            }
        }
    }

    pub fn register_set(&mut self, definitions: impl IntoIterator<Item = TagDefinition>) {
        for definition in definitions {
            self.register(definition);
        }
    }

    pub fn exists(&self, tag_name: &str, use_option: bool) -> bool {
        self.index
            .contains_key(&DefinitionKey::new(tag_name, use_option))
    }

    pub fn lookup(&self, tag_name: &str, use_option: bool) -> Option<&Arc<TagDefinition>> {
        self.index
            .get(&DefinitionKey::new(tag_name, use_option))
            .map(|idx| &self.definitions[*idx])
    }

    /// Check whether any definition, with or without option, is named `tag_name`.
    pub fn has_name(&self, tag_name: &str) -> bool {
        self.exists(tag_name, false) || self.exists(tag_name, true)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagDefinition> {
        self.definitions.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
