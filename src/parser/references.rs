use std::collections::HashMap;

use serde::Serialize;

use crate::utils::normalize_label;

/// A link reference definition: `[label]: destination "title"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDefinition {
    pub href: String,
    pub title: String,
}

/// Document-wide table of reference definitions, keyed by normalized label.
/// Filled during block parsing, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    definitions: HashMap<String, ReferenceDefinition>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. The first definition of a label wins; returns false
    /// if the label was already defined.
    pub fn add(&mut self, label: &str, href: String, title: String) -> bool {
        let key = normalize_label(label);
        if self.definitions.contains_key(&key) {
            log::trace!("ignoring duplicate reference definition [{}]", key);
            return false;
        }
        self.definitions
            .insert(key, ReferenceDefinition { href, title });
        true
    }

    /// Look up a definition by label (case- and whitespace-insensitive).
    pub fn get(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.definitions.get(&normalize_label(label))
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }
}
