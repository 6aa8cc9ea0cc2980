//! Data model for the configuration variable API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named, reusable text snippet usable across agent configurations
///
/// Records that have never been persisted carry an empty `id`; the backend
/// assigns a non-empty `id` on creation and all subsequent operations address
/// the record by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationVariable {
    /// Backend-assigned identifier, empty until the record is persisted
    pub id: String,

    /// Display/reference name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// The variable's value
    pub content: String,
}

impl ConfigurationVariable {
    /// Create a not-yet-persisted variable
    pub fn new(name: &str, description: &str, content: &str) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            description: description.to_string(),
            content: content.to_string(),
        }
    }

    /// Whether the backend has assigned this record an id
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Response body of the collection listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfigurationVariablesResponse {
    /// The full set of configuration variables known to the backend
    pub configuration_variables: Vec<ConfigurationVariable>,
}

/// Server-side validation outcome for a configuration variable
///
/// Fields are individually defaulted so any subset the server sends parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationResult {
    /// True when the variable was rejected
    pub failed: bool,

    /// Per-field validation messages
    pub errors: HashMap<String, Vec<String>>,

    /// Additional context for the reported errors
    pub error_context: HashMap<String, Vec<String>>,
}

impl ValidationResult {
    /// Whether the server reported any problem with the variable
    pub fn has_errors(&self) -> bool {
        self.failed || !self.errors.is_empty()
    }
}
