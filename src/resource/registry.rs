//! Resource Registry - Load resource definitions from JSON
//!
//! This module loads the backend resource definitions from embedded JSON
//! files and provides lookup functions for the rest of the application.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[
    include_str!("../resources/categorias.json"),
    include_str!("../resources/livros.json"),
];

/// Column definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDef {
    pub header: String,
    pub json_path: String,
    pub width: u16,
}

/// Kind of form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Select,
}

/// Form field definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    /// Wire name of the field in the JSON record
    pub name: String,
    /// Label shown next to the input
    pub label: String,
    pub kind: FieldKind,
    /// For selects: resource key whose collection supplies the options
    #[serde(default)]
    pub options_source: Option<String>,
}

/// Resource definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub display_name: String,
    /// Path segment of the collection endpoint (e.g. "categorias")
    pub collection_path: String,
    pub id_field: String,
    /// Field used when naming a record to the user
    pub name_field: String,
    /// True when the create form supplies the id (the backend assigns it
    /// otherwise)
    #[serde(default)]
    pub client_supplied_id: bool,
    pub columns: Vec<ColumnDef>,
    pub form_fields: Vec<FieldDef>,
}

impl ResourceDef {
    /// Form fields applicable to the given form kind. The id field only
    /// appears on the create form of client-supplied-id resources; on edit
    /// the id comes from the record being edited.
    pub fn fields_for_edit(&self) -> impl Iterator<Item = &FieldDef> {
        self.form_fields
            .iter()
            .filter(move |f| f.name != self.id_field)
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource definition by key
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(key)
}

/// Get all resource keys (for the command box)
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads_successfully() {
        let registry = get_registry();
        assert!(
            !registry.resources.is_empty(),
            "Registry should have resources"
        );
    }

    #[test]
    fn test_categorias_resource_exists() {
        let resource = get_resource("categorias");
        assert!(resource.is_some(), "Categories resource should exist");

        let resource = resource.unwrap();
        assert_eq!(resource.display_name, "Categories");
        assert_eq!(resource.collection_path, "categorias");
        assert!(!resource.client_supplied_id);
        assert_eq!(resource.name_field, "nomeCategoria");
    }

    #[test]
    fn test_livros_id_is_client_supplied() {
        let resource = get_resource("livros").unwrap();
        assert!(resource.client_supplied_id);
        assert!(
            resource.form_fields.iter().any(|f| f.name == "id"),
            "Book create form should carry the id field"
        );
    }

    #[test]
    fn test_edit_fields_omit_client_supplied_id() {
        let resource = get_resource("livros").unwrap();
        assert!(
            resource.fields_for_edit().all(|f| f.name != "id"),
            "Edit form should not offer the id field"
        );
    }

    #[test]
    fn test_livros_select_sources_categorias() {
        let resource = get_resource("livros").unwrap();
        let select = resource
            .form_fields
            .iter()
            .find(|f| f.kind == FieldKind::Select)
            .expect("Books should have a category select");
        assert_eq!(select.options_source.as_deref(), Some("categorias"));
    }

    #[test]
    fn test_get_all_resource_keys() {
        let keys = get_all_resource_keys();
        assert_eq!(keys, vec!["categorias", "livros"]);
    }
}
