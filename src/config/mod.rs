//! Configuration loading and management
//!
//! The configuration is the declarative metadata source for the mapping
//! registry: per entity type and per property an optional `(rel, path,
//! exported, description)` fragment, the native key kind, and an optional
//! base URI. Absence of any field means "use the structural default",
//! independently per field.

use crate::core::identifier::IdKind;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Declarative mapping fragment for one property of an entity type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResourceConfig {
    /// Property name as written in the domain model (e.g. "creditCard")
    pub name: String,

    /// Relation name override
    #[serde(default)]
    pub rel: Option<String>,

    /// Path segment override; a leading slash is tolerated and removed
    #[serde(default)]
    pub path: Option<String>,

    /// Whether the property is advertised as a link and addressable
    #[serde(default)]
    pub exported: Option<bool>,

    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// Declarative mapping fragment for one entity type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityResourceConfig {
    /// Simple type name as written in the domain model (e.g. "PlainPerson")
    pub name: String,

    /// Relation name override
    #[serde(default)]
    pub rel: Option<String>,

    /// Path segment override; a leading slash is tolerated and removed
    #[serde(default)]
    pub path: Option<String>,

    /// Whether the resource is exported at all
    #[serde(default)]
    pub exported: Option<bool>,

    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,

    /// Native key kind of the backing store
    #[serde(default)]
    pub id: IdKind,

    /// Declared property fragments
    #[serde(default)]
    pub properties: Vec<PropertyResourceConfig>,
}

/// Complete configuration for the resource mapping system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestConfig {
    /// Configured base URI, absolute or root-relative; empty or unset means
    /// "derive entirely from the observed request"
    #[serde(default)]
    pub base_uri: Option<String>,

    /// Entity type declarations
    #[serde(default)]
    pub entities: Vec<EntityResourceConfig>,
}

impl RestConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Find the declaration for an entity type
    pub fn find_entity(&self, name: &str) -> Option<&EntityResourceConfig> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            base_uri: None,
            entities: vec![
                EntityResourceConfig {
                    name: "PlainPerson".to_string(),
                    rel: None,
                    path: None,
                    exported: None,
                    description: None,
                    id: IdKind::Text,
                    properties: vec![],
                },
                EntityResourceConfig {
                    name: "AnnotatedPerson".to_string(),
                    rel: Some("people".to_string()),
                    path: None,
                    exported: Some(false),
                    description: Some("People with overridden rel".to_string()),
                    id: IdKind::Uuid,
                    properties: vec![PropertyResourceConfig {
                        name: "findByFirstName".to_string(),
                        rel: Some("firstname".to_string()),
                        path: Some("firstname".to_string()),
                        exported: Some(true),
                        description: None,
                    }],
                },
                EntityResourceConfig {
                    name: "Order".to_string(),
                    rel: None,
                    path: Some("orders".to_string()),
                    exported: None,
                    description: None,
                    id: IdKind::Int,
                    properties: vec![PropertyResourceConfig {
                        name: "creditCard".to_string(),
                        rel: None,
                        path: None,
                        exported: Some(false),
                        description: None,
                    }],
                },
            ],
        }
    }
}
