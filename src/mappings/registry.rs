//! Resource mapping registry
//!
//! Resolves a [`ResourceMapping`] for every registered entity type and for
//! any (entity type, property) pair by combining declarative overrides from
//! the configuration with structural defaults. The registry is built once at
//! startup and is read-only afterwards; concurrent lookups need no locking.
//! A rebuild (e.g. on metadata reload) replaces the whole registry, never
//! mutates it in place.

use crate::config::{EntityResourceConfig, PropertyResourceConfig, RestConfig};
use crate::core::error::{ConfigError, MappingError, RelError};
use crate::core::mapping::ResourceMapping;
use crate::core::naming::{has_text_except_slash, lower_camel, simple_name, strip_leading_slash};
use std::collections::HashMap;

/// Immutable registry of resource mappings, keyed by entity type name and by
/// (entity type, property) pairs
///
/// Resolution precedence is most-specific-wins: a property-level override
/// beats a type-level one, which beats the structural default. Rel and path
/// are independent axes; an overridden rel with no path override keeps the
/// structural path.
pub struct ResourceMappings {
    types: HashMap<String, ResourceMapping>,
    properties: HashMap<(String, String), ResourceMapping>,
}

impl ResourceMappings {
    /// Build the registry from the declarative configuration
    ///
    /// Fails when an entity type is declared twice or two entity types
    /// resolve to the same path.
    pub fn from_config(config: &RestConfig) -> Result<Self, RelError> {
        let mut types: HashMap<String, ResourceMapping> = HashMap::new();
        let mut properties = HashMap::new();
        let mut paths: HashMap<String, String> = HashMap::new();

        for entity in &config.entities {
            if types.contains_key(&entity.name) {
                return Err(ConfigError::DuplicateEntity {
                    name: entity.name.clone(),
                }
                .into());
            }

            let mapping = resolve_type(entity);

            if let Some(other) = paths.insert(mapping.path.clone(), entity.name.clone()) {
                return Err(ConfigError::DuplicatePath {
                    path: mapping.path.clone(),
                    entity_type: entity.name.clone(),
                    other,
                }
                .into());
            }

            tracing::debug!(
                entity_type = %entity.name,
                rel = %mapping.rel,
                path = %mapping.path,
                exported = mapping.exported,
                "registered resource mapping"
            );

            for property in &entity.properties {
                properties.insert(
                    (entity.name.clone(), property.name.clone()),
                    resolve_property(property),
                );
            }

            types.insert(entity.name.clone(), mapping);
        }

        Ok(Self { types, properties })
    }

    /// Resolve the mapping for an entity type
    pub fn mapping_for(&self, entity_type: &str) -> Result<&ResourceMapping, RelError> {
        self.types
            .get(entity_type)
            .ok_or_else(|| unknown(entity_type))
    }

    /// Resolve the mapping for a property of an entity type
    ///
    /// Total over registered entity types: a property without a declared
    /// fragment resolves to its structural default.
    pub fn property_mapping_for(
        &self,
        entity_type: &str,
        property: &str,
    ) -> Result<ResourceMapping, RelError> {
        if !self.types.contains_key(entity_type) {
            return Err(unknown(entity_type));
        }

        let key = (entity_type.to_string(), property.to_string());
        Ok(self
            .properties
            .get(&key)
            .cloned()
            .unwrap_or_else(|| structural_default(property)))
    }

    /// Whether the registry knows the entity type
    pub fn contains(&self, entity_type: &str) -> bool {
        self.types.contains_key(entity_type)
    }

    /// Iterate over all exported type mappings, with their entity type names
    pub fn exported(&self) -> impl Iterator<Item = (&str, &ResourceMapping)> {
        self.types
            .iter()
            .filter(|(_, mapping)| mapping.is_exported())
            .map(|(name, mapping)| (name.as_str(), mapping))
    }

    /// Number of registered entity types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether any entity type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn unknown(entity_type: &str) -> RelError {
    MappingError::UnknownEntityType {
        entity_type: entity_type.to_string(),
    }
    .into()
}

/// The structural default: the identifier as written, lower-camel-cased,
/// used verbatim for both rel and path
fn structural_default(name: &str) -> ResourceMapping {
    ResourceMapping::new(lower_camel(simple_name(name)), lower_camel(simple_name(name)))
}

fn resolve_type(entity: &EntityResourceConfig) -> ResourceMapping {
    let mapping = resolve(
        &entity.name,
        entity.rel.as_deref(),
        entity.path.as_deref(),
        entity.exported,
    );
    match &entity.description {
        Some(description) => mapping.with_description(description),
        None => mapping,
    }
}

fn resolve_property(property: &PropertyResourceConfig) -> ResourceMapping {
    let mapping = resolve(
        &property.name,
        property.rel.as_deref(),
        property.path.as_deref(),
        property.exported,
    );
    match &property.description {
        Some(description) => mapping.with_description(description),
        None => mapping,
    }
}

/// Apply the resolution algorithm for one type or property, each field
/// independently: declared override first, structural default otherwise
fn resolve(
    name: &str,
    rel: Option<&str>,
    path: Option<&str>,
    exported: Option<bool>,
) -> ResourceMapping {
    let structural = lower_camel(simple_name(name));

    let rel = rel
        .filter(|r| !r.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| structural.clone());

    let path = path
        .filter(|p| has_text_except_slash(p))
        .map(|p| strip_leading_slash(p).to_string())
        .unwrap_or(structural);

    ResourceMapping::new(rel, path).with_exported(exported.unwrap_or(true))
}
