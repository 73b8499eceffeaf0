//! Resource mapping value describing an exported resource identity
//!
//! A [`ResourceMapping`] captures everything the link layer needs to know
//! about one entity type or one property: the hypermedia relation name used
//! by clients to navigate, the URI path segment used to address the resource,
//! and whether the resource is exported at all. Rel and path are independent
//! axes; an overridden rel does not change the path and vice versa.

use serde::{Deserialize, Serialize};

/// Immutable description of one entity type's or one property's exported
/// identity.
///
/// Instances are built exclusively by the
/// [`ResourceMappings`](crate::mappings::ResourceMappings) registry at
/// startup and never mutated afterwards. Equality is by field values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceMapping {
    /// The relation name a client uses to identify the link
    pub rel: String,

    /// The URI path segment used to address the resource
    pub path: String,

    /// Whether the resource is advertised and independently addressable
    ///
    /// When `false`, no link is ever emitted for this mapping and the
    /// relation is not advertised.
    pub exported: bool,

    /// Optional human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceMapping {
    /// Create a new exported mapping
    pub fn new(rel: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            path: path.into(),
            exported: true,
            description: None,
        }
    }

    /// Set the exported flag
    pub fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether link building should be skipped entirely for this mapping
    pub fn is_exported(&self) -> bool {
        self.exported
    }
}
