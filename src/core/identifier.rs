//! Backend identifier translation between URI strings and native keys
//!
//! A URI path segment carries an identifier in string form; the persistence
//! layer uses a native key type (string, integer, UUID). A
//! [`BackendIdConverter`] translates between the two for the entity types it
//! supports. Converters are capability-probed in registration order, first
//! supporter wins, and a pass-through default conceptually sits last so it
//! only applies when no specific converter claimed the type.
//!
//! Round-trip law: `from_request_id(to_request_id(x)) == x` for every valid
//! identifier of a supported type.

use crate::config::RestConfig;
use crate::core::convert::DelegatingConversionService;
use crate::core::error::{IdentifierError, RelError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Native identifier representation used by the persistence layer
///
/// The entity type name stays a plain string everywhere in this crate; the
/// identifier is the only place where the backend's key type shows through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendId {
    /// String-compatible key, used as-is
    Text(String),

    /// Numeric key, rendered in decimal
    Int(i64),

    /// UUID key, rendered in canonical textual form
    Uuid(Uuid),
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendId::Text(s) => write!(f, "{}", s),
            BackendId::Int(n) => write!(f, "{}", n),
            BackendId::Uuid(u) => write!(f, "{}", u),
        }
    }
}

/// The native key kind an entity type declares in its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    /// String-compatible keys (the default)
    #[default]
    Text,

    /// Numeric keys
    Int,

    /// UUID keys
    Uuid,
}

/// Converter between request identifier strings and backend identifiers,
/// scoped to the entity types it declares support for
pub trait BackendIdConverter: Send + Sync {
    /// Whether this converter handles identifiers of the given entity type
    fn supports(&self, entity_type: &str) -> bool;

    /// Parse the string form taken from a URI path segment into the
    /// backend's native identifier
    fn from_request_id(&self, id: &str, entity_type: &str) -> Result<BackendId, RelError>;

    /// Render the backend identifier as the string to place in a generated
    /// URI
    fn to_request_id(&self, id: &BackendId, entity_type: &str) -> String;
}

/// Pass-through converter for backends that already use string-compatible
/// keys; supports every entity type
#[derive(Debug, Default)]
pub struct DefaultIdConverter;

impl BackendIdConverter for DefaultIdConverter {
    fn supports(&self, _entity_type: &str) -> bool {
        true
    }

    fn from_request_id(&self, id: &str, _entity_type: &str) -> Result<BackendId, RelError> {
        Ok(BackendId::Text(id.to_string()))
    }

    fn to_request_id(&self, id: &BackendId, _entity_type: &str) -> String {
        id.to_string()
    }
}

/// Converter for entity types with non-string keys, backed by the
/// [`DelegatingConversionService`] for the actual parsing and rendering
pub struct ConvertingIdConverter {
    kinds: HashMap<String, IdKind>,
    conversions: Arc<DelegatingConversionService>,
}

impl ConvertingIdConverter {
    /// Create a converter scoped to the entity types in `kinds`
    pub fn new(
        kinds: HashMap<String, IdKind>,
        conversions: Arc<DelegatingConversionService>,
    ) -> Self {
        Self { kinds, conversions }
    }

    fn invalid(&self, id: &str, entity_type: &str, source: RelError) -> RelError {
        IdentifierError::InvalidFormat {
            value: id.to_string(),
            entity_type: entity_type.to_string(),
            reason: source.to_string(),
        }
        .into()
    }
}

impl BackendIdConverter for ConvertingIdConverter {
    fn supports(&self, entity_type: &str) -> bool {
        // Text-keyed entities fall through to the default converter
        matches!(
            self.kinds.get(entity_type),
            Some(IdKind::Int) | Some(IdKind::Uuid)
        )
    }

    fn from_request_id(&self, id: &str, entity_type: &str) -> Result<BackendId, RelError> {
        match self.kinds.get(entity_type) {
            Some(IdKind::Int) => self
                .conversions
                .convert_to::<String, i64>(&id.to_string())
                .map(BackendId::Int)
                .map_err(|e| self.invalid(id, entity_type, e)),
            Some(IdKind::Uuid) => self
                .conversions
                .convert_to::<String, Uuid>(&id.to_string())
                .map(BackendId::Uuid)
                .map_err(|e| self.invalid(id, entity_type, e)),
            _ => Ok(BackendId::Text(id.to_string())),
        }
    }

    fn to_request_id(&self, id: &BackendId, _entity_type: &str) -> String {
        match id {
            BackendId::Text(s) => s.clone(),
            BackendId::Int(n) => self
                .conversions
                .convert_to::<i64, String>(n)
                .unwrap_or_else(|_| n.to_string()),
            BackendId::Uuid(u) => self
                .conversions
                .convert_to::<Uuid, String>(u)
                .unwrap_or_else(|_| u.to_string()),
        }
    }
}

/// Ordered registry of identifier converters
///
/// Selection is a linear scan over the registered converters; the first one
/// whose `supports` returns `true` wins. The pass-through default sits after
/// all registered converters, so selection always succeeds.
pub struct BackendIdConverters {
    converters: Vec<Arc<dyn BackendIdConverter>>,
    fallback: DefaultIdConverter,
}

impl BackendIdConverters {
    /// Create a registry from converters in priority order
    pub fn new(converters: Vec<Arc<dyn BackendIdConverter>>) -> Self {
        Self {
            converters,
            fallback: DefaultIdConverter,
        }
    }

    /// Build the registry from the declarative configuration: one
    /// [`ConvertingIdConverter`] scoped to the entity types with non-string
    /// keys, backed by the given conversion service
    pub fn from_config(config: &RestConfig, conversions: Arc<DelegatingConversionService>) -> Self {
        let kinds: HashMap<String, IdKind> = config
            .entities
            .iter()
            .map(|entity| (entity.name.clone(), entity.id))
            .collect();

        tracing::debug!(entities = kinds.len(), "registered identifier converters");

        Self::new(vec![Arc::new(ConvertingIdConverter::new(
            kinds,
            conversions,
        ))])
    }

    /// Select the converter for an entity type
    pub fn converter_for(&self, entity_type: &str) -> &dyn BackendIdConverter {
        for converter in &self.converters {
            if converter.supports(entity_type) {
                return converter.as_ref();
            }
        }
        &self.fallback
    }

    /// Parse a request identifier with the selected converter
    pub fn from_request_id(&self, id: &str, entity_type: &str) -> Result<BackendId, RelError> {
        self.converter_for(entity_type).from_request_id(id, entity_type)
    }

    /// Render a backend identifier with the selected converter
    pub fn to_request_id(&self, id: &BackendId, entity_type: &str) -> String {
        self.converter_for(entity_type).to_request_id(id, entity_type)
    }
}
