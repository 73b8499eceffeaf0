//! # Rel-RS
//!
//! Hypermedia resource mapping, link construction and identifier translation
//! for entity REST APIs.
//!
//! ## Features
//!
//! - **Resource Mappings**: one consistent `(rel, path, exported)` identity
//!   per entity type and per property, from declarative YAML overrides plus
//!   structural defaults (lower-camel simple name, no pluralization)
//! - **Link Building**: fully-qualified collection, self and association
//!   links under a configured base URI, absolute or root-relative
//! - **Identifier Translation**: capability-probed converter chain between
//!   URI strings and native backend keys, with a pass-through default
//! - **Conversion Services**: ordered, first-supporter-wins delegation for
//!   arbitrary type conversion
//! - **Immutable Registries**: everything is built once at startup and
//!   shared read-only across request threads
//!
//! ## Quick Start
//!
//! ```rust
//! use rel::prelude::*;
//!
//! let config = RestConfig::from_yaml_str(r#"
//!     base_uri: /api
//!     entities:
//!       - name: Person
//!         rel: people
//!         id: uuid
//! "#).unwrap();
//!
//! let mappings = ResourceMappings::from_config(&config).unwrap();
//! let base = BaseUri::from_config(&config).unwrap();
//!
//! let request = RequestContext::new("http", "localhost", None, "/api/person");
//! let builder = LinkBuilder::new(&base, &request);
//!
//! let mapping = mappings.mapping_for("Person").unwrap();
//! let link = builder.resource_link(mapping).unwrap();
//! assert_eq!(link.rel, "people");
//! assert_eq!(link.href, "http://localhost/api/person");
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod mappings;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        convert::{
            ConversionService, DelegatingConversionService, SimpleConversionService,
            TypeDescriptor,
        },
        error::{ErrorResponse, RelError},
        identifier::{
            BackendId, BackendIdConverter, BackendIdConverters, DefaultIdConverter, IdKind,
        },
        mapping::ResourceMapping,
    };

    // === Mappings ===
    pub use crate::mappings::ResourceMappings;

    // === Links ===
    pub use crate::links::{BaseUri, Link, LinkBuilder, RequestContext, SELF_REL};

    // === Config ===
    pub use crate::config::{EntityResourceConfig, PropertyResourceConfig, RestConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
