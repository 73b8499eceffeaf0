//! Resource mapping resolution
//!
//! Combines declarative configuration fragments with structural defaults to
//! produce one consistent [`ResourceMapping`](crate::core::mapping::ResourceMapping)
//! per entity type and per property.

pub mod registry;

pub use registry::ResourceMappings;
