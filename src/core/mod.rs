//! Core module containing fundamental types for the crate

pub mod convert;
pub mod error;
pub mod identifier;
pub mod mapping;
pub mod naming;

pub use convert::{ConversionService, DelegatingConversionService, SimpleConversionService, TypeDescriptor};
pub use error::{ConfigError, ConvertError, ErrorResponse, IdentifierError, MappingError, RelError};
pub use identifier::{BackendId, BackendIdConverter, BackendIdConverters, DefaultIdConverter, IdKind};
pub use mapping::ResourceMapping;
