//! Link construction for mapped resources
//!
//! Resolves the effective root from the configured base URI and the observed
//! request, then builds collection, self and association links.

pub mod base_uri;
pub mod builder;

pub use base_uri::{BaseUri, RequestContext};
pub use builder::{Link, LinkBuilder, SELF_REL, fragment_redirect};
