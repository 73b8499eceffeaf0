//! Hyperlink construction for mapped resources
//!
//! A [`LinkBuilder`] resolves the effective root once from the configured
//! [`BaseUri`] and the observed request, then appends mapping path segments
//! and rendered identifiers to form fully-qualified hrefs. Links are pure
//! values produced on demand and never stored. No link is ever emitted for a
//! mapping whose exported flag is off.

use crate::core::error::RelError;
use crate::core::mapping::ResourceMapping;
use crate::links::base_uri::{BaseUri, RequestContext};
use crate::mappings::ResourceMappings;
use serde::{Deserialize, Serialize};

/// Relation name of the self link of a singular resource
pub const SELF_REL: &str = "self";

/// A hypermedia link: relation name plus fully-qualified href
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The relation name a client navigates by
    pub rel: String,

    /// The fully-qualified URI
    pub href: String,
}

impl Link {
    /// Create a new link
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// Builds links for mapped resources under a resolved root
pub struct LinkBuilder {
    root: String,
}

impl LinkBuilder {
    /// Resolve the effective root from the configured base URI and the
    /// observed request
    pub fn new(base: &BaseUri, request: &RequestContext) -> Self {
        Self {
            root: base.resolve_root(request),
        }
    }

    /// The resolved root all links are built under
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The collection link for a mapped resource, `None` when the mapping is
    /// not exported
    pub fn resource_link(&self, mapping: &ResourceMapping) -> Option<Link> {
        if !mapping.is_exported() {
            return None;
        }

        Some(Link::new(
            mapping.rel.clone(),
            self.join(&[mapping.path.as_str()]),
        ))
    }

    /// The self link for a singular resource, with the rendered identifier
    /// appended as an additional path segment
    pub fn item_link(&self, mapping: &ResourceMapping, request_id: &str) -> Option<Link> {
        if !mapping.is_exported() {
            return None;
        }

        Some(Link::new(
            SELF_REL,
            self.join(&[mapping.path.as_str(), request_id]),
        ))
    }

    /// Collection links for every exported entity type in the registry, in
    /// no particular order
    ///
    /// This is the link set of the API root document.
    pub fn resource_links(&self, mappings: &ResourceMappings) -> Vec<Link> {
        mappings
            .exported()
            .filter_map(|(_, mapping)| self.resource_link(mapping))
            .collect()
    }

    /// Association links for one entity instance: one link per exported
    /// property, addressed below the item URI
    ///
    /// Non-exported properties are neither advertised nor addressable, and a
    /// non-exported owning type produces no links at all.
    pub fn association_links(
        &self,
        mappings: &ResourceMappings,
        entity_type: &str,
        request_id: &str,
        properties: &[&str],
    ) -> Result<Vec<Link>, RelError> {
        let owner = mappings.mapping_for(entity_type)?;
        if !owner.is_exported() {
            return Ok(vec![]);
        }

        let mut links = Vec::with_capacity(properties.len());
        for property in properties {
            let mapping = mappings.property_mapping_for(entity_type, property)?;
            if !mapping.is_exported() {
                continue;
            }
            links.push(Link::new(
                mapping.rel.clone(),
                self.join(&[owner.path.as_str(), request_id, mapping.path.as_str()]),
            ));
        }

        Ok(links)
    }

    /// Join path segments onto the root with single slashes
    fn join(&self, segments: &[&str]) -> String {
        let mut href = self.root.trim_end_matches('/').to_string();
        for segment in segments {
            for part in segment.split('/').filter(|p| !p.is_empty()) {
                href.push('/');
                href.push_str(part);
            }
        }
        href
    }
}

/// Compute a browser-redirect target whose fragment is the portion of the
/// current path consumed before the target's mount point
///
/// The destination page can resume navigation from the same context: a
/// request at `/api` redirected to `/browser/index.html` yields
/// `/api/browser/index.html#/api`. Derived path arithmetic, not part of the
/// core link semantics.
pub fn fragment_redirect(current_path: &str, target: &str) -> String {
    let current = current_path.trim_end_matches('/');
    let target = if target.starts_with('/') {
        target.to_string()
    } else {
        format!("/{}", target)
    };

    let mount = format!(
        "/{}",
        target.trim_start_matches('/').split('/').next().unwrap_or("")
    );
    let consumed = match current.find(&mount) {
        Some(index) => &current[..index],
        None => current,
    };

    format!("{}{}#{}", consumed, target, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RestConfig;

    fn localhost() -> RequestContext {
        RequestContext::new("http", "localhost", None, "/")
    }

    #[test]
    fn test_absolute_base_ignores_observed_host() {
        let base = BaseUri::new("http://foobar/api").unwrap();
        let builder = LinkBuilder::new(&base, &RequestContext::new("http", "elsewhere", Some(9090), "/"));

        let link = builder
            .resource_link(&ResourceMapping::new("profile", "profile"))
            .unwrap();
        assert_eq!(link.href, "http://foobar/api/profile");
        assert_eq!(link.rel, "profile");
    }

    #[test]
    fn test_relative_base_uses_observed_origin() {
        let base = BaseUri::new("api").unwrap();
        let builder = LinkBuilder::new(&base, &localhost());

        let link = builder
            .resource_link(&ResourceMapping::new("profile", "profile"))
            .unwrap();
        assert_eq!(link.href, "http://localhost/api/profile");
    }

    #[test]
    fn test_item_link_appends_rendered_identifier() {
        let base = BaseUri::new("http://foobar/api").unwrap();
        let builder = LinkBuilder::new(&base, &localhost());

        let link = builder
            .item_link(&ResourceMapping::new("people", "person"), "42")
            .unwrap();
        assert_eq!(link.rel, SELF_REL);
        assert_eq!(link.href, "http://foobar/api/person/42");
    }

    #[test]
    fn test_no_link_for_non_exported_mapping() {
        let base = BaseUri::none();
        let builder = LinkBuilder::new(&base, &localhost());
        let hidden = ResourceMapping::new("people", "person").with_exported(false);

        assert!(builder.resource_link(&hidden).is_none());
        assert!(builder.item_link(&hidden, "42").is_none());
    }

    #[test]
    fn test_repeated_slashes_normalized() {
        let base = BaseUri::new("http://foobar/api").unwrap();
        let builder = LinkBuilder::new(&base, &localhost());

        let link = builder
            .resource_link(&ResourceMapping::new("people", "/person//detail"))
            .unwrap();
        assert_eq!(link.href, "http://foobar/api/person/detail");
    }

    #[test]
    fn test_resource_links_skip_hidden_types() {
        let mappings = ResourceMappings::from_config(&RestConfig::default_config()).unwrap();
        let builder = LinkBuilder::new(&BaseUri::none(), &localhost());

        let links = builder.resource_links(&mappings);
        let rels: Vec<_> = links.iter().map(|l| l.rel.as_str()).collect();

        // AnnotatedPerson is not exported and must not be advertised
        assert!(!rels.contains(&"people"));
        assert!(rels.contains(&"plainPerson"));
        assert!(rels.contains(&"order"));
    }

    #[test]
    fn test_association_links_skip_hidden_properties() {
        let mappings = ResourceMappings::from_config(&RestConfig::default_config()).unwrap();
        let builder = LinkBuilder::new(&BaseUri::new("api").unwrap(), &localhost());

        let links = builder
            .association_links(&mappings, "Order", "4711", &["creditCard", "customer"])
            .unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "customer");
        assert_eq!(links[0].href, "http://localhost/api/orders/4711/customer");
    }

    #[test]
    fn test_association_links_for_hidden_owner_are_empty() {
        let mappings = ResourceMappings::from_config(&RestConfig::default_config()).unwrap();
        let builder = LinkBuilder::new(&BaseUri::none(), &localhost());

        let links = builder
            .association_links(&mappings, "AnnotatedPerson", "1", &["findByFirstName"])
            .unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_fragment_redirect_from_base_path() {
        assert_eq!(
            fragment_redirect("/api", "/browser/index.html"),
            "/api/browser/index.html#/api"
        );
    }

    #[test]
    fn test_fragment_redirect_from_mounted_path() {
        assert_eq!(
            fragment_redirect("/api/browser", "/browser/index.html"),
            "/api/browser/index.html#/api"
        );
    }

    #[test]
    fn test_fragment_redirect_at_root() {
        assert_eq!(
            fragment_redirect("", "/browser/index.html"),
            "/browser/index.html#"
        );
        assert_eq!(
            fragment_redirect("/", "browser/index.html"),
            "/browser/index.html#"
        );
    }
}
