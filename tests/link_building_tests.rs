//! Integration tests for end-to-end link construction

use rel::links::fragment_redirect;
use rel::prelude::*;
use std::sync::Arc;

const CONFIG: &str = r#"
entities:
  - name: Person
    rel: people
    path: people
    id: uuid
    properties:
      - name: siblings
      - name: password
        exported: false

  - name: Profile
"#;

fn setup(base_uri: Option<&str>) -> (ResourceMappings, BaseUri, BackendIdConverters) {
    let mut config = RestConfig::from_yaml_str(CONFIG).unwrap();
    config.base_uri = base_uri.map(str::to_string);

    let mappings = ResourceMappings::from_config(&config).unwrap();
    let base = BaseUri::from_config(&config).unwrap();
    let conversions = Arc::new(DelegatingConversionService::with_defaults());
    let converters = BackendIdConverters::from_config(&config, conversions);

    (mappings, base, converters)
}

#[test]
fn test_absolute_base_uri_wins_over_observed_request() {
    let (mappings, base, _) = setup(Some("http://foobar/api"));
    let request = RequestContext::new("https", "internal.k8s.local", Some(8443), "/");
    let builder = LinkBuilder::new(&base, &request);

    let link = builder
        .resource_link(mappings.mapping_for("Profile").unwrap())
        .unwrap();
    assert_eq!(link.href, "http://foobar/api/profile");
    assert_eq!(link.rel, "profile");
}

#[test]
fn test_relative_base_uri_uses_observed_request() {
    let (mappings, base, _) = setup(Some("api"));
    let request = RequestContext::new("http", "localhost", None, "/");
    let builder = LinkBuilder::new(&base, &request);

    let link = builder
        .resource_link(mappings.mapping_for("Profile").unwrap())
        .unwrap();
    assert_eq!(link.href, "http://localhost/api/profile");
}

#[test]
fn test_self_link_appends_rendered_identifier() {
    let (mappings, base, converters) = setup(Some("http://foobar/api"));
    let request = RequestContext::new("http", "localhost", None, "/");
    let builder = LinkBuilder::new(&base, &request);

    let id = BackendId::Uuid(Uuid::nil());
    let rendered = converters.to_request_id(&id, "Person");

    let link = builder
        .item_link(mappings.mapping_for("Person").unwrap(), &rendered)
        .unwrap();
    assert_eq!(link.rel, SELF_REL);
    assert_eq!(
        link.href,
        "http://foobar/api/people/00000000-0000-0000-0000-000000000000"
    );
}

#[test]
fn test_request_id_in_self_link_parses_back_to_backend_id() {
    let (_, _, converters) = setup(None);

    let id = BackendId::Uuid(Uuid::new_v4());
    let rendered = converters.to_request_id(&id, "Person");
    let parsed = converters.from_request_id(&rendered, "Person").unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_association_links_hide_non_exported_properties() {
    let (mappings, base, _) = setup(Some("api"));
    let request = RequestContext::new("http", "localhost", None, "/");
    let builder = LinkBuilder::new(&base, &request);

    let links = builder
        .association_links(&mappings, "Person", "42", &["siblings", "password"])
        .unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].rel, "siblings");
    assert_eq!(links[0].href, "http://localhost/api/people/42/siblings");
}

#[test]
fn test_root_document_advertises_every_exported_type() {
    let (mappings, base, _) = setup(None);
    let request = RequestContext::new("http", "localhost", Some(8080), "/");
    let builder = LinkBuilder::new(&base, &request);

    let mut rels: Vec<_> = builder
        .resource_links(&mappings)
        .into_iter()
        .map(|link| link.rel)
        .collect();
    rels.sort();

    assert_eq!(rels, vec!["people", "profile"]);
}

#[test]
fn test_lookup_path_round_trips_with_generated_links() {
    let (mappings, base, _) = setup(Some("api"));
    let request = RequestContext::new("http", "localhost", None, "/api/people/42");
    let builder = LinkBuilder::new(&base, &request);

    let link = builder
        .item_link(mappings.mapping_for("Person").unwrap(), "42")
        .unwrap();
    assert!(link.href.ends_with("/api/people/42"));

    // The base strips its own prefix back off the observed path
    assert_eq!(base.lookup_path(&request.path).as_deref(), Some("/people/42"));
}

#[test]
fn test_browser_redirect_keeps_navigation_context() {
    assert_eq!(
        fragment_redirect("/api", "/browser/index.html"),
        "/api/browser/index.html#/api"
    );
    assert_eq!(
        fragment_redirect("", "/browser/index.html"),
        "/browser/index.html#"
    );
}

#[test]
fn test_links_serialize_for_the_representation_layer() {
    let link = Link::new("people", "http://localhost/api/people");
    let json = serde_json::to_value(&link).unwrap();

    assert_eq!(json["rel"], "people");
    assert_eq!(json["href"], "http://localhost/api/people");
}
