//! Integration test to verify the workspace crates link together.

#![allow(clippy::no_effect_underscore_binding, clippy::unwrap_used)]

#[test]
fn domain_crate_compiles() {
    let _config = placeholder_domain::ResolverConfig::default();
    let _strategy = placeholder_domain::MissingKeyStrategy::LeaveAsIs;
    let _lookup = placeholder_domain::LookupTable::new();
}

#[test]
fn application_crate_compiles() {
    let _error = placeholder_application::ResolveError::missing_key("name");
    let _resolver = placeholder_application::TokenResolver::builder()
        .build()
        .unwrap();
}

#[test]
fn infrastructure_crate_compiles() {
    let table = placeholder_infrastructure::environment_lookup_from([("A", "1")]);
    assert_eq!(table.get("A"), Some("1"));
}
