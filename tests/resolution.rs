//! Resolution scenarios for common mount layouts, through the public API.

use mount_gateway::config::parse_config;
use mount_gateway::routing::{MountResolver, MountTable};

fn resolver(config: &str) -> MountResolver {
    let config = parse_config(config).expect("valid config");
    MountResolver::new(MountTable::from_config(&config.mounts).unwrap())
}

#[test]
fn test_multi_tenant_static_prefixes() {
    let r = resolver(
        r#"
        [[mounts]]
        what = "acme_db"
        where = "/acme"

        [[mounts]]
        what = "widgets_db"
        where = "/widgets"

        [[mounts]]
        what = "shared"
        where = "/shared"
        "#,
    );

    assert_eq!(r.resolve_path("/acme/data").database.as_deref(), Some("acme_db"));
    assert_eq!(r.resolve_path("/widgets/items").database.as_deref(), Some("widgets_db"));
    assert_eq!(r.resolve_path("/shared/config").database.as_deref(), Some("shared"));
}

#[test]
fn test_api_versioning() {
    let r = resolver(
        r#"
        [[mounts]]
        what = "api_v1"
        where = "/api/v1"

        [[mounts]]
        what = "api_v2"
        where = "/api/v2"
        "#,
    );

    let v2 = r.resolve_path("/api/v2/data");
    assert_eq!(v2.database.as_deref(), Some("api_v2"));
    assert_eq!(v2.collection.as_deref(), Some("data"));
    assert_eq!(v2.canonical_resource_path, "/api_v2/data");

    // Unmounted version falls through to the path itself.
    let v3 = r.resolve_path("/api/v3/data");
    assert_eq!(v3.database.as_deref(), Some("api"));
    assert_eq!(v3.collection.as_deref(), Some("v3"));
}

#[test]
fn test_dev_prod_separation() {
    let r = resolver(
        r#"
        [[mounts]]
        what = "*"
        where = "/dev"

        [[mounts]]
        what = "production"
        where = "/prod"
        "#,
    );

    let dev = r.resolve_path("/dev/testdb/coll");
    assert_eq!(dev.database.as_deref(), Some("testdb"));
    assert_eq!(dev.canonical_resource_path, "/testdb/coll");

    let prod = r.resolve_path("/prod/data");
    assert_eq!(prod.database.as_deref(), Some("production"));
    assert!(!prod.can_delete_database);
    assert!(!prod.can_create_sibling_database);
}

#[test]
fn test_similar_prefix_does_not_match() {
    let r = resolver(
        r#"
        [[mounts]]
        what = "db"
        where = "/api"
        "#,
    );

    let ctx = r.resolve_path("/apiv2/data");
    assert_eq!(ctx.database.as_deref(), Some("apiv2"));
    assert_eq!(ctx.collection.as_deref(), Some("data"));
}

#[test]
fn test_nested_prefix() {
    let r = resolver(
        r#"
        [[mounts]]
        what = "db"
        where = "/api/v1/data"
        "#,
    );

    let ctx = r.resolve_path("/api/v1/data/mydb");
    assert_eq!(ctx.database.as_deref(), Some("db"));
    assert_eq!(ctx.collection.as_deref(), Some("mydb"));
    assert!(ctx.can_delete_collection);
}

#[test]
fn test_trailing_slash_and_depth() {
    let r = resolver(
        r#"
        [[mounts]]
        what = "*"
        where = "/"
        "#,
    );

    let ctx = r.resolve_path("/mydb/coll/");
    assert_eq!(ctx.database.as_deref(), Some("mydb"));
    assert_eq!(ctx.collection.as_deref(), Some("coll"));
    assert!(!ctx.has_extra_path_segments);

    assert!(r.resolve_path("/mydb/coll/doc/extra").has_extra_path_segments);
}

#[test]
fn test_tenant_prefixed_database() {
    let r = resolver(
        r#"
        [tenancy]
        enabled = true

        [[mounts]]
        what = "/{host[0]}_data/{*}"
        where = "/{host[0]}"
        "#,
    );

    let acme = r.resolve("/acme/orders", Some("acme"));
    assert_eq!(acme.database.as_deref(), Some("acme_data"));
    assert_eq!(acme.collection.as_deref(), Some("orders"));
    assert!(acme.has_parametric_mounts);

    // Invalid tenant ids are never substituted.
    let bad = r.resolve("/acme/orders", Some("-acme"));
    assert_eq!(bad.database.as_deref(), Some("acme"));
    assert_eq!(bad.collection.as_deref(), Some("orders"));
}
