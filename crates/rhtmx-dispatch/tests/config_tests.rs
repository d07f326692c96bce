//! Integration tests for loading dispatch.toml

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rhtmx_dispatch::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("dispatch.toml");
    fs::write(&path, content).unwrap();
    path
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_blank_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "   \n\n");
    assert_eq!(Config::load(path).unwrap(), Config::default());
}

#[test]
fn test_malformed_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[routing\nbase_path = 1");

    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("dispatch.toml"));
}

#[test]
fn test_loaded_config_builds_working_router() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
        [routing]
        base_path = "/shop"

        [types]
        sku = "[A-Z]{3}-[0-9]{4}"

        [[routes]]
        pattern = "/products/[sku:sku]"
        script = "scripts/product.rs"

        [[routes]]
        methods = ["POST", "PUT"]
        pattern = "/cart/[i:line]?"
        script = "scripts/cart.rs"
        "#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.routes.len(), 2);

    let router: Router<()> = config.build_router().unwrap();
    assert_eq!(
        router.table().methods().collect::<Vec<_>>(),
        vec!["GET", "POST", "PUT"]
    );

    match router.handle("GET", "/shop/products/ABC-1234/") {
        Outcome::Delegated { script, params } => {
            assert_eq!(script, PathBuf::from("scripts/product.rs"));
            assert_eq!(params.get("sku"), Some("ABC-1234"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match router.handle("put", "/shop/cart") {
        Outcome::Delegated { script, params } => {
            assert_eq!(script, PathBuf::from("scripts/cart.rs"));
            assert!(params.is_empty());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert_eq!(router.handle("GET", "/shop/products/abc-1234"), Outcome::NotFound);
    assert_eq!(router.handle("GET", "/shop/cart"), Outcome::NotFound);
}
