use marche_domain::config::{ApiConfig, AssetConfig, ServerConfig, StorageConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let storage = StorageConfig::default();
    assert_eq!(storage.uploads_dir, PathBuf::from("public/uploads"));
}

#[test]
fn asset_defaults_match_deployment_profile() {
    let assets = AssetConfig::default();
    assert!(assets.allow_inline_vector_images);
    assert!(assets.allowed_image_origins.is_empty());
    assert_eq!(assets.uploads_base_path, "/uploads");
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "storage": { "uploads_dir": "/srv/uploads" },
        "assets": { "allowed_image_origins": ["https://cdn.example.com"] }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.storage.uploads_dir, PathBuf::from("/srv/uploads"));
    assert_eq!(cfg.assets.allowed_image_origins, vec!["https://cdn.example.com".to_owned()]);
    assert!(cfg.assets.allow_inline_vector_images, "missing keys keep their defaults");
    assert_eq!(cfg.assets.uploads_base_path, "/uploads");
}

#[test]
fn empty_document_yields_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert_eq!(cfg.assets, AssetConfig::default());
}

#[test]
fn config_clones_share_until_mutated() {
    let original = ApiConfig::default();
    let mut tweaked = original.clone();
    tweaked.server.port = 9000;

    assert_eq!(original.server.port, 4583);
    assert_eq!(tweaked.server.port, 9000);
}
