use marche_kernel::config::{load_config, load_config_with_env};
use marche_kernel::domain::config::ApiConfig;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn toml_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
}

#[test]
fn file_values_override_defaults() {
    let file = toml_file(
        r#"
        [server]
        port = 8080

        [assets]
        allow_inline_vector_images = false
        allowed_image_origins = ["https://cdn.example.com"]
        "#,
    );

    let cfg: ApiConfig = load_config_with_env(Some(file.path()), env(&[])).expect("load config");
    assert_eq!(cfg.server.port, 8080);
    assert!(!cfg.assets.allow_inline_vector_images);
    assert_eq!(cfg.assets.allowed_image_origins, vec!["https://cdn.example.com".to_owned()]);
    assert_eq!(cfg.assets.uploads_base_path, "/uploads");
}

#[test]
fn environment_overrides_file() {
    let file = toml_file("[server]\nport = 8080\n");

    let cfg: ApiConfig = load_config_with_env(
        Some(file.path()),
        env(&[
            ("MARCHE__SERVER__PORT", "9090"),
            ("MARCHE__ASSETS__ALLOW_INLINE_VECTOR_IMAGES", "false"),
            ("MARCHE__ASSETS__UPLOADS_BASE_PATH", "/media"),
            ("MARCHE__ASSETS__ALLOWED_IMAGE_ORIGINS", "https://a.example.com,https://b.example.com"),
        ]),
    )
    .expect("load config");

    assert_eq!(cfg.server.port, 9090);
    assert!(!cfg.assets.allow_inline_vector_images);
    assert_eq!(cfg.assets.uploads_base_path, "/media");
    assert_eq!(
        cfg.assets.allowed_image_origins,
        vec!["https://a.example.com".to_owned(), "https://b.example.com".to_owned()]
    );
}

#[test]
fn missing_explicit_file_is_an_error() {
    let result: Result<ApiConfig, _> = load_config(Some("/definitely/not/here/marche.toml"));
    assert!(result.is_err());
}

#[test]
fn malformed_values_are_reported() {
    let file = toml_file("[server]\nport = \"not a port\"\n");

    let result: Result<ApiConfig, _> = load_config_with_env(Some(file.path()), env(&[]));
    let err = result.expect_err("port must be numeric");
    assert!(err.to_string().contains("Failed to deserialize config"));
}

#[test]
fn unrelated_variables_are_ignored() {
    let vars: HashMap<String, String> =
        [("PATH".to_owned(), "/usr/bin".to_owned()), ("OTHER__SERVER__PORT".to_owned(), "1".to_owned())]
            .into_iter()
            .collect();
    let file = toml_file("");

    let cfg: ApiConfig =
        load_config_with_env(Some(file.path()), Some(vars.into_iter().collect())).expect("load config");
    assert_eq!(cfg.server.port, 4583);
}
