use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "server";
const ENV_PREFIX: &str = "MARCHE";
const ENV_SEPARATOR: &str = "__";
const LIST_KEYS: &[&str] = &["assets.allowed_image_origins"];

#[marche_derive::marche_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file overlaid with `MARCHE__*` environment variables.
///
/// 1. **File**: `path` when given (must exist), otherwise an optional `server.{toml,yaml,json,...}`
///    in the working directory.
/// 2. **Environment**: `MARCHE__SECTION__KEY` maps to `section.key`. List keys such as
///    `MARCHE__ASSETS__ALLOWED_IMAGE_ORIGINS` are split on `,`.
///
/// Missing keys fall back to the target type's serde defaults.
///
/// # Errors
/// * An explicit `path` does not exist or cannot be parsed.
/// * The merged values do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use marche_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`] but reads overrides from `env` instead of the process environment.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path.as_ref() {
        Some(path) => {
            info!("Loading config from {}", path.as_ref().display());
            File::from(path.as_ref()).required(true)
        },
        None => {
            info!("Loading config from optional '{DEFAULT_CONFIG_FILE}' file");
            File::with_name(DEFAULT_CONFIG_FILE).required(false)
        },
    };

    let environment = LIST_KEYS
        .iter()
        .fold(
            Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).list_separator(","),
            |env, key| env.with_list_parse_key(key),
        )
        .try_parsing(true)
        .source(env);

    let config = Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
