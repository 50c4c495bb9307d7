pub use crate::config::{ConfigError, load_config};
pub use crate::security::{AssetError, AssetPolicy, ImageSource};
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateError};
pub use marche_domain::config::{ApiConfig, AssetConfig};
