use crate::security::{AssetError, AssetPolicy};
use axum::extract::FromRef;
use marche_domain::config::ApiConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[marche_derive::marche_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State asset policy error{}: {source}", format_context(.context))]
    Assets { source: AssetError, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub assets: AssetPolicy,
}

/// Shared Axum state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for AssetPolicy {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.assets.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validates the configuration and freezes it into an [`ApiState`].
    ///
    /// # Errors
    /// * [`ApiStateError::Validation`] when no config was provided.
    /// * [`ApiStateError::Assets`] when the asset section is invalid.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "ApiConfig not provided".into(),
            context: None,
        })?;
        let assets = AssetPolicy::from_config(&config.assets).context("Validating [assets]")?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, assets }) })
    }
}
