use fxhash::FxHashSet;
use marche_domain::config::AssetConfig;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use url::Url;

const VECTOR_IMAGE_EXTENSION: &str = "svg";
const ROUTE_META_CHARS: &[char] = &['{', '}', '*', '?', '#'];

#[marche_derive::marche_error]
pub enum AssetError {
    #[error("Asset configuration error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Image source not allowed{}: {message}", format_context(.context))]
    Forbidden { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid image source{}: {message}", format_context(.context))]
    InvalidSource { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed image URL{}: {source}", format_context(.context))]
    Url { source: url::ParseError, context: Option<Cow<'static, str>> },
}

/// Where a permitted image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute path under the uploads base path, e.g. `/uploads/products/42.png`.
    Upload(String),
    /// Remote image on an allow-listed origin.
    Remote(Url),
}

impl ImageSource {
    /// Location a client should fetch the image from.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Upload(path) => path,
            Self::Remote(url) => url.as_str(),
        }
    }
}

/// Validated asset serving configuration.
///
/// Built once from [`AssetConfig`] at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct AssetPolicy {
    inner: Arc<AssetPolicyInner>,
}

#[derive(Debug)]
struct AssetPolicyInner {
    allow_inline_vector_images: bool,
    allowed_origins: FxHashSet<String>,
    uploads_base_path: String,
}

impl AssetPolicy {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`AssetError::Config`] when the uploads base path cannot be mounted as a route
    /// prefix or an allowed origin is not a bare `http(s)://host[:port]`, and
    /// [`AssetError::Url`] when an origin does not parse at all.
    pub fn from_config(config: &AssetConfig) -> Result<Self, AssetError> {
        validate_base_path(&config.uploads_base_path)?;

        let allowed_origins = config
            .allowed_image_origins
            .iter()
            .map(|raw| parse_origin(raw))
            .collect::<Result<FxHashSet<_>, _>>()?;

        info!(
            uploads = %config.uploads_base_path,
            inline_svg = config.allow_inline_vector_images,
            origins = allowed_origins.len(),
            "Asset policy initialized"
        );

        Ok(Self {
            inner: Arc::new(AssetPolicyInner {
                allow_inline_vector_images: config.allow_inline_vector_images,
                allowed_origins,
                uploads_base_path: config.uploads_base_path.clone(),
            }),
        })
    }

    #[must_use]
    pub fn uploads_base_path(&self) -> &str {
        &self.inner.uploads_base_path
    }

    #[must_use]
    pub fn allows_inline_vector_images(&self) -> bool {
        self.inner.allow_inline_vector_images
    }

    /// Whether the origin of `url` is allow-listed.
    #[must_use]
    pub fn allows_origin(&self, url: &Url) -> bool {
        self.inner.allowed_origins.contains(&url.origin().ascii_serialization())
    }

    /// Whether `path` names a file below the uploads base path.
    #[must_use]
    pub fn is_upload_path(&self, path: &str) -> bool {
        path.strip_prefix(self.uploads_base_path())
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|rest| !rest.is_empty())
    }

    /// Refuses SVG paths when inline vector images are disabled.
    ///
    /// # Errors
    /// Returns [`AssetError::Forbidden`] for a vector image under a policy that disallows them.
    pub fn check_vector_image(&self, path: &str) -> Result<(), AssetError> {
        if is_vector_image(path) && !self.allows_inline_vector_images() {
            return Err(AssetError::Forbidden {
                message: path.to_owned().into(),
                context: Some("Inline vector images are disabled".into()),
            });
        }
        Ok(())
    }

    /// Resolves an image source requested by a page.
    ///
    /// Local sources must be below the uploads base path and free of `.`/`..` segments,
    /// percent-encoded ones included.
    /// Remote sources must be `http(s)` on an allow-listed origin. Protocol-relative
    /// sources (`//host/...`) are refused.
    ///
    /// # Errors
    /// * [`AssetError::InvalidSource`] for empty, protocol-relative, non-http or dotted sources
    ///   and sources containing control characters.
    /// * [`AssetError::Url`] when a remote source does not parse.
    /// * [`AssetError::Forbidden`] for sources outside the uploads path, origins that are not
    ///   allow-listed and vector images the policy refuses.
    pub fn resolve(&self, src: &str) -> Result<ImageSource, AssetError> {
        let src = src.trim();
        if src.is_empty() {
            return Err(invalid(src, "Image source is empty"));
        }
        if src.chars().any(char::is_control) {
            return Err(invalid(src, "Control characters are not allowed"));
        }
        if src.starts_with("//") {
            return Err(invalid(src, "Protocol-relative sources are not supported"));
        }

        if src.starts_with('/') {
            return self.resolve_upload(src);
        }

        let url = Url::parse(src).context(format!("Parsing image source '{src}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(src, "Only http and https sources are supported"));
        }
        if !self.allows_origin(&url) {
            return Err(AssetError::Forbidden {
                message: url.origin().ascii_serialization().into(),
                context: Some("Origin is not in allowed_image_origins".into()),
            });
        }
        self.check_vector_image(url.path())?;

        Ok(ImageSource::Remote(url))
    }

    fn resolve_upload(&self, src: &str) -> Result<ImageSource, AssetError> {
        let path = src.split(['?', '#']).next().unwrap_or(src);
        let decoded = decode_path(path);

        if decoded.split('/').any(|segment| segment == "." || segment == "..") || decoded.contains('\\') {
            return Err(invalid(src, "Relative segments are not allowed"));
        }
        if !self.is_upload_path(path) {
            return Err(AssetError::Forbidden {
                message: src.to_owned().into(),
                context: Some(format!("Local images must live under {}", self.uploads_base_path()).into()),
            });
        }
        self.check_vector_image(path)?;

        Ok(ImageSource::Upload(src.to_owned()))
    }
}

/// Whether a path or URL path points at an SVG file, once percent-decoded.
#[must_use]
pub fn is_vector_image(path: &str) -> bool {
    let decoded = decode_path(path);
    Path::new(decoded.as_ref())
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(VECTOR_IMAGE_EXTENSION))
}

fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

fn invalid(src: &str, reason: &'static str) -> AssetError {
    AssetError::InvalidSource { message: src.to_owned().into(), context: Some(reason.into()) }
}

fn validate_base_path(path: &str) -> Result<(), AssetError> {
    let reason = if !path.starts_with('/') {
        Some("must start with '/'")
    } else if path == "/" {
        Some("must not be the site root")
    } else if path.ends_with('/') {
        Some("must not end with '/'")
    } else if path.split('/').any(|segment| segment == "..") {
        Some("must not contain '..'")
    } else if path.contains(ROUTE_META_CHARS) || path.chars().any(char::is_whitespace) {
        Some("must not contain route metacharacters or whitespace")
    } else {
        None
    };

    reason.map_or(Ok(()), |reason| {
        Err(AssetError::Config {
            message: format!("uploads_base_path '{path}' {reason}").into(),
            context: None,
        })
    })
}

fn parse_origin(raw: &str) -> Result<String, AssetError> {
    let url = Url::parse(raw.trim()).context(format!("Parsing allowed image origin '{raw}'"))?;

    let bare = matches!(url.scheme(), "http" | "https")
        && url.host().is_some()
        && url.username().is_empty()
        && url.password().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none();

    if !bare {
        return Err(AssetError::Config {
            message: format!("allowed image origin '{raw}' must look like https://host[:port]").into(),
            context: None,
        });
    }

    Ok(url.origin().ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(configure: impl FnOnce(&mut AssetConfig)) -> AssetPolicy {
        let mut config = AssetConfig::default();
        configure(&mut config);
        AssetPolicy::from_config(&config).expect("valid asset config")
    }

    #[test]
    fn default_config_is_valid() {
        let policy = policy(|_| {});
        assert_eq!(policy.uploads_base_path(), "/uploads");
        assert!(policy.allows_inline_vector_images());
    }

    #[test]
    fn base_path_validation() {
        for bad in ["uploads", "/", "/uploads/", "/up/../loads", "/{file}", "/up loads"] {
            let config = AssetConfig { uploads_base_path: bad.to_owned(), ..AssetConfig::default() };
            assert!(
                matches!(AssetPolicy::from_config(&config), Err(AssetError::Config { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn origins_are_normalized() {
        let policy = policy(|c| c.allowed_image_origins = vec!["https://CDN.example.com:443/".to_owned()]);
        let url = Url::parse("https://cdn.example.com/img/a.png").expect("url");
        assert!(policy.allows_origin(&url));
    }

    #[test]
    fn origins_with_paths_are_rejected() {
        let config = AssetConfig {
            allowed_image_origins: vec!["https://cdn.example.com/images".to_owned()],
            ..AssetConfig::default()
        };
        assert!(matches!(AssetPolicy::from_config(&config), Err(AssetError::Config { .. })));

        let config = AssetConfig {
            allowed_image_origins: vec!["not a url".to_owned()],
            ..AssetConfig::default()
        };
        assert!(matches!(AssetPolicy::from_config(&config), Err(AssetError::Url { .. })));
    }

    #[test]
    fn upload_path_detection() {
        let policy = policy(|_| {});
        assert!(policy.is_upload_path("/uploads/a.png"));
        assert!(!policy.is_upload_path("/uploads"));
        assert!(!policy.is_upload_path("/uploads/"));
        assert!(!policy.is_upload_path("/uploadsX/a.png"));
    }

    #[test]
    fn vector_image_detection_ignores_case() {
        assert!(is_vector_image("/uploads/logo.SVG"));
        assert!(!is_vector_image("/uploads/logo.svg.png"));
        assert!(!is_vector_image("/uploads/svg"));
    }

    #[test]
    fn vector_image_detection_decodes_percent_escapes() {
        assert!(is_vector_image("/uploads/logo%2Esvg"));
        assert!(is_vector_image("/uploads/logo%2esvg"));
        assert!(is_vector_image("/uploads/logo.sv%67"));
        assert!(!is_vector_image("/uploads/logo%2Epng"));
    }
}
