//! Configuration for the sync engine.

use crate::error::{SyncError, SyncResult};

/// Environment variable holding the WFS endpoint URL.
pub const ENV_URL: &str = "WFS_URL";
/// Environment variable holding the qualified feature type.
pub const ENV_FEATURE_TYPE: &str = "WFS_FEATURE_TYPE";
/// Environment variable holding the feature namespace URI.
pub const ENV_FEATURE_NAMESPACE: &str = "WFS_FEATURE_NAMESPACE";

const DEFAULT_NAMESPACE_URI: &str = "http://www.geoimagesolutions.com";
const DEFAULT_VERSION: &str = "1.1.0";

/// Configuration for WFS load and save operations.
///
/// The same endpoint serves both the GetFeature query and the transaction
/// POST. The endpoint and feature type are deployment inputs, never
/// hardcoded by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WfsConfig {
    /// WFS endpoint URL.
    pub url: String,
    /// Qualified feature type, e.g. `geoimage:zones`.
    pub feature_type: String,
    /// Namespace URI bound to the feature type prefix.
    pub namespace_uri: String,
    /// WFS protocol version.
    pub version: String,
}

impl WfsConfig {
    /// Creates a configuration with default namespace and version.
    #[must_use]
    pub fn new(url: impl Into<String>, feature_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            feature_type: feature_type.into(),
            namespace_uri: DEFAULT_NAMESPACE_URI.into(),
            version: DEFAULT_VERSION.into(),
        }
    }

    /// Sets the feature namespace URI.
    #[must_use]
    pub fn with_namespace_uri(mut self, uri: impl Into<String>) -> Self {
        self.namespace_uri = uri.into();
        self
    }

    /// Sets the WFS protocol version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Reads the configuration from the environment.
    ///
    /// `WFS_URL` and `WFS_FEATURE_TYPE` are required; the namespace URI is
    /// optional and falls back to the default.
    pub fn from_env() -> SyncResult<Self> {
        let url = std::env::var(ENV_URL).map_err(|_| SyncError::MissingConfig { name: ENV_URL })?;
        let feature_type = std::env::var(ENV_FEATURE_TYPE)
            .map_err(|_| SyncError::MissingConfig {
                name: ENV_FEATURE_TYPE,
            })?;

        let mut config = Self::new(url, feature_type);
        if let Ok(uri) = std::env::var(ENV_FEATURE_NAMESPACE) {
            config.namespace_uri = uri;
        }
        Ok(config)
    }

    /// Builds the GetFeature request URL for this configuration.
    #[must_use]
    pub fn get_feature_url(&self) -> String {
        format!(
            "{}?service=WFS&version={}&request=GetFeature&typeName={}\
             &outputFormat=application/json&srsname=EPSG:4326",
            self.url, self.version, self.feature_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = WfsConfig::new("https://wfs.example.com/wfs", "geoimage:zones");
        assert_eq!(config.namespace_uri, DEFAULT_NAMESPACE_URI);
        assert_eq!(config.version, "1.1.0");

        let config = config
            .with_namespace_uri("https://example.com/ns")
            .with_version("2.0.0");
        assert_eq!(config.namespace_uri, "https://example.com/ns");
        assert_eq!(config.version, "2.0.0");
    }

    #[test]
    fn get_feature_url_shape() {
        let config = WfsConfig::new("https://wfs.example.com/wfs", "geoimage:zones");
        let url = config.get_feature_url();
        assert!(url.starts_with("https://wfs.example.com/wfs?service=WFS&version=1.1.0"));
        assert!(url.contains("request=GetFeature"));
        assert!(url.contains("typeName=geoimage:zones"));
        assert!(url.contains("outputFormat=application/json"));
        assert!(url.contains("srsname=EPSG:4326"));
    }

    #[test]
    fn from_env_requires_url_and_feature_type() {
        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_FEATURE_TYPE);
        std::env::remove_var(ENV_FEATURE_NAMESPACE);

        assert!(matches!(
            WfsConfig::from_env(),
            Err(SyncError::MissingConfig { name }) if name == ENV_URL
        ));

        std::env::set_var(ENV_URL, "https://wfs.example.com/wfs");
        assert!(matches!(
            WfsConfig::from_env(),
            Err(SyncError::MissingConfig { name }) if name == ENV_FEATURE_TYPE
        ));

        std::env::set_var(ENV_FEATURE_TYPE, "geoimage:zones");
        let config = WfsConfig::from_env().unwrap();
        assert_eq!(config.feature_type, "geoimage:zones");

        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_FEATURE_TYPE);
    }
}
