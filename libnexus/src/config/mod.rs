//! Registry connection configuration.
//!
//! A [`RegistryConfig`] holds the host, credentials and repository namespace
//! of a Nexus-hosted Docker registry. It is loaded once from a TOML file whose
//! path the caller supplies, and handed by value to the client.

use crate::auth::Credentials;
use crate::error::{NexusError, Result};
use config::{Config as ConfigRs, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};


/// Connection settings for one Nexus Docker repository.
///
/// The field names on disk carry a `nexus_` prefix:
///
/// ```toml
/// nexus_host = "http://nexus.example.com:8081"
/// nexus_username = "admin"
/// nexus_password = "admin123"
/// nexus_repository = "docker-hosted"
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    #[serde(rename = "nexus_host", default)]
    pub host: String,

    #[serde(rename = "nexus_username", default)]
    pub username: String,

    #[serde(rename = "nexus_password", default)]
    pub password: String,

    #[serde(rename = "nexus_repository", default)]
    pub repository: String,
}

impl RegistryConfig {
    /// Creates a configuration from explicit values.
    ///
    /// Values are used verbatim; no HTML unescaping is applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("http://localhost:8081", "admin", "admin123", "docker");
    /// assert_eq!(config.repository, "docker");
    /// ```
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            repository: repository.into(),
        }
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`NexusError::ConfigNotFound`] if `path` does not exist
    /// - [`NexusError::ConfigParse`] if the file cannot be checked, read or decoded
    pub fn load(path: &Path) -> Result<Self> {
        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err(NexusError::config_not_found(path)),
            Err(e) => return Err(NexusError::config_parse(Some(path.to_path_buf()), e)),
        }

        let builder = ConfigRs::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true));

        Self::from_builder(builder, Some(path.to_path_buf()))
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::RegistryConfig;
    ///
    /// let config = RegistryConfig::from_toml_str(
    ///     r#"
    /// nexus_host = "http://localhost:8081"
    /// nexus_username = "admin"
    /// nexus_password = "p&amp;ss"
    /// nexus_repository = "docker"
    /// "#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.password, "p&ss");
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder().add_source(File::from_str(s, FileFormat::Toml));

        Self::from_builder(builder, None)
    }

    /// Returns the Basic credentials for this registry.
    pub fn credentials(&self) -> Credentials {
        Credentials::basic(self.username.as_str(), self.password.as_str())
    }

    /// Creates a `RegistryConfig` from a `config::ConfigBuilder`.
    ///
    /// Passwords written by some configuration front-ends arrive HTML-escaped
    /// (`&amp;` for `&`), so entities are decoded here.
    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<PathBuf>,
    ) -> Result<Self> {
        let mut registry_config: Self = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| NexusError::config_parse(path, e))?;

        registry_config.password =
            html_escape::decode_html_entities(&registry_config.password).into_owned();

        Ok(registry_config)
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("repository", &self.repository)
            .finish()
    }
}
