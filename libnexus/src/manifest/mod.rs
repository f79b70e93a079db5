//! Registry response payloads.
//!
//! Typed views of the JSON bodies returned by the catalog, tags and manifest
//! endpoints, plus the policy applied when a success response carries a body
//! that does not decode.

use crate::error::{NexusError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};


/// Media type of a Docker image manifest, schema 2.
///
/// Sent as the `Accept` header on every request.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Body of the `_catalog` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RepositoryList {
    /// Repository names; `None` when the field is absent or `null`.
    #[serde(default)]
    pub repositories: Option<Vec<String>>,
}

impl RepositoryList {
    /// Consumes the response and returns the repository names in order.
    pub fn into_names(self) -> Vec<String> {
        self.repositories.unwrap_or_default()
    }
}

/// Body of the `<image>/tags/list` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TagList {
    /// Repository name echoed back by the registry.
    #[serde(default)]
    pub name: String,
    /// Tags; registries send `null` for a repository without tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl TagList {
    /// Consumes the response and returns the tags in order.
    pub fn into_tags(self) -> Vec<String> {
        self.tags.unwrap_or_default()
    }
}

/// A content descriptor: the image config blob or one layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub digest: String,
}

/// An image manifest (Docker schema 2).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub schema_version: i64,
    #[serde(default)]
    pub media_type: String,
    pub config: Descriptor,
    pub layers: Vec<Descriptor>,
}

impl Manifest {
    /// Total size in bytes of the config blob and all layers.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::manifest::{Descriptor, Manifest};
    ///
    /// let manifest = Manifest {
    ///     schema_version: 2,
    ///     media_type: String::new(),
    ///     config: Descriptor { size: 10, ..Default::default() },
    ///     layers: vec![Descriptor { size: 90, ..Default::default() }],
    /// };
    /// assert_eq!(manifest.total_size(), 100);
    /// ```
    pub fn total_size(&self) -> u64 {
        self.layers
            .iter()
            .fold(self.config.size, |total, layer| total + layer.size)
    }
}

/// What to do when a success response body fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Fail the operation with [`NexusError::Decode`].
    #[default]
    Strict,
    /// Log a warning and fall back to the zero value of the expected type.
    Lenient,
}

impl DecodeMode {
    /// Decodes `bytes` as `T` under this policy.
    ///
    /// `what` names the payload in error and log messages.
    pub fn decode<T>(self, bytes: &[u8], what: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match serde_json::from_slice(bytes) {
            Ok(value) => Ok(value),
            Err(e) => match self {
                DecodeMode::Strict => Err(NexusError::decode_with_source(
                    format!("Failed to decode {} response", what),
                    e,
                )),
                DecodeMode::Lenient => {
                    tracing::warn!(error = %e, "ignoring undecodable {} response", what);
                    Ok(T::default())
                }
            },
        }
    }
}
