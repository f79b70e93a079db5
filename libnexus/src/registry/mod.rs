//! Registry operations.
//!
//! [`RegistryClient`] lists repositories and tags, fetches manifests and
//! deletes tags. The registry only deletes manifests by content digest, so a
//! tag delete first resolves the tag to the digest the registry reports in the
//! `docker-content-digest` header, then deletes that digest.

use crate::client::{Client, ClientConfig};
use crate::config::RegistryConfig;
use crate::digest::Digest;
use crate::error::{NexusError, Result};
use crate::manifest::{Manifest, RepositoryList, TagList};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;


const CONTENT_DIGEST_HEADER: &str = "docker-content-digest";
const API_VERSION_HEADER: &str = "docker-distribution-api-version";

/// A tag resolved to the digest of the manifest it points at.
///
/// Only [`RegistryClient::resolve_digest`] creates one, which makes it the
/// proof that the lookup happened before a delete by digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    image: String,
    tag: String,
    digest: Digest,
}

impl ResolvedTag {
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }
}

/// Outcome of a successful tag deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedTag {
    pub image: String,
    pub tag: String,
    pub digest: Digest,
}

impl fmt::Display for DeletedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} has been successfully deleted", self.image, self.tag)
    }
}

/// Client for one Nexus-hosted Docker repository.
///
/// Holds nothing but immutable configuration and a connection handle, so it
/// can be cloned and shared across threads freely. Every call is a single
/// blocking attempt.
///
/// # Examples
///
/// ```no_run
/// use libnexus::{RegistryClient, RegistryConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RegistryConfig::new("http://nexus:8081", "admin", "admin123", "docker");
/// let registry = RegistryClient::new(config)?;
///
/// for image in registry.list_repositories()? {
///     println!("{}: {:?}", image, registry.list_tags(&image)?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Creates a client with default client settings.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Self::with_config(config, ClientConfig::default())
    }

    /// Creates a client with custom client settings.
    pub fn with_config(config: RegistryConfig, client_config: ClientConfig) -> Result<Self> {
        let client = Client::with_config(&config, client_config)?;
        Ok(Self { client, config })
    }

    /// Returns the configuration this client was built from.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Checks that the repository's v2 API answers.
    ///
    /// Returns the `Docker-Distribution-API-Version` header when the registry sends one.
    pub fn check_connection(&self) -> Result<Option<String>> {
        let response = self.client.get("")?;
        Ok(Client::header_value(&response, API_VERSION_HEADER))
    }

    /// Lists the repositories (images) in the catalog, in registry order.
    pub fn list_repositories(&self) -> Result<Vec<String>> {
        let response = self.client.get("_catalog")?;
        let list: RepositoryList = self.client.read_json(response, "catalog")?;
        Ok(list.into_names())
    }

    /// Lists the tags of `image`, in registry order.
    pub fn list_tags(&self, image: &str) -> Result<Vec<String>> {
        let image = validate_image(image)?;

        let response = self.client.get(&format!("{}/tags/list", image))?;
        let list: TagList = self.client.read_json(response, "tags")?;

        if !list.name.is_empty() && list.name != image {
            tracing::debug!(expected = image, returned = %list.name, "registry echoed a different repository name");
        }

        Ok(list.into_tags())
    }

    /// Fetches the manifest of `image:tag`.
    pub fn get_manifest(&self, image: &str, tag: &str) -> Result<Manifest> {
        let response = self.client.get(&manifest_path(image, tag)?)?;
        self.client.read_json(response, "manifest")
    }

    /// Resolves `image:tag` to the digest of its manifest.
    ///
    /// The digest is read from the `docker-content-digest` response header of
    /// the manifest request; the body is not used.
    pub fn resolve_digest(&self, image: &str, tag: &str) -> Result<ResolvedTag> {
        let response = self.client.get(&manifest_path(image, tag)?)?;

        let digest = Client::header_value(&response, CONTENT_DIGEST_HEADER)
            .and_then(|value| Digest::from_str(&value).ok())
            .ok_or_else(|| NexusError::missing_digest(image, tag))?;

        tracing::debug!(image, tag, %digest, "resolved tag to digest");

        Ok(ResolvedTag {
            image: image.to_string(),
            tag: tag.to_string(),
            digest,
        })
    }

    /// Deletes the manifest a previously resolved tag points at.
    pub fn delete_resolved(&self, resolved: ResolvedTag) -> Result<DeletedTag> {
        let path = format!("{}/manifests/{}", resolved.image, resolved.digest);
        self.client.delete(&path)?;

        tracing::info!(image = %resolved.image, tag = %resolved.tag, digest = %resolved.digest, "deleted image");

        Ok(DeletedTag {
            image: resolved.image,
            tag: resolved.tag,
            digest: resolved.digest,
        })
    }

    /// Deletes `image:tag` and prints a confirmation line to stdout.
    ///
    /// If the digest lookup fails, no delete is sent and the lookup error is
    /// returned unchanged.
    pub fn delete_tag(&self, image: &str, tag: &str) -> Result<DeletedTag> {
        self.delete_tag_with_output(image, tag, &mut io::stdout())
    }

    /// Deletes `image:tag`, writing the confirmation line to `out`.
    ///
    /// A failed write is logged and otherwise ignored; the registry has
    /// already deleted the manifest by then.
    pub fn delete_tag_with_output<W: Write>(
        &self,
        image: &str,
        tag: &str,
        out: &mut W,
    ) -> Result<DeletedTag> {
        let resolved = self.resolve_digest(image, tag)?;
        let deleted = self.delete_resolved(resolved)?;

        if let Err(e) = writeln!(out, "{}", deleted) {
            tracing::warn!(error = %e, "failed to write deletion confirmation");
        }

        Ok(deleted)
    }
}

const MAX_TAG_LEN: usize = 128;

/// Checks `image` against the registry's repository name grammar: one or more
/// `/`-separated components of `[a-z0-9]+` runs joined by `.`, `_` or `-`.
fn validate_image(image: &str) -> Result<&str> {
    if image.trim().is_empty() {
        return Err(NexusError::validation("image name cannot be empty"));
    }

    if !image.split('/').all(is_name_component) {
        return Err(NexusError::validation(format!(
            "Invalid image name '{}'",
            image
        )));
    }

    Ok(image)
}

fn is_name_component(component: &str) -> bool {
    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

    // A separator may not start or end a component, and "__" is the only
    // doubled separator the grammar allows.
    component
        .split(['.', '-'])
        .flat_map(|part| part.split("__"))
        .flat_map(|part| part.split('_'))
        .all(|run| !run.is_empty() && run.chars().all(alnum))
}

/// Checks `tag` against `[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}`.
fn validate_tag(tag: &str) -> Result<&str> {
    if tag.trim().is_empty() {
        return Err(NexusError::validation("tag cannot be empty"));
    }

    let mut chars = tag.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if !valid_start || !valid_rest || tag.len() > MAX_TAG_LEN {
        return Err(NexusError::validation(format!("Invalid tag '{}'", tag)));
    }

    Ok(tag)
}

fn manifest_path(image: &str, tag: &str) -> Result<String> {
    let image = validate_image(image)?;
    let tag = validate_tag(tag)?;
    Ok(format!("{}/manifests/{}", image, tag))
}
