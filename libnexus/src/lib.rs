//! libnexus - Docker registry client for Sonatype Nexus repositories
//!
//! libnexus talks to the Docker Registry v2 API that Nexus serves under
//! `/repository/<name>/v2/`. It lists images and tags, fetches manifests,
//! and deletes tags.
//!
//! # Quick Start
//!
//! ```no_run
//! use libnexus::{RegistryClient, RegistryConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegistryConfig::load(Path::new("/home/me/.nexus-cli"))?;
//!     let registry = RegistryClient::new(config)?;
//!
//!     for image in registry.list_repositories()? {
//!         println!("{}", image);
//!     }
//!
//!     let manifest = registry.get_manifest("team/app", "1.0.0")?;
//!     println!("{} layers, {} bytes", manifest.layers.len(), manifest.total_size());
//!
//!     // Prints "team/app:0.9.0 has been successfully deleted"
//!     registry.delete_tag("team/app", "0.9.0")?;
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`RegistryConfig`] - Host, credentials and repository namespace
//! - [`RegistryClient`] - The registry operations
//! - [`Manifest`] - Decoded image manifest
//! - [`NexusError`] - Closed set of error kinds
//!
//! All operations are blocking and make one attempt; there is no retry,
//! caching or pagination.

#![warn(clippy::all)]

/// Returns the libnexus crate version.
///
/// # Examples
///
/// ```
/// let version = libnexus::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use crate::client::ClientConfig;
pub use crate::config::RegistryConfig;
pub use crate::digest::Digest;
pub use crate::error::{NexusError, Result};
pub use crate::manifest::{DecodeMode, Descriptor, Manifest};
pub use crate::registry::{DeletedTag, RegistryClient, ResolvedTag};

pub mod auth;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod registry;
