//! Basic usage example for the libnexus library.
//!
//! Loads a nexus-cli style configuration file and lists every image with its
//! tags and the size of its newest manifest.
//!
//! Run with: cargo run --example basic_usage -- /path/to/.nexus-cli
//! Set RUST_LOG=debug to see each registry request.

use libnexus::{NexusError, RegistryClient, RegistryConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".nexus-cli"));

    let config = match RegistryConfig::load(&config_path) {
        Ok(config) => config,
        Err(e @ NexusError::ConfigNotFound { .. }) => {
            eprintln!("✗ {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let registry = RegistryClient::new(config)?;
    println!("✓ Using {}\n", registry.config().host);

    match registry.check_connection() {
        Ok(Some(version)) => println!("✓ Registry API version: {}\n", version),
        Ok(None) => println!("✓ Registry is reachable\n"),
        Err(e) => {
            eprintln!("✗ Failed to connect: {}", e);
            return Ok(());
        }
    }

    let images = registry.list_repositories()?;
    println!("Found {} images:\n", images.len());

    for image in images.iter().take(10) {
        let tags = registry.list_tags(image)?;
        println!("  {} ({} tags)", image, tags.len());

        if let Some(tag) = tags.last() {
            match registry.get_manifest(image, tag) {
                Ok(manifest) => println!(
                    "    {}:{} - {} layers, {} bytes",
                    image,
                    tag,
                    manifest.layers.len(),
                    manifest.total_size()
                ),
                Err(e) => println!("    ✗ Failed to fetch manifest: {}", e),
            }
        }
    }

    Ok(())
}
