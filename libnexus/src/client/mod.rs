//! HTTP client for Nexus-hosted Docker registries.
//!
//! This module provides a thin blocking HTTP client built on reqwest. It owns
//! request construction for the registry's v2 API, which Nexus serves under a
//! `/repository/<name>/v2/` prefix: the Basic `Authorization` header, the fixed
//! manifest-v2 `Accept` header, exact status checking and translation of
//! transport failures.

use crate::auth::Credentials;
use crate::config::RegistryConfig;
use crate::error::{NexusError, Result};
use crate::manifest::{DecodeMode, MANIFEST_V2_MEDIA_TYPE};
use reqwest::StatusCode;
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::io::Read;
use tracing::Level;


/// Upper bound on how much of an error response body is read for logging.
const MAX_ERROR_BODY: u64 = 4096;

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libnexus::client::ClientConfig;
/// use libnexus::manifest::DecodeMode;
///
/// let config = ClientConfig::new()
///     .with_decode_mode(DecodeMode::Lenient)
///     .with_user_agent("my-tool/1.0");
/// assert_eq!(config.decode_mode, DecodeMode::Lenient);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// How undecodable success bodies are handled (default: strict)
    pub decode_mode: DecodeMode,
    /// User-Agent header value (default: `libnexus/<version>`)
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            decode_mode: DecodeMode::default(),
            user_agent: format!("libnexus/{}", crate::version()),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decode policy for success responses.
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    /// Sets the User-Agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking HTTP client bound to one Nexus Docker repository.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Normalized host (e.g. "http://nexus.example.com:8081")
    host: String,
    /// `{host}/repository/{repository}/v2`
    api_base: String,
    credentials: Credentials,
    decode_mode: DecodeMode,
}

impl Client {
    /// Creates a client for the registry described by `config` with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::RegistryConfig;
    /// use libnexus::client::Client;
    ///
    /// let config = RegistryConfig::new("nexus.local:8081/", "admin", "admin123", "docker");
    /// let client = Client::new(&config).unwrap();
    /// assert_eq!(client.api_base(), "http://nexus.local:8081/repository/docker/v2");
    /// ```
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        Self::with_config(config, ClientConfig::default())
    }

    /// Creates a client with custom client settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the host or repository is empty.
    pub fn with_config(config: &RegistryConfig, client_config: ClientConfig) -> Result<Self> {
        let host = Self::normalize_url(&config.host)?;

        let repository = config.repository.trim().trim_matches('/');
        if repository.is_empty() {
            return Err(NexusError::validation("Repository name cannot be empty"));
        }

        let http_client = ReqwestClient::builder()
            .user_agent(client_config.user_agent)
            .build()
            .map_err(|e| NexusError::transport_with_source("Failed to create HTTP client", e))?;

        let api_base = format!("{}/repository/{}/v2", host, repository);

        Ok(Self {
            http_client,
            host,
            api_base,
            credentials: config.credentials(),
            decode_mode: client_config.decode_mode,
        })
    }

    /// Normalizes a host URL by ensuring it has a scheme and removing trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(NexusError::validation("Registry host cannot be empty"));
        }

        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };

        Ok(url.trim_end_matches('/').to_string())
    }

    /// Returns the normalized host URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the v2 API root for the configured repository.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Builds the full URL for a path below the v2 API root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Issues a GET and returns the response if its status is exactly 200.
    pub fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        self.send(self.http_client.get(&url), &url, StatusCode::OK)
    }

    /// Issues a DELETE and succeeds only on 202 Accepted.
    pub fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        self.send(self.http_client.delete(&url), &url, StatusCode::ACCEPTED)?;
        Ok(())
    }

    /// Reads a response body and decodes it under the configured policy.
    pub fn read_json<T>(&self, response: Response, what: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = response.bytes().map_err(|e| {
            NexusError::transport_with_source(format!("Failed to read {} response", what), e)
        })?;

        self.decode_mode.decode(&body, what)
    }

    /// Returns a response header as a string, if present and valid UTF-8.
    pub fn header_value(response: &Response, name: &str) -> Option<String> {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    /// Adds the common headers, sends the request and checks the status.
    fn send(&self, request: RequestBuilder, url: &str, expected: StatusCode) -> Result<Response> {
        tracing::debug!(%url, expected = expected.as_u16(), "sending registry request");

        let response = request
            .header(AUTHORIZATION, self.credentials.to_header_value())
            .header(ACCEPT, MANIFEST_V2_MEDIA_TYPE)
            .send()
            .map_err(|e| Self::translate_reqwest_error(e, &self.host))?;

        Self::check_response_status(response, expected)
    }

    /// Translates a reqwest error into a NexusError.
    fn translate_reqwest_error(error: reqwest::Error, host: &str) -> NexusError {
        if error.is_timeout() {
            NexusError::transport_with_source(format!("Request to {} timed out", host), error)
        } else if error.is_connect() {
            NexusError::transport_with_source(
                format!("Failed to connect to registry at {}", host),
                error,
            )
        } else if error.is_request() {
            NexusError::transport_with_source(format!("Failed to send request to {}", host), error)
        } else {
            NexusError::transport_with_source(
                format!("Network error communicating with {}", host),
                error,
            )
        }
    }

    /// Fails with [`NexusError::HttpStatus`] unless the status is exactly `expected`.
    fn check_response_status(response: Response, expected: StatusCode) -> Result<Response> {
        let status = response.status();

        if status == expected {
            return Ok(response);
        }

        let url = response.url().to_string();
        if tracing::enabled!(Level::DEBUG) {
            let body = Self::error_body_excerpt(response);
            tracing::debug!(%url, status = status.as_u16(), %body, "unexpected registry status");
        }

        Err(NexusError::http_status(status.as_u16(), url))
    }

    /// Reads at most [`MAX_ERROR_BODY`] bytes of a response body as lossy UTF-8.
    fn error_body_excerpt(response: Response) -> String {
        let mut body = Vec::new();
        match response.take(MAX_ERROR_BODY).read_to_end(&mut body) {
            Ok(_) => String::from_utf8_lossy(&body).into_owned(),
            Err(_) => String::from("(unable to read response body)"),
        }
    }
}
