//! Content digests returned by the registry.
//!
//! The registry identifies a manifest by the `docker-content-digest` response
//! header. That value ends up in a DELETE request path, so it is checked
//! against the `algorithm:encoded` digest grammar before use. The encoded part
//! is not length-checked; the registry is the authority on what it returned.

use crate::error::{NexusError, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// A content digest such as `sha256:7173b809...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    value: String,
    separator: usize,
}

impl Digest {
    /// Returns the algorithm part (e.g. `sha256`).
    pub fn algorithm(&self) -> &str {
        &self.value[..self.separator]
    }

    /// Returns the encoded part after the colon.
    pub fn encoded(&self) -> &str {
        &self.value[self.separator + 1..]
    }

    /// Returns the full digest string.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

fn is_valid_algorithm(algorithm: &str) -> bool {
    !algorithm.is_empty()
        && algorithm
            .split(['+', '.', '_', '-'])
            .all(|component| {
                !component.is_empty()
                    && component
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
}

fn is_valid_encoded(encoded: &str) -> bool {
    !encoded.is_empty()
        && encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '=' | '_' | '-'))
}

impl FromStr for Digest {
    type Err = NexusError;

    /// Parses a digest string.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::Digest;
    /// use std::str::FromStr;
    ///
    /// let digest = Digest::from_str("sha256:abc123").unwrap();
    /// assert_eq!(digest.algorithm(), "sha256");
    /// assert_eq!(digest.encoded(), "abc123");
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();

        let separator = value
            .find(':')
            .ok_or_else(|| NexusError::validation(format!("Invalid digest format: '{}'", s)))?;

        let (algorithm, encoded) = (&value[..separator], &value[separator + 1..]);
        if !is_valid_algorithm(algorithm) || !is_valid_encoded(encoded) {
            return Err(NexusError::validation(format!(
                "Invalid digest format: '{}'",
                s
            )));
        }

        Ok(Self {
            value: value.to_string(),
            separator,
        })
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
