use super::*;
use std::str::FromStr;

#[test]
fn test_digest_from_valid_string_succeeds() {
    let valid_digest_str =
        "sha256:7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc";
    let digest = Digest::from_str(valid_digest_str).unwrap();
    assert_eq!(digest.algorithm(), "sha256");
    assert_eq!(
        digest.encoded(),
        "7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc"
    );
}

#[test]
fn test_short_encoded_part_is_accepted() {
    let digest = Digest::from_str("sha256:abc123").unwrap();
    assert_eq!(digest.as_str(), "sha256:abc123");
}

#[test]
fn test_compound_algorithm_is_accepted() {
    let digest = Digest::from_str("multihash+base58:QmRZxt2b1FVZPNqd8hsiykDL3TdBDeTSPX9Kv46HmX4Gx8").unwrap();
    assert_eq!(digest.algorithm(), "multihash+base58");
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let digest = Digest::from_str("  sha256:abc123\n").unwrap();
    assert_eq!(digest.to_string(), "sha256:abc123");
}

#[test]
fn test_digest_from_invalid_string_fails() {
    for invalid in [
        "",
        "sha256",
        "sha256:",
        ":abc123",
        "SHA256:abc123",
        "sha256:abc/../123",
        "sha256:abc 123",
        "sha256:abc?x=1",
    ] {
        let digest = Digest::from_str(invalid);
        assert!(
            matches!(digest, Err(NexusError::Validation { .. })),
            "expected '{}' to be rejected",
            invalid
        );
    }
}

#[test]
fn test_digest_display_trait() {
    let digest_str = "sha256:7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc";
    let digest = Digest::from_str(digest_str).unwrap();
    assert_eq!(digest.to_string(), digest_str);
}
