//! Canonical hashing: `ContentHash` and domain-separated SHA-256.
//!
//! Format: `"sha256:<hex_digest>"`. The digest covers
//! `domain.as_bytes() || data`, so equal payloads in different domains never
//! collide.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::proof::hash_domain::HashDomain;

/// Algorithm tag written in front of every digest.
pub const HASH_ALGORITHM: &str = "sha256";

const PREFIX: &str = "sha256:";
const HEX_LEN: usize = 64;

/// A SHA-256 digest in `sha256:<64 lowercase hex>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Accept `text` only if it is exactly the form [`canonical_hash`] writes.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.strip_prefix(PREFIX)?;
        let well_formed = hex.len() == HEX_LEN
            && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(text.to_owned()))
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        HASH_ALGORITHM
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.0[PREFIX.len()..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SHA-256 over the domain separator followed by `data`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let digest = Sha256::new()
        .chain_update(domain.as_bytes())
        .chain_update(data)
        .finalize();
    ContentHash(format!("{PREFIX}{}", hex::encode(digest)))
}
