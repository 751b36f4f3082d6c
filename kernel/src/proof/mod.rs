//! Proof module: canonical JSON bytes and domain-separated content hashing.
//!
//! Every digest in the workspace is computed as
//! `canonical_hash(domain, canonical_json_bytes(value))`.

pub mod canon;
pub mod hash;
pub mod hash_domain;
