//! Content-addressed chunk identity.

use sha2::{Digest, Sha256};

/// Computes the content address for a chunk: SHA-256 over the UTF-8 bytes of
/// the chunk text followed immediately by its source url, rendered as
/// lowercase hex.
///
/// The same `(text, url)` pair always hashes to the same id, across
/// processes and restarts, and distinct pairs collide only with
/// cryptographically negligible probability. Both the in-flight dedup and
/// the vector store's primary key depend on this, so the id must never
/// incorporate randomized state.
pub fn chunk_id(text: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}
