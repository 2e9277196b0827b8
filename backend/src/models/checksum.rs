//! Content fingerprints for snapshot change detection.

use sha2::{Digest, Sha256};

use super::location::LocationRecord;

/// Calculate the SHA-256 fingerprint of a record sequence.
///
/// The records are hashed in their canonical JSON form, so two fetches that
/// produce the same records in the same order share a fingerprint.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_fingerprint(records: &[LocationRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        // Serializing plain data into a Vec cannot fail.
        let encoded = serde_json::to_vec(record).unwrap_or_default();
        hasher.update((encoded.len() as u64).to_le_bytes());
        hasher.update(&encoded);
    }
    hex::encode(hasher.finalize())
}
