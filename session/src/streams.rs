//! Labeled RNG stream derivation for reproducible rolls.

use sha2::{Digest, Sha256};

/// Label of the stream that draws committed outcomes.
pub(crate) const RNG_STREAM_OUTCOME: &str = "outcome";
/// Label of the stream that draws cosmetic cycling values.
pub(crate) const RNG_STREAM_COSMETIC: &str = "cosmetic";

/// Derives the seed of a labeled stream from the session's base seed.
pub(crate) fn derive_stream_seed(base_seed: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base_seed.to_le_bytes());
    hasher.update(label.as_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}
