//! Labelled seed derivation for the independent random streams of a run.

use sha2::{Digest, Sha256};

pub(crate) const WORLD_STREAM: &str = "world";
pub(crate) const WAVES_STREAM: &str = "waves";
pub(crate) const SUN_DROP_STREAM: &str = "sun-drop";

/// Derives the seed of the `label` stream for the `run`-th run of a session.
pub(crate) fn derive_run_seed(base: u64, run: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(run.to_le_bytes());
    hasher.update(label.as_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
