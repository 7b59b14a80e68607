//! Canonical encodings and fingerprints

mod canonical;
mod fingerprint;

pub use canonical::{Canonical, Serialized};
pub use fingerprint::{Fingerprint, PairFingerprint, PairKey, Side, FINGERPRINT_LEN};
