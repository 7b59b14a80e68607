//! Value fingerprints and the pair keys built from them

use super::Canonical;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Number of bytes in a fingerprint, and so the maximum trie depth
pub const FINGERPRINT_LEN: usize = 20;

/// Which of the two paired values a lookup matches against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// A 20-byte fingerprint of a value's canonical encoding
///
/// The BLAKE3 output is truncated to 20 bytes and stored end-to-start.
/// Insertion and lookup both go through [`Fingerprint::of`], so the byte
/// order always lines up.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Fingerprint a value
    pub fn of<T: Canonical + ?Sized>(value: &T) -> Self {
        Self::digest(&value.canonical_bytes())
    }

    /// Fingerprint raw canonical bytes
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(data);
        let mut raw = [0u8; FINGERPRINT_LEN];
        hasher.finalize_xof().fill(&mut raw);
        raw.reverse();
        Fingerprint(raw)
    }

    /// Create a fingerprint from bytes already in fingerprint order
    pub fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Fingerprint(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidFingerprint(e.to_string()))?;
        if bytes.len() != FINGERPRINT_LEN {
            return Err(Error::InvalidFingerprint(format!(
                "expected {} bytes, got {}",
                FINGERPRINT_LEN,
                bytes.len()
            )));
        }
        let mut arr = [0u8; FINGERPRINT_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Fingerprint(arr))
    }

    /// Get a short prefix for display
    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl Index<usize> for Fingerprint {
    type Output = u8;

    fn index(&self, depth: usize) -> &u8 {
        &self.0[depth]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// One byte from each value's fingerprint at the same depth
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub a: u8,
    pub b: u8,
}

impl PairKey {
    pub fn new(a: u8, b: u8) -> Self {
        PairKey { a, b }
    }

    /// The component a single-sided lookup compares against
    pub fn side(&self, side: Side) -> u8 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}", self.a, self.b)
    }
}

impl fmt::Debug for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairKey({})", self)
    }
}

/// The full trie path of a pair: one [`PairKey`] per depth
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairFingerprint([PairKey; FINGERPRINT_LEN]);

impl PairFingerprint {
    /// Fingerprint both values and zip them position by position
    pub fn of<A, B>(a: &A, b: &B) -> Self
    where
        A: Canonical + ?Sized,
        B: Canonical + ?Sized,
    {
        Self::zip(&Fingerprint::of(a), &Fingerprint::of(b))
    }

    /// Zip two single fingerprints
    pub fn zip(a: &Fingerprint, b: &Fingerprint) -> Self {
        let mut keys = [PairKey::new(0, 0); FINGERPRINT_LEN];
        for (depth, key) in keys.iter_mut().enumerate() {
            *key = PairKey::new(a[depth], b[depth]);
        }
        PairFingerprint(keys)
    }

    pub fn keys(&self) -> &[PairKey; FINGERPRINT_LEN] {
        &self.0
    }

    /// Recover the single fingerprint of one side
    pub fn side(&self, side: Side) -> Fingerprint {
        let mut bytes = [0u8; FINGERPRINT_LEN];
        for (byte, key) in bytes.iter_mut().zip(self.0.iter()) {
            *byte = key.side(side);
        }
        Fingerprint(bytes)
    }
}

impl Index<usize> for PairFingerprint {
    type Output = PairKey;

    fn index(&self, depth: usize) -> &PairKey {
        &self.0[depth]
    }
}

impl fmt::Debug for PairFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
