//! High-level DoubleMap API
//!
//! This module provides the main entry point for storing and resolving pairs.

use crate::config::MapConfig;
use crate::model::{Canonical, Fingerprint, PairFingerprint, Side};
use crate::trie::{dump_level, Inserted, Leaf, TrieLevel};
use crate::Result;
use std::fmt::Debug;
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// A bidirectional pair store
///
/// `add(a, b)` records a pairing; afterwards `a` resolves to `b` and `b`
/// resolves to `a`. Pairs are located by walking a trie keyed on the bytes
/// of both values' fingerprints, so values must implement [`Canonical`].
///
/// When several pairs share a value on one side, a lookup from that side
/// returns the partner from the most recent write.
///
/// Mutation takes `&mut self`; sharing a map between threads requires an
/// external lock.
#[derive(Clone, Debug)]
pub struct DoubleMap<A, B> {
    root: TrieLevel<A, B>,
    config: MapConfig,
    /// Last write sequence handed to a leaf
    writes: u64,
    /// Number of distinct stored pairs
    pairs: usize,
}

impl<A, B> DoubleMap<A, B> {
    /// Create an empty map with the default configuration
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    /// Create an empty map with a specific configuration
    pub fn with_config(config: MapConfig) -> Self {
        DoubleMap {
            root: TrieLevel::new(),
            config,
            writes: 0,
            pairs: 0,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Number of distinct pairs stored
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    /// The root trie level
    pub fn root(&self) -> &TrieLevel<A, B> {
        &self.root
    }
}

impl<A: Canonical, B: Canonical> DoubleMap<A, B> {
    /// Record the pairing of `a` and `b`
    ///
    /// Adding a pair that is already stored replaces its payload. Fails with
    /// [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) when the
    /// level where the pair's path diverges is full; the map is unchanged in
    /// that case.
    pub fn add(&mut self, a: A, b: B) -> Result<()> {
        let path = PairFingerprint::of(&a, &b);
        let seq = self.writes + 1;
        let leaf = Leaf { a, b, seq };

        match self.root.insert(&path, 0, self.config.level_capacity, leaf) {
            Ok(Inserted::New { depth }) => {
                self.writes = seq;
                self.pairs += 1;
                debug!(depth, seq, key = %path[0], "added pair");
            }
            Ok(Inserted::Overwritten { depth }) => {
                self.writes = seq;
                trace!(depth, seq, key = %path[0], "overwrote pair");
            }
            Err(e) => {
                warn!(error = %e, "failed to add pair");
                return Err(e);
            }
        }

        Ok(())
    }

    /// Look up the value paired with `a`
    pub fn get_from_a<Q>(&self, a: &Q) -> Option<&B>
    where
        Q: Canonical + ?Sized,
    {
        self.find(a, Side::A).map(|leaf| &leaf.b)
    }

    /// Look up the value paired with `b`
    pub fn get_from_b<Q>(&self, b: &Q) -> Option<&A>
    where
        Q: Canonical + ?Sized,
    {
        self.find(b, Side::B).map(|leaf| &leaf.a)
    }

    fn find<Q>(&self, value: &Q, side: Side) -> Option<&Leaf<A, B>>
    where
        Q: Canonical + ?Sized,
    {
        let fp = Fingerprint::of(value);
        let found = self.root.find_latest(&fp, 0, side);
        if found.is_none() {
            trace!(fingerprint = %fp.short(), ?side, "no pair found");
        }
        found
    }
}

impl<A, B> DoubleMap<A, B>
where
    A: Canonical + PartialEq,
    B: Canonical + PartialEq,
{
    /// Check that `a` and `b` resolve to each other in both directions
    pub fn verify(&self, a: &A, b: &B) -> bool {
        self.get_from_b(b) == Some(a) && self.get_from_a(a) == Some(b)
    }
}

impl<T: Canonical> DoubleMap<T, T> {
    /// Look up `c` in either role
    ///
    /// The A-role is tried first: a value stored as `a` in one pair and as
    /// `b` in another resolves to its A-role partner.
    pub fn get_from_either<Q>(&self, c: &Q) -> Option<&T>
    where
        Q: Canonical + ?Sized,
    {
        self.get_from_a(c).or_else(|| self.get_from_b(c))
    }
}

impl<A: Debug, B: Debug> DoubleMap<A, B> {
    /// Write a text rendering of the trie, one entry per line
    pub fn dump<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        dump_level(&self.root, 0, out)
    }

    /// The trie rendering as a string
    pub fn dump_to_string(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.dump(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl<A, B> Default for DoubleMap<A, B> {
    fn default() -> Self {
        DoubleMap::new()
    }
}
