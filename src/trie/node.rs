//! Trie levels and their entries

use crate::model::{Fingerprint, PairFingerprint, PairKey, Side, FINGERPRINT_LEN};
use crate::{Error, Result};

/// Largest number of entries a level can hold: one per possible pair key
pub const MAX_LEVEL_CAPACITY: usize = 1 << 16;

/// Outcome of [`TrieLevel::insert`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inserted {
    /// A new path was appended at `depth`
    New { depth: usize },
    /// The pair already had a leaf, reached at `depth`
    Overwritten { depth: usize },
}

/// A stored pair, stamped with the write that last touched it
#[derive(Clone, Debug)]
pub struct Leaf<A, B> {
    pub a: A,
    pub b: B,
    pub(crate) seq: u64,
}

/// What an entry's key leads to
#[derive(Clone, Debug)]
pub enum Node<A, B> {
    /// The path ends here with a stored pair
    Leaf(Leaf<A, B>),
    /// The path continues into an exclusively owned child level
    Interior(Box<TrieLevel<A, B>>),
}

/// One slot of a level
#[derive(Clone, Debug)]
pub struct Entry<A, B> {
    pub key: PairKey,
    pub node: Node<A, B>,
}

impl<A, B> Entry<A, B> {
    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }
}

/// A level of the trie
///
/// Entries are append-only and kept in insertion order. Occupancy is the
/// length of the entry vector, so every key, including `0000`, is legal.
#[derive(Clone, Debug)]
pub struct TrieLevel<A, B> {
    entries: Vec<Entry<A, B>>,
}

impl<A, B> TrieLevel<A, B> {
    /// Create an empty level
    pub fn new() -> Self {
        TrieLevel {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[Entry<A, B>] {
        &self.entries
    }

    /// Index of the entry holding exactly `key`
    pub fn position(&self, key: PairKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Append a new entry, failing if the level is already at `capacity`
    pub(crate) fn push(
        &mut self,
        depth: usize,
        capacity: usize,
        key: PairKey,
        node: Node<A, B>,
    ) -> Result<usize> {
        if self.entries.len() >= capacity {
            return Err(Error::CapacityExceeded { depth, capacity });
        }
        self.entries.push(Entry { key, node });
        Ok(self.entries.len() - 1)
    }

    /// Store `leaf` along `path`, starting at this level as `depth`
    ///
    /// Matching interior entries are followed, a matching leaf is overwritten
    /// and the first missing key gets a fresh branch down to depth 19. Only
    /// that first append can hit `capacity`; the levels below it are new.
    pub(crate) fn insert(
        &mut self,
        path: &PairFingerprint,
        depth: usize,
        capacity: usize,
        leaf: Leaf<A, B>,
    ) -> Result<Inserted> {
        let key = path[depth];

        match self.position(key) {
            Some(index) => match &mut self.entries[index].node {
                Node::Interior(child) => child.insert(path, depth + 1, capacity, leaf),
                Node::Leaf(existing) => {
                    *existing = leaf;
                    Ok(Inserted::Overwritten { depth })
                }
            },
            None => {
                let node = Self::branch(path, depth, leaf);
                self.push(depth, capacity, key, node)?;
                Ok(Inserted::New { depth })
            }
        }
    }

    /// The node stored under `path[depth]` for a path no level has yet
    fn branch(path: &PairFingerprint, depth: usize, leaf: Leaf<A, B>) -> Node<A, B> {
        if depth + 1 == FINGERPRINT_LEN {
            return Node::Leaf(leaf);
        }

        let child = TrieLevel {
            entries: vec![Entry {
                key: path[depth + 1],
                node: Self::branch(path, depth + 1, leaf),
            }],
        };
        Node::Interior(Box::new(child))
    }

    /// Find the most recently written leaf whose path matches `fp` on one side
    ///
    /// Every entry whose `side` component equals `fp[depth]` is explored, so a
    /// shared byte with an unrelated pair does not hide the real path.
    pub fn find_latest(&self, fp: &Fingerprint, depth: usize, side: Side) -> Option<&Leaf<A, B>> {
        if depth >= FINGERPRINT_LEN {
            return None;
        }

        let byte = fp[depth];
        let mut best: Option<&Leaf<A, B>> = None;

        for entry in self.entries.iter().filter(|e| e.key.side(side) == byte) {
            let candidate = match &entry.node {
                Node::Leaf(leaf) => Some(leaf),
                Node::Interior(child) => child.find_latest(fp, depth + 1, side),
            };

            if let Some(leaf) = candidate {
                if best.map_or(true, |b| leaf.seq > b.seq) {
                    best = Some(leaf);
                }
            }
        }

        best
    }
}

impl<A, B> Default for TrieLevel<A, B> {
    fn default() -> Self {
        TrieLevel::new()
    }
}
