//! Fingerprint trie
//!
//! Each level is keyed by a [`PairKey`](crate::model::PairKey):
//! - An entry either ends in a stored pair (leaf) or owns a child level
//! - The keys along a root-to-leaf path spell the pair's fingerprint
//! - Pairs whose fingerprints agree on a prefix share that many levels

mod dump;
mod node;

pub use dump::dump_level;
pub use node::{Entry, Inserted, Leaf, Node, TrieLevel, MAX_LEVEL_CAPACITY};
