//! # double_map
//!
//! A bidirectional pair store backed by a fingerprint trie.
//!
//! Every stored pair `(a, b)` can be found from either side. Instead of two
//! hash maps, pairs live in a single trie whose keys are built from the
//! fingerprints of both values.
//!
//! ## Core Concepts
//!
//! - **Canonical encoding**: values expose stable bytes via [`Canonical`]
//! - **Fingerprint**: 20 bytes derived from the canonical encoding
//! - **Pair key**: one fingerprint byte from each value at the same depth
//! - **Trie level**: an append-only list of entries keyed by pair key
//!
//! ## Example
//!
//! ```
//! use double_map::DoubleMap;
//!
//! let mut map = DoubleMap::new();
//! map.add("alice".to_string(), "wonderland".to_string())?;
//! map.add("bob".to_string(), "builder".to_string())?;
//!
//! assert_eq!(map.get_from_a("alice").map(String::as_str), Some("wonderland"));
//! assert_eq!(map.get_from_b("builder").map(String::as_str), Some("bob"));
//! assert!(map.get_from_a("carol").is_none());
//! # Ok::<(), double_map::Error>(())
//! ```

pub mod model;
pub mod trie;

mod config;
mod error;
mod map;

pub use config::MapConfig;
pub use error::{Error, Result};
pub use map::DoubleMap;
pub use model::{Canonical, Fingerprint, PairFingerprint, PairKey, Serialized, Side};
