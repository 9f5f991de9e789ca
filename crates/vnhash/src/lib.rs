//! Virtual-node consistent hash ring.
//!
//! This crate maps arbitrary string keys to a dynamic set of named nodes:
//! - Each node owns many virtual replicas spread over a `u64` ring
//! - Lookups binary-search the ring and wrap around past the last position
//! - Nodes whose replicas land on the same position share it, and a
//!   secondary hash of the key picks between them
//! - The hash function is pluggable through [`KeyHasher`]
//!
//! A [`HashRing`] is an ordinary owned value guarded by an internal
//! reader-writer lock, so it can be shared between threads behind an `Arc`
//! and several independent rings can live in one process.
//!
//! ```
//! use vnhash::HashRing;
//!
//! let ring = HashRing::default();
//! ring.add("cache-a");
//! ring.add("cache-b");
//!
//! let owner = ring.get("user:42").unwrap();
//! assert!(owner == "cache-a" || owner == "cache-b");
//! ```

pub mod config;
pub mod error;
pub mod hasher;
pub mod ring;
pub mod stats;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use hasher::{HashAlgorithm, KeyHasher};
pub use ring::{HashRing, RingBuilder, COLLISION_SALT, MIN_REPLICAS};
pub use stats::{normalized_entropy, Distribution};
