//! Consistent hash ring implementation.
//!
//! The ring keeps an ascending sequence of positions and, for every
//! position, the nodes whose virtual replicas landed on it. Lookups
//! binary-search the sequence; a secondary hash of the key picks between
//! nodes that share a position.

mod builder;
mod position;
#[allow(clippy::module_inception)]
mod ring;

pub use builder::RingBuilder;
pub use ring::HashRing;

/// Smallest replica count a ring is configured with.
///
/// Fewer virtual replicas per node leave visible gaps in the key
/// distribution, so smaller requests are raised to this floor.
pub const MIN_REPLICAS: usize = 100;

/// Numeric salt of the secondary hash used to pick between colliding nodes.
///
/// The hashed representation is `"<salt>:<key>"`.
pub const COLLISION_SALT: u64 = 16_777_619;
