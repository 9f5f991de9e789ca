//! Hash function abstraction for ring positions.
//!
//! Every position on the ring, and every key looked up against it, goes
//! through a [`KeyHasher`]. The hasher must be a pure function of its input:
//! two rings built from the same nodes with the same hasher place every
//! replica at the same position, in this process or any other.
//!
//! # Built-in algorithms
//!
//! | name    | algorithm                  | notes                              |
//! |---------|----------------------------|------------------------------------|
//! | `xxh3`  | XXH3-64, seed 0            | default                            |
//! | `fnv1`  | FNV-1 64-bit               | matches rings hashed with FNV-1    |
//! | `sip13` | SipHash-1-3, zero keys     |                                    |

use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::Error;

const FNV1_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV1_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Maps bytes to a position on the `u64` ring.
///
/// Implementations are shared by all readers of a ring, so they must be
/// thread-safe and must not depend on mutable state.
pub trait KeyHasher: Send + Sync {
    /// Hashes `data` to a ring position.
    fn hash(&self, data: &[u8]) -> u64;

    /// Returns the name of this hasher (for logging).
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> u64 + Send + Sync,
{
    fn hash(&self, data: &[u8]) -> u64 {
        self(data)
    }
}

/// The hash algorithms shipped with the crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// XXH3 64-bit with seed 0.
    #[default]
    Xxh3,
    /// 64-bit FNV-1 (multiply, then xor).
    Fnv1,
    /// SipHash-1-3 keyed with zeros.
    Sip13,
}

impl HashAlgorithm {
    /// All built-in algorithms.
    pub const ALL: [HashAlgorithm; 3] = [
        HashAlgorithm::Xxh3,
        HashAlgorithm::Fnv1,
        HashAlgorithm::Sip13,
    ];

    /// Returns the lowercase name used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Xxh3 => "xxh3",
            HashAlgorithm::Fnv1 => "fnv1",
            HashAlgorithm::Sip13 => "sip13",
        }
    }
}

impl KeyHasher for HashAlgorithm {
    fn hash(&self, data: &[u8]) -> u64 {
        match self {
            HashAlgorithm::Xxh3 => xxh3_64(data),
            HashAlgorithm::Fnv1 => fnv1_64(data),
            HashAlgorithm::Sip13 => {
                let mut hasher = SipHasher13::new();
                hasher.write(data);
                hasher.finish()
            }
        }
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownHasher(s.to_string()))
    }
}

/// 64-bit FNV-1 over `data`.
pub fn fnv1_64(data: &[u8]) -> u64 {
    data.iter().fold(FNV1_OFFSET_BASIS, |hash, &byte| {
        hash.wrapping_mul(FNV1_PRIME) ^ u64::from(byte)
    })
}
