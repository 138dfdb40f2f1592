//! Core types for the post index

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of local ids held by one posting chunk.
///
/// Part of the performance contract, not the semantic one: larger chunks
/// amortize head swaps, smaller ones waste less on rare terms.
pub const CHUNK_SIZE: usize = 4096;

/// Number of ids a query pipeline frame pulls per operator call.
pub const QUERY_BUFFER_SIZE: usize = 128;

/// Dense engine-internal post number, assigned monotonically from 1.
///
/// Posting lists and the merge operators work on these instead of the
/// caller's 64-bit post ids: half the width, and the append path can keep
/// every list strictly ascending regardless of what ids callers choose.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LocalId(pub u32);

impl LocalId {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External post ID supplied by the caller on ingest. Opaque to the engine.
pub type PostId = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_id_ordering() {
        assert!(LocalId::new(1) < LocalId::new(2));
        assert_eq!(LocalId::new(7).as_u32(), 7);
    }
}
