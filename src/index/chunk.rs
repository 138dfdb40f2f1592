//! Fixed-capacity posting chunk
//!
//! Posting lists are singly linked stacks of these blocks, newest first.
//! A chunk is written by at most one appender at a time; readers snapshot
//! the valid count once and walk the prefix below it without further
//! synchronization.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::types::{LocalId, CHUNK_SIZE};

/// One block of a posting list: a contiguous array of ascending local ids.
///
/// `ids[0..len)` is the valid prefix. Slot stores happen before the count
/// is published (Release store, Acquire load), so a reader that observes a
/// count also observes every id below it. Chunks below the head are
/// immutable; only the head's count still grows.
pub struct PostChunk {
    ids: [AtomicU32; CHUNK_SIZE],
    len: AtomicU32,
    next: Option<Arc<PostChunk>>,
}

impl PostChunk {
    /// Create an empty chunk with no successor.
    pub(crate) fn new() -> Self {
        Self {
            ids: std::array::from_fn(|_| AtomicU32::new(0)),
            len: AtomicU32::new(0),
            next: None,
        }
    }

    /// Create a replacement head seeded with one id, linked to the full
    /// chunk it supersedes.
    pub(crate) fn with_first(id: LocalId, next: Arc<PostChunk>) -> Self {
        Self {
            ids: std::array::from_fn(|slot| {
                AtomicU32::new(if slot == 0 { id.as_u32() } else { 0 })
            }),
            len: AtomicU32::new(1),
            next: Some(next),
        }
    }

    /// Number of valid ids. Acquire-ordered: the slots below the returned
    /// count are safe to read afterwards.
    pub fn len(&self) -> u32 {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a slot below a previously observed count.
    pub fn get(&self, slot: u32) -> LocalId {
        LocalId::new(self.ids[slot as usize].load(Ordering::Relaxed))
    }

    /// The next-older chunk, if any.
    pub fn next(&self) -> Option<&Arc<PostChunk>> {
        self.next.as_ref()
    }

    /// Append one id to the valid prefix. Caller must hold the owning
    /// list's writer lock and `self` must have spare capacity.
    pub(crate) fn push(&self, id: LocalId) {
        let len = self.len.load(Ordering::Relaxed);
        debug_assert!((len as usize) < CHUNK_SIZE, "push into a full chunk");
        self.ids[len as usize].store(id.as_u32(), Ordering::Relaxed);
        self.len.store(len + 1, Ordering::Release);
    }
}

impl fmt::Debug for PostChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostChunk")
            .field("len", &self.len())
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chunk() {
        let chunk = PostChunk::new();
        assert_eq!(chunk.len(), 0);
        assert!(chunk.is_empty());
        assert!(chunk.next().is_none());
    }

    #[test]
    fn test_push_and_get() {
        let chunk = PostChunk::new();
        chunk.push(LocalId::new(1));
        chunk.push(LocalId::new(5));
        chunk.push(LocalId::new(9));

        assert_eq!(chunk.len(), 3);
        assert_eq!(chunk.get(0), LocalId::new(1));
        assert_eq!(chunk.get(1), LocalId::new(5));
        assert_eq!(chunk.get(2), LocalId::new(9));
    }

    #[test]
    fn test_with_first_links_predecessor() {
        let old = Arc::new(PostChunk::new());
        old.push(LocalId::new(1));

        let head = PostChunk::with_first(LocalId::new(2), Arc::clone(&old));
        assert_eq!(head.len(), 1);
        assert_eq!(head.get(0), LocalId::new(2));

        let linked = head.next().expect("successor chunk keeps its link");
        assert_eq!(linked.get(0), LocalId::new(1));
    }
}
