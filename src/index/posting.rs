//! Append-only posting list
//!
//! A posting list is a stack of chunks, newest at the head. The head
//! pointer is swap-published so queries snapshot it without blocking
//! appenders; appends are serialized by a per-list writer lock held by the
//! ingestion path.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::{Mutex, MutexGuard};

use super::chunk::PostChunk;
use super::types::{LocalId, CHUNK_SIZE};

/// Per-term posting list holding strictly ascending local ids.
///
/// Readers never lock: `head()` returns an `Arc` snapshot, and chunks below
/// a snapshotted count are immutable. Writers go through [`writer`], which
/// holds the list's exclusive lock for the lifetime of the guard.
///
/// [`writer`]: PostingList::writer
pub struct PostingList {
    head: ArcSwap<PostChunk>,
    write_lock: Mutex<()>,
}

impl PostingList {
    /// Create an empty list seeded with one empty head chunk.
    pub fn new() -> Self {
        Self {
            head: ArcSwap::from_pointee(PostChunk::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Snapshot the current head chunk. Non-blocking. Ids appended after
    /// the snapshot stay invisible to readers that also captured the
    /// count at snapshot time.
    pub fn head(&self) -> Arc<PostChunk> {
        self.head.load_full()
    }

    /// Take the exclusive writer lock for this list.
    pub fn writer(&self) -> PostingWriter<'_> {
        PostingWriter {
            list: self,
            _guard: self.write_lock.lock(),
        }
    }
}

impl Default for PostingList {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive append handle; holds the list's writer lock for its lifetime.
pub struct PostingWriter<'a> {
    list: &'a PostingList,
    _guard: MutexGuard<'a, ()>,
}

impl PostingWriter<'_> {
    /// Append `id`, which must exceed every id already in the list.
    pub fn append(&self, id: LocalId) {
        let head = self.list.head.load_full();
        if head.len() as usize == CHUNK_SIZE {
            tracing::debug!(id = id.as_u32(), "posting chunk full, pushing new head");
            let replacement = PostChunk::with_first(id, head);
            self.list.head.store(Arc::new(replacement));
        } else {
            debug_assert!(
                head.is_empty() || head.get(head.len() - 1) < id,
                "posting lists are strictly ascending"
            );
            head.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &PostingList) -> Vec<u32> {
        // Walk newest-to-oldest, reversing each chunk's ascending prefix.
        let mut out = Vec::new();
        let mut chunk = Some(list.head());
        while let Some(current) = chunk {
            for slot in (0..current.len()).rev() {
                out.push(current.get(slot).as_u32());
            }
            chunk = current.next().cloned();
        }
        out
    }

    #[test]
    fn test_append_stays_ascending() {
        let list = PostingList::new();
        let writer = list.writer();
        for id in [1u32, 4, 9, 12] {
            writer.append(LocalId::new(id));
        }
        drop(writer);

        assert_eq!(collect(&list), vec![12, 9, 4, 1]);
    }

    #[test]
    fn test_chunk_rollover() {
        let list = PostingList::new();
        let writer = list.writer();
        for id in 1..=(CHUNK_SIZE as u32 + 2) {
            writer.append(LocalId::new(id));
        }
        drop(writer);

        let head = list.head();
        assert_eq!(head.len(), 2);
        assert_eq!(head.get(0).as_u32(), CHUNK_SIZE as u32 + 1);
        let older = head.next().expect("full chunk stays linked");
        assert_eq!(older.len() as usize, CHUNK_SIZE);
        assert!(older.next().is_none());

        let ids = collect(&list);
        assert_eq!(ids.len(), CHUNK_SIZE + 2);
        assert_eq!(ids[0], CHUNK_SIZE as u32 + 2);
        assert_eq!(*ids.last().unwrap(), 1);
    }

    #[test]
    fn test_head_snapshot_is_stable() {
        let list = PostingList::new();
        list.writer().append(LocalId::new(1));

        let snapshot = list.head();
        let seen = snapshot.len();
        list.writer().append(LocalId::new(2));

        // The chunk object is shared, but a reader pairing the snapshot
        // with the count it captured sees only the old prefix.
        assert_eq!(seen, 1);
        assert_eq!(snapshot.get(0), LocalId::new(1));
    }
}
