//! Leaf operator: reverse scan of one posting list

use std::sync::Arc;

use crate::index::{LocalId, PostChunk, QUERY_BUFFER_SIZE};
use crate::query::node::QueryOperator;

/// Streams one posting list newest-to-oldest.
///
/// The head chunk and its valid count are captured at construction, so the
/// scan covers exactly the ids present at snapshot time; appends that land
/// afterwards are visible only to later query trees. Because the list is
/// strictly ascending and chunks are newest-first, the reverse walk yields
/// strictly descending ids without duplicates.
pub struct TerminalOperator {
    chunk: Option<Arc<PostChunk>>,
    /// Ids still to emit from `chunk`: slots `[0, remaining)`.
    remaining: u32,
}

impl TerminalOperator {
    /// Bind to a head snapshot; `None` (unknown term) yields an empty
    /// stream.
    pub fn new(head: Option<Arc<PostChunk>>) -> Self {
        let remaining = head.as_ref().map_or(0, |chunk| chunk.len());
        Self {
            chunk: head,
            remaining,
        }
    }
}

impl QueryOperator for TerminalOperator {
    fn next_chunk(&mut self, buffer: &mut [LocalId; QUERY_BUFFER_SIZE]) -> usize {
        let mut filled = 0;
        while filled < QUERY_BUFFER_SIZE {
            let Some(chunk) = &self.chunk else { break };
            if self.remaining == 0 {
                let next = chunk.next().cloned();
                self.remaining = next.as_ref().map_or(0, |older| older.len());
                self.chunk = next;
                continue;
            }
            self.remaining -= 1;
            buffer[filled] = chunk.get(self.remaining);
            filled += 1;
        }
        filled
    }
}
