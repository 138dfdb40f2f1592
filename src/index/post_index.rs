//! The post index: term map, id assignment, ingestion and query entry
//!
//! Ingestion sorts and dedups the incoming terms to fix a canonical lock
//! order, resolves posting lists with a two-phase find-or-create, and
//! draws the local id while holding every per-list writer lock so that
//! lists stay strictly ascending under concurrency.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::query::{parse_query, QueryExecutor};

use super::chunk::PostChunk;
use super::posting::PostingList;
use super::types::{LocalId, PostId};

/// Concurrent in-memory inverted index over short posts.
///
/// Thread-safe for arbitrary mixes of [`add_post`] and [`query_posts`]; all
/// methods take `&self`. Ingestions touching disjoint term sets run in
/// parallel; overlapping ones serialize only on the shared posting lists.
///
/// [`add_post`]: PostIndex::add_post
/// [`query_posts`]: PostIndex::query_posts
pub struct PostIndex {
    /// Monotonic local-id source; `fetch_add(1) + 1` yields ids from 1.
    next_local_id: AtomicU32,
    /// Term -> posting list. Entries are created lazily and never removed.
    sets: RwLock<HashMap<String, Arc<PostingList>>>,
    /// Local id -> caller-supplied post id. Populated under the per-list
    /// locks so any id observable in a list is already resolvable.
    id_map: RwLock<HashMap<LocalId, PostId>>,
}

impl PostIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            next_local_id: AtomicU32::new(0),
            sets: RwLock::new(HashMap::new()),
            id_map: RwLock::new(HashMap::new()),
        }
    }

    /// Ingest one post under its terms.
    ///
    /// Terms are matched byte-for-byte at query time; normalization is the
    /// caller's concern. Duplicate terms collapse to a single posting. An
    /// empty term set is legal and leaves the post unreachable by query.
    pub fn add_post<I>(&self, post_id: PostId, terms: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut sorted: Vec<String> = terms
            .into_iter()
            .map(|term| term.as_ref().to_string())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();

        let lists = self.find_or_create_lists(&sorted);

        // Writer locks are taken in sorted-term order, which is the same
        // for every ingestion and therefore deadlock-free.
        let writers: Vec<_> = lists.iter().map(|list| list.writer()).collect();

        // The id must be drawn while every list is locked: released earlier,
        // a concurrent ingestion could append a smaller id behind ours and
        // break the ascending invariant.
        let local_id = LocalId::new(self.next_local_id.fetch_add(1, Ordering::SeqCst) + 1);

        self.id_map.write().insert(local_id, post_id);

        for writer in &writers {
            writer.append(local_id);
        }

        tracing::trace!(
            post_id,
            local_id = local_id.as_u32(),
            terms = sorted.len(),
            "post indexed"
        );
    }

    /// Resolve the sorted terms to posting lists, creating missing ones.
    ///
    /// Shared-lock pass first: exclusive locks on the term map stall
    /// queries, so they are taken only when a term is genuinely new.
    fn find_or_create_lists(&self, sorted_terms: &[String]) -> Vec<Arc<PostingList>> {
        let mut lists = Vec::with_capacity(sorted_terms.len());
        {
            let sets = self.sets.read();
            for term in sorted_terms {
                let Some(list) = sets.get(term) else { break };
                lists.push(Arc::clone(list));
            }
            if lists.len() == sorted_terms.len() {
                return lists;
            }
        }

        // At least one term was missing. Retake exclusively and resolve
        // everything again, re-checking each entry to tolerate creators
        // that raced us between the two passes.
        lists.clear();
        let mut sets = self.sets.write();
        for term in sorted_terms {
            let list = sets
                .entry(term.clone())
                .or_insert_with(|| Arc::new(PostingList::new()));
            lists.push(Arc::clone(list));
        }
        lists
    }

    /// Head-chunk snapshot of a term's posting list, or `None` if the term
    /// was never seen.
    pub fn lookup_head(&self, term: &str) -> Option<Arc<PostChunk>> {
        self.sets.read().get(term).map(|list| list.head())
    }

    /// Resolve a local id back to the caller's post id.
    pub fn translate(&self, local_id: LocalId) -> Option<PostId> {
        self.id_map.read().get(&local_id).copied()
    }

    /// Number of posts ingested so far.
    pub fn post_count(&self) -> u32 {
        self.next_local_id.load(Ordering::SeqCst)
    }

    /// Number of distinct terms seen so far.
    pub fn term_count(&self) -> usize {
        self.sets.read().len()
    }

    /// Evaluate a postfix boolean query, returning up to `limit` post ids
    /// in descending ingestion order (newest first).
    pub fn query_posts(&self, query: &str, limit: usize) -> Result<Vec<PostId>> {
        let root = parse_query(self, query)?;
        Ok(QueryExecutor::execute(root, self, limit))
    }
}

impl Default for PostIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PostIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostIndex")
            .field("posts", &self.post_count())
            .field("terms", &self.term_count())
            .finish()
    }
}
