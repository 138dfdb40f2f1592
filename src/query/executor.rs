//! Top-N result driver
//!
//! Drains a parsed query tree into local ids and resolves each to the
//! caller's post id.

use crate::index::{PostId, PostIndex, QUERY_BUFFER_SIZE};
use crate::query::node::QueryNode;

/// Collects query results and translates ids.
pub struct QueryExecutor;

impl QueryExecutor {
    /// Pull up to `limit` ids from `root`, newest first, and resolve each
    /// to its external post id.
    pub fn execute(mut root: QueryNode, index: &PostIndex, limit: usize) -> Vec<PostId> {
        let mut results = Vec::with_capacity(limit.min(QUERY_BUFFER_SIZE));
        while results.len() < limit && root.move_next() {
            let local_id = root.current();
            // Ingestion publishes the id mapping before any list append,
            // so a miss here should not happen; skip rather than
            // misreport.
            match index.translate(local_id) {
                Some(post_id) => results.push(post_id),
                None => {
                    tracing::debug!(local_id = local_id.as_u32(), "unmapped posting skipped")
                }
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parser::parse_query;

    #[test]
    fn test_limit_truncates_newest_first() {
        let index = PostIndex::new();
        for id in [100u64, 200, 300] {
            index.add_post(id, ["a"]);
        }

        let root = parse_query(&index, "\"a\"").unwrap();
        assert_eq!(QueryExecutor::execute(root, &index, 10), vec![300, 200, 100]);

        let root = parse_query(&index, "\"a\"").unwrap();
        assert_eq!(QueryExecutor::execute(root, &index, 2), vec![300, 200]);
    }

    #[test]
    fn test_zero_limit() {
        let index = PostIndex::new();
        index.add_post(1, ["a"]);

        let root = parse_query(&index, "\"a\"").unwrap();
        assert!(QueryExecutor::execute(root, &index, 0).is_empty());
    }
}
