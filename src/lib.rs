//! postdex: in-memory inverted index over short posts
//!
//! Posts carry a caller-supplied 64-bit id and a set of already-tokenized
//! terms. Ingestion is incremental and thread-safe; queries are postfix
//! boolean expressions over terms and return post ids newest-first,
//! truncated to a caller-supplied limit.
//!
//! # Example
//!
//! ```
//! use postdex::PostIndex;
//!
//! let index = PostIndex::new();
//! index.add_post(100, ["alpha", "beta"]);
//! index.add_post(200, ["alpha"]);
//!
//! let hits = index.query_posts("\"alpha\"\"beta\"&", 10).unwrap();
//! assert_eq!(hits, vec![100]);
//! ```

pub mod error;
pub mod index;
pub mod query;

pub use error::{ParseError, PostdexError, Result};
pub use index::{LocalId, PostChunk, PostId, PostIndex, PostingList, CHUNK_SIZE, QUERY_BUFFER_SIZE};
pub use query::{parse_query, QueryExecutor, QueryNode, QueryOperator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
