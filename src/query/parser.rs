//! Postfix boolean query parser
//!
//! Queries are reverse Polish expressions over quoted terms and the binary
//! `&`/`|` operators, e.g. `"alpha" "beta" &`. Terms bind to a snapshot of
//! their posting list at parse time; unknown terms become empty streams so
//! boolean expressions over a partially known vocabulary degrade
//! gracefully. Whitespace is not recognized.

use crate::error::ParseError;
use crate::index::PostIndex;
use crate::query::node::{QueryNode, QueryOperator};
use crate::query::nodes::{AndOperator, OrOperator, TerminalOperator};

/// Parse `query` against `index`, returning the root pull frame.
///
/// Error positions are byte offsets into `query`: operand underflow points
/// at the operator, an unterminated term at its opening quote, and a
/// leftover stack at the end of input.
pub fn parse_query(index: &PostIndex, query: &str) -> Result<QueryNode, ParseError> {
    let bytes = query.as_bytes();
    let mut stack: Vec<Box<dyn QueryOperator>> = Vec::new();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            op @ (b'&' | b'|') => {
                let (Some(top), Some(bottom)) = (stack.pop(), stack.pop()) else {
                    let message = if op == b'&' {
                        "Need two operands for &"
                    } else {
                        "Need two operands for |"
                    };
                    return Err(ParseError::new(i, message));
                };
                // First-popped operand becomes the left frame; `&` and `|`
                // are commutative over id sets, so the order is free.
                let combined: Box<dyn QueryOperator> = if op == b'&' {
                    Box::new(AndOperator::new(top, bottom))
                } else {
                    Box::new(OrOperator::new(top, bottom))
                };
                stack.push(combined);
            }
            b'"' => {
                let opening = i;
                i += 1;
                let body_start = i;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err(ParseError::new(opening, "Unterminated string constant"));
                }
                let term = &query[body_start..i];
                stack.push(Box::new(TerminalOperator::new(index.lookup_head(term))));
            }
            _ => return Err(ParseError::new(i, "Unexpected character")),
        }
        i += 1;
    }

    match stack.pop() {
        Some(root) if stack.is_empty() => Ok(QueryNode::new(root)),
        _ => Err(ParseError::new(bytes.len(), "Unterminated query")),
    }
}
