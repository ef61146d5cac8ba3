// rb_ast - parse tree definitions for the rb frontend
use serde::{Deserialize, Serialize};

pub mod node;

pub use node::Node;

/// Position information for parse nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn dummy() -> Self {
        Self::default()
    }

    /// A span is valid once the parser has stamped it with a real position.
    pub fn exists(&self) -> bool {
        *self != Self::default()
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(&self, other: &Span) -> Span {
        let (start_line, start_column) =
            if (self.start_line, self.start_column) <= (other.start_line, other.start_column) {
                (self.start_line, self.start_column)
            } else {
                (other.start_line, other.start_column)
            };
        let (end_line, end_column) =
            if (self.end_line, self.end_column) >= (other.end_line, other.end_column) {
                (self.end_line, self.end_column)
            } else {
                (other.end_line, other.end_column)
            };
        Span {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_span_does_not_exist() {
        assert!(!Span::dummy().exists());
        assert!(Span::new(1, 0, 1, 4).exists());
    }

    #[test]
    fn join_covers_both_spans() {
        let a = Span::new(2, 4, 2, 9);
        let b = Span::new(1, 1, 2, 6);
        let joined = a.join(&b);
        assert_eq!(joined, Span::new(1, 1, 2, 9));
    }
}
