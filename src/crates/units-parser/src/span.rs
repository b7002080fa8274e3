use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Byte offsets `start..end` of a token within an exponent expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Zero-width span just past an expression of `source_len` bytes
    pub fn eof(source_len: usize) -> Self {
        Span::new(source_len, source_len)
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_group_span() {
        // "(1+2" with the group opened at 0 and input ending at 4
        let open = Span::from(0..1);
        let covered = open.merge(Span::eof(4));
        assert_eq!(covered, Span::new(0, 4));
        assert_eq!(covered.to_string(), "0..4");
    }

    #[test]
    fn test_eof_span() {
        let span = Span::eof(7);
        assert_eq!(span.to_range(), 7..7);
        assert_eq!(&"2^(1+3)"[span.to_range()], "");
    }
}
