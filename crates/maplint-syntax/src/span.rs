//! Byte spans and line/column lookup

/// A half-open byte range into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span covering both `self` and `other`
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn start_offset(&self) -> usize {
        self.start as usize
    }

    pub fn end_offset(&self) -> usize {
        self.end as usize
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice of `source` covered by this span
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.start_offset()..self.end_offset())
            .unwrap_or("")
    }
}

/// Nodes that know where they are in the source
pub trait HasSpan {
    fn span(&self) -> Span;
}

impl HasSpan for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// 1-based line and column of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Precomputed line starts for offset -> line/column conversion
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Columns count characters, not bytes
    pub fn position(&self, source: &str, offset: usize) -> Position {
        let offset = offset.min(source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);

        Position {
            line: line + 1,
            column: column + 1,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        let a = Span::new(4, 8);
        let b = Span::new(10, 12);
        assert_eq!(a.join(b), Span::new(4, 12));
        assert_eq!(b.join(a), Span::new(4, 12));
    }

    #[test]
    fn test_text() {
        let source = "const m = new Map();";
        assert_eq!(Span::new(6, 7).text(source), "m");
        assert_eq!(Span::new(10, 19).text(source), "new Map()");
        assert_eq!(Span::new(100, 120).text(source), "");
    }

    #[test]
    fn test_line_index() {
        let source = "a\nbc\n\ndef";
        let index = LineIndex::new(source);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(source, 0), Position { line: 1, column: 1 });
        assert_eq!(index.position(source, 2), Position { line: 2, column: 1 });
        assert_eq!(index.position(source, 3), Position { line: 2, column: 2 });
        assert_eq!(index.position(source, 5), Position { line: 3, column: 1 });
        assert_eq!(index.position(source, 8), Position { line: 4, column: 3 });
    }

    #[test]
    fn test_line_index_counts_characters() {
        let source = "const é = m[\"x\"];";
        let index = LineIndex::new(source);
        let offset = source.find('m').unwrap();
        assert_eq!(index.position(source, offset).column, 11);
    }
}
