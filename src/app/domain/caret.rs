/// Caret position on the editing surface. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Caret {
    pub line: usize,
    pub column: usize,
}

impl Caret {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Column 1 of `line`.
    pub fn line_start(line: usize) -> Self {
        Self { line, column: 1 }
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::line_start(1)
    }
}

/// A selection between two carets, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Caret,
    pub head: Caret,
}

impl Selection {
    pub fn new(anchor: Caret, head: Caret) -> Self {
        Self { anchor, head }
    }

    /// Anchor and head coincide, so nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn first_line(&self) -> usize {
        self.anchor.line.min(self.head.line)
    }
}
