//! Flattened document model handed to rules.

use crate::lines::{LineInfo, index_lines};

/// Inclusive, 1-based range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineRange {
    /// First line (1-based).
    pub start: u32,
    /// Last line (1-based, inclusive).
    pub end: u32,
}

impl LineRange {
    /// Creates a new range. `end` is clamped so that it is never before `start`.
    pub const fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: if end < start { start } else { end },
        }
    }

    /// Returns true if `line` falls inside the range.
    pub const fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}

/// A heading (ATX or setext).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6).
    pub depth: u8,
    /// Plain text content of the heading.
    pub text: String,
    /// Line of the heading (1-based).
    pub line: u32,
    /// Column of the heading marker (1-based).
    pub column: u32,
}

/// A fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Info-string language, if any.
    pub lang: Option<String>,
    /// Whether the block is fenced (``` or ~~~) rather than indented.
    pub fenced: bool,
    /// All lines of the block, including fence lines.
    pub lines: LineRange,
    /// Lines between the fences. `None` for an empty fenced block.
    pub body: Option<LineRange>,
    /// Column of the opening fence (1-based).
    pub column: u32,
}

impl CodeBlock {
    /// Returns true if `line` is the opening or closing fence of this block.
    pub fn is_fence_line(&self, line: u32) -> bool {
        self.fenced && self.lines.contains(line) && !self.body.is_some_and(|b| b.contains(line))
    }
}

/// Classification of a single line, used for fast skipping in line rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineKind {
    /// Ordinary prose.
    #[default]
    Text,
    /// Opening or closing fence of a fenced code block.
    Fence,
    /// Content of a code block.
    Code,
    /// Row of a GFM table (including the delimiter row).
    Table,
    /// Leading YAML/TOML front matter, delimiters included.
    FrontMatter,
}

/// A parsed Markdown document.
///
/// Positions are 1-based lines and 1-based character columns.
#[derive(Debug, Clone)]
pub struct Document<'src> {
    source: &'src str,
    lines: Vec<LineInfo>,
    kinds: Vec<LineKind>,
    headings: Vec<Heading>,
    code_blocks: Vec<CodeBlock>,
    tables: Vec<LineRange>,
    front_matter: Option<LineRange>,
}

impl<'src> Document<'src> {
    /// Creates a document with only the line index.
    ///
    /// Used for non-Markdown files and when the structural parse fails:
    /// line-oriented rules keep working while structure-oriented rules
    /// simply see no headings or blocks.
    pub fn plain(source: &'src str) -> Self {
        let lines = index_lines(source);
        let kinds = vec![LineKind::Text; lines.len()];
        Self {
            source,
            lines,
            kinds,
            headings: Vec::new(),
            code_blocks: Vec::new(),
            tables: Vec::new(),
            front_matter: None,
        }
    }

    pub(crate) fn with_structure(
        source: &'src str,
        headings: Vec<Heading>,
        code_blocks: Vec<CodeBlock>,
        tables: Vec<LineRange>,
        front_matter: Option<LineRange>,
    ) -> Self {
        let mut doc = Self::plain(source);

        if let Some(range) = front_matter {
            doc.mark(range, LineKind::FrontMatter);
        }
        for range in &tables {
            doc.mark(*range, LineKind::Table);
        }
        for block in &code_blocks {
            doc.mark(block.lines, LineKind::Fence);
            if let Some(body) = block.body {
                doc.mark(body, LineKind::Code);
            }
        }

        doc.headings = headings;
        doc.code_blocks = code_blocks;
        doc.tables = tables;
        doc.front_matter = front_matter;
        doc
    }

    fn mark(&mut self, range: LineRange, kind: LineKind) {
        for line in range.start..=range.end {
            if let Some(slot) = line
                .checked_sub(1)
                .and_then(|i| self.kinds.get_mut(i as usize))
            {
                *slot = kind;
            }
        }
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the text of a line (1-based), without its line ending.
    pub fn line(&self, line: u32) -> Option<&'src str> {
        let info = self.lines.get(line.checked_sub(1)? as usize)?;
        Some(info.text(self.source))
    }

    /// Iterates over `(line number, kind, text)` for every line.
    pub fn lines(&self) -> impl Iterator<Item = (u32, LineKind, &'src str)> + '_ {
        let source = self.source;
        self.lines
            .iter()
            .zip(self.kinds.iter())
            .enumerate()
            .map(move |(i, (info, kind))| (i as u32 + 1, *kind, info.text(source)))
    }

    /// Returns the kind of a line (1-based). Out-of-range lines are `Text`.
    pub fn line_kind(&self, line: u32) -> LineKind {
        line.checked_sub(1)
            .and_then(|i| self.kinds.get(i as usize))
            .copied()
            .unwrap_or_default()
    }

    /// Headings in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Code blocks in document order.
    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.code_blocks
    }

    /// Table line ranges in document order.
    pub fn tables(&self) -> &[LineRange] {
        &self.tables
    }

    /// Front matter line range, if the document starts with one.
    pub fn front_matter(&self) -> Option<LineRange> {
        self.front_matter
    }

    /// Converts a byte offset within `line` (1-based) into a 1-based
    /// character column.
    ///
    /// Offsets past the end of the line clamp to the column after its last
    /// character. An out-of-range line yields column 1.
    pub fn column(&self, line: u32, byte: usize) -> u32 {
        let Some(text) = self.line(line) else {
            return 1;
        };
        let mut end = byte.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].chars().count() as u32 + 1
    }
}
