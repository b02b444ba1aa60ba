//! Line index over the raw source.

/// Byte span of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineInfo {
    /// Byte offset of line start (inclusive).
    pub start: u32,
    /// Byte offset of end of line content, excluding `\n` and a preceding `\r`.
    pub end: u32,
}

impl LineInfo {
    /// Returns the line's text within `source`.
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start as usize..self.end as usize]
    }
}

/// Splits `source` into lines.
///
/// A trailing newline does not open an extra empty line, so `"a\n"` has one
/// line and `""` has none.
pub(crate) fn index_lines(source: &str) -> Vec<LineInfo> {
    let mut lines = Vec::new();
    let mut offset = 0u32;

    for raw in source.split_inclusive('\n') {
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        let content = content.strip_suffix('\r').unwrap_or(content);
        lines.push(LineInfo {
            start: offset,
            end: offset + content.len() as u32,
        });
        offset += raw.len() as u32;
    }

    lines
}
