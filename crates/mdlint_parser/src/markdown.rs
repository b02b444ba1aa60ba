//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! The mdast tree is walked once and flattened into a `Document`.

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};

use crate::document::{CodeBlock, Document, Heading, LineRange};
use crate::ParseError;

/// Markdown parser implementation.
///
/// Uses `markdown-rs` with:
/// - CommonMark
/// - GFM (tables, strikethrough, footnotes, autolinks)
/// - Frontmatter (YAML and TOML)
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self
    }

    /// Gets default parse options (GFM + front matter).
    fn default_options() -> ParseOptions {
        let mut options = ParseOptions::gfm();
        options.constructs.frontmatter = true;
        options
    }

    /// File extensions this parser handles, without the leading dot.
    pub fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    /// Returns true if this parser can handle the given file extension.
    pub fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Parses the source text into a `Document`.
    pub fn parse<'src>(&self, source: &'src str) -> Result<Document<'src>, ParseError> {
        let options = Self::default_options();
        let mdast =
            to_mdast(source, &options).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let mut collector = Collector::new(source);
        collector.visit(&mdast);

        Ok(Document::with_structure(
            source,
            collector.headings,
            collector.code_blocks,
            collector.tables,
            collector.front_matter,
        ))
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

struct Collector<'src> {
    source: &'src str,
    headings: Vec<Heading>,
    code_blocks: Vec<CodeBlock>,
    tables: Vec<LineRange>,
    front_matter: Option<LineRange>,
}

impl<'src> Collector<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            headings: Vec::new(),
            code_blocks: Vec::new(),
            tables: Vec::new(),
            front_matter: None,
        }
    }

    fn visit(&mut self, node: &Node) {
        if let Some(pos) = node.position() {
            let start = pos.start.line as u32;
            let end = pos.end.line as u32;

            match node {
                Node::Heading(heading) => self.headings.push(Heading {
                    depth: heading.depth,
                    text: plain_text(&heading.children),
                    line: start,
                    column: pos.start.column as u32,
                }),
                Node::Code(code) => {
                    let block = self.code_block(
                        code.lang.clone(),
                        pos.start.offset,
                        pos.end.offset,
                        start,
                        end,
                        pos.start.column as u32,
                    );
                    self.code_blocks.push(block);
                }
                Node::Table(_) => self.tables.push(LineRange::new(start, end)),
                Node::Yaml(_) | Node::Toml(_) => {
                    self.front_matter = Some(LineRange::new(start, end));
                }
                _ => {}
            }
        }

        if let Some(children) = node.children() {
            for child in children {
                self.visit(child);
            }
        }
    }

    fn code_block(
        &self,
        lang: Option<String>,
        start_offset: usize,
        end_offset: usize,
        start: u32,
        end: u32,
        column: u32,
    ) -> CodeBlock {
        let lines = LineRange::new(start, end);
        let opening = self.source.get(start_offset..).unwrap_or_default();
        let marker = if opening.starts_with("```") {
            Some("```")
        } else if opening.starts_with("~~~") {
            Some("~~~")
        } else {
            None
        };

        let Some(marker) = marker else {
            return CodeBlock {
                lang,
                fenced: false,
                lines,
                body: Some(lines),
                column,
            };
        };

        let closed = end > start
            && self
                .source
                .get(..end_offset)
                .is_some_and(|s| s.trim_end().ends_with(marker));
        let body_end = if closed { end - 1 } else { end };
        let body = (start < body_end).then(|| LineRange::new(start + 1, body_end));

        CodeBlock {
            lang: lang.filter(|l| !l.is_empty()),
            fenced: true,
            lines,
            body,
            column,
        }
    }
}

/// Concatenates the text content of inline nodes.
fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::InlineCode(code) => out.push_str(&code.value),
            other => {
                if let Some(children) = other.children() {
                    out.push_str(&plain_text(children));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_simple_markdown() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("# Hello\n\nThis is a paragraph.").unwrap();

        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.headings().len(), 1);
        assert_eq!(doc.headings()[0].text, "Hello");
        assert_eq!(doc.headings()[0].depth, 1);
        assert_eq!(doc.headings()[0].line, 1);
        assert_eq!(doc.headings()[0].column, 1);
    }

    #[test]
    fn test_parse_multiple_headings() {
        let parser = MarkdownParser::new();
        let doc = parser
            .parse("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6")
            .unwrap();

        assert_eq!(doc.headings().len(), 6);
        for (i, heading) in doc.headings().iter().enumerate() {
            assert_eq!(heading.depth, (i + 1) as u8);
            assert_eq!(heading.line, (i + 1) as u32);
        }
    }

    #[test]
    fn test_parse_setext_heading() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("Title\n=====\n").unwrap();

        assert_eq!(doc.headings().len(), 1);
        assert_eq!(doc.headings()[0].depth, 1);
        assert_eq!(doc.headings()[0].text, "Title");
    }

    #[test]
    fn test_heading_text_includes_inline_code_and_emphasis() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("## Use `cargo` *now*\n").unwrap();

        assert_eq!(doc.headings()[0].text, "Use cargo now");
    }

    #[test]
    fn test_parse_fenced_code_block() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("```rust\nfn main() {}\n```\n").unwrap();

        let block = &doc.code_blocks()[0];
        assert_eq!(block.lang.as_deref(), Some("rust"));
        assert!(block.fenced);
        assert_eq!(block.lines, LineRange::new(1, 3));
        assert_eq!(block.body, Some(LineRange::new(2, 2)));
        assert_eq!(doc.line_kind(1), LineKind::Fence);
        assert_eq!(doc.line_kind(2), LineKind::Code);
        assert_eq!(doc.line_kind(3), LineKind::Fence);
    }

    #[test]
    fn test_parse_code_block_no_language() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("~~~\nplain code\n~~~\n").unwrap();

        let block = &doc.code_blocks()[0];
        assert!(block.fenced);
        assert!(block.lang.is_none());
    }

    #[test]
    fn test_parse_indented_code_block() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("text\n\n    indented\n").unwrap();

        let block = &doc.code_blocks()[0];
        assert!(!block.fenced);
        assert_eq!(block.lines, LineRange::new(3, 3));
        assert_eq!(doc.line_kind(3), LineKind::Code);
        assert_eq!(doc.line_kind(1), LineKind::Text);
    }

    #[test]
    fn test_parse_table() {
        let parser = MarkdownParser::new();
        let source = "intro\n\n| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |\n";
        let doc = parser.parse(source).unwrap();

        assert_eq!(doc.tables(), &[LineRange::new(3, 5)]);
        assert_eq!(doc.line_kind(4), LineKind::Table);
        assert_eq!(doc.line_kind(1), LineKind::Text);
    }

    #[test]
    fn test_parse_front_matter() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("---\ntitle: x\n---\n\n# Body\n").unwrap();

        assert_eq!(doc.front_matter(), Some(LineRange::new(1, 3)));
        assert_eq!(doc.line_kind(2), LineKind::FrontMatter);
        assert_eq!(doc.headings()[0].line, 5);
    }

    #[test]
    fn test_parse_empty_document() {
        let parser = MarkdownParser::new();
        let doc = parser.parse("").unwrap();

        assert_eq!(doc.line_count(), 0);
        assert!(doc.headings().is_empty());
        assert!(doc.code_blocks().is_empty());
    }

    #[rstest]
    #[case("md", true)]
    #[case("markdown", true)]
    #[case("MD", true)]
    #[case("mkd", true)]
    #[case("txt", false)]
    fn test_extensions(#[case] ext: &str, #[case] expected: bool) {
        assert_eq!(MarkdownParser::new().can_parse(ext), expected);
    }
}
