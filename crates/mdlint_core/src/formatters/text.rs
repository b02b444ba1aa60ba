//! Text formatter.

use std::fmt::Write;

use crate::Finding;

/// Renders one `file:line:column rule[severity] message` line per finding.
///
/// An empty slice renders as an empty string.
pub fn render_text(findings: &[Finding]) -> String {
    let mut out = String::new();
    for f in findings {
        let _ = writeln!(
            out,
            "{}:{}:{} {}[{}] {}",
            f.file, f.line, f.column, f.rule, f.severity, f.message
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_text_lines() {
        let findings = vec![
            Finding::new("MD1000", 2, 11, "Line length 26 exceeds 10")
                .with_severity(Severity::Warning)
                .with_file("a.md"),
            Finding::new("MD9000", 5, 1, "TODO found")
                .with_severity(Severity::Suggestion)
                .with_file("b.md"),
        ];

        assert_eq!(
            render_text(&findings),
            "a.md:2:11 MD1000[warning] Line length 26 exceeds 10\n\
             b.md:5:1 MD9000[suggestion] TODO found\n"
        );
    }
}
