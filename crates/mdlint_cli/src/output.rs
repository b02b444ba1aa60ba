//! Output writing

use std::io::Write;

use miette::{IntoDiagnostic, Result};
use mdlint_core::{OutputFormat, Report, RuleRegistry};

/// Writes the rendered report to stdout.
pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    let rendered = report.render(format).into_diagnostic()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes()).into_diagnostic()?;
    stdout.flush().into_diagnostic()
}

/// Writes one line per registered rule to stdout.
pub fn print_rules(registry: &RuleRegistry) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for rule in registry.all() {
        let meta = rule.meta();
        writeln!(
            stdout,
            "{:<8} {:<22} {:<11} {}",
            meta.id,
            meta.name,
            rule.severity(),
            meta.description
        )
        .into_diagnostic()?;
    }
    Ok(())
}
