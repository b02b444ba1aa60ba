//! JSON formatter.

use crate::{Finding, LinterError};

/// Renders findings as a pretty-printed JSON array, newline-terminated.
///
/// An empty slice renders as `[]`.
pub fn render_json(findings: &[Finding]) -> Result<String, LinterError> {
    let mut out = serde_json::to_string_pretty(findings)
        .map_err(|e| LinterError::Internal(format!("Failed to serialize findings: {}", e)))?;
    out.push('\n');
    Ok(out)
}
