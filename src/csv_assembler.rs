use crate::comma_policy::{encode_line, CommaHandling};
use crate::error::Result;
use crate::record_builder::{TargetRecord, COLUMN_NAMES};
use serde::Serialize;
use tracing::warn;

/// A data line that contains the token `MAC`, which usually means a header
/// row was imported as data or columns shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlignmentWarning {
    /// 1-based CSV record number, the header being record 1. This is the
    /// physical line number unless an earlier quoted field spans lines.
    pub line: usize,
}

impl std::fmt::Display for AlignmentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} contains the token \"MAC\", check column alignment", self.line)
    }
}

/// Assembled CSV text plus the non-fatal findings of the sanity scan.
#[derive(Debug, Clone)]
pub struct AssembledCsv {
    pub content: String,
    pub warnings: Vec<AlignmentWarning>,
}

/// Join the header and records into CSV text and run the alignment scan.
pub fn assemble_csv(records: &[TargetRecord], mode: CommaHandling) -> Result<AssembledCsv> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(encode_line(COLUMN_NAMES, mode)?);
    for record in records {
        lines.push(encode_line(record.fields(), mode)?);
    }

    let warnings = find_alignment_warnings(&lines[1..]);
    for warning in &warnings {
        warn!(line = warning.line, "possible column misalignment");
    }

    let mut content = lines.join("\n");
    content.push('\n');

    Ok(AssembledCsv { content, warnings })
}

/// Scan data lines for a whole-word, case-insensitive `MAC`.
///
/// `data_lines` excludes the header; reported numbers count it as line 1.
pub fn find_alignment_warnings<S: AsRef<str>>(data_lines: &[S]) -> Vec<AlignmentWarning> {
    use regex::Regex;

    let mut warnings = Vec::new();
    if let Ok(mac_regex) = Regex::new(r"(?i)\bmac\b") {
        for (idx, line) in data_lines.iter().enumerate() {
            if mac_regex.is_match(line.as_ref()) {
                warnings.push(AlignmentWarning { line: idx + 2 });
            }
        }
    }
    warnings
}

/// Header plus the first `rows` data lines.
pub fn preview(csv: &str, rows: usize) -> String {
    csv.lines().take(rows + 1).collect::<Vec<_>>().join("\n")
}
