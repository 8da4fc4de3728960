use crate::error::{ImportError, Result};
use crate::parsers::SourceTable;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How commas inside cell values are kept from breaking the column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommaHandling {
    /// Quote fields that need it (commas, quotes, line breaks).
    #[default]
    Escape,
    /// Delete every comma from the four source fields.
    Remove,
    /// Write fields verbatim. Commas shift the columns of the affected line.
    None,
}

impl CommaHandling {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommaHandling::Escape => "escape",
            CommaHandling::Remove => "remove",
            CommaHandling::None => "none",
        }
    }

    pub fn quote_style(&self) -> csv::QuoteStyle {
        match self {
            CommaHandling::Escape | CommaHandling::Remove => csv::QuoteStyle::Necessary,
            CommaHandling::None => csv::QuoteStyle::Never,
        }
    }

    /// CSV writer configured for this policy.
    pub fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(b',')
            .quote_style(self.quote_style())
            .terminator(csv::Terminator::Any(b'\n'));
        builder
    }

    /// User-facing summary of what happened to `count` commas.
    pub fn notice(&self, count: usize) -> Option<String> {
        if count == 0 {
            return None;
        }
        Some(match self {
            CommaHandling::Escape => {
                format!("{} comma(s) detected, affected fields were quoted.", count)
            }
            CommaHandling::Remove => format!("{} comma(s) detected and removed.", count),
            CommaHandling::None => format!(
                "{} comma(s) detected and left unescaped, \
                 the affected lines will not line up with the header.",
                count
            ),
        })
    }
}

impl std::str::FromStr for CommaHandling {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "escape" | "quote" => Ok(CommaHandling::Escape),
            "remove" | "strip" => Ok(CommaHandling::Remove),
            "none" | "off" => Ok(CommaHandling::None),
            other => Err(ImportError::Unknown(format!("unknown comma handling mode: {}", other))),
        }
    }
}

/// Total number of comma characters across all four fields of every row.
pub fn count_commas(table: &SourceTable) -> usize {
    table
        .iter()
        .flat_map(|row| row.fields())
        .map(|field| field.matches(',').count())
        .sum()
}

/// Copy of `table` with every comma deleted from every field.
pub fn apply_removal(table: &SourceTable) -> SourceTable {
    table.iter().map(|row| row.map_fields(strip_commas)).collect()
}

fn strip_commas(value: &str) -> String {
    value.replace(',', "")
}

/// Field value as it should be handed to the CSV writer.
pub fn prepare_field<'a>(value: &'a str, mode: CommaHandling) -> Cow<'a, str> {
    match mode {
        CommaHandling::Remove if value.contains(',') => Cow::Owned(strip_commas(value)),
        _ => Cow::Borrowed(value),
    }
}

/// Encode one line (no terminator) with the writer settings of `mode`.
pub(crate) fn encode_line<I, T>(fields: I, mode: CommaHandling) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut wtr = mode.writer_builder().from_writer(vec![]);
    wtr.write_record(fields)?;
    let data = wtr
        .into_inner()
        .map_err(|e| ImportError::csv_error(e.to_string()))?;

    let mut line = String::from_utf8(data).map_err(|e| ImportError::csv_error(e.to_string()))?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Encode a single field exactly as it appears in the output line.
///
/// With `Escape`, a field containing a comma comes back wrapped in double
/// quotes; with `None` it is returned untouched.
pub fn escape_field(value: &str, mode: CommaHandling) -> Result<String> {
    let prepared = prepare_field(value, mode);
    // a lone empty field would be written as `""`
    if prepared.is_empty() {
        return Ok(String::new());
    }

    encode_line([prepared.as_bytes()], mode)
}
