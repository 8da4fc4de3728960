use crate::error::Result;
use crate::utils::{self, SpreadsheetFormat};
use tracing::debug;

pub mod excel;

/// Number of leading input columns the importer reads.
pub const SOURCE_COLUMNS: usize = 4;

/// One input row, taken positionally from columns A..D.
///
/// Column order is the contract: `[MAC, group, description, location]`.
/// Header labels in the sheet are never consulted, so a sheet that does carry
/// a header row has that row imported as data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub mac: String,
    pub group: String,
    pub description: String,
    pub location: String,
}

impl SourceRow {
    pub fn new<S: Into<String>>(mac: S, group: S, description: S, location: S) -> Self {
        Self {
            mac: mac.into(),
            group: group.into(),
            description: description.into(),
            location: location.into(),
        }
    }

    pub fn fields(&self) -> [&str; SOURCE_COLUMNS] {
        [&self.mac, &self.group, &self.description, &self.location]
    }

    pub fn map_fields<F>(&self, mut f: F) -> SourceRow
    where
        F: FnMut(&str) -> String,
    {
        SourceRow {
            mac: f(&self.mac),
            group: f(&self.group),
            description: f(&self.description),
            location: f(&self.location),
        }
    }
}

pub type SourceTable = Vec<SourceRow>;

/// Read the first sheet of a spreadsheet into a [`SourceTable`].
pub fn read_spreadsheet(content: &[u8], filename: &str) -> Result<SourceTable> {
    let format = utils::detect_spreadsheet_format(filename, content)?;
    debug!(filename, format = format.as_str(), bytes = content.len(), "reading spreadsheet");

    let table = match format {
        SpreadsheetFormat::Xlsx => excel::read_xlsx(content)?,
        SpreadsheetFormat::Xls => excel::read_xls(content)?,
    };

    debug!(rows = table.len(), "spreadsheet loaded");
    Ok(table)
}

/// Get list of supported file formats
pub fn get_supported_formats() -> Vec<String> {
    vec!["xlsx".to_string(), "xls".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_fields_touches_all_four() {
        let row = SourceRow::new("a", "b", "c", "d");
        let upper = row.map_fields(|s| s.to_uppercase());
        assert_eq!(upper.fields(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_read_spreadsheet_rejects_garbage_xlsx() {
        let err = read_spreadsheet(b"definitely not a workbook", "macs.xlsx").unwrap_err();
        assert!(matches!(err, crate::ImportError::UnreadableFile(_)));
    }
}
