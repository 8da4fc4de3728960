use crate::comma_policy::{self, CommaHandling};
use crate::csv_assembler::{self, AlignmentWarning};
use crate::error::Result;
use crate::parsers::{self, SourceTable};
use crate::record_builder::{self, RecordOptions};
use crate::utils;
use crate::validator;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Name under which the generated file is offered for download.
pub const OUTPUT_FILE_NAME: &str = "ise_import.csv";

/// MIME type of the generated file.
pub fn output_mime() -> mime::Mime {
    mime::TEXT_CSV
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub include_description: bool,
    pub comma_handling: CommaHandling,
    pub max_file_size: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_description: true,
            comma_handling: CommaHandling::Escape,
            max_file_size: 100 * 1024 * 1024,
        }
    }
}

impl ConvertOptions {
    fn record_options(&self) -> RecordOptions {
        RecordOptions {
            include_description: self.include_description,
            comma_handling: self.comma_handling,
        }
    }
}

/// Result of one conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    #[serde(skip)]
    pub csv: String,
    pub row_count: usize,
    pub comma_count: usize,
    pub comma_handling: CommaHandling,
    pub comma_notice: Option<String>,
    pub warnings: Vec<AlignmentWarning>,
}

/// Read, validate and convert a spreadsheet into ISE import CSV.
pub fn convert(
    content: &[u8],
    filename: &str,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    utils::validate_file_size(content, options.max_file_size)?;
    let table = parsers::read_spreadsheet(content, filename)?;
    convert_table(table, options)
}

/// Convert an already loaded table.
pub fn convert_table(table: SourceTable, options: &ConvertOptions) -> Result<ConversionReport> {
    validator::validate_macs(&table)?;

    let comma_count = comma_policy::count_commas(&table);
    let table = match options.comma_handling {
        CommaHandling::Remove if comma_count > 0 => comma_policy::apply_removal(&table),
        CommaHandling::None if comma_count > 0 => {
            warn!(comma_count, "commas left unescaped, affected lines will be misaligned");
            table
        }
        _ => table,
    };
    debug!(comma_count, mode = options.comma_handling.as_str(), "comma policy applied");

    let records = record_builder::build_records(&table, &options.record_options());
    let assembled = csv_assembler::assemble_csv(&records, options.comma_handling)?;

    info!(
        rows = records.len(),
        comma_count,
        warnings = assembled.warnings.len(),
        "ISE import CSV generated"
    );

    Ok(ConversionReport {
        csv: assembled.content,
        row_count: records.len(),
        comma_count,
        comma_handling: options.comma_handling,
        comma_notice: options.comma_handling.notice(comma_count),
        warnings: assembled.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use crate::parsers::SourceRow;
    use crate::record_builder::COLUMN_COUNT;

    fn table() -> SourceTable {
        vec![
            SourceRow::new("AA:BB:CC:DD:EE:01", "Printers", "Floor 2, east", "HQ"),
            SourceRow::new("AA:BB:CC:DD:EE:02", "Cameras", "Lobby", "Branch, North"),
        ]
    }

    #[test]
    fn test_convert_table_escape() {
        let report = convert_table(table(), &ConvertOptions::default()).unwrap();
        assert_eq!(report.row_count, 2);
        assert_eq!(report.comma_count, 2);
        assert_eq!(report.csv.lines().count(), 3);
        assert!(report.csv.contains("\"Floor 2, east\""));
        assert!(report.csv.contains("\"Branch, North\""));
        assert!(report.comma_notice.is_some());
    }

    #[test]
    fn test_convert_table_remove() {
        let options = ConvertOptions {
            comma_handling: CommaHandling::Remove,
            ..ConvertOptions::default()
        };
        let report = convert_table(table(), &options).unwrap();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(report.csv.as_bytes());
        for record in reader.records() {
            let record = record.unwrap();
            assert_eq!(record.len(), COLUMN_COUNT);
            assert!(record.iter().all(|f| !f.contains(',')));
        }
        assert!(!report.csv.contains('"'));
        assert_eq!(report.comma_count, 2);
    }

    #[test]
    fn test_escape_output_parses_back_to_fixed_width() {
        let report = convert_table(table(), &ConvertOptions::default()).unwrap();
        let mut reader = csv::Reader::from_reader(report.csv.as_bytes());
        assert_eq!(reader.headers().unwrap().len(), COLUMN_COUNT);
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][6], "Floor 2, east");
        assert_eq!(&rows[1][COLUMN_COUNT - 1], "Branch, North");
    }

    #[test]
    fn test_convert_table_is_deterministic() {
        let options = ConvertOptions::default();
        let first = convert_table(table(), &options).unwrap();
        let second = convert_table(table(), &options).unwrap();
        assert_eq!(first.csv, second.csv);
    }

    #[test]
    fn test_blank_mac_produces_no_csv() {
        let mut rows = table();
        rows.push(SourceRow::new("", "g", "d", "l"));
        let err = convert_table(rows, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::BlankMac { row: 3 }));
    }

    #[test]
    fn test_convert_rejects_oversized_input() {
        let options = ConvertOptions {
            max_file_size: 4,
            ..ConvertOptions::default()
        };
        let err = convert(b"0123456789", "macs.xlsx", &options).unwrap_err();
        assert!(matches!(err, ImportError::FileTooLarge { .. }));
    }

    #[test]
    fn test_output_metadata() {
        assert_eq!(OUTPUT_FILE_NAME, "ise_import.csv");
        assert_eq!(output_mime().essence_str(), "text/csv");
    }
}
