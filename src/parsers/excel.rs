use crate::error::{ImportError, Result};
use crate::parsers::{SourceRow, SourceTable, SOURCE_COLUMNS};
use calamine::{open_workbook_from_rs, Data, ExcelDateTime, Range, Reader, Xls, Xlsx};
use std::io::Cursor;
use tracing::debug;

/// Parse Excel XLSX file
pub fn read_xlsx(content: &[u8]) -> Result<SourceTable> {
    let cursor = Cursor::new(content);

    match open_workbook_from_rs::<Xlsx<_>, _>(cursor) {
        Ok(mut workbook) => match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => table_from_range(&range),
            Some(Err(e)) => Err(ImportError::unreadable_file(format!(
                "Failed to read first sheet: {}",
                e
            ))),
            None => Err(ImportError::EmptyInput),
        },
        Err(e) => Err(ImportError::unreadable_file(format!(
            "Failed to open Excel file: {}",
            e
        ))),
    }
}

/// Parse legacy Excel XLS file
pub fn read_xls(content: &[u8]) -> Result<SourceTable> {
    let cursor = Cursor::new(content);

    match open_workbook_from_rs::<Xls<_>, _>(cursor) {
        Ok(mut workbook) => match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => table_from_range(&range),
            Some(Err(e)) => Err(ImportError::unreadable_file(format!(
                "Failed to read first sheet: {}",
                e
            ))),
            None => Err(ImportError::EmptyInput),
        },
        Err(e) => Err(ImportError::unreadable_file(format!(
            "Failed to open Excel file: {}",
            e
        ))),
    }
}

/// Convert a worksheet range into source rows.
///
/// Rows and columns are addressed absolutely from cell A1, so table row `i`
/// is always sheet row `i + 1`, even when the used range starts lower or
/// further right. Trailing rows with all four cells blank are dropped; blank
/// rows above or between data are kept and left for validation.
pub fn table_from_range(range: &Range<Data>) -> Result<SourceTable> {
    let Some((end_row, end_col)) = range.end() else {
        return Err(ImportError::EmptyInput);
    };
    if range.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let width = end_col as usize + 1;
    if width < SOURCE_COLUMNS {
        return Err(ImportError::InsufficientColumns { found: width });
    }
    if width > SOURCE_COLUMNS {
        debug!(width, "ignoring columns beyond the first {}", SOURCE_COLUMNS);
    }

    let cell = |row: u32, col: u32| -> String {
        range
            .get_value((row, col))
            .map(format_cell_value)
            .unwrap_or_default()
    };

    let mut table: SourceTable = (0..=end_row)
        .map(|row| SourceRow {
            mac: cell(row, 0),
            group: cell(row, 1),
            description: cell(row, 2),
            location: cell(row, 3),
        })
        .collect();

    while table
        .last()
        .is_some_and(|row| row.fields().iter().all(|f| f.is_empty()))
    {
        table.pop();
    }

    if table.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    Ok(table)
}

/// Format cell value to a trimmed string
pub fn format_cell_value(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.is_nan() => String::new(),
        Data::Float(f) => {
            // Whole numbers print without a trailing ".0"
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_excel_datetime(dt),
        other => other.to_string().trim().to_string(),
    }
}

/// Render a date cell the way it reads in Excel rather than as a serial.
fn format_excel_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        if let Some(duration) = dt.as_duration() {
            let secs = duration.num_seconds();
            return format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60);
        }
    }

    match dt.as_datetime() {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}
