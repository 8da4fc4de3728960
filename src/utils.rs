use crate::error::{ImportError, Result};
use std::path::Path;

/// Spreadsheet container formats the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Xls,
}

impl SpreadsheetFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Xlsx => "xlsx",
            SpreadsheetFormat::Xls => "xls",
        }
    }
}

/// Detect spreadsheet format from filename extension and content
pub fn detect_spreadsheet_format(filename: &str, content: &[u8]) -> Result<SpreadsheetFormat> {
    // First try to detect from filename extension
    if let Some(ext) = get_file_extension(filename) {
        match ext.as_str() {
            "xlsx" | "xlsm" => return Ok(SpreadsheetFormat::Xlsx),
            "xls" => return Ok(SpreadsheetFormat::Xls),
            _ => {}
        }
    }

    // Fallback to content-based detection
    detect_from_content(content)
}

/// Detect format from content (magic bytes)
fn detect_from_content(content: &[u8]) -> Result<SpreadsheetFormat> {
    if content.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    if content.len() >= 4 {
        match &content[0..4] {
            [0x50, 0x4B, 0x03, 0x04] | [0x50, 0x4B, 0x05, 0x06] => {
                // ZIP container, only an Excel workbook if it carries xl/workbook.xml
                return detect_zip_workbook(content);
            }
            [0xD0, 0xCF, 0x11, 0xE0] => return Ok(SpreadsheetFormat::Xls),
            _ => {}
        }
    }

    Err(ImportError::UnsupportedFormat {
        format: "unknown".to_string(),
    })
}

fn detect_zip_workbook(content: &[u8]) -> Result<SpreadsheetFormat> {
    use std::io::Cursor;
    use zip::ZipArchive;

    let cursor = Cursor::new(content);
    let mut archive = ZipArchive::new(cursor)
        .map_err(|e| ImportError::unreadable_file(format!("invalid zip container: {}", e)))?;

    if archive.by_name("xl/workbook.xml").is_ok() {
        return Ok(SpreadsheetFormat::Xlsx);
    }

    Err(ImportError::UnsupportedFormat {
        format: "zip".to_string(),
    })
}

/// Validate file size
pub fn validate_file_size(content: &[u8], max_size: usize) -> Result<()> {
    if content.len() > max_size {
        return Err(ImportError::FileTooLarge {
            size: content.len(),
            max_size,
        });
    }
    Ok(())
}

/// Extract file extension from filename
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
