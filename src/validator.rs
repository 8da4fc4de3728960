use crate::error::{ImportError, Result};
use crate::parsers::SourceTable;
use tracing::debug;

/// Normalize a MAC cell: trim, and treat NaN-like placeholders as blank.
pub fn normalize_mac(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        ""
    } else {
        trimmed
    }
}

/// Check that every row carries a MAC address.
///
/// Stops at the first blank MAC and reports its 1-based row number. Only the
/// MAC column is validated; the other three columns may be blank.
pub fn validate_macs(table: &SourceTable) -> Result<()> {
    if table.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    for (idx, row) in table.iter().enumerate() {
        if normalize_mac(&row.mac).is_empty() {
            return Err(ImportError::BlankMac { row: idx + 1 });
        }
    }

    debug!(rows = table.len(), "MAC column validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::SourceRow;

    fn row(mac: &str) -> SourceRow {
        SourceRow::new(mac, "Group", "", "")
    }

    #[test]
    fn test_validate_macs_accepts_filled_column() {
        let table = vec![row("AA:BB:CC:DD:EE:01"), row("AA:BB:CC:DD:EE:02")];
        assert!(validate_macs(&table).is_ok());
    }

    #[test]
    fn test_validate_macs_reports_first_blank_row() {
        let table = vec![row("AA:BB:CC:DD:EE:01"), row("AA:BB:CC:DD:EE:02"), row("   "), row("")];
        let err = validate_macs(&table).unwrap_err();
        assert!(matches!(err, ImportError::BlankMac { row: 3 }));
    }

    #[test]
    fn test_validate_macs_treats_nan_as_blank() {
        let table = vec![row("NaN")];
        assert!(matches!(validate_macs(&table), Err(ImportError::BlankMac { row: 1 })));
    }

    #[test]
    fn test_validate_macs_empty_table() {
        assert!(matches!(validate_macs(&Vec::new()), Err(ImportError::EmptyInput)));
    }

    #[test]
    fn test_other_columns_may_be_blank() {
        let table = vec![SourceRow::new("AA:BB:CC:DD:EE:01", "", "", "")];
        assert!(validate_macs(&table).is_ok());
    }
}
