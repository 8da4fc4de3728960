//! Maps source rows onto the fixed ISE endpoint import layout.

use crate::comma_policy::{prepare_field, CommaHandling};
use crate::parsers::{SourceRow, SourceTable};

/// Number of columns in the ISE endpoint import file.
pub const COLUMN_COUNT: usize = 31;

/// Header of the ISE endpoint import file, in order.
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    "MACAddress",
    "EndPointPolicy",
    "IdentityGroup",
    "PortalUser.GuestType",
    "Description",
    "PortalUser.Location",
    "PortalUser.GuestStatus",
    "StaticAssignment",
    "User-Name",
    "DeviceRegistrationStatus",
    "PortalUser.CreationType",
    "AUPAccepted",
    "PortalUser.EmailAddress",
    "PortalUser.PhoneNumber",
    "FirstName",
    "ip",
    "Device Type",
    "host-name",
    "StaticGroupAssignment",
    "MDMEnrolled",
    "MDMOSVersion",
    "PortalUser.LastName",
    "PortalUser.GuestSponsor",
    "EmailAddress",
    "PortalUser",
    "PortalUser.FirstName",
    "BYODRegistration",
    "MDMServerName",
    "LastName",
    "MDMServerID",
    "Location",
];

/// Which source column feeds a populated output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Mac,
    Group,
    Description,
    Location,
}

/// Zero-based output positions of the four populated fields. Every other
/// position stays empty.
pub const FIELD_POSITIONS: [(usize, SourceField); 4] = [
    (0, SourceField::Mac),
    (3, SourceField::Group),
    (6, SourceField::Description),
    (COLUMN_COUNT - 1, SourceField::Location),
];

/// Options that shape a single record.
#[derive(Debug, Clone, Copy)]
pub struct RecordOptions {
    pub include_description: bool,
    pub comma_handling: CommaHandling,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            include_description: true,
            comma_handling: CommaHandling::Escape,
        }
    }
}

/// One output line, always exactly [`COLUMN_COUNT`] fields wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRecord {
    fields: [String; COLUMN_COUNT],
}

impl TargetRecord {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.fields.get(position).map(String::as_str)
    }

    /// Always [`COLUMN_COUNT`].
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Place one source row into the fixed layout.
pub fn build_record(row: &SourceRow, options: &RecordOptions) -> TargetRecord {
    let mut fields: [String; COLUMN_COUNT] = std::array::from_fn(|_| String::new());

    for (position, source) in FIELD_POSITIONS {
        let value = match source {
            SourceField::Mac => row.mac.trim(),
            SourceField::Group => row.group.trim(),
            SourceField::Description if options.include_description => row.description.trim(),
            SourceField::Description => "",
            SourceField::Location => row.location.trim(),
        };
        fields[position] = prepare_field(value, options.comma_handling).into_owned();
    }

    TargetRecord { fields }
}

pub fn build_records(table: &SourceTable, options: &RecordOptions) -> Vec<TargetRecord> {
    table.iter().map(|row| build_record(row, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SourceRow {
        SourceRow::new(" AA:BB:CC:DD:EE:FF ", "Group1", "Desc, with comma", "HQ ")
    }

    #[test]
    fn test_header_has_declared_width() {
        assert_eq!(COLUMN_NAMES.len(), COLUMN_COUNT);
        assert_eq!(COLUMN_NAMES[0], "MACAddress");
        assert_eq!(COLUMN_NAMES[COLUMN_COUNT - 1], "Location");
    }

    #[test]
    fn test_build_record_positions() {
        let record = build_record(&sample(), &RecordOptions::default());
        assert_eq!(record.len(), COLUMN_NAMES.len());
        assert_eq!(record.get(0), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(record.get(3), Some("Group1"));
        assert_eq!(record.get(6), Some("Desc, with comma"));
        assert_eq!(record.get(COLUMN_COUNT - 1), Some("HQ"));

        let populated = record.fields().iter().filter(|f| !f.is_empty()).count();
        assert_eq!(populated, 4);
    }

    #[test]
    fn test_build_record_without_description() {
        let options = RecordOptions {
            include_description: false,
            ..RecordOptions::default()
        };
        let record = build_record(&sample(), &options);
        assert_eq!(record.get(6), Some(""));
        assert_eq!(record.get(COLUMN_COUNT - 1), Some("HQ"));
    }

    #[test]
    fn test_build_record_remove_mode_strips_commas() {
        let options = RecordOptions {
            include_description: true,
            comma_handling: CommaHandling::Remove,
        };
        let record = build_record(&sample(), &options);
        assert_eq!(record.get(6), Some("Desc with comma"));
        assert!(record.fields().iter().all(|f| !f.contains(',')));
    }

    #[test]
    fn test_blank_optional_fields_stay_empty() {
        let row = SourceRow::new("AA:BB:CC:DD:EE:FF", "", "", "");
        let record = build_record(&row, &RecordOptions::default());
        assert_eq!(record.get(0), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(record.fields().iter().skip(1).filter(|f| !f.is_empty()).count(), 0);
    }
}
