//! Converts a spreadsheet of MAC addresses into a Cisco ISE endpoint import
//! CSV.
//!
//! Input columns are read positionally from column A: MAC address, ISE MAC
//! group, description, location. Header labels are ignored.

mod error;
mod utils;

pub mod comma_policy;
pub mod csv_assembler;
pub mod parsers;
pub mod pipeline;
pub mod record_builder;
pub mod validator;

#[cfg(feature = "python")]
mod python;

pub use comma_policy::{count_commas, escape_field, CommaHandling};
pub use csv_assembler::{preview, AlignmentWarning};
pub use error::{ImportError, Result};
pub use parsers::{get_supported_formats, read_spreadsheet, SourceRow, SourceTable};
pub use pipeline::{
    convert, convert_table, output_mime, ConversionReport, ConvertOptions, OUTPUT_FILE_NAME,
};
pub use record_builder::{TargetRecord, COLUMN_COUNT, COLUMN_NAMES};
pub use validator::validate_macs;
