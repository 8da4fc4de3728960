use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported file format: {format}")]
    UnsupportedFormat { format: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet could not be read: {0}")]
    UnreadableFile(String),

    #[error("The uploaded file is empty")]
    EmptyInput,

    #[error(
        "Too few columns detected ({found}). At least 4 columns are required: \
         MAC, ISE MAC group, description, location"
    )]
    InsufficientColumns { found: usize },

    #[error("Error in row {row}: MAC address is empty")]
    BlankMac { row: usize },

    #[error("File too large: {size} bytes (max: {max_size} bytes)")]
    FileTooLarge { size: usize, max_size: usize },

    #[error("CSV encoding error: {0}")]
    Csv(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ImportError {
    pub fn unreadable_file<S: Into<String>>(msg: S) -> Self {
        Self::UnreadableFile(msg.into())
    }

    pub fn csv_error<S: Into<String>>(msg: S) -> Self {
        Self::Csv(msg.into())
    }

    /// Errors caused by the input itself, as opposed to the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. }
                | Self::UnreadableFile(_)
                | Self::EmptyInput
                | Self::InsufficientColumns { .. }
                | Self::BlankMac { .. }
                | Self::FileTooLarge { .. }
        )
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}
