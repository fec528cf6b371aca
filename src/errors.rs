use thiserror::Error;

/// Error types for wireless discovery and control operations
#[derive(Error, Debug)]
pub enum AirmanError {
    /// The top-level encoding of an input buffer was not recognized,
    /// e.g. the hardware report is not a valid property list.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A scan line matched the record shape but a required numeric
    /// subfield failed to convert. This fails the whole batch: a corrupt
    /// numeric field means the extraction pattern is unreliable for all
    /// of it.
    #[error("Partial record: {0}")]
    PartialRecord(String),

    /// A lookup by interface name or SSID had no match.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A precondition violation, e.g. selecting the best candidate from
    /// an empty sequence.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An external networking tool exited unsuccessfully.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AirmanError>;
