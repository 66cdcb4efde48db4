use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The pipeline ran and the view was rendered
    Success = 0,
    /// API error, network error, decode error, file I/O error, etc.
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for component history extraction.
///
/// A revision without a component block is not an error; the parser
/// simply yields no record for it.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Request to {endpoint} failed\nDetails: {details}\n\n💡 Hint: Please check your network connection and the API URL")]
    Transport { endpoint: String, details: String },

    #[error("{endpoint} returned HTTP {status}: {message}\n\n💡 Hint: Please verify the token and the repository coordinates")]
    ApiStatus {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Failed to decode file content at revision {revision}\nDetails: {details}")]
    Decode { revision: String, details: String },

    #[error("A pipeline run is already in progress\n\n💡 Hint: Wait for the current run to finish before starting another one")]
    RunInProgress,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to access state file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    StateFile { path: PathBuf, details: String },

    #[error("Failed to write output file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    OutputWrite { path: PathBuf, details: String },
}
