use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers to distinguish a clean run from a run that
/// finished with per-order failures and from a run that aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every actionable certificate was reconciled
    Success = 0,
    /// The run completed but some orders failed or were rejected by the CMDB
    PartialFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Fatal error (vendor error code, malformed report, network error, config error, etc.)
    ApplicationError = 3,
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
            ExitCode::PartialFailure => write!(f, "Partial Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for certificate synchronization.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping the messages user-friendly.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Configuration file not found: {path}\n\n💡 Hint: {suggestion}")]
    ConfigNotFound { path: PathBuf, suggestion: String },

    #[error("Certificate vendor rejected the report request (errorCode={error_code}): {message}\n\n💡 Hint: Check the vendor login name and password in the configuration file")]
    VendorRejected { error_code: i32, message: String },

    #[error("Malformed vendor report: {details}")]
    MalformedReport { details: String },

    #[error("Request to {endpoint} failed: {details}")]
    Transport { endpoint: String, details: String },

    #[error("Failed to decode certificate container for order {order_number}: {details}")]
    CertificateDecode {
        order_number: String,
        details: String,
    },

    #[error("Unexpected CMDB response: {details}")]
    CmdbResponse { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },
}
