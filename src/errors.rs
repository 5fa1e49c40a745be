// SPDX-License-Identifier: GPL-3.0-only

//! Error types for depthshot

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed depth data or pipeline parameters
    Frame(FrameError),
    /// Storage/filesystem errors
    Storage(String),
    /// Depth sensor errors (device missing, stream failure, motor)
    Sensor(String),
    /// Display surface errors (upload rejected, terminal failure)
    Display(String),
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Depth frame errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Sample or byte count does not match the stated resolution
    DimensionMismatch { expected: usize, actual: usize },
    /// A raw depth file ended before a full frame was read
    ShortRead { expected: usize, actual: usize },
    /// Threshold bounds are not ordered `begin < end`
    InvalidThreshold { begin: u16, end: u16 },
    /// Width or height is zero
    ZeroDimension,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Frame(e) => write!(f, "Frame error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Sensor(msg) => write!(f, "Sensor error: {}", msg),
            AppError::Display(msg) => write!(f, "Display error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::DimensionMismatch { expected, actual } => {
                write!(f, "Expected {} elements, got {}", expected, actual)
            }
            FrameError::ShortRead { expected, actual } => {
                write!(f, "Short read: expected {} bytes, got {}", expected, actual)
            }
            FrameError::InvalidThreshold { begin, end } => {
                write!(f, "Invalid threshold range: {} must be below {}", begin, end)
            }
            FrameError::ZeroDimension => write!(f, "Frame width and height must be non-zero"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for FrameError {}

impl From<FrameError> for AppError {
    fn from(err: FrameError) -> Self {
        AppError::Frame(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_wraps_into_app_error() {
        let err: AppError = FrameError::ShortRead {
            expected: 10,
            actual: 4,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Frame error: Short read: expected 10 bytes, got 4"
        );
    }

    #[test]
    fn test_io_error_is_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(AppError::from(io), AppError::Storage(_)));
    }
}
