use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A framework or orientation outside the known set. Never recovered
    /// locally; the caller must not apply the change.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// A render target went away (window closed, file gone).
    #[error("Render target unavailable: {0}")]
    TargetUnavailable(String),

    #[error("Export error: {0}")]
    Export(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::InvalidConfiguration("Invalid framework: foo".to_string());
        assert_eq!(err.to_string(), "Invalid framework: foo");

        let err = AppError::TargetUnavailable("preview-2.html".to_string());
        assert_eq!(err.to_string(), "Render target unavailable: preview-2.html");

        let err = AppError::Export("no path".to_string());
        assert_eq!(err.to_string(), "Export error: no path");
    }
}
