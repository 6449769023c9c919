use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChallengeError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Failed to load employee dataset: {0}")]
    DatasetError(String),
    #[error("{0}")]
    RuntimeError(String),
}

pub type ChallengeResult<T> = Result<T, ChallengeError>;

pub mod config;
pub mod employees;
pub mod logging;
pub mod observer;
pub mod pages;
pub mod routing;
pub mod themes;
pub mod toast;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use routing::{PageId, ROUTES, RouteDescriptor, Router};
pub use toast::{Notification, Notifier, ToastKind, ToastStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let error = ChallengeError::ConfigError("bad tick rate".into());
        assert_eq!(error.to_string(), "Configuration error: bad tick rate");

        let error = ChallengeError::RuntimeError("TUI requires a terminal".into());
        assert_eq!(error.to_string(), "TUI requires a terminal");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: ChallengeError = io.into();
        assert!(error.to_string().starts_with("Terminal I/O failed"));
    }
}
