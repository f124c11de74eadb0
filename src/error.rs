//! Error types shared across the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CredprobeError>;

#[derive(Debug, Error)]
pub enum CredprobeError {
    /// WebDriver protocol or session failure.
    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("{0}")]
    DriverNotFound(String),

    #[error("chromedriver did not become ready at {0}")]
    DriverUnreachable(String),

    #[error("browser operation failed: {0}")]
    BrowserOperation(String),

    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("failed to parse {0}: {1}")]
    MalformedInput(String, String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
