//! Result and error types for Comprar.

use thiserror::Error;

/// Result type for Comprar operations
pub type ComprarResult<T> = Result<T, ComprarError>;

/// Errors that can occur in Comprar
#[derive(Debug, Error)]
pub enum ComprarError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Connection to browser failed
    #[error("Failed to connect to browser: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched a selector
    #[error("No element matches {selector}: {message}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
        /// Error message
        message: String,
    },

    /// Click or keystroke delivery failed
    #[error("Interaction with {selector} failed: {message}")]
    InteractionError {
        /// Selector of the target element
        selector: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error
    #[error("Evaluation failed: {message}")]
    EvaluationError {
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// User type key outside the known set
    #[error("Unknown user type: {name}")]
    UnknownUserType {
        /// Key that failed to resolve
        name: String,
    },

    /// Sort option code outside the known set
    #[error("Unknown sort option: {value}")]
    UnknownSortOption {
        /// Option code that failed to resolve
        value: String,
    },

    /// Cart badge rendered text that is not a count
    #[error("Cart badge shows non-numeric text: {text:?}")]
    CartBadge {
        /// Text the badge displayed
        text: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
