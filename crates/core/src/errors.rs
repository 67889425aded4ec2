use thiserror::Error;

/// The single message shown to the user when price data could not be loaded.
///
/// Network failures, bad HTTP statuses and malformed bodies all collapse into it.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Unified error type for the entire coin-chart-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("HTTP status {status} from {provider}")]
    HttpStatus {
        provider: String,
        status: u16,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Rendering / Files ───────────────────────────────────────────
    #[error("Chart rendering failed: {0}")]
    Render(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl CoreError {
    /// `true` for errors that mean "the price data could not be loaded".
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CoreError::HttpStatus { .. }
                | CoreError::Network(_)
                | CoreError::Deserialization(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Query strings are stripped so demo keys or tokens never reach logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
