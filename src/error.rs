// Error taxonomy for calls to the VK API.
//
// `Status`, `MissingKey` and `Value` are reported to the user as a single
// diagnostic line by the UI layer. `Index` and `Transport` are left fatal.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success HTTP status.
    #[error("HTTP {status} from {method}")]
    Status {
        status: StatusCode,
        method: &'static str,
    },

    /// A field expected in a successful response is absent.
    #[error("'{0}'")]
    MissingKey(String),

    /// A list in a successful response is shorter than expected.
    #[error("list index out of range: {0}")]
    Index(String),

    /// A value could not be used: malformed body, wrong JSON type or bad input.
    #[error("{0}")]
    Value(String),

    /// The request never produced a response (connect, DNS, TLS...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether the entry point turns this error into a diagnostic line
    /// instead of failing the process.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, ApiError::Index(_) | ApiError::Transport(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
