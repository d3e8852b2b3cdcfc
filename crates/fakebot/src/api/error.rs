use thiserror::Error;

/// Failures a Bot API call can report
///
/// Fakes hand these back verbatim when they are queued as responses, so a
/// test can drive a bot's error paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The API answered `ok: false`
    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    /// A fake was told to fail once its queued responses ran out
    #[error("No fake responses left.")]
    NoFakeResponsesLeft,
}

impl ApiError {
    /// Shorthand for an `ok: false` answer
    pub fn api(code: i64, description: impl Into<String>) -> Self {
        Self::Api {
            code,
            description: description.into(),
        }
    }
}

/// Type alias for Result with ApiError
pub type ApiResult<T> = Result<T, ApiError>;
