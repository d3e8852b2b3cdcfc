use thiserror::Error;

/// Errors raised by the payload factory
///
/// These are usage errors of the harness itself: they are reported immediately
/// and never swallowed. Placeholder resolution problems are not errors, they
/// degrade to literal text (see `template::resolver`).
///
/// # Example
///
/// ```
/// use fakecore::{FactoryError, PayloadFactory};
///
/// let err = PayloadFactory::new().to_value().unwrap_err();
/// assert!(matches!(err, FactoryError::NoTemplate));
/// ```
#[derive(Error, Debug)]
pub enum FactoryError {
    /// A field override or terminal call was made before any scenario method
    #[error("No base payload template set. Call a payload generation method like command_message(), text_message(), or fragment() first.")]
    NoTemplate,

    /// `fragment()` was asked for a name the skeleton library doesn't know
    #[error("Unknown payload fragment: {0}")]
    UnknownFragment(String),

    /// An override was not a JSON object where a mapping was required
    #[error("Payload override must be a JSON object, got: {0}")]
    InvalidOverride(String),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Result with FactoryError
pub type FactoryResult<T> = Result<T, FactoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_template_message() {
        let msg = FactoryError::NoTemplate.to_string();
        assert!(msg.starts_with("No base payload template set"));
    }

    #[test]
    fn test_unknown_fragment_message() {
        let msg = FactoryError::UnknownFragment("sticker".to_string()).to_string();
        assert_eq!(msg, "Unknown payload fragment: sticker");
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FactoryError = serde_err.into();
        assert!(matches!(err, FactoryError::Serialization(_)));
    }
}
