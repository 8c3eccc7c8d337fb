//! Error types for captioner.
//!
//! Uses thiserror for derive macros and keeps messages user-actionable,
//! since every error ends up in front of the person editing captions.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for captioner operations.
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The template holds no `<placeholder>` where at least one is required.
    #[error("template contains no <placeholder> tokens")]
    NoTokensFound,

    /// A placeholder was recognized but its identifier cannot be used as a key.
    #[error("malformed placeholder '{token}': expected <identifier> made of letters, digits or '_'")]
    MalformedToken { token: String },

    /// Substitution found a placeholder with no matching field.
    #[error("no field named '{key}'; run Create Fields after editing the template")]
    MissingFieldValue { key: String },

    /// The caption could not be stored.
    #[error("failed to save caption: {0}")]
    PersistenceFailure(String),

    /// A save was requested while a previous one has not resolved.
    #[error("a save is already in progress")]
    SaveInFlight,

    /// User provided invalid arguments or the session is in an invalid state.
    #[error("{0}")]
    UserError(String),
}

impl CaptionError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CaptionError::NoTokensFound
            | CaptionError::MalformedToken { .. }
            | CaptionError::MissingFieldValue { .. } => exit_codes::TEMPLATE_FAILURE,
            CaptionError::PersistenceFailure(_) => exit_codes::PERSISTENCE_FAILURE,
            CaptionError::SaveInFlight | CaptionError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for captioner operations.
pub type Result<T> = std::result::Result<T, CaptionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_errors_share_exit_code() {
        assert_eq!(
            CaptionError::NoTokensFound.exit_code(),
            exit_codes::TEMPLATE_FAILURE
        );
        let err = CaptionError::MalformedToken {
            token: "<>".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::TEMPLATE_FAILURE);
        let err = CaptionError::MissingFieldValue {
            key: "foodType".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::TEMPLATE_FAILURE);
    }

    #[test]
    fn persistence_failure_has_correct_exit_code() {
        let err = CaptionError::PersistenceFailure("connection refused".to_string());
        assert_eq!(err.exit_code(), exit_codes::PERSISTENCE_FAILURE);
    }

    #[test]
    fn save_in_flight_is_user_error() {
        assert_eq!(CaptionError::SaveInFlight.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = CaptionError::MissingFieldValue {
            key: "animalType".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no field named 'animalType'; run Create Fields after editing the template"
        );

        let err = CaptionError::PersistenceFailure("HTTP 500".to_string());
        assert_eq!(err.to_string(), "failed to save caption: HTTP 500");
    }
}
