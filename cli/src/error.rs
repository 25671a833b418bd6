//! Error types for the museo CLI.

use museo_core::ActionError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// An admin action was rejected locally or by the API
    #[error(transparent)]
    Action(#[from] ActionError),

    /// A payload could not be rendered as JSON
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the terminal failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Lines shown to the user on stderr.
    ///
    /// Form failures list one offending field per line.
    pub fn report(&self) -> Vec<String> {
        match self {
            CliError::Action(ActionError::Form(errors)) => errors
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museo_core::{MuseumForm, NormalizedError};

    #[test]
    fn form_errors_report_one_line_per_field() {
        let errors = MuseumForm::default().validate().unwrap_err();
        let expected = errors.errors.len();
        let lines = CliError::from(ActionError::from(errors)).report();

        assert_eq!(lines.len(), expected);
        assert_eq!(lines[0], "name: Check the name format.");
        assert!(lines.iter().any(|l| l.starts_with("opening_date: ")));
    }

    #[test]
    fn api_errors_report_the_normalized_message() {
        let err = CliError::from(ActionError::from(NormalizedError::new("Museum not found")));
        assert_eq!(err.report(), vec!["Museum not found".to_string()]);
    }

    #[test]
    fn unknown_museum_is_reported_by_id() {
        let err = CliError::from(ActionError::UnknownMuseum(12));
        assert_eq!(err.report(), vec!["museum 12 does not exist".to_string()]);
    }
}
