//! Error types for the BMI calculator core

use thiserror::Error;

/// A submitted form field could not be used for a calculation.
///
/// Carries the technical field name, the label shown to the user and
/// the reason. Nothing is mutated when this is returned, so the caller
/// can simply let the user retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{display_label}: {message}")]
pub struct InvalidInputError {
    pub field: String,
    pub display_label: String,
    pub message: String,
}

impl InvalidInputError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            display_label: crate::validation::get_field_display_label(field).to_string(),
            message: message.to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = InvalidInputError::new("height", "must be greater than 0");
        assert_eq!(err.field, "height");
        assert_eq!(err.display_label, "Height (cm)");
        assert_eq!(err.user_message(), "Height (cm): must be greater than 0");
    }
}
