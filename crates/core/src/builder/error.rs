use thiserror::Error;

/// Errors raised by builders, either from a setter or from `build()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("Period start {start} is after its end {end}")]
    InvalidPeriod { start: String, end: String },
    #[error("{field} minimum exceeds its maximum")]
    MinimumAboveMaximum { field: &'static str },
    #[error("Unsupported value for {field}: {value}")]
    Unsupported { field: &'static str, value: String },
    #[error("Shared builder is borrowed for mutation")]
    BuilderInUse,
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_display() {
        let error = ValidationError::Blank { field: "sub" };
        assert_eq!(error.to_string(), "sub must not be blank");
    }

    #[test]
    fn test_missing_display() {
        let error = ValidationError::Missing {
            field: "required_duration",
        };
        assert_eq!(error.to_string(), "required_duration is required");
    }

    #[test]
    fn test_not_positive_display() {
        let error = ValidationError::NotPositive { field: "required" };
        assert_eq!(error.to_string(), "required must be greater than zero");
    }

    #[test]
    fn test_unsupported_display() {
        let error = ValidationError::Unsupported {
            field: "transparency",
            value: "see-through".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unsupported value for transparency: see-through"
        );
    }
}
