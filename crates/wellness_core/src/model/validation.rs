use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level rejection raised before anything reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Required text is empty after trim.
    BlankField(&'static str),
    /// Required value was not supplied.
    MissingField(&'static str),
    /// Text exceeds the column limit.
    TooLong {
        field: &'static str,
        max_chars: usize,
    },
    /// Numeric value outside its accepted range.
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Not an `HH:MM` time of day.
    InvalidTime(String),
    /// Label not in the closed set accepted for `field`.
    UnknownLabel { field: &'static str, value: String },
    /// Entry kind not one of `diet|weight|water|exercise|mood|reminder`.
    UnknownKind(String),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::TooLong { field, max_chars } => {
                write!(f, "{field} must be at most {max_chars} characters")
            }
            Self::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} value `{value}` is out of range; expected {expected}"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
            Self::UnknownLabel { field, value } => write!(f, "unknown {field} `{value}`"),
            Self::UnknownKind(value) => write!(f, "unknown entry kind `{value}`"),
        }
    }
}

impl Error for EntryValidationError {}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), EntryValidationError> {
    if value.trim().is_empty() {
        return Err(EntryValidationError::BlankField(field));
    }
    limit_text(field, Some(value), max_chars)
}

pub(crate) fn limit_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), EntryValidationError> {
    match value {
        Some(text) if text.chars().count() > max_chars => {
            Err(EntryValidationError::TooLong { field, max_chars })
        }
        _ => Ok(()),
    }
}

pub(crate) fn non_negative_f64(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), EntryValidationError> {
    match value {
        Some(number) if !number.is_finite() || number < 0.0 => {
            Err(EntryValidationError::OutOfRange {
                field,
                value: number.to_string(),
                expected: "a finite number >= 0",
            })
        }
        _ => Ok(()),
    }
}

/// Accepts `None` or a value within `[min, max]`.
pub(crate) fn bounded_i64(
    field: &'static str,
    value: Option<i64>,
    min: i64,
    max: i64,
    expected: &'static str,
) -> Result<(), EntryValidationError> {
    match value {
        Some(number) if number < min || number > max => Err(EntryValidationError::OutOfRange {
            field,
            value: number.to_string(),
            expected,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{bounded_i64, limit_text, non_negative_f64, require_text, EntryValidationError};

    #[test]
    fn require_text_rejects_whitespace_only() {
        assert_eq!(
            require_text("food_name", "   ", 10),
            Err(EntryValidationError::BlankField("food_name"))
        );
    }

    #[test]
    fn limit_text_counts_chars_not_bytes() {
        assert!(limit_text("notes", Some("ééé"), 3).is_ok());
        assert!(limit_text("notes", Some("éééé"), 3).is_err());
    }

    #[test]
    fn non_negative_f64_rejects_nan() {
        assert!(non_negative_f64("carbs", Some(f64::NAN)).is_err());
        assert!(non_negative_f64("carbs", None).is_ok());
    }

    #[test]
    fn bounded_i64_checks_both_ends() {
        assert!(bounded_i64("calories", Some(-1), 0, 10, "0..=10").is_err());
        assert!(bounded_i64("calories", Some(11), 0, 10, "0..=10").is_err());
        assert!(bounded_i64("calories", Some(10), 0, 10, "0..=10").is_ok());
        assert!(bounded_i64("calories", None, 0, 10, "0..=10").is_ok());
    }
}
