use cinerank_core::CinerankError;
use thiserror::Error;

/// A batch broke the movie schema.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("row {row}: title is empty")]
    EmptyTitle { row: usize },

    #[error("row {row}: duplicate title '{title}' (first seen at row {first})")]
    DuplicateTitle {
        row: usize,
        first: usize,
        title: String,
    },

    #[error("row {row} ({title}): {field} is missing")]
    Missing {
        row: usize,
        title: String,
        field: &'static str,
    },

    #[error("row {row} ({title}): {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        row: usize,
        title: String,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl From<ValidationError> for CinerankError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
