//! Error types for the trade planner.

use thiserror::Error;

use crate::types::InputField;

/// Failure producing or writing a rendered plan.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A single field that could not be turned into a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} is required")]
    Missing { field: InputField },

    #[error("{field} is not a number: {value:?}")]
    Invalid { field: InputField, value: String },
}

impl InputError {
    /// The field this error refers to.
    pub fn field(&self) -> InputField {
        match self {
            InputError::Missing { field } | InputError::Invalid { field, .. } => *field,
        }
    }
}

/// Arithmetic that could not be carried out on otherwise well-formed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Division by zero: {0} is zero")]
    DivisionByZero(&'static str),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("{0} is required")]
    MissingInput(&'static str),
}

/// Result type alias for calculations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Result type alias for rendering and export.
pub type PlannerResult<T> = Result<T, PlannerError>;
