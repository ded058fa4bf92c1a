//! Error types shared across the crate, layered the same way the engine is:
//! configuration problems are reported eagerly where the value is set,
//! operator-contract violations at the operator call, and evaluation-contract
//! violations abort the generation that detected them.
use thiserror::Error;

/// An out-of-range or inconsistent configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{name} must be between 0 and 1, got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },
    #[error("{name} must be greater than 0")]
    NotPositive { name: &'static str },
    #[error("{0}")]
    Invalid(String),
}

/// A violated operator contract, detected at the operator call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    #[error("parent chromosomes must have the same length ({left} vs {right})")]
    ParentLengthMismatch { left: usize, right: usize },
    #[error("chromosome length {chrom_len} does not match the bounds vector length {bounds_len}")]
    BoundsLengthMismatch { chrom_len: usize, bounds_len: usize },
}

/// A violated fitness or repair contract, detected during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("the fitness function returned a vector of length {got}, expected {expected}")]
    WrongFitnessLength { expected: usize, got: usize },
    #[error("the fitness function returned a non-finite value ({value}) for objective {objective}")]
    NonFiniteFitness { objective: usize, value: f64 },
    #[error("the repair function must return chromosomes of length {expected}, got {got}")]
    WrongRepairLength { expected: usize, got: usize },
}

/// Top-level error for the engine entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid parameter: {0}")]
    Parameter(#[from] ParameterError),
    #[error("error during evaluation: {0}")]
    Evaluation(#[from] EvaluationError),
    #[error("operator contract violation: {0}")]
    Operator(#[from] OperatorError),
}
