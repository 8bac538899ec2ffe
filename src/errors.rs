use fair_core::errors::FairError;
use fair_core::timeseries::{FloatValue, Year};
use thiserror::Error;

/// Error type for building perturbations and solving for the equivalence ratio.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquivalenceError {
    #[error("Year {year} is not in scenario {scenario:?}")]
    YearNotFound { year: Year, scenario: String },
    #[error("Index {index} + {offset} is out of bounds for a scenario of {len} years")]
    OutOfBounds {
        index: usize,
        offset: usize,
        len: usize,
    },
    #[error("Equivalence ratio must be non-zero")]
    DivisionByZero,
    #[error("Perturbation {name} has {actual} values but the scenario has {expected} years")]
    PerturbationLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Simulation failed: {0}")]
    Simulation(#[from] FairError),
    #[error("No sign change in bracket: f({left})={left_residual}, f({right})={right_residual}")]
    Bracket {
        left: FloatValue,
        right: FloatValue,
        left_residual: FloatValue,
        right_residual: FloatValue,
    },
    #[error("Invalid bracket [{left}, {right}]: {reason}")]
    InvalidBracket {
        left: FloatValue,
        right: FloatValue,
        reason: String,
    },
    #[error("Bisection did not converge after {iterations} iterations, bracket [{left}, {right}]")]
    NotConverged {
        iterations: usize,
        left: FloatValue,
        right: FloatValue,
    },
    #[error("Non-finite forcing difference {residual} at ratio {ratio}")]
    NonFiniteResidual {
        ratio: FloatValue,
        residual: FloatValue,
    },
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type for `Result<T, EquivalenceError>`.
pub type EquivalenceResult<T> = Result<T, EquivalenceError>;
