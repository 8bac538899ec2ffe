use thiserror::Error;

use super::bracket::BracketError;

/// Errors that can occur during bisection solving.
///
/// `E` is the error type of the objective function.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("no root in bracket: f({left})={left_residual}, f({right})={right_residual}")]
    NoBracket {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("objective evaluation failed")]
    Objective(#[source] E),

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },
}
