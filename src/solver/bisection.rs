//! Bracketed bisection for scalar functions.

mod bracket;
mod config;
mod error;
mod solution;

pub use bracket::{Bracket, BracketError, Point};
pub use config::Config;
pub use error::Error;
pub use solution::{Solution, Status};

use log::{debug, warn};

/// Finds a root of `objective` inside `bracket` using the bisection method.
///
/// Both endpoints are evaluated first. An endpoint whose residual is within
/// `residual_tol` is returned immediately; otherwise the residuals must have
/// opposite signs. Each iteration evaluates the midpoint and keeps the half
/// that still contains the sign change.
///
/// Reaching `max_iters` is not an error here: the solution reports
/// [`Status::MaxIters`] together with the bracket endpoint of smallest
/// residual.
///
/// # Errors
///
/// Returns an error if the bracket or config is invalid, the endpoints do
/// not bracket a root, the objective fails, or a residual is not finite.
pub fn solve<F, E>(
    mut objective: F,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution, Error<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let interval = bracket::ordered(bracket)?;
    let converged = |point: Point, iters: usize, interval: [f64; 2]| Solution {
        status: Status::Converged,
        x: point.x,
        residual: point.residual,
        iters,
        bracket: interval,
    };

    let left = evaluate(&mut objective, interval[0])?;
    if left.residual.abs() <= config.residual_tol {
        return Ok(converged(left, 0, interval));
    }
    let right = evaluate(&mut objective, interval[1])?;
    if right.residual.abs() <= config.residual_tol {
        return Ok(converged(right, 0, interval));
    }

    let mut bracket = Bracket::new(left, right).ok_or(Error::NoBracket {
        left: left.x,
        right: right.x,
        left_residual: left.residual,
        right_residual: right.residual,
    })?;

    for iter in 1..=config.max_iters {
        let [lo, hi] = bracket.interval();
        let mid = evaluate(&mut objective, bracket.midpoint())?;
        debug!(
            "bisection iteration {}: bracket [{}, {}], f({}) = {:e}",
            iter, lo, hi, mid.x, mid.residual
        );

        if bracket.is_x_converged(config.x_abs_tol, config.x_rel_tol)
            || mid.residual.abs() <= config.residual_tol
        {
            return Ok(converged(mid, iter, bracket.interval()));
        }
        bracket.shrink(mid);
    }

    let [lo, hi] = bracket.interval();
    warn!(
        "bisection stopped after {} iterations with bracket [{}, {}]",
        config.max_iters, lo, hi
    );

    let best = bracket.best();
    Ok(Solution {
        status: Status::MaxIters,
        x: best.x,
        residual: best.residual,
        iters: config.max_iters,
        bracket: bracket.interval(),
    })
}

fn evaluate<F, E>(objective: &mut F, x: f64) -> Result<Point, Error<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let residual = objective(x).map_err(Error::Objective)?;
    if !residual.is_finite() {
        return Err(Error::NonFiniteResidual { x, residual });
    }
    Ok(Point { x, residual })
}
