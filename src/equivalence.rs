//! Equivalence Solver
//!
//! Bisection over the equivalence ratio until the `default` and `offset`
//! experiments have the same cumulative forcing.

use crate::compare::ForcingComparison;
use crate::errors::{EquivalenceError, EquivalenceResult};
use crate::perturbation::StoragePulse;
use crate::solver::bisection::{self, Status};
use fair_components::FairModel;
use fair_core::scenario::EmissionsScenario;
use fair_core::simulator::ClimateSimulator;
use fair_core::timeseries::{FloatValue, Year};
use log::debug;
use serde::{Deserialize, Serialize};

/// Search bracket for the equivalence ratio
pub const DEFAULT_BRACKET: [FloatValue; 2] = [1.0, 1000.0];

/// Configuration for [`get_equivalence_ratio_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalenceConfig {
    /// Ratios between which the root is searched for
    pub bracket: [FloatValue; 2],
    pub bisection: bisection::Config,
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            bracket: DEFAULT_BRACKET,
            bisection: bisection::Config::default(),
        }
    }
}

impl EquivalenceConfig {
    /// Read a configuration from a TOML document.
    pub fn from_toml_str(document: &str) -> EquivalenceResult<Self> {
        toml::from_str(document).map_err(|e| EquivalenceError::InvalidConfig(e.to_string()))
    }
}

impl EquivalenceError {
    fn from_bisection(err: bisection::Error<EquivalenceError>, bracket: [FloatValue; 2]) -> Self {
        match err {
            bisection::Error::Objective(e) => e,
            bisection::Error::NoBracket {
                left,
                right,
                left_residual,
                right_residual,
            } => EquivalenceError::Bracket {
                left,
                right,
                left_residual,
                right_residual,
            },
            bisection::Error::InvalidBracket(reason) => EquivalenceError::InvalidBracket {
                left: bracket[0],
                right: bracket[1],
                reason: reason.to_string(),
            },
            bisection::Error::InvalidConfig { reason } => {
                EquivalenceError::InvalidConfig(reason.to_string())
            }
            bisection::Error::NonFiniteResidual { x, residual } => {
                EquivalenceError::NonFiniteResidual { ratio: x, residual }
            }
        }
    }
}

/// Find the equivalence ratio for `pulse` using an explicit simulator and
/// solver configuration.
///
/// # Errors
///
/// Any error from building perturbations or running the simulator at a trial
/// ratio is returned unchanged. The solver itself fails with
/// [`EquivalenceError::Bracket`] when the forcing difference has the same
/// sign at both ends of the bracket, and with
/// [`EquivalenceError::NotConverged`] when it runs out of iterations.
pub fn get_equivalence_ratio_with(
    simulator: &dyn ClimateSimulator,
    scenario: &EmissionsScenario,
    pulse: StoragePulse,
    time_horizon: usize,
    config: &EquivalenceConfig,
) -> EquivalenceResult<FloatValue> {
    let comparison = ForcingComparison::new(simulator, scenario, pulse, time_horizon);

    let solution = bisection::solve(
        |ratio| comparison.evaluate(ratio),
        config.bracket,
        &config.bisection,
    )
    .map_err(|e| EquivalenceError::from_bisection(e, config.bracket))?;

    match solution.status {
        Status::Converged => {
            let pulse = comparison.pulse();
            debug!(
                "equivalence ratio for {} GtC stored in {} for {} years over {} years: {} after {} iterations",
                pulse.magnitude,
                pulse.year,
                pulse.length,
                comparison.time_horizon(),
                solution.x,
                solution.iters
            );
            Ok(solution.x)
        }
        Status::MaxIters => Err(EquivalenceError::NotConverged {
            iterations: solution.iters,
            left: solution.bracket[0],
            right: solution.bracket[1],
        }),
    }
}

/// Tons of temporarily stored carbon that justify one additional ton of
/// emissions, such that cumulative forcing over `time_horizon` years from
/// `temp_yr` is unchanged.
///
/// Uses the default [`FairModel`] and searches the ratio in `[1, 1000]`.
///
/// * `temp_yr` - Year in which carbon is stored
/// * `temp_length` - Years until the stored carbon is re-emitted
/// * `temp_magnitude` - Carbon stored (GtC)
/// * `time_horizon` - Years of forcing compared
pub fn get_equivalence_ratio(
    scenario: &EmissionsScenario,
    temp_yr: Year,
    temp_length: usize,
    temp_magnitude: FloatValue,
    time_horizon: usize,
) -> EquivalenceResult<FloatValue> {
    get_equivalence_ratio_with(
        &FairModel::default(),
        scenario,
        StoragePulse::new(temp_yr, temp_length, temp_magnitude),
        time_horizon,
        &EquivalenceConfig::default(),
    )
}
