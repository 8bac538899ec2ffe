//! Forcing Comparator
//!
//! The objective for the equivalence search: the cumulative forcing of the
//! `default` experiment minus that of the `offset` experiment over a window
//! starting in the storage year.

use crate::errors::EquivalenceResult;
use crate::experiment::{run_fair_with, Experiment};
use crate::perturbation::{Perturbations, StoragePulse};
use fair_components::FairModel;
use fair_core::scenario::EmissionsScenario;
use fair_core::simulator::ClimateSimulator;
use fair_core::timeseries::{FloatValue, Signal, Year};
use log::trace;
use ndarray::s;

/// Sum of `signal` over `[start, start + len)`.
///
/// The window is cut off at the end of the signal rather than rejected, so
/// a horizon running past the last year sums whatever years remain.
pub fn window_sum(signal: &Signal, start: usize, len: usize) -> FloatValue {
    let end = start.saturating_add(len).min(signal.len());
    if start >= end {
        return 0.0;
    }
    signal.slice(s![start..end]).sum()
}

/// The forcing difference for one scenario and storage pulse, as a function
/// of the equivalence ratio.
#[derive(Debug, Clone, Copy)]
pub struct ForcingComparison<'a> {
    simulator: &'a dyn ClimateSimulator,
    scenario: &'a EmissionsScenario,
    pulse: StoragePulse,
    time_horizon: usize,
}

impl<'a> ForcingComparison<'a> {
    pub fn new(
        simulator: &'a dyn ClimateSimulator,
        scenario: &'a EmissionsScenario,
        pulse: StoragePulse,
        time_horizon: usize,
    ) -> Self {
        Self {
            simulator,
            scenario,
            pulse,
            time_horizon,
        }
    }

    pub fn pulse(&self) -> &StoragePulse {
        &self.pulse
    }

    pub fn time_horizon(&self) -> usize {
        self.time_horizon
    }

    /// Cumulative `default` forcing minus cumulative `offset` forcing
    /// (W / m^2 yr) at `equivalence_ratio`.
    ///
    /// Perturbations and simulations are rebuilt on every call.
    pub fn evaluate(&self, equivalence_ratio: FloatValue) -> EquivalenceResult<FloatValue> {
        let perturbations = Perturbations::new(self.scenario, &self.pulse, equivalence_ratio)?;
        let (_, results) = run_fair_with(self.simulator, self.scenario, &perturbations)?;

        let start = self.pulse.start_index(self.scenario)?;
        let default = window_sum(
            &results[Experiment::Default].forcing,
            start,
            self.time_horizon,
        );
        let offset = window_sum(
            &results[Experiment::Offset].forcing,
            start,
            self.time_horizon,
        );
        let diff = default - offset;

        trace!(
            "ratio {}: default {:.12} - offset {:.12} = {:e}",
            equivalence_ratio,
            default,
            offset,
            diff
        );
        Ok(diff)
    }
}

/// Difference in cumulative forcing between the `default` and `offset`
/// experiments, using the default [`FairModel`].
///
/// * `equivalence_ratio` - Tons stored per ton of justified emissions
/// * `temp_yr` - Year in which carbon is stored
/// * `temp_length` - Years until the stored carbon is re-emitted
/// * `temp_magnitude` - Carbon stored (GtC)
/// * `time_horizon` - Years of forcing summed from `temp_yr`
pub fn compare_rf(
    equivalence_ratio: FloatValue,
    scenario: &EmissionsScenario,
    temp_yr: Year,
    temp_length: usize,
    temp_magnitude: FloatValue,
    time_horizon: usize,
) -> EquivalenceResult<FloatValue> {
    let model = FairModel::default();
    ForcingComparison::new(
        &model,
        scenario,
        StoragePulse::new(temp_yr, temp_length, temp_magnitude),
        time_horizon,
    )
    .evaluate(equivalence_ratio)
}
