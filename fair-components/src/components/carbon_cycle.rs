//! Carbon cycle component
//!
//! A four-pool impulse-response carbon cycle. Each pool takes a fixed share
//! of every year's emissions and decays with its own lifetime. The lifetimes
//! are scaled by a common time-scale factor chosen so that the 100-year
//! integrated impulse response (iIRF100) of the pools matches a target that
//! grows with the carbon already taken up by sinks and with temperature.
//! This is how sink saturation and warming feedbacks enter the model.

use crate::constants::GTC_PER_PPM;
use fair_core::timeseries::FloatValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of carbon pools
pub const N_POOLS: usize = 4;

const MAX_NEWTON_ITERS: usize = 100;
const TIME_SCALE_STEP_TOL: FloatValue = 1e-12;

/// Parameters for the carbon cycle component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonCycleParameters {
    /// Pre-industrial iIRF100
    /// unit: yr
    pub r0: FloatValue,
    /// Sensitivity of iIRF100 to cumulative carbon uptake by sinks
    /// unit: yr / GtC
    pub rc: FloatValue,
    /// Sensitivity of iIRF100 to the temperature anomaly
    /// unit: yr / K
    pub rt: FloatValue,
    /// Upper limit on iIRF100
    /// unit: yr
    pub iirf_max: FloatValue,
    /// Horizon over which the impulse response is integrated
    /// unit: yr
    pub iirf_horizon: FloatValue,
    /// Share of emissions entering each pool. Sums to one.
    /// unit: 1
    pub partition_fractions: [FloatValue; N_POOLS],
    /// Unscaled lifetime of each pool
    /// unit: yr
    pub lifetimes: [FloatValue; N_POOLS],
    /// Pre-industrial atmospheric CO2 concentration
    /// unit: ppm
    pub conc_pi: FloatValue,
    /// Starting guess for the time-scale factor in the first year
    /// unit: 1
    pub time_scale_factor_initial: FloatValue,
    /// unit: GtC / ppm
    pub gtc_per_ppm: FloatValue,
}

impl Default for CarbonCycleParameters {
    fn default() -> Self {
        Self {
            r0: 35.0,
            rc: 0.019,
            rt: 4.165,
            iirf_max: 97.0,
            iirf_horizon: 100.0,
            partition_fractions: [0.2173, 0.2240, 0.2824, 0.2763],
            lifetimes: [1_000_000.0, 394.4, 36.54, 4.304],
            conc_pi: 278.0,
            time_scale_factor_initial: 0.16,
            gtc_per_ppm: GTC_PER_PPM,
        }
    }
}

/// Carbon cycle state carried from one year to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonCycleState {
    /// Concentration anomaly held in each pool
    /// unit: ppm
    pub pools: [FloatValue; N_POOLS],
    /// Atmospheric CO2 concentration
    /// unit: ppm
    pub concentration: FloatValue,
    /// Carbon emitted but no longer in the atmosphere
    /// unit: GtC
    pub cumulative_uptake: FloatValue,
    /// Factor applied to every pool lifetime
    /// unit: 1
    pub time_scale_factor: FloatValue,
    /// Emissions in the year this state describes
    /// unit: GtC / yr
    pub emissions: FloatValue,
}

/// Failure to find a time-scale factor for the requested iIRF100
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeScaleError {
    #[error("target iIRF100 {0} yr must be positive")]
    NonPositiveTarget(FloatValue),
    #[error("target iIRF100 {target} yr exceeds the largest attainable value {limit} yr")]
    Unattainable {
        target: FloatValue,
        limit: FloatValue,
    },
    #[error("time-scale factor did not converge for iIRF100 {target} yr after {iterations} iterations")]
    NotConverged {
        target: FloatValue,
        iterations: usize,
    },
}

/// Four-pool carbon cycle with state-dependent lifetimes
///
/// Each year the pools are updated as
///
/// $$ R_i(t) = R_i(t-1) \exp\left(-\frac{1}{\alpha \tau_i}\right) + a_i \frac{E(t)}{GtC\_per\_ppm} $$
///
/// $$ C(t) = C_0 + \sum_i R_i(t) $$
///
/// where the time-scale factor $\alpha$ solves
///
/// $$ \alpha \sum_i a_i \tau_i \left(1 - \exp\left(-\frac{H}{\alpha \tau_i}\right)\right) = \min(r_0 + r_C C_{acc} + r_T T, iIRF_{max}) $$
///
/// with $C_{acc}$ the cumulative uptake by sinks and $T$ the previous year's
/// temperature anomaly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarbonCycle {
    parameters: CarbonCycleParameters,
}

impl CarbonCycle {
    pub fn from_parameters(parameters: CarbonCycleParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &CarbonCycleParameters {
        &self.parameters
    }

    /// State after the first year's emissions enter empty pools.
    pub fn initial_state(&self, emissions: FloatValue) -> CarbonCycleState {
        let params = &self.parameters;
        let pools = params
            .partition_fractions
            .map(|a| a * emissions / params.gtc_per_ppm);

        CarbonCycleState {
            pools,
            concentration: params.conc_pi + pools.iter().sum::<FloatValue>(),
            cumulative_uptake: 0.0,
            time_scale_factor: params.time_scale_factor_initial,
            emissions,
        }
    }

    /// Target iIRF100 for the current sink uptake and temperature.
    pub fn target_iirf(
        &self,
        cumulative_uptake: FloatValue,
        temperature: FloatValue,
    ) -> FloatValue {
        let params = &self.parameters;
        (params.r0 + params.rc * cumulative_uptake + params.rt * temperature).min(params.iirf_max)
    }

    /// iIRF100 of the pools when every lifetime is scaled by `time_scale_factor`.
    pub fn iirf(&self, time_scale_factor: FloatValue) -> FloatValue {
        let params = &self.parameters;
        let horizon = params.iirf_horizon;

        time_scale_factor
            * params
                .partition_fractions
                .iter()
                .zip(params.lifetimes.iter())
                .map(|(a, tau)| a * tau * -(-horizon / (tau * time_scale_factor)).exp_m1())
                .sum::<FloatValue>()
    }

    /// Derivative of [`CarbonCycle::iirf`] with respect to the time-scale factor.
    fn iirf_slope(&self, time_scale_factor: FloatValue) -> FloatValue {
        let params = &self.parameters;
        let horizon = params.iirf_horizon;

        params
            .partition_fractions
            .iter()
            .zip(params.lifetimes.iter())
            .map(|(a, tau)| {
                let x = horizon / (tau * time_scale_factor);
                a * tau * (-(-x).exp_m1() - x * (-x).exp())
            })
            .sum()
    }

    /// Find the time-scale factor whose iIRF100 equals `target`.
    ///
    /// `iirf` increases monotonically from zero towards
    /// `iirf_horizon * sum(partition_fractions)`, so the root is unique when it
    /// exists. Newton steps are taken from `guess` and fall back to bisection
    /// whenever a step leaves the bracket known to contain the root.
    pub fn solve_time_scale_factor(
        &self,
        target: FloatValue,
        guess: FloatValue,
    ) -> Result<FloatValue, TimeScaleError> {
        if target.is_nan() || target <= 0.0 {
            return Err(TimeScaleError::NonPositiveTarget(target));
        }
        let params = &self.parameters;
        let limit = params.iirf_horizon * params.partition_fractions.iter().sum::<FloatValue>();
        if target >= limit {
            return Err(TimeScaleError::Unattainable { target, limit });
        }

        let mut lower: FloatValue = 0.0;
        let mut upper = FloatValue::INFINITY;
        let mut alpha = if guess > 0.0 && guess.is_finite() {
            guess
        } else {
            params.time_scale_factor_initial
        };

        for _ in 0..MAX_NEWTON_ITERS {
            let residual = self.iirf(alpha) - target;
            if residual == 0.0 {
                return Ok(alpha);
            }

            if residual > 0.0 {
                upper = alpha;
            } else {
                lower = alpha;
            }

            let newton = alpha - residual / self.iirf_slope(alpha);
            let next = if newton.is_finite() && newton > lower && newton < upper {
                newton
            } else if upper.is_finite() {
                0.5 * (lower + upper)
            } else {
                2.0 * alpha
            };

            // Newton converges quadratically, so once a step is this small the
            // stepped value is accurate to rounding.
            if (next - alpha).abs() <= TIME_SCALE_STEP_TOL * alpha {
                return Ok(next);
            }
            alpha = next;
        }

        Err(TimeScaleError::NotConverged {
            target,
            iterations: MAX_NEWTON_ITERS,
        })
    }

    /// Advance the carbon cycle by one year.
    ///
    /// # Arguments
    ///
    /// * `state` - State at the end of the previous year
    /// * `temperature` - Temperature anomaly of the previous year (K)
    /// * `emissions` - Emissions in the new year (GtC / yr)
    pub fn step(
        &self,
        state: &CarbonCycleState,
        temperature: FloatValue,
        emissions: FloatValue,
    ) -> Result<CarbonCycleState, TimeScaleError> {
        let params = &self.parameters;

        let target = self.target_iirf(state.cumulative_uptake, temperature);
        let time_scale_factor = self.solve_time_scale_factor(target, state.time_scale_factor)?;

        let mut pools = state.pools;
        for ((pool, a), tau) in pools
            .iter_mut()
            .zip(params.partition_fractions.iter())
            .zip(params.lifetimes.iter())
        {
            *pool = *pool * (-1.0 / (tau * time_scale_factor)).exp()
                + a * emissions / params.gtc_per_ppm;
        }

        let concentration = params.conc_pi + pools.iter().sum::<FloatValue>();
        let cumulative_uptake = state.cumulative_uptake + 0.5 * (state.emissions + emissions)
            - (concentration - state.concentration) * params.gtc_per_ppm;

        Ok(CarbonCycleState {
            pools,
            concentration,
            cumulative_uptake,
            time_scale_factor,
            emissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn component() -> CarbonCycle {
        CarbonCycle::from_parameters(CarbonCycleParameters::default())
    }

    #[test]
    fn partition_fractions_sum_to_one() {
        let total: FloatValue = CarbonCycleParameters::default()
            .partition_fractions
            .iter()
            .sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn initial_state_puts_emissions_in_pools() {
        let component = component();
        let state = component.initial_state(GTC_PER_PPM * 10.0);

        assert_relative_eq!(state.concentration, 288.0, epsilon = 1e-10);
        assert_relative_eq!(state.pools[1], 2.240, epsilon = 1e-10);
        assert_eq!(state.cumulative_uptake, 0.0);
    }

    #[test]
    fn target_iirf_is_capped() {
        let component = component();
        assert_relative_eq!(component.target_iirf(0.0, 0.0), 35.0);
        assert_relative_eq!(
            component.target_iirf(100.0, 1.0),
            35.0 + 1.9 + 4.165,
            epsilon = 1e-12
        );
        assert_relative_eq!(component.target_iirf(10_000.0, 5.0), 97.0);
    }

    #[test]
    fn time_scale_factor_reproduces_target() {
        let component = component();

        for target in [10.0, 35.0, 60.0, 97.0] {
            let alpha = component.solve_time_scale_factor(target, 0.16).unwrap();
            assert!(alpha > 0.0);
            assert_relative_eq!(component.iirf(alpha), target, max_relative = 1e-12);
        }
    }

    #[test]
    fn time_scale_factor_ignores_poor_guess() {
        let component = component();
        let from_good = component.solve_time_scale_factor(35.0, 0.16).unwrap();
        let from_bad = component.solve_time_scale_factor(35.0, 500.0).unwrap();
        let from_invalid = component
            .solve_time_scale_factor(35.0, FloatValue::NAN)
            .unwrap();

        assert_relative_eq!(from_good, from_bad, max_relative = 1e-10);
        assert_relative_eq!(from_good, from_invalid, max_relative = 1e-10);
    }

    #[test]
    fn time_scale_factor_rejects_invalid_targets() {
        let component = component();
        assert_eq!(
            component.solve_time_scale_factor(-1.0, 0.16),
            Err(TimeScaleError::NonPositiveTarget(-1.0))
        );
        assert!(matches!(
            component.solve_time_scale_factor(150.0, 0.16),
            Err(TimeScaleError::Unattainable { .. })
        ));
    }

    #[test]
    fn no_emissions_stays_at_preindustrial() {
        let component = component();
        let mut state = component.initial_state(0.0);

        for _ in 0..50 {
            state = component.step(&state, 0.0, 0.0).unwrap();
        }

        assert_relative_eq!(state.concentration, 278.0);
        assert_relative_eq!(state.cumulative_uptake, 0.0);
    }

    #[test]
    fn pulse_decays_but_not_completely() {
        let component = component();
        let pulse = 100.0;
        let mut state = component.initial_state(pulse);
        let initial_anomaly = state.concentration - 278.0;

        for _ in 0..100 {
            state = component.step(&state, 0.0, 0.0).unwrap();
        }

        let airborne_fraction = (state.concentration - 278.0) / initial_anomaly;
        assert!(
            airborne_fraction > 0.2 && airborne_fraction < 0.45,
            "Airborne fraction after 100 years should be roughly a quarter to a third, got {}",
            airborne_fraction
        );
    }

    #[test]
    fn carbon_mass_is_conserved() {
        // Emitted carbon is either in the atmosphere or taken up by sinks
        let component = component();
        let emissions = [5.0, 8.0, 10.0, 6.0, 0.0, -2.0, 3.0];
        let mut state = component.initial_state(emissions[0]);

        for e in &emissions[1..] {
            state = component.step(&state, 0.5, *e).unwrap();
        }

        // Trapezoidal total of emissions after the first year, plus the first year itself
        let trapezoid: FloatValue = emissions
            .windows(2)
            .map(|pair| 0.5 * (pair[0] + pair[1]))
            .sum::<FloatValue>()
            + emissions[0];
        let atmospheric = (state.concentration - 278.0) * GTC_PER_PPM;

        assert_relative_eq!(
            atmospheric + state.cumulative_uptake,
            trapezoid,
            epsilon = 1e-9
        );
    }

    #[test]
    fn warming_slows_uptake() {
        let component = component();
        let cool = component.initial_state(50.0);
        let warm = cool;

        let cool = component.step(&cool, 0.0, 0.0).unwrap();
        let warm = component.step(&warm, 3.0, 0.0).unwrap();

        assert!(warm.time_scale_factor > cool.time_scale_factor);
        assert!(warm.concentration > cool.concentration);
    }
}
