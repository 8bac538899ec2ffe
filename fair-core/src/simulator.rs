//! The climate simulator boundary
//!
//! Everything downstream of an emissions series is hidden behind
//! [`ClimateSimulator`]: a deterministic, stateless function from annual CO2
//! emissions (plus any non-CO2 forcing) to concentration, forcing and
//! temperature trajectories of the same length.
//!
//! Implementations carry their physical configuration as plain data, so a
//! configured simulator is passed explicitly to whoever needs it rather than
//! living in global state. The trait is registered with `typetag` so that a
//! boxed simulator can be (de)serialised with its parameters.

use crate::errors::FairResult;
use crate::timeseries::{FloatValue, Signal};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trajectories produced by a single simulator run.
///
/// All three series have the same length as the emissions that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Atmospheric CO2 concentration
    /// unit: ppm
    pub concentration: Signal,
    /// Total effective radiative forcing
    /// unit: W / m^2
    pub forcing: Signal,
    /// Global-mean surface temperature anomaly relative to pre-industrial
    /// unit: K
    pub temperature: Signal,
}

impl SimulationOutput {
    pub fn len(&self) -> usize {
        self.forcing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forcing.is_empty()
    }

    /// Forcing summed over every year of the run.
    pub fn cumulative_forcing(&self) -> FloatValue {
        self.forcing.sum()
    }
}

/// A climate model driven by annual CO2 emissions.
#[typetag::serde]
pub trait ClimateSimulator: Debug + Send + Sync {
    /// Run the model.
    ///
    /// * `emissions` - CO2 emissions (GtC / yr), one value per year
    /// * `other_forcing` - Non-CO2 forcing (W / m^2) added to the CO2 forcing
    /// * `use_multigas` - Request multi-gas mode. CO2-only simulators reject it.
    ///
    /// Implementations must be deterministic: identical inputs give identical
    /// outputs.
    fn simulate(
        &self,
        emissions: ArrayView1<FloatValue>,
        other_forcing: ArrayView1<FloatValue>,
        use_multigas: bool,
    ) -> FairResult<SimulationOutput>;
}
