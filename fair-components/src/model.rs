//! The CO2-only climate model
//!
//! [`FairModel`] steps the carbon cycle, CO2 forcing and thermal response
//! components forward one year at a time. The carbon cycle in year `t` sees
//! the temperature of year `t - 1`, so the three components can be solved in
//! sequence without iteration.

use crate::components::{CarbonCycle, ThermalResponse, CO2ERF};
use fair_core::errors::{FairError, FairResult};
use fair_core::simulator::{ClimateSimulator, SimulationOutput};
use fair_core::timeseries::{FloatValue, Signal};
use log::trace;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// CO2-only reduced-complexity climate model
///
/// The model is plain data: its behaviour is fully determined by the
/// parameters of its components, and [`FairModel::default`] gives the
/// standard configuration. Missing fields fall back to their defaults when
/// the model is read from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairModel {
    pub carbon_cycle: CarbonCycle,
    pub co2_erf: CO2ERF,
    pub thermal_response: ThermalResponse,
}

impl FairModel {
    pub fn new(
        carbon_cycle: CarbonCycle,
        co2_erf: CO2ERF,
        thermal_response: ThermalResponse,
    ) -> Self {
        Self {
            carbon_cycle,
            co2_erf,
            thermal_response,
        }
    }

    /// Read a model configuration from a TOML document.
    pub fn from_toml_str(document: &str) -> FairResult<Self> {
        toml::from_str(document).map_err(|e| FairError::InvalidConfiguration(e.to_string()))
    }

    /// Write the model configuration as a TOML document.
    pub fn to_toml_string(&self) -> FairResult<String> {
        toml::to_string(self).map_err(|e| FairError::InvalidConfiguration(e.to_string()))
    }

    fn validate_inputs(
        emissions: &ArrayView1<FloatValue>,
        other_forcing: &ArrayView1<FloatValue>,
        use_multigas: bool,
    ) -> FairResult<()> {
        if use_multigas {
            return Err(FairError::UnsupportedConfiguration(
                "multi-gas mode is not available in the CO2-only model".to_string(),
            ));
        }
        if emissions.is_empty() {
            return Err(FairError::EmptyInput);
        }
        if emissions.len() != other_forcing.len() {
            return Err(FairError::LengthMismatch {
                emissions: emissions.len(),
                other_forcing: other_forcing.len(),
            });
        }
        Self::check_finite("emissions", emissions)?;
        Self::check_finite("other forcing", other_forcing)
    }

    fn check_finite(name: &str, values: &ArrayView1<FloatValue>) -> FairResult<()> {
        match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            Some((index, value)) => Err(FairError::NonFinite {
                name: name.to_string(),
                index,
                value: *value,
            }),
            None => Ok(()),
        }
    }

    /// Forcing is logarithmic in concentration, so it must stay positive.
    fn check_concentration(index: usize, concentration: FloatValue) -> FairResult<()> {
        if concentration > 0.0 {
            Ok(())
        } else {
            Err(FairError::CarbonCycle {
                index,
                reason: format!("concentration {} ppm is not positive", concentration),
            })
        }
    }
}

#[typetag::serde]
impl ClimateSimulator for FairModel {
    fn simulate(
        &self,
        emissions: ArrayView1<FloatValue>,
        other_forcing: ArrayView1<FloatValue>,
        use_multigas: bool,
    ) -> FairResult<SimulationOutput> {
        Self::validate_inputs(&emissions, &other_forcing, use_multigas)?;

        let n = emissions.len();
        let mut concentration = Signal::zeros(n);
        let mut forcing = Signal::zeros(n);
        let mut temperature = Signal::zeros(n);

        let mut carbon = self.carbon_cycle.initial_state(emissions[0]);
        Self::check_concentration(0, carbon.concentration)?;
        concentration[0] = carbon.concentration;
        forcing[0] = self.co2_erf.calculate_erf(carbon.concentration) + other_forcing[0];
        let mut thermal = self.thermal_response.initial_state(forcing[0]);
        temperature[0] = ThermalResponse::temperature(&thermal);

        for t in 1..n {
            carbon = self
                .carbon_cycle
                .step(&carbon, temperature[t - 1], emissions[t])
                .map_err(|e| FairError::CarbonCycle {
                    index: t,
                    reason: e.to_string(),
                })?;
            Self::check_concentration(t, carbon.concentration)?;
            concentration[t] = carbon.concentration;
            forcing[t] = self.co2_erf.calculate_erf(carbon.concentration) + other_forcing[t];
            thermal = self.thermal_response.step(&thermal, forcing[t]);
            temperature[t] = ThermalResponse::temperature(&thermal);
        }

        trace!(
            "simulated {} years: final concentration {:.3} ppm, forcing {:.4} W / m^2, temperature {:.4} K",
            n,
            concentration[n - 1],
            forcing[n - 1],
            temperature[n - 1]
        );

        Ok(SimulationOutput {
            concentration,
            forcing,
            temperature,
        })
    }
}
