//! CO2 Effective Radiative Forcing component
//!
//! Forcing from the CO2 concentration via the standard logarithmic
//! relationship.

use fair_core::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the CO2 ERF component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CO2ERFParameters {
    /// ERF due to a doubling of atmospheric CO2 concentrations
    /// unit: W / m^2
    pub erf_2xco2: FloatValue,
    /// Pre-industrial atmospheric CO2 concentration
    /// unit: ppm
    pub conc_pi: FloatValue,
}

impl Default for CO2ERFParameters {
    fn default() -> Self {
        Self {
            erf_2xco2: 3.71,
            conc_pi: 278.0,
        }
    }
}

/// CO2 effective radiative forcing (ERF) calculations
///
/// $$ ERF = \frac{ERF_{2xCO2}}{\log(2)} \cdot \log\left(\frac{C}{C_0}\right) $$
///
/// Where:
/// - $ERF_{2xCO2}$ is the ERF for a doubling of CO2
/// - $C$ is the current CO2 concentration
/// - $C_0$ is the pre-industrial CO2 concentration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CO2ERF {
    parameters: CO2ERFParameters,
}

impl CO2ERF {
    pub fn from_parameters(parameters: CO2ERFParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &CO2ERFParameters {
        &self.parameters
    }

    /// Calculate ERF from concentration
    pub fn calculate_erf(&self, concentration: FloatValue) -> FloatValue {
        self.parameters.erf_2xco2 / 2.0_f64.ln() * (concentration / self.parameters.conc_pi).ln()
    }
}
