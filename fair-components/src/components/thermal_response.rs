//! Thermal response component
//!
//! Global-mean temperature responds to forcing through two boxes, a fast one
//! (roughly the ocean mixed layer) and a slow one (the deep ocean). Each box
//! relaxes towards its equilibrium response with its own time constant. The
//! box sensitivities are derived from the transient and equilibrium climate
//! responses rather than specified directly.

use fair_core::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Number of thermal boxes
pub const N_THERMAL_BOXES: usize = 2;

/// Temperature anomaly held in each thermal box (K)
pub type ThermalState = [FloatValue; N_THERMAL_BOXES];

/// Parameters for the thermal response component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalResponseParameters {
    /// Transient climate response: warming at the time of CO2 doubling under
    /// a 1% per year increase
    /// unit: K
    pub tcr: FloatValue,
    /// Equilibrium climate sensitivity
    /// unit: K
    pub ecs: FloatValue,
    /// Response time of each box
    /// unit: yr
    pub response_times: [FloatValue; N_THERMAL_BOXES],
    /// ERF due to a doubling of atmospheric CO2 concentrations
    /// unit: W / m^2
    pub erf_2xco2: FloatValue,
}

impl Default for ThermalResponseParameters {
    fn default() -> Self {
        Self {
            tcr: 1.6,
            ecs: 2.75,
            response_times: [239.0, 4.1],
            erf_2xco2: 3.71,
        }
    }
}

/// Two-timescale temperature response
///
/// $$ T_j(t) = T_j(t-1) e^{-1/d_j} + q_j \left(1 - e^{-1/d_j}\right) F(t) $$
///
/// $$ T(t) = \sum_j T_j(t) $$
///
/// The box sensitivities $q_j$ (K / (W / m^2)) are chosen so that the model
/// reproduces the configured TCR and ECS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ThermalResponseParameters", into = "ThermalResponseParameters")]
pub struct ThermalResponse {
    parameters: ThermalResponseParameters,
    sensitivities: [FloatValue; N_THERMAL_BOXES],
}

impl From<ThermalResponseParameters> for ThermalResponse {
    fn from(parameters: ThermalResponseParameters) -> Self {
        Self::from_parameters(parameters)
    }
}

impl From<ThermalResponse> for ThermalResponseParameters {
    fn from(component: ThermalResponse) -> Self {
        component.parameters
    }
}

impl Default for ThermalResponse {
    fn default() -> Self {
        Self::from_parameters(ThermalResponseParameters::default())
    }
}

impl ThermalResponse {
    pub fn from_parameters(parameters: ThermalResponseParameters) -> Self {
        let sensitivities = box_sensitivities(&parameters);
        Self {
            parameters,
            sensitivities,
        }
    }

    pub fn parameters(&self) -> &ThermalResponseParameters {
        &self.parameters
    }

    /// Box sensitivities
    /// unit: K / (W / m^2)
    pub fn sensitivities(&self) -> &[FloatValue; N_THERMAL_BOXES] {
        &self.sensitivities
    }

    /// Box temperatures after the first year of forcing.
    pub fn initial_state(&self, forcing: FloatValue) -> ThermalState {
        let d = &self.parameters.response_times;
        [
            self.sensitivities[0] / d[0] * forcing,
            self.sensitivities[1] / d[1] * forcing,
        ]
    }

    /// Advance the box temperatures by one year under `forcing`.
    pub fn step(&self, state: &ThermalState, forcing: FloatValue) -> ThermalState {
        let response_times = &self.parameters.response_times;
        let mut next = *state;
        for ((t, q), d) in next
            .iter_mut()
            .zip(self.sensitivities.iter())
            .zip(response_times.iter())
        {
            let decay = (-1.0 / d).exp();
            *t = *t * decay + q * (1.0 - decay) * forcing;
        }
        next
    }

    /// Surface temperature anomaly for a box state.
    pub fn temperature(state: &ThermalState) -> FloatValue {
        state.iter().sum()
    }
}

/// Years to double CO2 when concentrations rise by 1% per year.
fn doubling_time_1pct() -> FloatValue {
    2.0_f64.ln() / 1.01_f64.ln()
}

fn box_sensitivities(parameters: &ThermalResponseParameters) -> [FloatValue; N_THERMAL_BOXES] {
    let doubling_time = doubling_time_1pct();
    let k = parameters
        .response_times
        .map(|d| 1.0 - (d / doubling_time) * (1.0 - (-doubling_time / d).exp()));
    let scale = 1.0 / parameters.erf_2xco2 / (k[0] - k[1]);

    [
        scale * (parameters.tcr - parameters.ecs * k[1]),
        scale * (parameters.ecs * k[0] - parameters.tcr),
    ]
}
