mod carbon_cycle;
mod co2_erf;
mod thermal_response;

pub use carbon_cycle::{
    CarbonCycle, CarbonCycleParameters, CarbonCycleState, TimeScaleError, N_POOLS,
};
pub use co2_erf::{CO2ERFParameters, CO2ERF};
pub use thermal_response::{
    ThermalResponse, ThermalResponseParameters, ThermalState, N_THERMAL_BOXES,
};
