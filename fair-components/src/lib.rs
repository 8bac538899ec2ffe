//! A CO2-only reduced-complexity climate model.
//!
//! The model chains three components, each stepped annually:
//!
//! - [`CarbonCycle`]: four-pool impulse-response carbon cycle whose time
//!   constants scale with the state-dependent 100-year integrated impulse
//!   response (iIRF100)
//! - [`CO2ERF`]: logarithmic CO2 effective radiative forcing
//! - [`ThermalResponse`]: two-timescale temperature response to forcing
//!
//! [`FairModel`] wires them together and implements
//! [`fair_core::simulator::ClimateSimulator`].
//!
//! [`CarbonCycle`]: components::CarbonCycle
//! [`CO2ERF`]: components::CO2ERF
//! [`ThermalResponse`]: components::ThermalResponse
//! [`FairModel`]: model::FairModel

pub mod components;
pub mod constants;
pub mod model;

pub use model::FairModel;
