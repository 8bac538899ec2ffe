//! Core types shared by the climate simulator and the equivalence solver.
//!
//! Everything here is deliberately small: an annual year axis, the emissions
//! scenario that perturbations are applied to, and the [`ClimateSimulator`]
//! boundary that turns an emissions series into concentration, forcing and
//! temperature trajectories.
//!
//! [`ClimateSimulator`]: simulator::ClimateSimulator

pub mod errors;
pub mod scenario;
pub mod simulator;
pub mod timeseries;
