//! Carbon-storage equivalence ratios.
//!
//! Temporarily storing carbon and re-emitting it later is worth less than
//! never emitting it. This crate finds how many tons of temporary storage are
//! needed to justify one additional ton of emissions, such that the
//! cumulative radiative forcing over a time horizon is the same as in the
//! unperturbed scenario.
//!
//! The pieces, leaf first:
//!
//! - [`get_perturbations`] builds the storage, re-emission and justified
//!   emissions signals for a trial ratio
//! - [`run_fair`] combines them with the baseline into five experiments and
//!   runs each through the climate model
//! - [`compare_rf`] is the cumulative forcing difference between the
//!   `default` and `offset` experiments
//! - [`get_equivalence_ratio`] bisects the ratio until that difference is zero
//!
//! The `_with` variants take the simulator (and solver configuration)
//! explicitly instead of using the default [`fair_components::FairModel`].
//!
//! ```no_run
//! use fair_core::scenario::EmissionsScenario;
//! use fair_core::timeseries::Signal;
//!
//! let scenario = EmissionsScenario::from_start_year(
//!     "constant",
//!     1765,
//!     Signal::from_elem(736, 8.0),
//!     Signal::from_elem(736, 1.0),
//! )?;
//! let ratio = fair_equivalence::get_equivalence_ratio(&scenario, 2022, 10, 0.1, 100)?;
//! println!("{ratio:.2} t stored per t emitted");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compare;
pub mod equivalence;
pub mod errors;
pub mod experiment;
pub mod perturbation;
pub mod solver;

pub use compare::{compare_rf, ForcingComparison};
pub use equivalence::{get_equivalence_ratio, get_equivalence_ratio_with, EquivalenceConfig};
pub use errors::{EquivalenceError, EquivalenceResult};
pub use experiment::{
    compose_experiments, run_fair, run_fair_with, Experiment, ExperimentalScenarios, FairResults,
};
pub use perturbation::{get_perturbations, Perturbations, StoragePulse};
