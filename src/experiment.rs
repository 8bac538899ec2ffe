//! Scenario Composer & Simulator Adapter
//!
//! The baseline CO2 emissions are combined with the perturbations into five
//! experiments, each of which is run through a [`ClimateSimulator`] with no
//! non-CO2 forcing.

use crate::errors::{EquivalenceError, EquivalenceResult};
use crate::perturbation::Perturbations;
use fair_components::FairModel;
use fair_core::scenario::EmissionsScenario;
use fair_core::simulator::{ClimateSimulator, SimulationOutput};
use fair_core::timeseries::Signal;
use log::trace;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// The experiments run for every trial equivalence ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experiment {
    /// The unperturbed scenario
    Default,
    /// Carbon is stored and never re-emitted
    Permanent,
    /// Carbon is stored and re-emitted
    Temporary,
    /// Temporary storage used to justify extra emissions
    Offset,
    /// The justified emissions alone
    Justified,
}

impl Experiment {
    pub const ALL: [Experiment; 5] = [
        Experiment::Default,
        Experiment::Permanent,
        Experiment::Temporary,
        Experiment::Offset,
        Experiment::Justified,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Experiment::Default => "default",
            Experiment::Permanent => "permanent",
            Experiment::Temporary => "temporary",
            Experiment::Offset => "offset",
            Experiment::Justified => "justified",
        }
    }
}

impl std::fmt::Display for Experiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One value per [`Experiment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiments<T> {
    pub default: T,
    pub permanent: T,
    pub temporary: T,
    pub offset: T,
    pub justified: T,
}

impl<T> Experiments<T> {
    pub fn get(&self, experiment: Experiment) -> &T {
        match experiment {
            Experiment::Default => &self.default,
            Experiment::Permanent => &self.permanent,
            Experiment::Temporary => &self.temporary,
            Experiment::Offset => &self.offset,
            Experiment::Justified => &self.justified,
        }
    }

    /// Iterate in the order of [`Experiment::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = (Experiment, &T)> + '_ {
        Experiment::ALL
            .into_iter()
            .map(move |experiment| (experiment, self.get(experiment)))
    }

    /// Apply a fallible function to every experiment, in the order of
    /// [`Experiment::ALL`], stopping at the first error.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<Experiments<U>, E>
    where
        F: FnMut(Experiment, &T) -> Result<U, E>,
    {
        Ok(Experiments {
            default: f(Experiment::Default, &self.default)?,
            permanent: f(Experiment::Permanent, &self.permanent)?,
            temporary: f(Experiment::Temporary, &self.temporary)?,
            offset: f(Experiment::Offset, &self.offset)?,
            justified: f(Experiment::Justified, &self.justified)?,
        })
    }
}

impl<T> Index<Experiment> for Experiments<T> {
    type Output = T;

    fn index(&self, experiment: Experiment) -> &T {
        self.get(experiment)
    }
}

/// Emissions (GtC / yr) for each experiment
pub type ExperimentalScenarios = Experiments<Signal>;

/// Simulator output for each experiment
pub type FairResults = Experiments<SimulationOutput>;

/// Combine the baseline CO2 emissions with the perturbations.
///
/// | experiment  | emissions                                      |
/// |-------------|------------------------------------------------|
/// | `default`   | fossil + land use                              |
/// | `permanent` | default + storage                              |
/// | `temporary` | default + storage + reemission                 |
/// | `offset`    | default + storage + reemission + justified     |
/// | `justified` | default + justified                            |
pub fn compose_experiments(
    scenario: &EmissionsScenario,
    perturbations: &Perturbations,
) -> EquivalenceResult<ExperimentalScenarios> {
    let expected = scenario.len();
    for (name, signal) in [
        ("storage", &perturbations.storage),
        ("reemission", &perturbations.reemission),
        ("justified", &perturbations.justified),
    ] {
        if signal.len() != expected {
            return Err(EquivalenceError::PerturbationLength {
                name,
                expected,
                actual: signal.len(),
            });
        }
    }

    let default = scenario.total_co2();
    let permanent = &default + &perturbations.storage;
    let temporary = &permanent + &perturbations.reemission;
    let offset = &temporary + &perturbations.justified;
    let justified = &default + &perturbations.justified;

    Ok(Experiments {
        default,
        permanent,
        temporary,
        offset,
        justified,
    })
}

/// Compose the experiments and run each through `simulator`.
///
/// Every run uses zero non-CO2 forcing and CO2-only mode. Simulator errors
/// are returned as [`EquivalenceError::Simulation`].
pub fn run_fair_with(
    simulator: &dyn ClimateSimulator,
    scenario: &EmissionsScenario,
    perturbations: &Perturbations,
) -> EquivalenceResult<(ExperimentalScenarios, FairResults)> {
    let experiments = compose_experiments(scenario, perturbations)?;
    let other_forcing = Signal::zeros(scenario.len());

    let results = experiments.try_map(|experiment, emissions| {
        let output = simulator.simulate(emissions.view(), other_forcing.view(), false)?;
        trace!(
            "{} experiment for {}: cumulative forcing {:.6} W / m^2",
            experiment,
            scenario.name(),
            output.cumulative_forcing()
        );
        Ok::<_, EquivalenceError>(output)
    })?;

    Ok((experiments, results))
}

/// [`run_fair_with`] using the default [`FairModel`].
pub fn run_fair(
    scenario: &EmissionsScenario,
    perturbations: &Perturbations,
) -> EquivalenceResult<(ExperimentalScenarios, FairResults)> {
    run_fair_with(&FairModel::default(), scenario, perturbations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perturbation::get_perturbations;
    use fair_core::errors::{FairError, FairResult};
    use ndarray::{array, ArrayView1};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scenario() -> EmissionsScenario {
        EmissionsScenario::from_start_year(
            "test",
            2000,
            array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            array![0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
        )
        .unwrap()
    }

    /// Echoes the emissions back as forcing
    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Echo {
        #[serde(skip)]
        calls: AtomicUsize,
    }

    #[typetag::serde]
    impl ClimateSimulator for Echo {
        fn simulate(
            &self,
            emissions: ArrayView1<f64>,
            other_forcing: ArrayView1<f64>,
            use_multigas: bool,
        ) -> FairResult<SimulationOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(!use_multigas);
            assert!(other_forcing.iter().all(|f| *f == 0.0));
            Ok(SimulationOutput {
                concentration: emissions.to_owned(),
                forcing: emissions.to_owned(),
                temperature: emissions.to_owned(),
            })
        }
    }

    /// Rejects every run
    #[derive(Debug, Serialize, Deserialize)]
    struct Broken;

    #[typetag::serde]
    impl ClimateSimulator for Broken {
        fn simulate(
            &self,
            _emissions: ArrayView1<f64>,
            _other_forcing: ArrayView1<f64>,
            _use_multigas: bool,
        ) -> FairResult<SimulationOutput> {
            Err(FairError::UnsupportedConfiguration("broken".to_string()))
        }
    }

    #[test]
    fn experiments_combine_perturbations() {
        let perturbations = get_perturbations(&scenario(), 2001, 3, 1.0, 2.0).unwrap();
        let experiments = compose_experiments(&scenario(), &perturbations).unwrap();

        assert_eq!(experiments.default, array![1.5, 2.5, 3.5, 4.5, 5.5, 6.5]);
        assert_eq!(experiments.permanent, array![1.5, 1.5, 3.5, 4.5, 5.5, 6.5]);
        assert_eq!(experiments.temporary, array![1.5, 1.5, 3.5, 4.5, 6.5, 6.5]);
        assert_eq!(experiments.offset, array![1.5, 2.0, 3.5, 4.5, 6.5, 6.5]);
        assert_eq!(experiments.justified, array![1.5, 3.0, 3.5, 4.5, 5.5, 6.5]);
    }

    #[test]
    fn mismatched_perturbations_are_rejected() {
        let mut perturbations = get_perturbations(&scenario(), 2001, 3, 1.0, 2.0).unwrap();
        perturbations.reemission = Signal::zeros(4);

        assert_eq!(
            compose_experiments(&scenario(), &perturbations),
            Err(EquivalenceError::PerturbationLength {
                name: "reemission",
                expected: 6,
                actual: 4
            })
        );
    }

    #[test]
    fn every_experiment_is_simulated_once() {
        let simulator = Echo::default();
        let perturbations = get_perturbations(&scenario(), 2000, 1, 0.5, 1.0).unwrap();

        let (experiments, results) = run_fair_with(&simulator, &scenario(), &perturbations).unwrap();

        assert_eq!(simulator.calls.load(Ordering::SeqCst), 5);
        for (experiment, output) in results.iter() {
            assert_eq!(output.forcing, experiments[experiment]);
        }
        assert_eq!(results.iter().count(), 5);
    }

    #[test]
    fn simulator_errors_propagate() {
        let perturbations = get_perturbations(&scenario(), 2000, 1, 0.5, 1.0).unwrap();
        let err = run_fair_with(&Broken, &scenario(), &perturbations).unwrap_err();

        assert_eq!(
            err,
            EquivalenceError::Simulation(FairError::UnsupportedConfiguration(
                "broken".to_string()
            ))
        );
    }

    #[test]
    fn experiment_names() {
        let names: Vec<String> = Experiment::ALL.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            names,
            ["default", "permanent", "temporary", "offset", "justified"]
        );
        assert_eq!(
            serde_json::to_string(&Experiment::Offset).unwrap(),
            "\"offset\""
        );
    }
}
