//! Perturbation Builder
//!
//! A temporary storage pulse removes `magnitude` GtC in one year and puts it
//! back `length` years later. The emissions that the storage is allowed to
//! justify are `magnitude / equivalence_ratio`, emitted in the storage year.

use crate::errors::{EquivalenceError, EquivalenceResult};
use fair_core::scenario::EmissionsScenario;
use fair_core::timeseries::{FloatValue, Signal, Year};
use serde::{Deserialize, Serialize};

/// A temporary removal of carbon followed by its re-emission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoragePulse {
    /// Year in which the carbon is removed
    pub year: Year,
    /// Years between removal and re-emission
    /// unit: yr
    pub length: usize,
    /// Carbon temporarily stored. Positive values remove carbon.
    /// unit: GtC
    pub magnitude: FloatValue,
}

impl StoragePulse {
    pub fn new(year: Year, length: usize, magnitude: FloatValue) -> Self {
        Self {
            year,
            length,
            magnitude,
        }
    }

    /// Index of the storage year in `scenario`.
    pub fn start_index(&self, scenario: &EmissionsScenario) -> EquivalenceResult<usize> {
        scenario
            .index_of(self.year)
            .ok_or_else(|| EquivalenceError::YearNotFound {
                year: self.year,
                scenario: scenario.name().to_string(),
            })
    }

    /// Indices of the storage and re-emission years in `scenario`.
    fn indices(&self, scenario: &EmissionsScenario) -> EquivalenceResult<(usize, usize)> {
        let start = self.start_index(scenario)?;
        let out_of_bounds = EquivalenceError::OutOfBounds {
            index: start,
            offset: self.length,
            len: scenario.len(),
        };

        match start.checked_add(self.length) {
            Some(end) if end < scenario.len() => Ok((start, end)),
            _ => Err(out_of_bounds),
        }
    }
}

/// Emissions perturbations for one trial equivalence ratio
///
/// Every signal has one value per scenario year (GtC / yr) and is zero
/// everywhere except at a single index.
#[derive(Debug, Clone, PartialEq)]
pub struct Perturbations {
    /// `-magnitude` in the storage year
    pub storage: Signal,
    /// `+magnitude` in the re-emission year
    pub reemission: Signal,
    /// `magnitude / equivalence_ratio` in the storage year
    pub justified: Signal,
}

impl Perturbations {
    /// Build the perturbations of `pulse` applied to `scenario`.
    ///
    /// # Errors
    ///
    /// * [`EquivalenceError::YearNotFound`] if the storage year is not in the scenario
    /// * [`EquivalenceError::OutOfBounds`] if the re-emission year is past its end
    /// * [`EquivalenceError::DivisionByZero`] if `equivalence_ratio` is zero
    pub fn new(
        scenario: &EmissionsScenario,
        pulse: &StoragePulse,
        equivalence_ratio: FloatValue,
    ) -> EquivalenceResult<Self> {
        let (start, end) = pulse.indices(scenario)?;
        if equivalence_ratio == 0.0 {
            return Err(EquivalenceError::DivisionByZero);
        }

        let n = scenario.len();
        let mut storage = Signal::zeros(n);
        let mut reemission = Signal::zeros(n);
        let mut justified = Signal::zeros(n);

        storage[start] = -pulse.magnitude;
        reemission[end] = pulse.magnitude;
        justified[start] = pulse.magnitude / equivalence_ratio;

        Ok(Self {
            storage,
            reemission,
            justified,
        })
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

/// Build the storage, re-emission and justified emissions signals.
///
/// * `temp_yr` - Year in which carbon is stored
/// * `temp_length` - Years until the stored carbon is re-emitted
/// * `temp_magnitude` - Carbon stored (GtC)
/// * `equivalence_ratio` - Tons stored per ton of justified emissions
pub fn get_perturbations(
    scenario: &EmissionsScenario,
    temp_yr: Year,
    temp_length: usize,
    temp_magnitude: FloatValue,
    equivalence_ratio: FloatValue,
) -> EquivalenceResult<Perturbations> {
    Perturbations::new(
        scenario,
        &StoragePulse::new(temp_yr, temp_length, temp_magnitude),
        equivalence_ratio,
    )
}
