//! Emissions scenarios
//!
//! An [`EmissionsScenario`] is the immutable baseline that perturbations are
//! applied to. It holds annual fossil and land-use CO2 emissions (GtC / yr)
//! aligned with a contiguous [`YearAxis`], plus any other named emission
//! components that came with the source data. Only the two CO2 components
//! take part in the CO2-only experiments.
//!
//! Loading a published pathway is left to the caller. The scenario
//! (de)serialises as a flat table so it can be read from whatever format the
//! caller prefers.

use crate::errors::{FairError, FairResult};
use crate::timeseries::{FloatValue, Signal, Year, YearAxis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annual emissions for a single scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioTable", into = "ScenarioTable")]
pub struct EmissionsScenario {
    name: String,
    axis: YearAxis,
    fossil_co2: Signal,
    land_use_co2: Signal,
    other: BTreeMap<String, Signal>,
}

impl EmissionsScenario {
    /// Create a scenario from explicit years and CO2 components.
    ///
    /// The years must be contiguous and every series must have one finite
    /// value per year.
    pub fn new(
        name: impl Into<String>,
        years: &[Year],
        fossil_co2: Signal,
        land_use_co2: Signal,
    ) -> FairResult<Self> {
        let axis = YearAxis::from_years(years)?;
        Self::from_axis(name, axis, fossil_co2, land_use_co2)
    }

    /// Create a scenario whose first year is `start`.
    pub fn from_start_year(
        name: impl Into<String>,
        start: Year,
        fossil_co2: Signal,
        land_use_co2: Signal,
    ) -> FairResult<Self> {
        let axis = YearAxis::new(start, fossil_co2.len());
        Self::from_axis(name, axis, fossil_co2, land_use_co2)
    }

    fn from_axis(
        name: impl Into<String>,
        axis: YearAxis,
        fossil_co2: Signal,
        land_use_co2: Signal,
    ) -> FairResult<Self> {
        if axis.is_empty() {
            return Err(FairError::InvalidScenario(
                "scenario must contain at least one year".to_string(),
            ));
        }
        check_component("fossil CO2", &axis, &fossil_co2)?;
        check_component("land-use CO2", &axis, &land_use_co2)?;

        Ok(Self {
            name: name.into(),
            axis,
            fossil_co2,
            land_use_co2,
            other: BTreeMap::new(),
        })
    }

    /// Attach an additional emission component.
    ///
    /// These are carried along with the scenario but are not used by the
    /// CO2-only experiments.
    pub fn with_component(mut self, name: impl Into<String>, values: Signal) -> FairResult<Self> {
        let name = name.into();
        check_component(&name, &self.axis, &values)?;
        self.other.insert(name, values);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axis(&self) -> &YearAxis {
        &self.axis
    }

    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// Position of `year` within the scenario.
    pub fn index_of(&self, year: Year) -> Option<usize> {
        self.axis.index_of(year)
    }

    pub fn fossil_co2(&self) -> &Signal {
        &self.fossil_co2
    }

    pub fn land_use_co2(&self) -> &Signal {
        &self.land_use_co2
    }

    pub fn component(&self, name: &str) -> Option<&Signal> {
        self.other.get(name)
    }

    /// Total CO2 emissions (fossil + land use) in GtC / yr
    pub fn total_co2(&self) -> Signal {
        &self.land_use_co2 + &self.fossil_co2
    }
}

fn check_component(name: &str, axis: &YearAxis, values: &Signal) -> FairResult<()> {
    if values.len() != axis.len() {
        return Err(FairError::InvalidScenario(format!(
            "{} has {} values but the year axis has {} years",
            name,
            values.len(),
            axis.len()
        )));
    }

    if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(FairError::NonFinite {
            name: name.to_string(),
            index,
            value: *value,
        });
    }

    Ok(())
}

/// Flat serialised form of an [`EmissionsScenario`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioTable {
    name: String,
    years: Vec<Year>,
    fossil_co2: Vec<FloatValue>,
    land_use_co2: Vec<FloatValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    other: BTreeMap<String, Vec<FloatValue>>,
}

impl TryFrom<ScenarioTable> for EmissionsScenario {
    type Error = FairError;

    fn try_from(table: ScenarioTable) -> FairResult<Self> {
        let scenario = Self::new(
            table.name,
            &table.years,
            Signal::from(table.fossil_co2),
            Signal::from(table.land_use_co2),
        )?;

        table
            .other
            .into_iter()
            .try_fold(scenario, |scenario, (name, values)| {
                scenario.with_component(name, Signal::from(values))
            })
    }
}

impl From<EmissionsScenario> for ScenarioTable {
    fn from(scenario: EmissionsScenario) -> Self {
        Self {
            name: scenario.name,
            years: scenario.axis.years().collect(),
            fossil_co2: scenario.fossil_co2.to_vec(),
            land_use_co2: scenario.land_use_co2.to_vec(),
            other: scenario
                .other
                .into_iter()
                .map(|(name, values)| (name, values.to_vec()))
                .collect(),
        }
    }
}
