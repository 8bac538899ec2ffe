use crate::errors::{FairError, FairResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub type FloatValue = f64;
pub type Year = i32;

/// A dense annual series, one value per year of the scenario it belongs to.
pub type Signal = Array1<FloatValue>;

/// A contiguous annual time axis.
///
/// Years are strictly increasing with a fixed step of one year, so the axis is
/// fully described by its first year and its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearAxis {
    start: Year,
    len: usize,
}

impl YearAxis {
    pub fn new(start: Year, len: usize) -> Self {
        Self { start, len }
    }

    /// Build an axis from explicit year values.
    ///
    /// Fails if `years` is empty or if consecutive years are not exactly one
    /// year apart.
    pub fn from_years(years: &[Year]) -> FairResult<Self> {
        let Some(&start) = years.first() else {
            return Err(FairError::InvalidScenario(
                "year axis must contain at least one year".to_string(),
            ));
        };

        if let Some(pair) = years
            .windows(2)
            .find(|pair| pair[0].checked_add(1) != Some(pair[1]))
        {
            return Err(FairError::InvalidScenario(format!(
                "years must increase in steps of 1, found {} followed by {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self::new(start, years.len()))
    }

    pub fn start(&self) -> Year {
        self.start
    }

    /// The last year on the axis, or `None` for an empty axis.
    pub fn end(&self) -> Option<Year> {
        self.len
            .checked_sub(1)
            .and_then(|offset| self.year_at(offset))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position of `year` on the axis, if present.
    pub fn index_of(&self, year: Year) -> Option<usize> {
        let offset = i64::from(year) - i64::from(self.start);
        let index = usize::try_from(offset).ok()?;
        (index < self.len).then_some(index)
    }

    /// The year stored at `index`, if within the axis.
    pub fn year_at(&self, index: usize) -> Option<Year> {
        if index >= self.len {
            return None;
        }
        let offset = Year::try_from(index).ok()?;
        self.start.checked_add(offset)
    }

    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        (0..self.len).filter_map(move |index| self.year_at(index))
    }

    pub fn values(&self) -> Array1<Year> {
        self.years().collect()
    }
}
