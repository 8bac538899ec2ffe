//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use fair_core::scenario::EmissionsScenario;
use fair_core::timeseries::{FloatValue, Signal, Year};

pub const FIRST_YEAR: Year = 1765;
pub const LAST_YEAR: Year = 2500;

/// Piecewise-linear interpolation between `(year, value)` anchors.
fn interpolate(year: Year, anchors: &[(Year, FloatValue)]) -> FloatValue {
    for pair in anchors.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if (x0..=x1).contains(&year) {
            return y0 + (y1 - y0) * FloatValue::from(year - x0) / FloatValue::from(x1 - x0);
        }
    }
    panic!("{year} is outside the anchors");
}

/// A stylised mid-range emissions pathway from 1765 to 2500 (GtC / yr).
///
/// Fossil emissions grow exponentially to 10 GtC / yr in 2020, peak at
/// 11 GtC / yr in 2040 and reach zero by 2250. Land-use emissions peak in
/// the mid twentieth century and vanish by 2100.
pub fn moderate_pathway() -> EmissionsScenario {
    let years: Vec<Year> = (FIRST_YEAR..=LAST_YEAR).collect();

    let fossil: Signal = years
        .iter()
        .map(|&year| {
            if year <= 2020 {
                10.0 * (FloatValue::from(year - 2020) / 40.0).exp()
            } else {
                interpolate(
                    year,
                    &[
                        (2020, 10.0),
                        (2040, 11.0),
                        (2100, 2.5),
                        (2150, 0.5),
                        (2250, 0.0),
                        (2500, 0.0),
                    ],
                )
            }
        })
        .collect();

    let land_use: Signal = years
        .iter()
        .map(|&year| {
            interpolate(
                year,
                &[
                    (1765, 0.3),
                    (1950, 1.2),
                    (2020, 1.1),
                    (2100, 0.0),
                    (2500, 0.0),
                ],
            )
        })
        .collect();

    EmissionsScenario::new("moderate", &years, fossil, land_use).unwrap()
}
