//! Perturbations applied to a full-length emissions pathway.

mod common;

use common::{moderate_pathway, FIRST_YEAR, LAST_YEAR};
use fair_equivalence::{get_perturbations, EquivalenceError};

#[test]
fn lengths_match_scenario() {
    let scenario = moderate_pathway();

    for year in [2000, 2022, 2050] {
        for length in [1, 10, 100] {
            for magnitude in [0.1, 1.0, 10.0] {
                for ratio in [0.5, 1.0, 2.0] {
                    let perturbations =
                        get_perturbations(&scenario, year, length, magnitude, ratio).unwrap();
                    assert_eq!(perturbations.storage.len(), scenario.len());
                    assert_eq!(perturbations.reemission.len(), scenario.len());
                    assert_eq!(perturbations.justified.len(), scenario.len());
                }
            }
        }
    }
}

#[test]
fn sums_match_magnitude() {
    let scenario = moderate_pathway();

    for magnitude in [0.1, 1.0, 10.0] {
        for ratio in [0.5, 1.0, 2.0] {
            let perturbations = get_perturbations(&scenario, 2022, 10, magnitude, ratio).unwrap();
            assert_eq!(perturbations.storage.sum(), -magnitude);
            assert_eq!(perturbations.reemission.sum(), magnitude);
            assert_eq!(perturbations.justified.sum(), magnitude / ratio);
        }
    }
}

#[test]
fn last_year_cannot_reemit() {
    let scenario = moderate_pathway();
    let err = get_perturbations(&scenario, LAST_YEAR, 1, 0.1, 1.0).unwrap_err();

    assert_eq!(
        err,
        EquivalenceError::OutOfBounds {
            index: scenario.len() - 1,
            offset: 1,
            len: scenario.len()
        }
    );
}

#[test]
fn first_year_with_length_past_the_end_is_rejected() {
    let scenario = moderate_pathway();

    assert!(get_perturbations(&scenario, FIRST_YEAR, scenario.len() - 1, 0.1, 1.0).is_ok());
    assert!(matches!(
        get_perturbations(&scenario, FIRST_YEAR, scenario.len(), 0.1, 1.0),
        Err(EquivalenceError::OutOfBounds { index: 0, .. })
    ));
}

#[test]
fn year_outside_scenario_is_rejected() {
    let scenario = moderate_pathway();

    for year in [FIRST_YEAR - 1, LAST_YEAR + 1] {
        assert!(matches!(
            get_perturbations(&scenario, year, 1, 0.1, 1.0),
            Err(EquivalenceError::YearNotFound { .. })
        ));
    }
}

#[test]
fn zero_ratio_is_rejected() {
    let scenario = moderate_pathway();
    assert_eq!(
        get_perturbations(&scenario, 2022, 10, 0.1, 0.0),
        Err(EquivalenceError::DivisionByZero)
    );
}
