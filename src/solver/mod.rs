//! Scalar root finding.

pub mod bisection;
