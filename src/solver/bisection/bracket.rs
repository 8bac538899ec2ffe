use thiserror::Error;

/// Reasons a search interval cannot be bisected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("endpoints must be finite")]
    NonFinite,
    #[error("endpoints must differ")]
    ZeroWidth,
}

/// Orders the endpoints of a search interval.
pub(super) fn ordered(interval: [f64; 2]) -> Result<[f64; 2], BracketError> {
    let [a, b] = interval;
    if !a.is_finite() || !b.is_finite() {
        return Err(BracketError::NonFinite);
    }
    #[allow(clippy::float_cmp)]
    if a == b {
        return Err(BracketError::ZeroWidth);
    }
    Ok([a.min(b), a.max(b)])
}

/// A trial point and the objective's residual there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub residual: f64,
}

impl Point {
    /// Zero counts with the positive side.
    fn is_below(&self) -> bool {
        self.residual < 0.0
    }
}

/// An interval whose endpoint residuals differ in sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: Point,
    right: Point,
}

impl Bracket {
    /// `None` when both residuals lie on the same side of zero.
    pub(super) fn new(left: Point, right: Point) -> Option<Self> {
        (left.is_below() != right.is_below()).then_some(Self { left, right })
    }

    pub fn left(&self) -> Point {
        self.left
    }

    pub fn right(&self) -> Point {
        self.right
    }

    pub fn interval(&self) -> [f64; 2] {
        [self.left.x, self.right.x]
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left.x + self.right.x)
    }

    /// The endpoint with the smaller absolute residual, left on ties.
    pub fn best(&self) -> Point {
        if self.right.residual.abs() < self.left.residual.abs() {
            self.right
        } else {
            self.left
        }
    }

    pub fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        self.right.x - self.left.x <= x_abs_tol + x_rel_tol * self.midpoint().abs()
    }

    /// Moves whichever endpoint is on the same side of zero as `point`.
    pub(super) fn shrink(&mut self, point: Point) {
        if point.is_below() == self.left.is_below() {
            self.left = point;
        } else {
            self.right = point;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, residual: f64) -> Point {
        Point { x, residual }
    }

    #[test]
    fn endpoints_are_ordered() {
        assert_eq!(ordered([1000.0, 1.0]), Ok([1.0, 1000.0]));
        assert_eq!(ordered([-2.0, 3.0]), Ok([-2.0, 3.0]));
    }

    #[test]
    fn invalid_intervals() {
        assert_eq!(ordered([f64::NAN, 1.0]), Err(BracketError::NonFinite));
        assert_eq!(
            ordered([1.0, f64::NEG_INFINITY]),
            Err(BracketError::NonFinite)
        );
        assert_eq!(ordered([7.0, 7.0]), Err(BracketError::ZeroWidth));
    }

    #[test]
    fn needs_a_sign_change() {
        assert_eq!(Bracket::new(point(1.0, -3.0), point(2.0, -1.0)), None);
        assert_eq!(Bracket::new(point(1.0, 0.0), point(2.0, 5.0)), None);
        assert!(Bracket::new(point(1.0, -3.0), point(2.0, 0.0)).is_some());
    }

    #[test]
    fn shrink_keeps_residuals_with_endpoints() {
        let mut bracket = Bracket::new(point(0.0, 9.0), point(8.0, -55.0)).unwrap();

        bracket.shrink(point(4.0, -7.0));
        assert_eq!(bracket.interval(), [0.0, 4.0]);
        assert_eq!(bracket.right(), point(4.0, -7.0));

        bracket.shrink(point(2.0, 5.0));
        assert_eq!(bracket.interval(), [2.0, 4.0]);
        assert_eq!(bracket.left(), point(2.0, 5.0));
        assert_eq!(bracket.midpoint(), 3.0);
        assert_eq!(bracket.best(), point(2.0, 5.0));
    }

    #[test]
    fn convergence_uses_width() {
        let bracket = Bracket::new(point(1.0, -1.0), point(1.5, 1.0)).unwrap();
        assert!(bracket.is_x_converged(0.5, 0.0));
        assert!(!bracket.is_x_converged(0.1, 0.0));
        assert!(bracket.is_x_converged(0.0, 0.5));
    }
}
