use std::num::NonZero;

use crate::Error;

/// The integrand: a pure scalar function evaluated at arbitrary points.
///
/// Supplied by the caller and copied by value into every worker, so it must
/// be a plain function pointer rather than a capturing closure.
pub type Integrand = fn(f64) -> f64;

/// An immutable description of the definite integral to approximate.
///
/// The step width is derived from the bounds and the sample count and is not
/// independently settable. The value is `Copy` and is handed to every worker
/// by value; nothing is ever read from ambient process state.
///
/// # Example
///
/// ```
/// use new_zealand::nz;
/// use riemann_bench::Integration;
///
/// let integration = Integration::new(0.0, 1.0, nz!(10)).unwrap();
/// assert_eq!(integration.step(), 0.1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integration {
    lower: f64,
    upper: f64,
    samples: NonZero<usize>,
}

impl Integration {
    /// Creates a new integration problem over `[lower, upper]` with the given
    /// number of fixed-width sample steps.
    ///
    /// A positive sample count is enforced by the type; the bounds must be
    /// finite with `lower < upper`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if either bound is not finite
    /// or the bounds are not in ascending order.
    pub fn new(lower: f64, upper: f64, samples: NonZero<usize>) -> crate::Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(Error::InvalidConfiguration {
                problem: "integration bounds must be finite".to_string(),
            });
        }

        if lower >= upper {
            return Err(Error::InvalidConfiguration {
                problem: format!("lower bound {lower} must be below upper bound {upper}"),
            });
        }

        Ok(Self {
            lower,
            upper,
            samples,
        })
    }

    /// The lower integration bound.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// The upper integration bound.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// The total number of sample points.
    #[must_use]
    pub fn samples(&self) -> NonZero<usize> {
        self.samples
    }

    /// The fixed step width `(upper - lower) / samples`.
    #[must_use]
    pub fn step(&self) -> f64 {
        (self.upper - self.lower) / self.samples.get() as f64
    }
}

#[cfg(test)]
mod tests {
    use new_zealand::nz;

    use super::*;

    #[test]
    fn step_is_derived_from_bounds_and_samples() {
        let integration = Integration::new(2.0, 4.0, nz!(8)).unwrap();
        assert_eq!(integration.step(), 0.25);
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        assert!(Integration::new(f64::NAN, 1.0, nz!(1)).is_err());
        assert!(Integration::new(0.0, f64::INFINITY, nz!(1)).is_err());
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        assert!(Integration::new(1.0, 0.0, nz!(1)).is_err());
        assert!(Integration::new(1.0, 1.0, nz!(1)).is_err());
    }
}
