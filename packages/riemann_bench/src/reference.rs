use crate::Integrand;

// Interval count for the composite rule. Power of two, comfortably finer
// than any partition the benchmark sweeps over.
const INTERVALS: usize = 1 << 16;

/// Computes the reference value the per-trial report compares against, using
/// composite Simpson's rule at a fixed fine resolution.
///
/// This is display-only glue: the benchmark's correctness contract is
/// between the two execution models, not against this value.
#[must_use]
pub fn reference_value(integrand: Integrand, lower: f64, upper: f64) -> f64 {
    let h = (upper - lower) / INTERVALS as f64;

    let mut sum = integrand(lower) + integrand(upper);

    for i in 1..INTERVALS {
        let x = lower + i as f64 * h;
        let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
        sum += weight * integrand(x);
    }

    sum * h / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_over_zero_to_pi_is_two() {
        let reference = reference_value(f64::sin, 0.0, std::f64::consts::PI);
        assert!((reference - 2.0).abs() < 1e-9);
    }

    #[test]
    fn linear_integrand_is_exact() {
        fn identity(x: f64) -> f64 {
            x
        }

        let reference = reference_value(identity, 0.0, 2.0);
        assert!((reference - 2.0).abs() < 1e-12);
    }
}
