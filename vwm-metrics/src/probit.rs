// Acklam's rational approximation to the standard normal quantile.
const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];
const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];
const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];
const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];
const P_LOW: f64 = 0.02425;

/// Inverse CDF of the standard normal distribution (z-score of `p`).
///
/// Relative error is below 1.2e-9 over (0, 1). `probit(0)` is `-inf`,
/// `probit(1)` is `+inf`, anything outside [0, 1] is NaN.
pub fn probit(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

fn tail(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

#[cfg(test)]
mod tests {
    use super::probit;

    fn close(expected: f64, actual: f64) -> bool {
        (expected - actual).abs() < 1e-7
    }

    #[test]
    fn known_quantiles() {
        assert_eq!(0.0, probit(0.5));
        assert!(close(1.959963984540054, probit(0.975)));
        assert!(close(-1.959963984540054, probit(0.025)));
        assert!(close(-1.2815515655446004, probit(0.1)));
        assert!(close(2.3263478740408408, probit(0.99)));
        assert!(close(-3.090232306167813, probit(0.001)));
    }

    #[test]
    fn bounds() {
        assert_eq!(f64::NEG_INFINITY, probit(0.0));
        assert_eq!(f64::INFINITY, probit(1.0));
        assert!(probit(-0.1).is_nan());
        assert!(probit(1.5).is_nan());
        assert!(probit(f64::NAN).is_nan());
    }

    #[test]
    fn is_odd_around_one_half() {
        for p in [0.001, 0.01, 0.02, 0.1, 0.3, 0.49] {
            assert!(close(-probit(p), probit(1.0 - p)), "p = {p}");
        }
    }
}
