//! Scalar value domain. A style scalar is an `Option<f32>` where `None`
//! means "no constraint"; arithmetic on optional sizes goes through
//! `Option::map` so undefined-ness propagates.

/// Comparison tolerance for layout scalars.
pub const EPSILON: f32 = 1e-4;

/// Tolerant equality on defined scalars.
#[inline]
pub fn approx_eq_f32(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Tolerant equality on optional scalars. Two undefined values compare
/// equal; an undefined value never equals a defined one.
#[inline]
pub fn approx_eq(a: Option<f32>, b: Option<f32>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(lhs), Some(rhs)) => approx_eq_f32(lhs, rhs),
        _ => false,
    }
}

/// True when all four values compare equal under [`approx_eq`]. Used to
/// collapse per-edge tables that were set through a shorthand.
#[inline]
pub fn all_four_equal(values: [Option<f32>; 4]) -> bool {
    approx_eq(values[0], values[1])
        && approx_eq(values[0], values[2])
        && approx_eq(values[0], values[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_compares_equal_only_to_undefined() {
        assert!(approx_eq(None, None));
        assert!(!approx_eq(None, Some(0.0)));
        assert!(!approx_eq(Some(0.0), None));
    }

    #[test]
    fn tolerance_is_respected() {
        assert!(approx_eq(Some(10.0), Some(10.000_05)));
        assert!(!approx_eq(Some(10.0), Some(10.001)));
    }

    #[test]
    fn four_way_collapse() {
        assert!(all_four_equal([Some(2.0); 4]));
        assert!(all_four_equal([None; 4]));
        assert!(!all_four_equal([Some(2.0), Some(2.0), None, Some(2.0)]));
    }
}
