use core::cmp::Ordering;

/// Total ordering for floats with `-0.0 == 0.0` and all NaNs equal.
///
/// Used wherever float keys decide a winner (pick distance, sorting) so the
/// result does not depend on the sign of zero or the NaN payload.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical(a).total_cmp(&canonical(b))
}

fn canonical(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::stable_total_cmp_f64;
    use core::cmp::Ordering;

    #[test]
    fn signed_zero_and_nan_are_equal_to_themselves() {
        assert_eq!(stable_total_cmp_f64(-0.0, 0.0), Ordering::Equal);
        assert_eq!(stable_total_cmp_f64(f64::NAN, -f64::NAN), Ordering::Equal);
        assert_eq!(stable_total_cmp_f64(1.0, 2.0), Ordering::Less);
    }
}
