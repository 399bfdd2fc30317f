/// Maps a difficulty setting (AR, OD, ...) onto a range in which `mid`
/// corresponds to a setting of 5.
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

// `f64::exp` is not const
pub fn logistic(x: f64, midpoint_offset: f64, multiplier: f64, max_value: Option<f64>) -> f64 {
    max_value.unwrap_or(1.0) / (1.0 + f64::exp(multiplier * (midpoint_offset - x)))
}

// `f64::exp` is not const
pub fn logistic_exp(exp: f64, max_value: Option<f64>) -> f64 {
    max_value.unwrap_or(1.0) / (1.0 + f64::exp(exp))
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    #[test]
    fn difficulty_range_hit_window() {
        // * great hit window is 80 - 6 * od across the whole range
        for od in [0.0, 2.5, 5.0, 7.3, 10.0] {
            let window = difficulty_range(od, 80.0, 50.0, 20.0);
            assert!((window - (80.0 - 6.0 * od)).abs() < 1e-9, "od={od}");
        }
    }

    #[test]
    fn logistic_midpoint() {
        assert!(FloatExt::eq(logistic(420.0, 420.0, 0.1, None), 0.5));
        assert!(FloatExt::eq(logistic_exp(0.0, Some(2.0)), 1.0));
    }
}
