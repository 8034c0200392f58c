/// Ceiling applied to every course average.
pub const MAX_AVERAGE: f64 = 100.0;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to 2 decimal places.
///
/// Goes through the exact decimal expansion, so ties round half to even
/// (`84.125` -> `84.12`) and near-ties follow the stored value (`2.675` ->
/// `2.67`).
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Caps a course average at [`MAX_AVERAGE`].
pub fn clamp_average(value: f64) -> f64 {
    value.min(MAX_AVERAGE)
}

/// Contribution of one mark to its course average.
pub fn weighted(mark: f64, weight: f64) -> f64 {
    mark * weight / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[84.0]), 84.0);
        assert_eq!(mean(&[50.0, 100.0]), 75.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(72.03333333), 72.03);
        assert_eq!(round2(62.149999999999999), 62.15);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(84.0), 84.0);
        assert_eq!(round2(50.099999999999994), 50.1);
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(84.125), 84.12);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.675), 2.67);
    }

    #[test]
    fn test_clamp_average() {
        assert_eq!(clamp_average(150.0), 100.0);
        assert_eq!(clamp_average(99.5), 99.5);
    }

    #[test]
    fn test_weighted() {
        assert_eq!(weighted(80.0, 60.0), 48.0);
        assert_eq!(weighted(90.0, 40.0), 36.0);
    }
}
