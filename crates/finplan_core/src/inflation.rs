//! Inflation post-processing (spec.md §4.9): present-value discount of the
//! final result series, applied after every other stage.

/// `v / (1 + r_inf)^((t - current_day)/365)`.
pub fn value_to_today(v: f64, t: f64, current_day: f64, r_inf: f64) -> f64 {
    v / (1.0 + r_inf).powf((t - current_day) / 365.0)
}

/// Inverse of [`value_to_today`]; provided for UI use (spec.md §4.9), not
/// required by the core evaluator itself.
pub fn value_to_day(v: f64, t: f64, current_day: f64, r_inf: f64) -> f64 {
    v * (1.0 + r_inf).powf((t - current_day) / 365.0)
}

/// Apply [`value_to_today`] to every point of a series aligned with `grid`.
pub fn adjust_series(series: &[f64], grid: &[f64], current_day: f64, r_inf: f64) -> Vec<f64> {
    series
        .iter()
        .zip(grid)
        .map(|(&v, &t)| value_to_today(v, t, current_day, r_inf))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_recovers_original_value() {
        for v in [0.0, 1.0, -500.0, 123_456.789] {
            for r in [0.0, 0.02, 0.1, -0.05] {
                let adjusted = value_to_day(v, 730.0, 0.0, r);
                let back = value_to_today(adjusted, 730.0, 0.0, r);
                assert!((back - v).abs() < 1e-6, "{v} != {back} at r={r}");
            }
        }
    }

    #[test]
    fn zero_rate_is_identity() {
        assert_eq!(value_to_today(1000.0, 365.0, 0.0, 0.0), 1000.0);
    }

    #[test]
    fn adjust_series_maps_each_point() {
        let series = vec![100.0, 100.0];
        let grid = vec![0.0, 365.0];
        let adjusted = adjust_series(&series, &grid, 0.0, 0.03);
        assert_eq!(adjusted[0], 100.0);
        assert!(adjusted[1] < 100.0);
    }
}
