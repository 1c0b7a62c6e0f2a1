// crates/core/src/hours.rs
//! Hour-of-day histogram normalization.

/// Scale raw per-hour message counts so the busiest hour reads 100.
///
/// A channel with no messages at all has a zero maximum; in that case every
/// bucket is reported as 0 rather than dividing by zero.
pub fn normalize_hour_usage(counts: &[i64]) -> Vec<f64> {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max <= 0 {
        return vec![0.0; counts.len()];
    }

    counts
        .iter()
        .map(|&count| count as f64 / max as f64 * 100.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HOURS_PER_DAY;

    #[test]
    fn test_busiest_hour_is_100() {
        let mut counts = vec![0i64; HOURS_PER_DAY];
        counts[3] = 5;
        counts[14] = 20;
        counts[22] = 10;

        let usage = normalize_hour_usage(&counts);
        assert_eq!(usage.len(), HOURS_PER_DAY);
        assert_eq!(usage[14], 100.0);
        assert_eq!(usage[22], 50.0);
        assert_eq!(usage[3], 25.0);
        assert_eq!(usage[0], 0.0);
    }

    #[test]
    fn test_all_zero_counts_stay_zero() {
        let usage = normalize_hour_usage(&[0; HOURS_PER_DAY]);
        assert_eq!(usage.len(), HOURS_PER_DAY);
        assert!(usage.iter().all(|v| *v == 0.0));
        assert!(usage.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_values_stay_in_range() {
        let counts: Vec<i64> = (0..HOURS_PER_DAY as i64).map(|h| (h * 7) % 13).collect();
        let usage = normalize_hour_usage(&counts);
        assert!(usage.iter().all(|v| (0.0..=100.0).contains(v)));
        assert!(usage.iter().any(|v| *v == 100.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_hour_usage(&[]).is_empty());
    }
}
