/// Quantile-derived cut points between the four positive intensity levels.
/// Computed once per render and read-only afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Thresholds {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
}

impl Thresholds {
    pub fn is_ordered(&self) -> bool {
        self.t1 <= self.t2 && self.t2 <= self.t3
    }
}

/// Linear-interpolated quantile over an ascending slice (`pos = (n-1)*q`).
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}

/// Thresholds from the calendar's count multiset. Only strictly positive counts
/// participate. Fewer than 4 positive values degenerate the quantiles, so that
/// case falls back to quarters of the maximum (all zero for an empty set).
pub fn compute_thresholds(counts: &[u32]) -> Thresholds {
    let mut positive: Vec<f64> = counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| f64::from(count))
        .collect();
    if positive.is_empty() {
        return Thresholds::default();
    }
    positive.sort_by(|a, b| a.total_cmp(b));
    if positive.len() < 4 {
        let max = positive[positive.len() - 1];
        return Thresholds {
            t1: max * 0.25,
            t2: max * 0.5,
            t3: max * 0.75,
        };
    }
    Thresholds {
        t1: quantile(&positive, 0.25),
        t2: quantile(&positive, 0.5),
        t3: quantile(&positive, 0.75),
    }
}

/// Intensity level in `0..=4`. Zero-count days are level 0; ties at a threshold
/// go to the lower level, so exactly five buckets exist regardless of skew.
pub fn level_for_count(count: u32, thresholds: &Thresholds) -> u8 {
    if count == 0 {
        return 0;
    }
    let value = f64::from(count);
    if value <= thresholds.t1 {
        1
    } else if value <= thresholds.t2 {
        2
    } else if value <= thresholds.t3 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counts_yield_zero_thresholds() {
        let t = compute_thresholds(&[]);
        assert_eq!(t, Thresholds::default());
        assert_eq!(level_for_count(0, &t), 0);
    }

    #[test]
    fn sparse_counts_fall_back_to_quarters_of_max() {
        let t = compute_thresholds(&[0, 8, 0, 4]);
        assert_eq!(t.t1, 2.0);
        assert_eq!(t.t2, 4.0);
        assert_eq!(t.t3, 6.0);
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let t = compute_thresholds(&[1, 2, 3, 4]);
        // positions 0.75 / 1.5 / 2.25 over [1,2,3,4]
        assert!((t.t1 - 1.75).abs() < 1e-9);
        assert!((t.t2 - 2.5).abs() < 1e-9);
        assert!((t.t3 - 3.25).abs() < 1e-9);
    }

    #[test]
    fn thresholds_are_ordered() {
        for counts in [vec![5u32], vec![3, 1, 7], vec![1, 1, 1, 9, 9, 2, 4]] {
            assert!(compute_thresholds(&counts).is_ordered());
        }
    }

    #[test]
    fn level_is_monotonic_and_zero_maps_to_zero() {
        let t = compute_thresholds(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(level_for_count(0, &t), 0);
        let mut previous = 0;
        for count in 0..=20 {
            let level = level_for_count(count, &t);
            assert!(level >= previous);
            assert!(level <= 4);
            previous = level;
        }
    }

    #[test]
    fn boundary_counts_take_the_lower_level() {
        let t = Thresholds {
            t1: 2.0,
            t2: 4.0,
            t3: 6.0,
        };
        assert_eq!(level_for_count(2, &t), 1);
        assert_eq!(level_for_count(3, &t), 2);
        assert_eq!(level_for_count(4, &t), 2);
        assert_eq!(level_for_count(6, &t), 3);
        assert_eq!(level_for_count(7, &t), 4);
    }
}
