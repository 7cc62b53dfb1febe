// Fixed scoring tables and the ratio helpers shared by every formula.

/// Points credited for a pitcher win until an odds feed can price it.
pub const WIN_POINTS: f64 = 2.0;

/// Cap applied to home-run matchup ratios.
pub const HOME_RUN_RATIO_CAP: f64 = 2.0;

/// Expected plate appearances per game for batting-order slots 1-9.
pub const EXPECTED_PA_BY_SLOT: [f64; 9] = [4.65, 4.55, 4.43, 4.33, 4.24, 4.13, 4.01, 3.90, 3.77];

/// Run-scoring multiplier for slots 1-9. Top of the order scores more.
pub const RUNS_MULTIPLIER_BY_SLOT: [f64; 9] = [1.12, 1.08, 1.05, 1.02, 0.98, 0.95, 0.93, 0.92, 0.95];

/// Run-producing multiplier for slots 1-9. The middle of the order drives in more.
pub const RBI_MULTIPLIER_BY_SLOT: [f64; 9] = [0.88, 0.95, 1.08, 1.12, 1.08, 1.02, 0.97, 0.94, 0.90];

fn slot_index(slot: Option<u8>) -> Option<usize> {
    slot.filter(|s| (1..=9).contains(s))
        .map(|s| usize::from(s) - 1)
}

/// Expected plate appearances for a batting-order slot; the table mean when unset.
pub fn expected_pa(slot: Option<u8>) -> f64 {
    match slot_index(slot) {
        Some(i) => EXPECTED_PA_BY_SLOT[i],
        None => EXPECTED_PA_BY_SLOT.iter().sum::<f64>() / EXPECTED_PA_BY_SLOT.len() as f64,
    }
}

pub fn runs_multiplier(slot: Option<u8>) -> f64 {
    slot_index(slot).map_or(1.0, |i| RUNS_MULTIPLIER_BY_SLOT[i])
}

pub fn rbi_multiplier(slot: Option<u8>) -> f64 {
    slot_index(slot).map_or(1.0, |i| RBI_MULTIPLIER_BY_SLOT[i])
}

/// Matchup ratio `actual / league`, neutral (1.0) when the actual rate is unavailable
/// or the league baseline is not positive.
pub fn ratio(actual: Option<f64>, league: f64) -> f64 {
    match actual {
        Some(actual) if league > 0.0 => {
            let r = actual / league;
            if r.is_finite() {
                r
            } else {
                1.0
            }
        }
        _ => 1.0,
    }
}

/// `num / den` as an optional rate; `None` when the denominator is not positive.
pub fn rate(num: f64, den: f64) -> Option<f64> {
    (den > 0.0).then(|| num / den)
}

/// Weighted average of `(weight, value)` pairs.
pub fn weighted(parts: &[(f64, f64)]) -> f64 {
    let total: f64 = parts.iter().map(|(w, _)| w).sum();
    if total <= 0.0 {
        return 1.0;
    }
    parts.iter().map(|(w, v)| w * v).sum::<f64>() / total
}
