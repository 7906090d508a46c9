//! Exact win probabilities, used as reference points for simulated runs.

use crate::game::GameConfig;
use crate::strategy::Strategy;

/// Exact probability that the whole group wins with `strategy`.
#[must_use]
pub fn reference_win_probability(strategy: Strategy, config: GameConfig) -> f64 {
    match strategy {
        Strategy::IndependentSearch => independent_win_probability(config),
        Strategy::CycleFollowing => cycle_win_probability(config),
    }
}

/// Each participant independently sees `min(k, n)` of `n` boxes.
fn independent_win_probability(config: GameConfig) -> f64 {
    let n = config.participants;
    if n == 0 {
        return 1.0;
    }
    let share = ratio(config.max_opens.min(n), n);
    (0..n).fold(1.0, |acc, _| acc * share)
}

/// Probability that a uniform permutation of `n` has no cycle longer than `k`.
///
/// Conditioning on the length `l` of the cycle through the first element
/// gives `p(m) = (1/m) * sum_{l=1}^{min(k,m)} p(m-l)` with `p(0) = 1`.
fn cycle_win_probability(config: GameConfig) -> f64 {
    let n = config.participants;
    let k = config.max_opens;
    let mut p = vec![0.0_f64; n + 1];
    p[0] = 1.0;
    for m in 1..=n {
        let total: f64 = (1..=k.min(m)).map(|l| p[m - l]).sum();
        p[m] = total / to_f64(m);
    }
    p[n]
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    to_f64(numerator) / to_f64(denominator)
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(value: usize) -> f64 {
    value as f64
}
