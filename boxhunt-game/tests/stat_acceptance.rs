use boxhunt_game::constants::DEFAULT_MASTER_SEED;
use boxhunt_game::{
    GameConfig, GameInstance, Strategy, TrialSeed, play_trial, reference_win_probability,
};
use std::convert::TryFrom;

const CYCLE_SAMPLE_SIZE: u64 = 100_000;
const INDEPENDENT_SAMPLE_SIZE: u64 = 10_000;
const TOLERANCE: f64 = 0.01;

fn rate(wins: u64, games: u64) -> f64 {
    let wins = f64::from(u32::try_from(wins).expect("count fits"));
    let games = f64::from(u32::try_from(games).expect("sample size fits"));
    wins / games
}

fn count_wins(strategy: Strategy, games: u64) -> u64 {
    let config = GameConfig::default();
    (0..games)
        .filter(|&trial| {
            let rng = TrialSeed::new(DEFAULT_MASTER_SEED, trial).rng_for(strategy);
            GameInstance::new(config, strategy, rng).play().won
        })
        .count() as u64
}

#[test]
fn cycle_following_converges_to_reference_probability() {
    let wins = count_wins(Strategy::CycleFollowing, CYCLE_SAMPLE_SIZE);
    let observed = rate(wins, CYCLE_SAMPLE_SIZE);
    let expected = reference_win_probability(Strategy::CycleFollowing, GameConfig::default());
    assert!(
        (0.25..=0.35).contains(&observed),
        "cycle following outside plausible band: {observed:.4}"
    );
    assert!(
        (observed - expected).abs() <= TOLERANCE,
        "cycle following drifted: observed {observed:.4}, expected {expected:.4}"
    );
}

#[test]
fn independent_search_essentially_never_wins() {
    let wins = count_wins(Strategy::IndependentSearch, INDEPENDENT_SAMPLE_SIZE);
    assert_eq!(wins, 0, "independent search should not win at (1/2)^50 odds");
}

#[test]
fn strategies_are_not_statistically_equivalent() {
    let games = 5_000;
    let mut independent = 0u64;
    let mut cycle = 0u64;
    for trial in 0..games {
        let outcome = play_trial(GameConfig::default(), TrialSeed::new(99, trial));
        independent += u64::from(outcome.independent_won);
        cycle += u64::from(outcome.cycle_won);
    }
    assert!(rate(cycle, games) - rate(independent, games) > 0.2);
}

#[test]
fn fixed_seeds_reproduce_counts() {
    let first = count_wins(Strategy::CycleFollowing, 2_000);
    let second = count_wins(Strategy::CycleFollowing, 2_000);
    assert_eq!(first, second);
}

#[test]
fn participant_success_rate_matches_half_for_both_strategies() {
    // Any single participant finds their item with probability K / N = 1/2.
    // Cycle-following participants share cycles, so that side needs more games.
    let config = GameConfig::default();
    for (strategy, games) in [
        (Strategy::IndependentSearch, 2_000),
        (Strategy::CycleFollowing, 20_000),
    ] {
        let mut hits = 0u64;
        let mut total = 0u64;
        for trial in 0..games {
            let rng = TrialSeed::new(5, trial).rng_for(strategy);
            let report = GameInstance::new(config, strategy, rng).play();
            hits += report.successes as u64;
            total += report.participants.len() as u64;
        }
        let observed = rate(hits, total);
        assert!(
            (observed - 0.5).abs() <= TOLERANCE,
            "{strategy} participant rate {observed:.4}"
        );
    }
}
