//! Boxhunt Game Engine
//!
//! Core logic for the box-opening puzzle: every participant must find their
//! own numbered item among as many boxes while opening only a limited number
//! of them. This crate holds the games and strategies; running many games
//! and reporting on them is left to the simulation runner.

pub mod analysis;
pub mod constants;
pub mod game;
pub mod permutation;
pub mod seed;
pub mod strategy;

// Re-export commonly used types
pub use analysis::reference_win_probability;
pub use game::{
    AssignmentError, BoxAssignment, GameConfig, GameConfigError, GameInstance, GameReport,
    OpenedBoxes, ParticipantRecord, SearchState,
};
pub use permutation::{cycle_length_at, cycle_lengths, sample_distinct, shuffled_indices};
pub use seed::TrialSeed;
pub use strategy::Strategy;

/// Outcome of one trial: both strategies, each on its own fresh game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TrialOutcome {
    pub independent_won: bool,
    pub cycle_won: bool,
}

impl TrialOutcome {
    /// Whether `strategy` won in this trial.
    #[must_use]
    pub const fn won(self, strategy: Strategy) -> bool {
        match strategy {
            Strategy::IndependentSearch => self.independent_won,
            Strategy::CycleFollowing => self.cycle_won,
        }
    }
}

/// Play one trial: a fresh game per strategy, each seeded from its own
/// stream of `seed`.
#[must_use]
pub fn play_trial(config: GameConfig, seed: TrialSeed) -> TrialOutcome {
    let play = |strategy: Strategy| {
        GameInstance::new(config, strategy, seed.rng_for(strategy))
            .play()
            .won
    };
    TrialOutcome {
        independent_won: play(Strategy::IndependentSearch),
        cycle_won: play(Strategy::CycleFollowing),
    }
}
