use boxhunt_game::constants::{DEFAULT_MASTER_SEED, GAMES_PER_RUN, MAX_IN_FLIGHT};
use boxhunt_game::{GameConfig, GameConfigError};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Everything a Monte Carlo run needs to know up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunPlan {
    /// Trials to play; each trial plays one game per strategy.
    pub games: u64,
    /// Upper bound on trials executing at once.
    pub max_in_flight: usize,
    pub master_seed: u64,
    pub game: GameConfig,
}

impl RunPlan {
    #[must_use]
    pub fn new(games: u64, max_in_flight: usize, master_seed: u64) -> Self {
        Self {
            games,
            max_in_flight,
            master_seed,
            game: GameConfig::default(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Reject plans that cannot produce a report or cannot be admitted.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), RunPlanError> {
        if self.games == 0 {
            return Err(RunPlanError::NoGames);
        }
        if self.max_in_flight == 0 {
            return Err(RunPlanError::NoAdmissionSlots);
        }
        if self.max_in_flight > Semaphore::MAX_PERMITS {
            return Err(RunPlanError::TooManySlots {
                requested: self.max_in_flight,
                max: Semaphore::MAX_PERMITS,
            });
        }
        self.game.validate()?;
        Ok(())
    }
}

impl Default for RunPlan {
    fn default() -> Self {
        Self::new(GAMES_PER_RUN, MAX_IN_FLIGHT, DEFAULT_MASTER_SEED)
    }
}

/// Errors raised when a run plan is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunPlanError {
    #[error("a run needs at least one game")]
    NoGames,
    #[error("at least one trial must be allowed in flight")]
    NoAdmissionSlots,
    #[error("{requested} in-flight trials exceeds the admission limit of {max}")]
    TooManySlots { requested: usize, max: usize },
    #[error(transparent)]
    Game(#[from] GameConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_is_the_full_run() {
        let plan = RunPlan::default();
        assert_eq!(plan.games, 1_000_000);
        assert_eq!(plan.max_in_flight, 100);
        assert_eq!(plan.master_seed, 1337);
        assert_eq!(plan.game, GameConfig::new(50, 25));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_unadmittable_plans() {
        assert_eq!(RunPlan::new(0, 100, 1).validate(), Err(RunPlanError::NoGames));
        assert_eq!(
            RunPlan::new(10, 0, 1).validate(),
            Err(RunPlanError::NoAdmissionSlots)
        );
        assert!(matches!(
            RunPlan::new(10, usize::MAX, 1).validate(),
            Err(RunPlanError::TooManySlots { requested, .. }) if requested == usize::MAX
        ));
    }

    #[test]
    fn surfaces_game_config_errors() {
        let plan = RunPlan::new(10, 4, 1).with_game(GameConfig::new(0, 25));
        assert_eq!(
            plan.validate(),
            Err(RunPlanError::Game(GameConfigError::NoParticipants))
        );
        assert_eq!(
            plan.validate().unwrap_err().to_string(),
            "a game needs at least one participant"
        );
    }
}
