//! Bounded-concurrency trial execution.
//!
//! Every trial is its own task. A task must hold a permit from the admission
//! gate for its whole lifetime, so no more than `max_in_flight` trials ever
//! run at once. Results are folded into atomic counters when a task finishes
//! and read only after the join barrier.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use boxhunt_game::{Strategy, TrialOutcome, TrialSeed, play_trial};
use log::{debug, info, trace};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::plan::RunPlan;

/// Aggregate result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub plan: RunPlan,
    pub independent_wins: u64,
    pub cycle_wins: u64,
    pub peak_in_flight: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    #[must_use]
    pub const fn wins(&self, strategy: Strategy) -> u64 {
        match strategy {
            Strategy::IndependentSearch => self.independent_wins,
            Strategy::CycleFollowing => self.cycle_wins,
        }
    }

    /// Share of games `strategy` won.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_probability(&self, strategy: Strategy) -> f64 {
        if self.plan.games == 0 {
            return 0.0;
        }
        self.wins(strategy) as f64 / self.plan.games as f64
    }
}

/// Cross-task counters. The only state trials share.
#[derive(Debug, Default)]
struct TrialTally {
    independent_wins: AtomicU64,
    cycle_wins: AtomicU64,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl TrialTally {
    fn enter(&self) -> InFlight<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        InFlight(self)
    }

    fn record(&self, outcome: TrialOutcome) {
        self.independent_wins
            .fetch_add(u64::from(outcome.independent_won), Ordering::Relaxed);
        self.cycle_wins
            .fetch_add(u64::from(outcome.cycle_won), Ordering::Relaxed);
    }
}

/// Marks a trial as executing until dropped.
struct InFlight<'a>(&'a TrialTally);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Play every trial in `plan` and return the aggregate counts.
///
/// # Errors
///
/// Returns an error if the plan is invalid or a trial task fails to complete.
pub async fn run_trials(plan: RunPlan) -> Result<RunSummary> {
    plan.validate().context("invalid run plan")?;
    info!(
        "starting {} trials (max {} in flight, master seed {})",
        plan.games, plan.max_in_flight, plan.master_seed
    );
    debug!("game shape: {:?}", plan.game);

    let started = Instant::now();
    let gate = Arc::new(Semaphore::new(plan.max_in_flight));
    let tally = Arc::new(TrialTally::default());
    let mut trials = JoinSet::new();

    for trial in 0..plan.games {
        let permit = Arc::clone(&gate)
            .acquire_owned()
            .await
            .context("admission gate closed")?;
        let tally = Arc::clone(&tally);
        let seed = TrialSeed::new(plan.master_seed, trial);
        let game = plan.game;

        trials.spawn(async move {
            let _permit = permit;
            let _running = tally.enter();
            let outcome = play_trial(game, seed);
            tally.record(outcome);
            trace!("trial {trial} finished: {outcome:?}");
        });

        // Reap finished tasks so the set stays near the admission limit.
        while let Some(joined) = trials.try_join_next() {
            joined.context("trial task failed")?;
        }
    }

    while let Some(joined) = trials.join_next().await {
        joined.context("trial task failed")?;
    }

    let summary = RunSummary {
        plan,
        independent_wins: tally.independent_wins.load(Ordering::SeqCst),
        cycle_wins: tally.cycle_wins.load(Ordering::SeqCst),
        peak_in_flight: tally.peak_in_flight.load(Ordering::SeqCst),
        elapsed: started.elapsed(),
    };
    info!(
        "finished {} trials in {:?} (peak {} in flight)",
        plan.games, summary.elapsed, summary.peak_in_flight
    );
    Ok(summary)
}
