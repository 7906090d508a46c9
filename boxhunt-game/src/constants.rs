//! Centralized constants for the Boxhunt simulation.
//!
//! The puzzle size and run scale are fixed here rather than read from
//! external configuration, so every reported probability refers to the same
//! game.

// Puzzle shape -------------------------------------------------------------
/// Number of participants, and therefore of boxes and numbered items.
pub const PARTICIPANTS: usize = 50;
/// Maximum number of boxes a single participant may open.
pub const MAX_OPENS: usize = 25;

// Run scale ----------------------------------------------------------------
/// Games played per strategy in a full run.
pub const GAMES_PER_RUN: u64 = 1_000_000;
/// Upper bound on trials executing at the same time.
pub const MAX_IN_FLIGHT: usize = 100;
/// Master seed used when the caller does not supply one.
pub const DEFAULT_MASTER_SEED: u64 = 1337;

// Seed derivation domains --------------------------------------------------
pub(crate) const SEED_DOMAIN_PREFIX: &[u8] = b"BOXHUNT-";
pub(crate) const DOMAIN_INDEPENDENT_SEARCH: &[u8] = b"independent-search";
pub(crate) const DOMAIN_CYCLE_FOLLOWING: &[u8] = b"cycle-following";
