//! Deterministic per-trial seed derivation.
//!
//! Every trial owns one RNG stream per strategy. Streams are keyed by the
//! run's master seed and separated by trial index and strategy domain, so a
//! trial's draws never depend on which other trials ran or in what order.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::constants::{DOMAIN_CYCLE_FOLLOWING, DOMAIN_INDEPENDENT_SEARCH, SEED_DOMAIN_PREFIX};
use crate::strategy::Strategy;

/// Identifies one trial within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrialSeed {
    pub master: u64,
    pub trial: u64,
}

impl TrialSeed {
    #[must_use]
    pub const fn new(master: u64, trial: u64) -> Self {
        Self { master, trial }
    }

    /// 32 bytes of key material for the given strategy's stream.
    #[must_use]
    pub fn stream_bytes(self, strategy: Strategy) -> [u8; 32] {
        derive_stream_bytes(self.master, self.trial, domain_tag(strategy))
    }

    /// Fresh generator for the given strategy's stream.
    #[must_use]
    pub fn rng_for(self, strategy: Strategy) -> ChaCha20Rng {
        ChaCha20Rng::from_seed(self.stream_bytes(strategy))
    }
}

const fn domain_tag(strategy: Strategy) -> &'static [u8] {
    match strategy {
        Strategy::IndependentSearch => DOMAIN_INDEPENDENT_SEARCH,
        Strategy::CycleFollowing => DOMAIN_CYCLE_FOLLOWING,
    }
}

fn derive_stream_bytes(master: u64, trial: u64, domain: &[u8]) -> [u8; 32] {
    let mut mac = Hmac::<Sha256>::new_from_slice(&master.to_le_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(SEED_DOMAIN_PREFIX);
    mac.update(domain);
    mac.update(&trial.to_le_bytes());
    let digest = mac.finalize().into_bytes();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    bytes
}
