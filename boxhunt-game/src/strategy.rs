//! Box-selection strategies.
//!
//! Both strategies drive a [`ParticipantRecord`] through the same state
//! machine: `Searching` until the participant's own identity turns up
//! (`Succeeded`) or the open budget is spent (`Exhausted`).

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{BoxAssignment, ParticipantRecord, SearchState};
use crate::permutation::sample_distinct;

/// How a participant picks which boxes to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Open a random selection of distinct boxes, with no shared plan.
    IndependentSearch,
    /// Start at the box bearing your own number and follow the chain of
    /// identities found inside.
    CycleFollowing,
}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::IndependentSearch, Self::CycleFollowing];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IndependentSearch => "Independent search",
            Self::CycleFollowing => "Cycle following",
        }
    }

    /// Wording used by the console report.
    #[must_use]
    pub const fn contract_label(self) -> &'static str {
        match self {
            Self::IndependentSearch => "NO contract",
            Self::CycleFollowing => "contract",
        }
    }

    /// Run one participant's search against `boxes`, appending to `record`.
    pub fn search<R: Rng>(
        self,
        boxes: &BoxAssignment,
        participant: usize,
        max_opens: usize,
        rng: &mut R,
        record: &mut ParticipantRecord,
    ) {
        match self {
            Self::IndependentSearch => independent_search(boxes, participant, max_opens, rng, record),
            Self::CycleFollowing => cycle_following(boxes, participant, max_opens, record),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn independent_search<R: Rng>(
    boxes: &BoxAssignment,
    participant: usize,
    max_opens: usize,
    rng: &mut R,
    record: &mut ParticipantRecord,
) {
    for box_index in sample_distinct(boxes.len(), max_opens, rng) {
        let found = boxes.identity_in(box_index);
        if record.open(box_index, found, participant) == SearchState::Succeeded {
            return;
        }
    }
    record.exhaust();
}

fn cycle_following(
    boxes: &BoxAssignment,
    participant: usize,
    max_opens: usize,
    record: &mut ParticipantRecord,
) {
    let mut box_index = participant;
    for _ in 0..max_opens {
        let found = boxes.identity_in(box_index);
        if record.open(box_index, found, participant) == SearchState::Succeeded {
            return;
        }
        box_index = found;
    }
    record.exhaust();
}
