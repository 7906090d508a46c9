//! Box assignments, participant records and the single-game evaluator.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::constants::{MAX_OPENS, PARTICIPANTS};
use crate::permutation::{self, first_defect};
use crate::strategy::Strategy;

/// Box indices opened by one participant, in opening order.
pub type OpenedBoxes = SmallVec<[usize; 32]>;

/// Shape of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Participants, boxes and numbered items all share this count.
    #[serde(default = "GameConfig::default_participants")]
    pub participants: usize,
    /// Opens allowed per participant.
    #[serde(default = "GameConfig::default_max_opens")]
    pub max_opens: usize,
}

impl GameConfig {
    #[must_use]
    pub const fn new(participants: usize, max_opens: usize) -> Self {
        Self {
            participants,
            max_opens,
        }
    }

    const fn default_participants() -> usize {
        PARTICIPANTS
    }

    const fn default_max_opens() -> usize {
        MAX_OPENS
    }

    /// Check the config describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`GameConfigError::NoParticipants`] for an empty game.
    pub const fn validate(&self) -> Result<(), GameConfigError> {
        if self.participants == 0 {
            return Err(GameConfigError::NoParticipants);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(PARTICIPANTS, MAX_OPENS)
    }
}

/// Errors raised when a game config cannot describe a playable game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameConfigError {
    #[error("a game needs at least one participant")]
    NoParticipants,
}

/// Errors raised when explicit box contents are not a permutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("box {position} holds identity {identity}, outside 0..{len}")]
    OutOfRange {
        position: usize,
        identity: usize,
        len: usize,
    },
    #[error("identity {identity} is placed twice (again in box {position})")]
    Duplicate { position: usize, identity: usize },
}

/// Which item identity sits in each box. Always a permutation of `0..len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxAssignment(Vec<usize>);

impl BoxAssignment {
    /// Uniformly random assignment of `len` items to `len` boxes.
    #[must_use]
    pub fn shuffled<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self(permutation::shuffled_indices(len, rng))
    }

    /// Build an assignment from explicit box contents.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first identity that is out of range or
    /// repeated.
    pub fn from_identities(identities: Vec<usize>) -> Result<Self, AssignmentError> {
        let len = identities.len();
        match first_defect(&identities) {
            None => Ok(Self(identities)),
            Some((position, identity)) if identity >= len => Err(AssignmentError::OutOfRange {
                position,
                identity,
                len,
            }),
            Some((position, identity)) => Err(AssignmentError::Duplicate { position, identity }),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identity of the item inside `box_index`.
    #[must_use]
    pub fn identity_in(&self, box_index: usize) -> usize {
        self.0[box_index]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Length of the box chain that starts at `box_index` and returns to it.
    #[must_use]
    pub fn cycle_length_at(&self, box_index: usize) -> usize {
        permutation::cycle_length_at(&self.0, box_index)
    }

    /// Longest cycle of the assignment, 0 when there are no boxes.
    #[must_use]
    pub fn longest_cycle(&self) -> usize {
        permutation::cycle_lengths(&self.0)
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

/// Progress of one participant's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Searching,
    Succeeded,
    Exhausted,
}

impl SearchState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Searching)
    }
}

/// Trace of one participant's search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub opened: OpenedBoxes,
    pub state: SearchState,
}

impl ParticipantRecord {
    #[must_use]
    pub fn new() -> Self {
        Self {
            opened: OpenedBoxes::new(),
            state: SearchState::Searching,
        }
    }

    /// Record opening `box_index` and finding `found` inside.
    ///
    /// Opens after a terminal state are ignored.
    pub fn open(&mut self, box_index: usize, found: usize, participant: usize) -> SearchState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.opened.push(box_index);
        if found == participant {
            self.state = SearchState::Succeeded;
        }
        self.state
    }

    /// Close a search that ran out of opens without a match.
    pub fn exhaust(&mut self) {
        if self.state == SearchState::Searching {
            self.state = SearchState::Exhausted;
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.state == SearchState::Succeeded
    }
}

impl Default for ParticipantRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of evaluating one strategy against one assignment.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub strategy: Strategy,
    pub won: bool,
    pub successes: usize,
    pub boxes: BoxAssignment,
    pub participants: Vec<ParticipantRecord>,
}

/// One game: an assignment, the participants' records, a strategy and the
/// randomness the strategy may draw on.
#[derive(Debug)]
pub struct GameInstance<R> {
    max_opens: usize,
    boxes: BoxAssignment,
    records: Vec<ParticipantRecord>,
    strategy: Strategy,
    rng: R,
}

impl<R: Rng> GameInstance<R> {
    /// Shuffle a fresh assignment from `rng`, which the game then keeps.
    #[must_use]
    pub fn new(config: GameConfig, strategy: Strategy, mut rng: R) -> Self {
        let boxes = BoxAssignment::shuffled(config.participants, &mut rng);
        Self::with_assignment(boxes, config.max_opens, strategy, rng)
    }

    /// Play against a known assignment; one participant per box.
    #[must_use]
    pub fn with_assignment(
        boxes: BoxAssignment,
        max_opens: usize,
        strategy: Strategy,
        rng: R,
    ) -> Self {
        let records = vec![ParticipantRecord::new(); boxes.len()];
        Self {
            max_opens,
            boxes,
            records,
            strategy,
            rng,
        }
    }

    #[must_use]
    pub fn boxes(&self) -> &BoxAssignment {
        &self.boxes
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run every participant's search. The group wins only if all succeed.
    #[must_use]
    pub fn play(mut self) -> GameReport {
        for (participant, record) in self.records.iter_mut().enumerate() {
            self.strategy
                .search(&self.boxes, participant, self.max_opens, &mut self.rng, record);
        }
        let successes = self.records.iter().filter(|r| r.succeeded()).count();
        GameReport {
            strategy: self.strategy,
            won: successes == self.records.len(),
            successes,
            boxes: self.boxes,
            participants: self.records,
        }
    }
}
