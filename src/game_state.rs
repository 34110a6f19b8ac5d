//! Game state module - session facade over board, RNG, and score
//!
//! Owns one session's board, RNG, and score tracker, and exposes the two
//! entry points a host drives the game through: `try_swap` for direct swap
//! attempts and `touch` for the select-then-swap gesture flow. The board is
//! mutated in place for the whole session and only replaced on `restart`.

use crate::board::Board;
use crate::cascade::{self, CascadePass};
use crate::detector::find_matches;
use crate::generator::{generate, validate_palette};
use crate::rng::SimpleRng;
use crate::scoring::ScoreTracker;
use crate::snapshot::{self, Snapshot, SnapshotError, SNAPSHOT_VERSION};
use crate::types::{Difficulty, EngineError, Pos};

/// Result of an attempted swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    /// False when the swap formed no match and was reverted
    pub accepted: bool,
    /// Per-pass cascade results, in resolution order; empty when rejected
    pub passes: Vec<CascadePass>,
    /// Total points earned by this swap's cascade
    pub score_delta: u32,
}

impl SwapOutcome {
    fn rejected() -> Self {
        Self {
            accepted: false,
            passes: Vec::new(),
            score_delta: 0,
        }
    }
}

/// Result of a selection gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchOutcome {
    /// The cell is now armed for a swap
    Armed,
    /// Touching the armed cell again cleared the selection
    Cleared,
    /// An armed cell plus an adjacent touch attempted a swap
    Swapped(SwapOutcome),
}

/// One game session
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    rng: SimpleRng,
    palette_size: usize,
    difficulty: Difficulty,
    score: ScoreTracker,
    selection: Option<Pos>,
}

impl GameState {
    /// Start a session with a freshly generated board
    pub fn new(difficulty: Difficulty, palette_size: usize, seed: u32) -> Result<Self, EngineError> {
        let mut rng = SimpleRng::new(seed);
        let (width, height) = difficulty.dimensions();
        let board = generate(width, height, palette_size, &mut rng)?;
        Ok(Self {
            board,
            rng,
            palette_size,
            difficulty,
            score: ScoreTracker::new(),
            selection: None,
        })
    }

    /// Start a session over a caller-supplied board
    ///
    /// The board is taken as-is; no match-free check is applied. Intended for
    /// staging known positions in tests and replays.
    pub fn from_board(
        board: Board,
        palette_size: usize,
        seed: u32,
    ) -> Result<Self, EngineError> {
        validate_palette(palette_size)?;
        Ok(Self {
            board,
            rng: SimpleRng::new(seed),
            palette_size,
            difficulty: Difficulty::default(),
            score: ScoreTracker::new(),
            selection: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn selection(&self) -> Option<Pos> {
        self.selection
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn check_bounds(&self, pos: Pos) -> Result<(), EngineError> {
        if self.board.contains(pos) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.board.width(),
                height: self.board.height(),
            })
        }
    }

    /// Attempt to swap two adjacent cells
    ///
    /// A swap that forms no match is reverted and reported as not accepted
    /// with zero net board change. An accepted swap runs the full cascade to
    /// stability and adds its score before returning.
    pub fn try_swap(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome, EngineError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        if !a.is_adjacent(b) {
            return Err(EngineError::NotAdjacent { a, b });
        }

        self.board.swap(a, b);
        let matches = find_matches(&self.board);
        if matches.is_empty() {
            // Revert, no net state change
            self.board.swap(a, b);
            return Ok(SwapOutcome::rejected());
        }

        let outcome = cascade::resolve(&mut self.board, &mut self.rng, self.palette_size, matches);
        debug_assert!(!outcome.hit_pass_limit);
        self.score.add(&outcome);
        Ok(SwapOutcome {
            accepted: true,
            score_delta: outcome.score_delta,
            passes: outcome.passes,
        })
    }

    /// Drive the select-then-swap gesture flow
    ///
    /// The first touch arms a cell. A second touch on an adjacent cell
    /// attempts the swap and clears the selection either way; touching the
    /// armed cell clears it; touching any other cell re-arms there.
    pub fn touch(&mut self, pos: Pos) -> Result<TouchOutcome, EngineError> {
        self.check_bounds(pos)?;
        match self.selection {
            Some(armed) if armed == pos => {
                self.selection = None;
                Ok(TouchOutcome::Cleared)
            }
            Some(armed) if armed.is_adjacent(pos) => {
                self.selection = None;
                let outcome = self.try_swap(armed, pos)?;
                Ok(TouchOutcome::Swapped(outcome))
            }
            _ => {
                self.selection = Some(pos);
                Ok(TouchOutcome::Armed)
            }
        }
    }

    /// Capture the session for serialization
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            difficulty: self.difficulty.as_str().to_owned(),
            palette_size: self.palette_size,
            rng_state: self.rng.state(),
            score: self.score.total(),
            cells_removed: self.score.cells_removed(),
            longest_chain: self.score.longest_chain(),
            selection: self.selection.map(|pos| (pos.x, pos.y)),
            rows: snapshot::rows_from_board(&self.board),
        }
    }

    /// Resume a session from a snapshot, exactly where it was captured
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let difficulty = snapshot::difficulty_from_snapshot(snapshot)?;
        validate_palette(snapshot.palette_size)?;
        let board = snapshot::board_from_rows(&snapshot.rows, difficulty)?;
        let selection = snapshot::selection_from_snapshot(snapshot, &board)?;
        Ok(Self {
            board,
            rng: SimpleRng::from_state(snapshot.rng_state),
            palette_size: snapshot.palette_size,
            difficulty,
            score: ScoreTracker::from_parts(
                snapshot.score,
                snapshot.cells_removed,
                snapshot.longest_chain,
            ),
            selection,
        })
    }

    /// Discard the board and score and generate a fresh board
    ///
    /// The RNG sequence continues from its current state, so restarts within
    /// one session stay deterministic without repeating the first board.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let (width, height) = self.difficulty.dimensions();
        self.board = generate(width, height, self.palette_size, &mut self.rng)?;
        self.score = ScoreTracker::new();
        self.selection = None;
        Ok(())
    }
}
