//! A deterministic match-3 puzzle core.
//!
//! The engine owns the full game logic of a classic swap-and-match puzzle:
//! generating a board free of pre-existing matches, validating
//! adjacency-constrained swaps, detecting runs of three or more, and driving
//! the remove-compact-refill cascade until the board is stable. It deals only
//! in grid coordinates and abstract colour tokens; rendering, input mapping,
//! and animation pacing belong to the host.
//!
//! Everything is synchronous and deterministic: a session is fully defined by
//! its difficulty, palette size, and RNG seed, and cascade results are
//! exposed pass by pass so a host can animate chain reactions at its own
//! pace.
//!
//! # Example
//!
//! ```
//! use match3_core::{Difficulty, EngineError, GameState, Pos};
//!
//! let mut game = GameState::new(Difficulty::Normal, 5, 42)?;
//! assert!(game.board().is_full());
//! assert_eq!(game.score().total(), 0);
//!
//! // Swaps must be between orthogonal neighbours
//! let err = game.try_swap(Pos::new(0, 0), Pos::new(2, 0)).unwrap_err();
//! assert!(matches!(err, EngineError::NotAdjacent { .. }));
//!
//! // A legal swap either cascades and scores, or is reverted
//! let outcome = game.try_swap(Pos::new(0, 0), Pos::new(1, 0))?;
//! if outcome.accepted {
//!     assert!(outcome.score_delta >= 30);
//! } else {
//!     assert_eq!(game.score().total(), 0);
//! }
//! # Ok::<(), EngineError>(())
//! ```

pub mod board;
pub mod cascade;
pub mod detector;
pub mod game_state;
pub mod generator;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod types;

pub use board::Board;
pub use cascade::{resolve, Cascade, CascadeOutcome, CascadePass};
pub use detector::{find_matches, matched_cell_count, MatchGroup};
pub use game_state::{GameState, SwapOutcome, TouchOutcome};
pub use generator::generate;
pub use rng::SimpleRng;
pub use scoring::ScoreTracker;
pub use snapshot::{Snapshot, SnapshotError};
pub use types::{
    Cell, ColorToken, Difficulty, EngineError, Pos, CELL_SCORE, MAX_CASCADE_PASSES, MIN_PALETTE,
    MIN_RUN,
};
