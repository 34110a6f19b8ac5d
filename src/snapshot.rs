//! Snapshot module - serializable session captures
//!
//! A snapshot freezes everything a session needs to resume exactly where it
//! left off: board contents, score statistics, RNG state, and configuration.
//! Colours are stored as their lowercase names so saved files stay readable
//! and diffable. Restoring validates shape and names and reports what is
//! wrong instead of guessing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::types::{ColorToken, Difficulty, EngineError, Pos};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors from restoring a snapshot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0} (expected {SNAPSHOT_VERSION})")]
    UnsupportedVersion(u32),

    #[error("unknown difficulty \"{0}\"")]
    UnknownDifficulty(String),

    #[error("unknown colour \"{0}\"")]
    UnknownColor(String),

    #[error("board shape mismatch: expected {expected_width}x{expected_height}, snapshot holds {width}x{height}")]
    ShapeMismatch {
        expected_width: u8,
        expected_height: u8,
        width: usize,
        height: usize,
    },

    #[error("selection ({x}, {y}) is outside the board")]
    SelectionOutOfBounds { x: u8, y: u8 },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A complete, serializable capture of one session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub version: u32,
    pub difficulty: String,
    pub palette_size: usize,
    pub rng_state: u32,
    pub score: u32,
    pub cells_removed: u32,
    pub longest_chain: u32,
    /// Armed selection as `(x, y)`, if any
    pub selection: Option<(u8, u8)>,
    /// Board rows top to bottom, each cell a colour name or `null` for empty
    pub rows: Vec<Vec<Option<String>>>,
}

/// Encode a board as rows of colour names
pub fn rows_from_board(board: &Board) -> Vec<Vec<Option<String>>> {
    let w = board.width() as usize;
    board
        .cells()
        .chunks(w)
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(|color| color.as_str().to_owned()))
                .collect()
        })
        .collect()
}

/// Decode board rows, checking shape and colour names against the expected
/// difficulty dimensions
pub fn board_from_rows(
    rows: &[Vec<Option<String>>],
    difficulty: Difficulty,
) -> Result<Board, SnapshotError> {
    let (expected_width, expected_height) = difficulty.dimensions();
    let width_ok = rows
        .iter()
        .all(|row| row.len() == expected_width as usize);
    if rows.len() != expected_height as usize || !width_ok {
        return Err(SnapshotError::ShapeMismatch {
            expected_width,
            expected_height,
            width: rows.first().map_or(0, Vec::len),
            height: rows.len(),
        });
    }

    let mut board = Board::new(expected_width, expected_height);
    for (y, row) in rows.iter().enumerate() {
        for (x, name) in row.iter().enumerate() {
            let cell = match name {
                Some(name) => Some(
                    ColorToken::from_str(name)
                        .ok_or_else(|| SnapshotError::UnknownColor(name.clone()))?,
                ),
                None => None,
            };
            board.set(x as u8, y as u8, cell);
        }
    }
    Ok(board)
}

/// Decode the armed selection, if any, checking it against the board
pub fn selection_from_snapshot(
    snapshot: &Snapshot,
    board: &Board,
) -> Result<Option<Pos>, SnapshotError> {
    match snapshot.selection {
        Some((x, y)) => {
            let pos = Pos::new(x, y);
            if board.contains(pos) {
                Ok(Some(pos))
            } else {
                Err(SnapshotError::SelectionOutOfBounds { x, y })
            }
        }
        None => Ok(None),
    }
}

/// Parse and validate the snapshot header fields
pub fn difficulty_from_snapshot(snapshot: &Snapshot) -> Result<Difficulty, SnapshotError> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(snapshot.version));
    }
    Difficulty::from_str(&snapshot.difficulty)
        .ok_or_else(|| SnapshotError::UnknownDifficulty(snapshot.difficulty.clone()))
}
