//! Core types shared across the engine
//!
//! This module contains pure data types and constants with no game logic:
//! the colour palette, grid coordinates, difficulty presets, and the error
//! taxonomy. All gameplay semantics live in the sibling modules.

use thiserror::Error;

/// Minimum run length eligible for removal
pub const MIN_RUN: usize = 3;

/// Minimum palette size for which the no-initial-match fill is satisfiable
///
/// Each cell excludes at most two colours (one per axis), so three distinct
/// colours always leave a legal draw.
pub const MIN_PALETTE: usize = 3;

/// Points awarded per removed cell
pub const CELL_SCORE: u32 = 10;

/// Upper bound on cascade passes per resolution cycle
///
/// Legitimate chains are bounded by board size; exceeding this indicates a
/// detector or compaction bug, not a long game.
pub const MAX_CASCADE_PASSES: usize = 64;

/// Random redraws per cell before the generator falls back to a linear probe
pub const COLOR_RETRY_LIMIT: usize = 16;

/// The five cell colours
///
/// Mirrors the classic gem palette: red, amber, green, blue, purple.
/// Smaller palettes use a prefix of [`ColorToken::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Ruby,
    Amber,
    Emerald,
    Sapphire,
    Violet,
}

impl ColorToken {
    /// All palette colours in draw order
    pub const ALL: [Self; 5] = [
        Self::Ruby,
        Self::Amber,
        Self::Emerald,
        Self::Sapphire,
        Self::Violet,
    ];

    /// Look up a colour by palette index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Palette index of this colour (0-based)
    pub fn index(&self) -> usize {
        match self {
            Self::Ruby => 0,
            Self::Amber => 1,
            Self::Emerald => 2,
            Self::Sapphire => 3,
            Self::Violet => 4,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ruby => "ruby",
            Self::Amber => "amber",
            Self::Emerald => "emerald",
            Self::Sapphire => "sapphire",
            Self::Violet => "violet",
        }
    }

    /// Parse a colour from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ruby" => Some(Self::Ruby),
            "amber" => Some(Self::Amber),
            "emerald" => Some(Self::Emerald),
            "sapphire" => Some(Self::Sapphire),
            "violet" => Some(Self::Violet),
            _ => None,
        }
    }
}

/// A cell on the board
///
/// - `None`: empty cell (transient, only observable mid-cascade)
/// - `Some(ColorToken)`: cell filled with the given colour
pub type Cell = Option<ColorToken>;

/// A grid coordinate: `x` is the column (rightward), `y` the row (downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// True if `other` is an orthogonal (4-directional) neighbour
    ///
    /// Diagonals and the cell itself are not adjacent.
    pub fn is_adjacent(&self, other: Pos) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx + dy == 1
    }
}

/// Board size presets
///
/// Dimension selection is configuration, not branching scattered through the
/// engine: everything downstream works off `dimensions()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Grid dimensions as `(columns, rows)`
    pub fn dimensions(&self) -> (u8, u8) {
        match self {
            Self::Easy => (6, 8),
            Self::Normal => (6, 9),
            Self::Hard => (7, 10),
        }
    }

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "normal" => Some(Self::Normal),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Normal
    }
}

/// Errors surfaced by the engine's public API
///
/// Expected gameplay non-events (a swap that forms no match) are ordinary
/// return values, not errors; these variants cover caller and configuration
/// mistakes only.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Grid access outside the configured dimensions
    #[error("position ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds { x: u8, y: u8, width: u8, height: u8 },

    /// Swap attempted between cells that are not 4-neighbours
    #[error("cells ({}, {}) and ({}, {}) are not orthogonal neighbours", a.x, a.y, b.x, b.y)]
    NotAdjacent { a: Pos, b: Pos },

    /// Palette too small for the no-initial-match fill to be satisfiable
    #[error("palette of {size} colours cannot satisfy the no-initial-match rule (need {MIN_PALETTE} to {})", ColorToken::ALL.len())]
    InsufficientPalette { size: usize },
}
