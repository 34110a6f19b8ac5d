//! Detector module - run scanning and overlap-safe group claiming
//!
//! A match is a horizontal or vertical run of at least three same-coloured
//! cells. Runs are collected row by row and column by column, then merged by
//! a first-claim rule: runs are visited in scan order, each keeps only the
//! cells no earlier run has claimed, and a run left with fewer than three
//! fresh cells is dropped. Dropped runs still leave their cells claimed, so
//! every cell is removed at most once and cross or L shaped overlaps never
//! double count. The cross arm that loses the tie is therefore swallowed
//! whole rather than re-attributed; see `find_matches`.

use std::collections::HashSet;

use crate::board::Board;
use crate::types::{ColorToken, Pos, MIN_RUN};

/// A claimed set of same-coloured cells scheduled for removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub color: ColorToken,
    pub cells: Vec<Pos>,
}

impl MatchGroup {
    /// Number of cells this group removes
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Raw run of three or more, before overlap claiming
struct Run {
    color: ColorToken,
    cells: Vec<Pos>,
}

/// Scan one line of cells for runs of at least [`MIN_RUN`]
///
/// `line` yields the positions of a single row or column in order. Empty
/// cells break runs.
fn scan_line(board: &Board, line: impl Iterator<Item = Pos>, runs: &mut Vec<Run>) {
    let mut current: Option<Run> = None;

    for pos in line {
        let cell = board.get(pos.x, pos.y).flatten();
        match (&mut current, cell) {
            (Some(run), Some(color)) if run.color == color => {
                run.cells.push(pos);
                continue;
            }
            _ => {}
        }
        // Colour change, empty cell, or line start: close the previous run
        if let Some(run) = current.take() {
            if run.cells.len() >= MIN_RUN {
                runs.push(run);
            }
        }
        current = cell.map(|color| Run {
            color,
            cells: vec![pos],
        });
    }
    if let Some(run) = current {
        if run.cells.len() >= MIN_RUN {
            runs.push(run);
        }
    }
}

/// Find all match groups on the board
///
/// Horizontal runs are collected top row first, then vertical runs left
/// column first, and the first-claim merge keeps the surviving groups in
/// that order. Returns an empty vector when the board has no runs.
///
/// Overlap resolution is deliberately greedy: when a vertical run crosses an
/// already-claimed horizontal run, the vertical run loses its shared cell and
/// is discarded if fewer than three cells remain, and the cells it did claim
/// stay off-limits to later runs without being removed. An L or cross shape
/// thus removes only its first-scanned arm.
pub fn find_matches(board: &Board) -> Vec<MatchGroup> {
    let mut runs = Vec::new();
    for y in 0..board.height() {
        scan_line(board, (0..board.width()).map(|x| Pos::new(x, y)), &mut runs);
    }
    for x in 0..board.width() {
        scan_line(board, (0..board.height()).map(|y| Pos::new(x, y)), &mut runs);
    }

    let mut claimed: HashSet<Pos> = HashSet::new();
    let mut groups = Vec::new();
    for run in runs {
        let fresh: Vec<Pos> = run
            .cells
            .iter()
            .copied()
            .filter(|pos| claimed.insert(*pos))
            .collect();
        if fresh.len() >= MIN_RUN {
            groups.push(MatchGroup {
                color: run.color,
                cells: fresh,
            });
        }
    }
    groups
}

/// Total number of cells claimed across all groups
pub fn matched_cell_count(groups: &[MatchGroup]) -> usize {
    groups.iter().map(MatchGroup::len).sum()
}
