//! Board module - bounds-safe grid storage and primitive mutation
//!
//! The board is a `width x height` grid where each cell is empty or holds a
//! colour token. Uses a flat vector in row-major order for cache locality.
//! Coordinates: `(x, y)` with x ranging over columns (left to right) and y
//! over rows (top to bottom). Dimensions are fixed at construction; only cell
//! contents change over a session.

use arrayvec::ArrayVec;

use crate::types::{Cell, Pos};

/// Rectangular cell grid with flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new all-empty board
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y), `None` when out of bounds
    #[inline(always)]
    fn index(&self, x: u8, y: u8) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Number of columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u8 {
        self.height
    }

    /// True if `pos` lies within the grid
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Get cell at (x, y); `None` if out of bounds
    pub fn get(&self, x: u8, y: u8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: u8, y: u8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In-bounds orthogonal neighbours of `pos` (no diagonals)
    ///
    /// Corner cells yield 2 positions, edge cells 3, interior cells 4.
    pub fn neighbors4(&self, pos: Pos) -> ArrayVec<Pos, 4> {
        let mut out = ArrayVec::new();
        if pos.x > 0 {
            out.push(Pos::new(pos.x - 1, pos.y));
        }
        if pos.x + 1 < self.width {
            out.push(Pos::new(pos.x + 1, pos.y));
        }
        if pos.y > 0 {
            out.push(Pos::new(pos.x, pos.y - 1));
        }
        if pos.y + 1 < self.height {
            out.push(Pos::new(pos.x, pos.y + 1));
        }
        out
    }

    /// Exchange the contents of two cells; returns false if either is out of
    /// bounds (in which case nothing changes)
    pub fn swap(&mut self, a: Pos, b: Pos) -> bool {
        match (self.index(a.x, a.y), self.index(b.x, b.y)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Shift the non-empty cells of column `x` downward so they end up
    /// bottom-aligned and contiguous, preserving top-to-bottom order; the
    /// vacated cells at the top become empty. Returns the number of empty
    /// cells left at the top.
    ///
    /// Write-pointer walk from the bottom, mirroring the row-compaction used
    /// for line clears in falling-block games.
    pub fn compact_column(&mut self, x: u8) -> usize {
        if x >= self.width {
            return 0;
        }
        let w = self.width as usize;
        let h = self.height as usize;
        let col = x as usize;

        let mut write_y = h;
        for read_y in (0..h).rev() {
            if self.cells[read_y * w + col].is_some() {
                write_y -= 1;
                if write_y != read_y {
                    self.cells[write_y * w + col] = self.cells[read_y * w + col];
                }
            }
        }
        for y in 0..write_y {
            self.cells[y * w + col] = None;
        }
        write_y
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Flat view of the cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Create from a 2D vector for testing (row-major, rows of equal length)
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map_or(0, |row| row.len()) as u8;
        assert!(rows.iter().all(|row| row.len() == width as usize));

        Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Convert to a 2D vector for testing/diffing
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let w = self.width as usize;
        (0..self.height as usize)
            .map(|y| self.cells[y * w..(y + 1) * w].to_vec())
            .collect()
    }
}
