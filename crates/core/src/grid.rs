//! Grid module - the well's cell matrix
//!
//! Row-major flat storage (`y * cols + x`) of `u8` cells: `0` is empty and
//! `1..=7` is the type id of the piece that locked there.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Dimensions are fixed at construction.

use crate::types::{Cell, COLS, EMPTY, MAX_DIMENSION, ROWS};

/// The game well - `rows` x `cols` cells
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: u8,
    cols: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid of the given size, clamped to `1..=MAX_DIMENSION`
    pub fn new(rows: u8, cols: u8) -> Self {
        let rows = rows.clamp(1, MAX_DIMENSION);
        let cols = cols.clamp(1, MAX_DIMENSION);
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows as usize * cols as usize],
        }
    }

    /// Build a grid from explicit rows (top row first).
    ///
    /// Returns None if the rows are ragged, empty, larger than `MAX_DIMENSION`
    /// on either side, or contain a value outside `0..=7`.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let max = MAX_DIMENSION as usize;
        let cols = rows.first()?.len();
        if cols == 0 || cols > max || rows.len() > max {
            return None;
        }
        if rows.iter().any(|r| r.len() != cols || r.iter().any(|&c| c > 7)) {
            return None;
        }
        Some(Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.cols as i8 || y < 0 || y >= self.rows as i8 {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Get cell at position (x, y), None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or the value is not a valid cell
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if cell > 7 {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision-oriented read.
    ///
    /// Anything above the well (`y < 0`) is open air; left, right and below
    /// the well count as filled.
    pub fn cell_filled(&self, x: i8, y: i8) -> bool {
        if y < 0 {
            return x < 0 || x >= self.cols as i8;
        }
        match self.get(x, y) {
            Some(cell) => cell != EMPTY,
            None => true,
        }
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Borrow row `y` (panics if out of range)
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.cols as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols as usize)
    }

    /// Remove every full row, shift the rest down and refill the top with
    /// empty rows. Returns the number of rows removed.
    ///
    /// Surviving rows keep their relative order. Two-pointer pass, bottom to top.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.cols as usize;
        let mut write_y = self.rows as usize;
        let mut cleared = 0;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        cleared
    }

    /// Count rows containing at least one empty cell
    pub fn open_row_count(&self) -> usize {
        (0..self.rows as usize)
            .filter(|&y| !self.is_row_full(y))
            .count()
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell, keeping dimensions
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Copy out as nested rows (top row first)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.clone(),
        }
    }

    // Reuses the existing buffer.
    fn clone_from(&mut self, source: &Self) {
        self.rows = source.rows;
        self.cols = source.cols;
        self.cells.clone_from(&source.cells);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(ROWS, COLS)
    }
}
