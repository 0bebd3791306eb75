//! Board module - owns the N×N tile grid
//!
//! The board is a square grid where every cell always holds exactly one tile
//! (no empties outside a resolution step). Uses flat row-major storage for
//! cache locality. The board carries no game rules: match detection, cascade
//! resolution and move validation all live in their own modules.
//!
//! Out-of-range access is a programming-contract violation and panics;
//! callers are required to pre-validate coordinates against `size()`.

use crate::types::{Position, TileKind};

/// The game board - size × size tiles in flat row-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<TileKind>,
}

impl Board {
    /// Create a board with every cell holding `fill`.
    pub fn filled(size: usize, fill: TileKind) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Side length of the (square) board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Calculate the flat index for a position.
    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "cell ({}, {}) out of range for {}x{} board",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        pos.row * self.size + pos.col
    }

    pub fn get(&self, pos: Position) -> TileKind {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Position, tile: TileKind) {
        let idx = self.index(pos);
        self.cells[idx] = tile;
    }

    /// Exchange the tiles at two cells. Unconditional: used both for real
    /// player swaps and for the speculative swaps of the solvability checker.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (i, j) = (self.index(a), self.index(b));
        self.cells.swap(i, j);
    }

    /// All cell positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Copy the grid out as rows of tiles (snapshot helper).
    pub fn rows(&self) -> Vec<Vec<TileKind>> {
        (0..self.size)
            .map(|row| {
                let start = row * self.size;
                self.cells[start..start + self.size].to_vec()
            })
            .collect()
    }

    /// Copy the grid out as rows of persistence wire codes.
    pub fn to_code_grid(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|row| {
                let start = row * self.size;
                self.cells[start..start + self.size]
                    .iter()
                    .map(|tile| tile.code())
                    .collect()
            })
            .collect()
    }

    /// Create from a 2D vector for testing.
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<TileKind>>) -> Self {
        let size = rows.len();
        assert!(rows.iter().all(|row| row.len() == size));

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            cells.extend(row);
        }
        Self { size, cells }
    }
}
