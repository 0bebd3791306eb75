//! Match detection - maximal same-type runs in each orientation
//!
//! A run-length scan walks each row, then each column, and advances past
//! every consumed run, so a 5-run is reported once rather than as a 3-run
//! plus a 2-run remainder. Special tiles are opaque to the scan: they never
//! start or extend a run.

use crate::core::board::Board;
use crate::types::{Orientation, Position, BOMB_RUN_LEN, MIN_RUN_LEN, RAINBOW_RUN_LEN};

/// A maximal run of ≥3 identical ordinary tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub origin: Position,
    pub length: usize,
    pub orientation: Orientation,
}

/// What a cleared match leaves behind, derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Normal,
    Bomb,
    Rainbow,
}

impl Match {
    pub fn kind(&self) -> MatchKind {
        if self.length >= RAINBOW_RUN_LEN {
            MatchKind::Rainbow
        } else if self.length == BOMB_RUN_LEN {
            MatchKind::Bomb
        } else {
            MatchKind::Normal
        }
    }

    /// The cells covered by the run, origin first.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => Position::new(self.origin.row, self.origin.col + i),
            Orientation::Vertical => Position::new(self.origin.row + i, self.origin.col),
        })
    }

    /// Center cell of the run: where a spawned special tile lands.
    pub fn center(&self) -> Position {
        let mid = self.length / 2;
        match self.orientation {
            Orientation::Horizontal => Position::new(self.origin.row, self.origin.col + mid),
            Orientation::Vertical => Position::new(self.origin.row + mid, self.origin.col),
        }
    }
}

/// Scan the board for every maximal run of ≥3 equal ordinary tiles.
/// An empty result is the normal "no match" outcome, not an error.
pub fn find_matches(board: &Board) -> Vec<Match> {
    let size = board.size();
    let mut matches = Vec::new();

    // Horizontal pass, row-major.
    for row in 0..size {
        let mut col = 0;
        while col < size {
            let run = run_length(board, Position::new(row, col), Orientation::Horizontal);
            if run >= MIN_RUN_LEN {
                matches.push(Match {
                    origin: Position::new(row, col),
                    length: run,
                    orientation: Orientation::Horizontal,
                });
            }
            col += run.max(1);
        }
    }

    // Vertical pass, column-major.
    for col in 0..size {
        let mut row = 0;
        while row < size {
            let run = run_length(board, Position::new(row, col), Orientation::Vertical);
            if run >= MIN_RUN_LEN {
                matches.push(Match {
                    origin: Position::new(row, col),
                    length: run,
                    orientation: Orientation::Vertical,
                });
            }
            row += run.max(1);
        }
    }

    matches
}

/// Length of the equal-type run starting at `origin`; 0 for special tiles.
fn run_length(board: &Board, origin: Position, orientation: Orientation) -> usize {
    let Some(ty) = board.get(origin).ordinary_type() else {
        return 0;
    };

    let size = board.size();
    let mut len = 1;
    loop {
        let next = match orientation {
            Orientation::Horizontal => {
                if origin.col + len >= size {
                    break;
                }
                Position::new(origin.row, origin.col + len)
            }
            Orientation::Vertical => {
                if origin.row + len >= size {
                    break;
                }
                Position::new(origin.row + len, origin.col)
            }
        };
        if board.get(next).ordinary_type() != Some(ty) {
            break;
        }
        len += 1;
    }
    len
}
