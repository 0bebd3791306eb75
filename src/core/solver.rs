//! Solvability checker - does any adjacent swap produce a match?
//!
//! Speculatively performs each adjacent swap, runs the match detector, and
//! swaps back, so the board is left bit-identical on every path including
//! the short-circuit return. Trying only the right and down neighbor of each
//! cell visits every unordered adjacent pair exactly once (swaps are
//! symmetric). Cost is O(N² · detector); fine for N ≤ 16, and this runs only
//! after generation and after each resolved swap, never per frame.

use crate::core::board::Board;
use crate::core::matches::find_matches;
use crate::types::Position;

/// True when at least one adjacent swap on the current board yields a match.
pub fn has_any_move(board: &mut Board) -> bool {
    let size = board.size();
    for row in 0..size {
        for col in 0..size {
            let here = Position::new(row, col);
            for (dr, dc) in [(0, 1), (1, 0)] {
                let (nrow, ncol) = (row + dr, col + dc);
                if nrow >= size || ncol >= size {
                    continue;
                }
                let there = Position::new(nrow, ncol);

                board.swap(here, there);
                let found = !find_matches(board).is_empty();
                board.swap(here, there);

                if found {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    fn phase_board(size: usize) -> Board {
        let mut board = Board::filled(size, TileKind::Ordinary(0));
        for pos in board.positions().collect::<Vec<_>>() {
            board.set(pos, TileKind::Ordinary(((pos.col + 2 * pos.row) % 3) as u8));
        }
        board
    }

    #[test]
    fn test_phase_board_has_no_move() {
        // The phase pattern admits no match-producing swap at any size.
        for size in [4, 6, 8] {
            assert!(!has_any_move(&mut phase_board(size)), "size {}", size);
        }
    }

    #[test]
    fn test_patched_phase_board_has_move() {
        // One patched cell leaves exactly one swap that forms a run:
        // (0,2) <-> (0,3) lines up three type-0 tiles.
        let mut board = phase_board(8);
        board.set(Position::new(0, 1), TileKind::Ordinary(0));
        assert!(has_any_move(&mut board));
    }

    #[test]
    fn test_board_left_unchanged() {
        let mut movable = phase_board(8);
        movable.set(Position::new(0, 1), TileKind::Ordinary(0));
        let before = movable.clone();
        has_any_move(&mut movable);
        assert_eq!(movable, before); // short-circuit return path

        let mut stuck = phase_board(8);
        let before = stuck.clone();
        has_any_move(&mut stuck);
        assert_eq!(stuck, before); // exhaustive scan path
    }

    #[test]
    fn test_specials_do_not_make_moves() {
        // Specials never match, so sprinkling them on a stuck board cannot
        // create a move.
        let mut board = phase_board(6);
        board.set(Position::new(2, 2), TileKind::Bomb);
        board.set(Position::new(4, 4), TileKind::Rainbow);
        assert!(!has_any_move(&mut board));
    }
}
