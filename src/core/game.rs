//! Game engine facade - the session state machine
//!
//! Owns the board, RNG, score and move budget for one game session. There is
//! no process-global instance: the engine value itself is the session handle
//! and every operation runs synchronously to completion. A hosting
//! application that shares one engine across callers must serialize access
//! itself; `try_swap` mutates the board in place and is not reentrant.

use crate::core::board::Board;
use crate::core::cascade::{resolve, ResolutionOutcome, SwapTrigger};
use crate::core::matches::find_matches;
use crate::core::rng::{SimpleRng, TileSource};
use crate::core::snapshot::GameSnapshot;
use crate::core::solver::has_any_move;
use crate::types::{
    Position, TileKind, DEFAULT_BOARD_SIZE, DEFAULT_MOVE_BUDGET, DEFAULT_ORDINARY_KINDS,
    DEFAULT_SEED, GENERATION_ATTEMPTS, MAX_BOARD_SIZE, MAX_ORDINARY_KINDS, MIN_BOARD_SIZE,
    MIN_ORDINARY_KINDS, SCRUB_PASS_LIMIT,
};

/// Session parameters accepted by `GameEngine::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub size: usize,
    pub ordinary_kinds: u8,
    pub move_budget: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            ordinary_kinds: DEFAULT_ORDINARY_KINDS,
            move_budget: DEFAULT_MOVE_BUDGET,
            seed: DEFAULT_SEED,
        }
    }
}

/// Rejected session parameters or a malformed restored session.
/// Surfaced to the caller once, never retried internally.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {0} outside supported range 4..=16")]
    InvalidSize(usize),

    #[error("ordinary kind count {0} outside supported range 3..=32")]
    InvalidKindCount(u8),

    #[error("move budget must be at least 1")]
    InvalidMoveBudget,

    #[error("restored board has {rows} rows, expected {expected}")]
    BadBoardShape { rows: usize, expected: usize },

    #[error("restored board row {row} has {cols} cells, expected {expected}")]
    BadRowWidth {
        row: usize,
        cols: usize,
        expected: usize,
    },

    #[error("restored board cell ({row}, {col}) holds unknown tile code {code}")]
    UnknownTileCode { row: usize, col: usize, code: u8 },
}

/// Why a swap request was turned down. Expected, non-fatal, and always a
/// structural no-op on the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotAdjacent,
    NoMatch,
    GameOver,
}

/// Result of a swap request.
#[derive(Debug, Clone, PartialEq)]
pub enum SwapOutcome {
    Rejected(RejectReason),
    Resolved {
        outcome: ResolutionOutcome,
        game_over: bool,
    },
}

/// One game session: `Ready` while moves remain, `Exhausted` at zero.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    rng: SimpleRng,
    score: u32,
    moves_remaining: u32,
}

impl GameEngine {
    /// Start a session: validates the config and generates a board with no
    /// initial matches and at least one available move.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        validate_board_params(config.size, config.ordinary_kinds)?;
        if config.move_budget == 0 {
            return Err(ConfigError::InvalidMoveBudget);
        }

        let mut rng = SimpleRng::new(config.seed);
        let board = generate_board(config.size, config.ordinary_kinds, &mut rng);
        Ok(Self {
            config,
            board,
            rng,
            score: 0,
            moves_remaining: config.move_budget,
        })
    }

    /// Rebuild a session from restored parts (persistence boundary). The
    /// board has already been validated; if moves remain but the restored
    /// layout has no available move, it is reshuffled just as `new` would.
    pub(crate) fn from_parts(
        config: EngineConfig,
        mut board: Board,
        mut rng: SimpleRng,
        score: u32,
        moves_remaining: u32,
    ) -> Self {
        if moves_remaining > 0 && !has_any_move(&mut board) {
            board = generate_board(config.size, config.ordinary_kinds, &mut rng);
        }
        Self {
            config,
            board,
            rng,
            score,
            moves_remaining,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn game_over(&self) -> bool {
        self.moves_remaining == 0
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Immutable snapshot of the session for the presentation layer.
    pub fn state(&self) -> GameSnapshot {
        GameSnapshot {
            size: self.config.size,
            board: self.board.rows(),
            score: self.score,
            moves_remaining: self.moves_remaining,
            game_over: self.game_over(),
        }
    }

    /// Attempt a player swap of two adjacent cells.
    ///
    /// A swap is accepted when it lines up at least one run, or when one of
    /// the swapped tiles is a special whose swap effect fires (rainbow
    /// targeting the other side's type, bomb detonating in place). Accepted
    /// swaps consume one move and run the full cascade; rejected swaps leave
    /// the session untouched.
    ///
    /// Positions must be within the board; out-of-range coordinates are a
    /// caller contract violation and panic.
    pub fn try_swap(&mut self, a: Position, b: Position) -> SwapOutcome {
        if !a.is_adjacent(b) {
            return SwapOutcome::Rejected(RejectReason::NotAdjacent);
        }
        if self.moves_remaining == 0 {
            return SwapOutcome::Rejected(RejectReason::GameOver);
        }

        let tile_a = self.board.get(a);
        let tile_b = self.board.get(b);
        self.board.swap(a, b);

        let matches = find_matches(&self.board);
        let trigger = derive_trigger(a, b, tile_a, tile_b);
        if matches.is_empty() && !trigger.has_effect() {
            self.board.swap(a, b);
            return SwapOutcome::Rejected(RejectReason::NoMatch);
        }

        self.moves_remaining -= 1;
        let outcome = resolve(
            &mut self.board,
            matches,
            trigger,
            &mut self.rng,
            self.config.ordinary_kinds,
        );
        self.score += outcome.score_delta;

        // Keep the session playable: if the settled board is stuck and moves
        // remain, reshuffle with the same guarantees as initialization.
        if self.moves_remaining > 0 && !has_any_move(&mut self.board) {
            self.board = generate_board(self.config.size, self.config.ordinary_kinds, &mut self.rng);
        }

        SwapOutcome::Resolved {
            outcome,
            game_over: self.moves_remaining == 0,
        }
    }
}

pub(crate) fn validate_board_params(size: usize, ordinary_kinds: u8) -> Result<(), ConfigError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(ConfigError::InvalidSize(size));
    }
    if !(MIN_ORDINARY_KINDS..=MAX_ORDINARY_KINDS).contains(&ordinary_kinds) {
        return Err(ConfigError::InvalidKindCount(ordinary_kinds));
    }
    Ok(())
}

/// Special-swap context per the swapped pair: after the swap each tile sits
/// at the other request position.
fn derive_trigger(a: Position, b: Position, tile_a: TileKind, tile_b: TileKind) -> SwapTrigger {
    let mut trigger = SwapTrigger::default();
    match (tile_a, tile_b) {
        (TileKind::Rainbow, TileKind::Ordinary(target)) => trigger.rainbow = Some((b, target)),
        (TileKind::Ordinary(target), TileKind::Rainbow) => trigger.rainbow = Some((a, target)),
        _ => {}
    }
    if tile_a == TileKind::Bomb {
        trigger.bombs.push(b);
    }
    if tile_b == TileKind::Bomb {
        trigger.bombs.push(a);
    }
    trigger
}

/// Generate a board with no initial matches and at least one available move.
///
/// Random attempts scrub initial matches by re-rolling matched cells; when
/// an attempt budget is exhausted (possible at extreme kind counts) a
/// deterministic constructive pattern guarantees convergence without
/// unbounded retry.
pub(crate) fn generate_board(size: usize, ordinary_kinds: u8, rng: &mut SimpleRng) -> Board {
    for _ in 0..GENERATION_ATTEMPTS {
        let mut board = Board::filled(size, TileKind::Ordinary(0));
        for pos in positions(size) {
            board.set(pos, TileKind::Ordinary(rng.next_tile_type(ordinary_kinds)));
        }
        if scrub_matches(&mut board, ordinary_kinds, rng) && has_any_move(&mut board) {
            return board;
        }
    }
    fallback_board(size)
}

/// Re-roll matched cells until the board is clean; false when the pass
/// budget runs out first.
fn scrub_matches(board: &mut Board, ordinary_kinds: u8, rng: &mut SimpleRng) -> bool {
    for _ in 0..SCRUB_PASS_LIMIT {
        let matches = find_matches(board);
        if matches.is_empty() {
            return true;
        }
        for m in matches {
            for cell in m.cells() {
                board.set(cell, TileKind::Ordinary(rng.next_tile_type(ordinary_kinds)));
            }
        }
    }
    false
}

/// Three-kind phase pattern: any three consecutive cells along a row or
/// column take three distinct values, so the grid is matchless. The single
/// patched cell at (0, 1) leaves exactly one swap, (0,2)<->(0,3), that lines
/// up a run, making the board movable by construction.
fn fallback_board(size: usize) -> Board {
    let mut board = Board::filled(size, TileKind::Ordinary(0));
    for pos in positions(size) {
        board.set(pos, TileKind::Ordinary(((pos.col + 2 * pos.row) % 3) as u8));
    }
    board.set(Position::new(0, 1), TileKind::Ordinary(0));
    board
}

fn positions(size: usize) -> impl Iterator<Item = Position> {
    (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_seed(seed: u32) -> GameEngine {
        GameEngine::new(EngineConfig {
            seed,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_initialize_produces_clean_movable_board() {
        for seed in 1..=32 {
            let mut engine = engine_with_seed(seed);
            assert!(find_matches(engine.board()).is_empty(), "seed {}", seed);
            let mut board = engine.board().clone();
            assert!(has_any_move(&mut board), "seed {}", seed);
            assert_eq!(engine.score(), 0);
            assert_eq!(engine.moves_remaining(), DEFAULT_MOVE_BUDGET);
            assert!(!engine.game_over());

            // Probe the whole board: accepted swaps must exist.
            let size = engine.config().size;
            let mut accepted = false;
            'probe: for row in 0..size {
                for col in 0..size {
                    for (dr, dc) in [(0, 1), (1, 0)] {
                        if row + dr >= size || col + dc >= size {
                            continue;
                        }
                        let a = Position::new(row, col);
                        let b = Position::new(row + dr, col + dc);
                        if matches!(engine.try_swap(a, b), SwapOutcome::Resolved { .. }) {
                            accepted = true;
                            break 'probe;
                        }
                    }
                }
            }
            assert!(accepted, "seed {}", seed);
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = engine_with_seed(2024);
        let b = engine_with_seed(2024);
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_config_validation() {
        let bad_size = EngineConfig {
            size: 3,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameEngine::new(bad_size),
            Err(ConfigError::InvalidSize(3))
        ));

        let bad_kinds = EngineConfig {
            ordinary_kinds: 2,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameEngine::new(bad_kinds),
            Err(ConfigError::InvalidKindCount(2))
        ));

        let bad_budget = EngineConfig {
            move_budget: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameEngine::new(bad_budget),
            Err(ConfigError::InvalidMoveBudget)
        ));
    }

    #[test]
    fn test_reject_not_adjacent_is_noop() {
        let mut engine = engine_with_seed(7);
        let before = engine.state();

        let outcome = engine.try_swap(Position::new(0, 0), Position::new(0, 2));
        assert_eq!(outcome, SwapOutcome::Rejected(RejectReason::NotAdjacent));
        let diagonal = engine.try_swap(Position::new(1, 1), Position::new(2, 2));
        assert_eq!(diagonal, SwapOutcome::Rejected(RejectReason::NotAdjacent));

        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_reject_no_match_reverts_board() {
        // Probe swaps until one is rejected as NoMatch; the session must be
        // structurally identical afterwards. Every board has such a pair
        // (a fully match-producing board would have had initial matches).
        let mut engine = engine_with_seed(11);
        let before = engine.state();
        let size = engine.config().size;

        let mut rejected = false;
        'probe: for row in 0..size {
            for col in 0..size - 1 {
                let a = Position::new(row, col);
                let b = Position::new(row, col + 1);
                let tile_a = engine.board().get(a);
                let tile_b = engine.board().get(b);
                if tile_a.is_special() || tile_b.is_special() {
                    continue;
                }
                if engine.try_swap(a, b) == SwapOutcome::Rejected(RejectReason::NoMatch) {
                    rejected = true;
                    break 'probe;
                }
                // An accepted swap mutated the board; restart from a fresh
                // engine to keep the comparison meaningful.
                engine = engine_with_seed(11);
            }
        }
        assert!(rejected);
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_accepted_swap_consumes_move_and_scores() {
        // Fallback pattern board via from_parts: swapping (0,2)<->(0,3)
        // lines up three type-0 tiles.
        let board = fallback_board(8);
        let mut engine = GameEngine::from_parts(
            EngineConfig::default(),
            board,
            SimpleRng::new(5),
            0,
            DEFAULT_MOVE_BUDGET,
        );

        let outcome = engine.try_swap(Position::new(0, 2), Position::new(0, 3));
        let SwapOutcome::Resolved { outcome, game_over } = outcome else {
            panic!("expected resolved swap, got {:?}", outcome);
        };

        assert!(!game_over);
        assert_eq!(engine.moves_remaining(), DEFAULT_MOVE_BUDGET - 1);
        assert!(outcome.waves >= 1);
        assert!(outcome.score_delta >= 30);
        assert_eq!(engine.score(), outcome.score_delta);
        if outcome.waves == 1 {
            assert_eq!(outcome.score_delta, 30);
            assert_eq!(outcome.cells_cleared, 3);
        }
        assert!(find_matches(engine.board()).is_empty());
        let mut board = engine.board().clone();
        assert!(has_any_move(&mut board));
    }

    #[test]
    fn test_moves_exhausted_transitions_to_game_over() {
        let board = fallback_board(8);
        let mut engine =
            GameEngine::from_parts(EngineConfig::default(), board, SimpleRng::new(5), 0, 1);

        let outcome = engine.try_swap(Position::new(0, 2), Position::new(0, 3));
        let SwapOutcome::Resolved { game_over, .. } = outcome else {
            panic!("expected resolved swap, got {:?}", outcome);
        };
        assert!(game_over);
        assert!(engine.game_over());
        assert_eq!(engine.moves_remaining(), 0);

        // Any further swap is rejected without mutation.
        let before = engine.state();
        let rejected = engine.try_swap(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(rejected, SwapOutcome::Rejected(RejectReason::GameOver));
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_from_parts_reshuffles_stuck_board() {
        // The unpatched phase pattern has no available move; restoring it
        // with moves remaining must re-establish solvability.
        let mut stuck = Board::filled(8, TileKind::Ordinary(0));
        for pos in positions(8) {
            stuck.set(pos, TileKind::Ordinary(((pos.col + 2 * pos.row) % 3) as u8));
        }
        let engine =
            GameEngine::from_parts(EngineConfig::default(), stuck, SimpleRng::new(9), 120, 4);

        let mut board = engine.board().clone();
        assert!(has_any_move(&mut board));
        assert!(find_matches(engine.board()).is_empty());
        assert_eq!(engine.score(), 120);
        assert_eq!(engine.moves_remaining(), 4);
    }

    #[test]
    fn test_rainbow_swap_is_accepted_without_a_run() {
        use crate::core::cascade::SpecialActivation;

        let mut board = fallback_board(8);
        board.set(Position::new(4, 4), TileKind::Rainbow);
        let mut engine = GameEngine::from_parts(
            EngineConfig::default(),
            board,
            SimpleRng::new(5),
            0,
            DEFAULT_MOVE_BUDGET,
        );
        let target = engine
            .board()
            .get(Position::new(4, 5))
            .ordinary_type()
            .unwrap();

        let outcome = engine.try_swap(Position::new(4, 4), Position::new(4, 5));
        let SwapOutcome::Resolved { outcome, .. } = outcome else {
            panic!("expected resolved swap, got {:?}", outcome);
        };

        assert!(outcome
            .activations
            .contains(&SpecialActivation::Rainbow {
                pos: Position::new(4, 5),
                target,
            }));
        assert_eq!(engine.moves_remaining(), DEFAULT_MOVE_BUDGET - 1);
        assert!(find_matches(engine.board()).is_empty());
    }

    #[test]
    fn test_bomb_swap_is_accepted_without_a_run() {
        use crate::core::cascade::SpecialActivation;

        let mut board = fallback_board(8);
        board.set(Position::new(4, 4), TileKind::Bomb);
        let mut engine = GameEngine::from_parts(
            EngineConfig::default(),
            board,
            SimpleRng::new(5),
            0,
            DEFAULT_MOVE_BUDGET,
        );

        let outcome = engine.try_swap(Position::new(4, 4), Position::new(4, 5));
        let SwapOutcome::Resolved { outcome, .. } = outcome else {
            panic!("expected resolved swap, got {:?}", outcome);
        };

        // The bomb detonates at its post-swap cell.
        assert!(outcome
            .activations
            .contains(&SpecialActivation::Bomb {
                pos: Position::new(4, 5),
            }));
        assert!(outcome.score_delta >= 9 * 10 + 50);
        assert_eq!(engine.moves_remaining(), DEFAULT_MOVE_BUDGET - 1);
        assert!(find_matches(engine.board()).is_empty());
    }

    #[test]
    fn test_rainbow_pair_swap_is_rejected() {
        // Two specials with no ordinary target: nothing would happen, so the
        // swap is turned down like any other no-effect swap.
        let mut board = fallback_board(8);
        board.set(Position::new(4, 4), TileKind::Rainbow);
        board.set(Position::new(4, 5), TileKind::Rainbow);
        let mut engine = GameEngine::from_parts(
            EngineConfig::default(),
            board,
            SimpleRng::new(5),
            0,
            DEFAULT_MOVE_BUDGET,
        );

        let before = engine.state();
        let outcome = engine.try_swap(Position::new(4, 4), Position::new(4, 5));
        assert_eq!(outcome, SwapOutcome::Rejected(RejectReason::NoMatch));
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_generation_fallback_is_clean() {
        let board = fallback_board(8);
        assert!(find_matches(&board).is_empty());
        let mut board = board;
        assert!(has_any_move(&mut board));
    }

    #[test]
    fn test_generation_converges_at_extreme_kind_count() {
        // With 32 kinds on a 4x4 board a random movable layout is unlikely;
        // generation must still converge (constructively if need be).
        let config = EngineConfig {
            size: 4,
            ordinary_kinds: 32,
            move_budget: 5,
            seed: 3,
        };
        let engine = GameEngine::new(config).unwrap();
        assert!(find_matches(engine.board()).is_empty());
        let mut board = engine.board().clone();
        assert!(has_any_move(&mut board));
    }
}
