//! Cascade resolver - the clear → spawn → activate → refill pipeline
//!
//! One `resolve` call runs the full resolution pass for a single accepted
//! swap: an iterative wave loop that ends when a refill produces no new
//! matches. The engine stays synchronous; animation timing is entirely the
//! caller's concern and the returned outcome describes everything that
//! happened so a presentation layer can sequence it however it likes.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::cellset::CellSet;
use crate::core::matches::{find_matches, Match, MatchKind};
use crate::core::rng::TileSource;
use crate::types::{
    Position, TileKind, BOMB_BONUS, CELL_SCORE, MAX_BOARD_SIZE, MAX_CASCADE_WAVES, RAINBOW_BONUS,
};

/// A special tile created at a run's center during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedSpecial {
    pub pos: Position,
    pub kind: TileKind,
}

/// A special-tile effect that fired during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialActivation {
    Bomb { pos: Position },
    Rainbow { pos: Position, target: u8 },
}

/// Special-tile context carried by the triggering swap. Consumed on the
/// first wave only; later waves never re-activate swap effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapTrigger {
    /// Rainbow cell (at its post-swap position) and the target type taken
    /// from the other side of the swap.
    pub rainbow: Option<(Position, u8)>,
    /// Post-swap cells of any bombs the player swapped (both, for a
    /// bomb-bomb swap).
    pub bombs: ArrayVec<Position, 2>,
}

impl SwapTrigger {
    /// Whether the trigger alone justifies a resolution pass (a special swap
    /// is a valid move even when it lines up no run).
    pub fn has_effect(&self) -> bool {
        self.rainbow.is_some() || !self.bombs.is_empty()
    }
}

/// Everything a single resolution pass did, accumulated across waves.
/// The only artifact the presentation layer sees after a swap; it carries no
/// board snapshot (callers re-read state from the engine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub cells_cleared: u32,
    pub score_delta: u32,
    pub spawned: Vec<SpawnedSpecial>,
    pub activations: Vec<SpecialActivation>,
    pub waves: u32,
}

/// Run the full resolution pass: clear the triggering matches, apply special
/// effects, compact and refill, and repeat on any follow-up matches until
/// the board settles.
pub fn resolve(
    board: &mut Board,
    mut matches: Vec<Match>,
    trigger: SwapTrigger,
    tiles: &mut impl TileSource,
    ordinary_kinds: u8,
) -> ResolutionOutcome {
    let size = board.size();
    let mut outcome = ResolutionOutcome::default();
    let mut trigger = Some(trigger);

    while !matches.is_empty() || trigger.as_ref().is_some_and(SwapTrigger::has_effect) {
        outcome.waves += 1;
        assert!(
            outcome.waves <= MAX_CASCADE_WAVES,
            "cascade exceeded {} waves; refill source or board state is broken",
            MAX_CASCADE_WAVES
        );

        // Union all match cells; set semantics keep overlaps single-counted.
        let mut clear = CellSet::new(size);
        for m in &matches {
            for cell in m.cells() {
                clear.insert(cell);
            }
        }

        // Select spawn sites before anything moves. Crossing runs may share
        // a center, or the center may already hold a special; spawn once or
        // not at all in those cases.
        let mut pending: Vec<SpawnedSpecial> = Vec::new();
        for m in &matches {
            let kind = match m.kind() {
                MatchKind::Normal => continue,
                MatchKind::Bomb => TileKind::Bomb,
                MatchKind::Rainbow => TileKind::Rainbow,
            };
            let pos = m.center();
            if board.get(pos).is_special() || pending.iter().any(|s| s.pos == pos) {
                continue;
            }
            pending.push(SpawnedSpecial { pos, kind });
        }

        let mut bonus = 0u32;

        // Swap-carried special effects, first wave only.
        if let Some(t) = trigger.take() {
            if let Some((pos, target)) = t.rainbow {
                for row in 0..size {
                    for col in 0..size {
                        let cell = Position::new(row, col);
                        if board.get(cell) == TileKind::Ordinary(target) {
                            clear.insert(cell);
                        }
                    }
                }
                clear.insert(pos);
                bonus += RAINBOW_BONUS;
                outcome
                    .activations
                    .push(SpecialActivation::Rainbow { pos, target });
            }
            for pos in t.bombs {
                clear.insert(pos);
            }
        }

        // Bomb chain: any bomb in the clear set detonates, and its blast may
        // sweep further bombs, so expand to a fixpoint. Row-major scan order
        // keeps the activation list deterministic.
        let mut detonated = CellSet::new(size);
        loop {
            let fresh: Vec<Position> = clear
                .iter()
                .filter(|&pos| board.get(pos) == TileKind::Bomb && !detonated.contains(pos))
                .collect();
            if fresh.is_empty() {
                break;
            }
            for pos in fresh {
                detonated.insert(pos);
                bonus += BOMB_BONUS;
                outcome.activations.push(SpecialActivation::Bomb { pos });
                for row in pos.row.saturating_sub(1)..=(pos.row + 1).min(size - 1) {
                    for col in pos.col.saturating_sub(1)..=(pos.col + 1).min(size - 1) {
                        clear.insert(Position::new(row, col));
                    }
                }
            }
        }

        outcome.score_delta += clear.len() as u32 * CELL_SCORE + bonus;
        outcome.cells_cleared += clear.len() as u32;

        apply_gravity_and_refill(board, &clear, tiles, ordinary_kinds);

        // Specials land at their recorded centers after the column settles,
        // overriding whatever gravity or refill put there.
        for spawn in &pending {
            board.set(spawn.pos, spawn.kind);
        }
        outcome.spawned.extend(pending);

        matches = find_matches(board);
    }

    outcome
}

/// Per column: drop the cleared cells, compact survivors downward preserving
/// their order, and fill the vacated top cells from the tile source.
/// Columns are processed left to right, refills top-down, so a given source
/// always produces the same board.
fn apply_gravity_and_refill(
    board: &mut Board,
    clear: &CellSet,
    tiles: &mut impl TileSource,
    ordinary_kinds: u8,
) {
    let size = board.size();
    for col in 0..size {
        let mut survivors: ArrayVec<TileKind, MAX_BOARD_SIZE> = ArrayVec::new();
        for row in (0..size).rev() {
            let pos = Position::new(row, col);
            if !clear.contains(pos) {
                survivors.push(board.get(pos));
            }
        }

        let mut row = size;
        for &tile in &survivors {
            row -= 1;
            board.set(Position::new(row, col), tile);
        }
        for vacated in 0..row {
            let tile = TileKind::Ordinary(tiles.next_tile_type(ordinary_kinds));
            board.set(Position::new(vacated, col), tile);
        }
    }
}
