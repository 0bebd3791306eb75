//! Persistence boundary - serialized session snapshots
//!
//! Storage itself belongs to the platform collaborator; this module only
//! defines the wire shape and validates a restored session against the board
//! invariants (square, fully populated, catalog-defined tile codes). The RNG
//! state travels with the session so a restored game continues the exact
//! refill sequence it would have produced.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::game::{validate_board_params, ConfigError, EngineConfig, GameEngine};
use crate::core::rng::SimpleRng;
use crate::types::{Position, TileKind};

/// Full serializable session: score, moves remaining, RNG state and the
/// board as a grid of tile codes (ordinary type ids; 254 bomb, 255 rainbow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    pub size: usize,
    pub ordinary_kinds: u8,
    pub score: u32,
    pub moves_remaining: u32,
    pub rng_state: u32,
    pub board: Vec<Vec<u8>>,
}

impl SavedSession {
    /// Snapshot a live session for external storage.
    pub fn capture(engine: &GameEngine) -> Self {
        let config = engine.config();
        Self {
            size: config.size,
            ordinary_kinds: config.ordinary_kinds,
            score: engine.score(),
            moves_remaining: engine.moves_remaining(),
            rng_state: engine.rng_state(),
            board: engine.board().to_code_grid(),
        }
    }

    /// Rebuild an engine from a stored session, validating shape and tile
    /// codes. Malformed input is a `ConfigError`, never a panic.
    pub fn restore(&self) -> Result<GameEngine, ConfigError> {
        validate_board_params(self.size, self.ordinary_kinds)?;

        if self.board.len() != self.size {
            return Err(ConfigError::BadBoardShape {
                rows: self.board.len(),
                expected: self.size,
            });
        }

        let mut board = Board::filled(self.size, TileKind::Ordinary(0));
        for (row, codes) in self.board.iter().enumerate() {
            if codes.len() != self.size {
                return Err(ConfigError::BadRowWidth {
                    row,
                    cols: codes.len(),
                    expected: self.size,
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let tile = TileKind::from_code(code, self.ordinary_kinds).ok_or(
                    ConfigError::UnknownTileCode { row, col, code },
                )?;
                board.set(Position::new(row, col), tile);
            }
        }

        let config = EngineConfig {
            size: self.size,
            ordinary_kinds: self.ordinary_kinds,
            move_budget: self.moves_remaining,
            seed: self.rng_state,
        };
        Ok(GameEngine::from_parts(
            config,
            board,
            SimpleRng::new(self.rng_state),
            self.score,
            self.moves_remaining,
        ))
    }
}
