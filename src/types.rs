//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Board size limits (the board is always square)
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 16;
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Ordinary tile catalog limits
pub const MIN_ORDINARY_KINDS: u8 = 3;
pub const MAX_ORDINARY_KINDS: u8 = 32;
pub const DEFAULT_ORDINARY_KINDS: u8 = 8;

/// Session defaults
pub const DEFAULT_MOVE_BUDGET: u32 = 10;
pub const DEFAULT_SEED: u32 = 1;

/// Run-length thresholds
pub const MIN_RUN_LEN: usize = 3;
pub const BOMB_RUN_LEN: usize = 4;
pub const RAINBOW_RUN_LEN: usize = 5;

/// Scoring
pub const CELL_SCORE: u32 = 10;
pub const BOMB_BONUS: u32 = 50;
pub const RAINBOW_BONUS: u32 = 100;

/// A resolution pass that runs past this many waves indicates a broken
/// refill source or a corrupted board; physical boards settle long before.
pub const MAX_CASCADE_WAVES: u32 = 64;

/// Board generation bounds (random attempts before the constructive fallback)
pub const GENERATION_ATTEMPTS: u32 = 16;
pub const SCRUB_PASS_LIMIT: u32 = 64;

/// Persistence wire codes for special tiles; ordinary tiles use their type id.
pub const BOMB_CODE: u8 = 254;
pub const RAINBOW_CODE: u8 = 255;

/// A tile occupying one board cell.
///
/// Only two `Ordinary` tiles with equal type ids are "same kind" for run
/// matching; special tiles never match by adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Ordinary(u8),
    Bomb,
    Rainbow,
}

impl TileKind {
    pub fn is_special(self) -> bool {
        matches!(self, TileKind::Bomb | TileKind::Rainbow)
    }

    /// Type id when the tile is ordinary.
    pub fn ordinary_type(self) -> Option<u8> {
        match self {
            TileKind::Ordinary(ty) => Some(ty),
            _ => None,
        }
    }

    /// Wire code used by the persistence boundary.
    pub fn code(self) -> u8 {
        match self {
            TileKind::Ordinary(ty) => ty,
            TileKind::Bomb => BOMB_CODE,
            TileKind::Rainbow => RAINBOW_CODE,
        }
    }

    /// Parse a wire code against the catalog.
    /// Returns None for codes outside the catalog (unknown ordinary type).
    pub fn from_code(code: u8, ordinary_kinds: u8) -> Option<Self> {
        match code {
            BOMB_CODE => Some(TileKind::Bomb),
            RAINBOW_CODE => Some(TileKind::Rainbow),
            ty if ty < ordinary_kinds => Some(TileKind::Ordinary(ty)),
            _ => None,
        }
    }
}

/// A board coordinate. Row 0 is the top row; gravity pulls toward higher rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when the two positions are 4-neighbors (Manhattan distance 1).
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// Orientation of a detected run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}
