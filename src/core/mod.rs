//! Core module - pure game rules with no I/O dependencies
//!
//! Everything the engine knows about boards, matches, cascades and sessions
//! lives here. It has zero dependencies on rendering, persistence formats,
//! or any platform integration.

pub mod board;
pub mod cascade;
pub mod cellset;
pub mod game;
pub mod matches;
pub mod rng;
pub mod snapshot;
pub mod solver;

// Re-export commonly used types
pub use board::Board;
pub use cascade::{resolve, ResolutionOutcome, SpawnedSpecial, SpecialActivation, SwapTrigger};
pub use cellset::CellSet;
pub use game::{ConfigError, EngineConfig, GameEngine, RejectReason, SwapOutcome};
pub use matches::{find_matches, Match, MatchKind};
pub use rng::{SimpleRng, TileSource};
pub use snapshot::GameSnapshot;
pub use solver::has_any_move;
