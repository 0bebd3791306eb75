//! Deterministic match-3 board-simulation engine.
//!
//! Given an N×N grid of typed tiles, the engine validates player swaps,
//! detects runs of three or more identical tiles, resolves cascading clears
//! and refills, and manages special tiles (a 4-run leaves an area-clearing
//! bomb, a 5-run a board-wide rainbow eraser that targets a tile type when
//! swapped). Every public operation runs synchronously to completion and the
//! engine performs no I/O; a presentation layer consumes the structured
//! [`core::ResolutionOutcome`] and sequences its own animation.

pub mod core;
pub mod session;
pub mod types;
