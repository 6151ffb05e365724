//! Trio game core - deck, deal, and the turn/reveal state machine.
//!
//! This module provides the synchronous game implementation including:
//! - Deck construction and dealing for 3-6 players
//! - The reveal/resolution state machine with its pending guard
//! - Scoring, win detection, and per-viewer snapshots

// Submodules
pub mod constants;
pub mod entities;

mod engine;

pub use engine::{Game, GameError, Resolution, RevealOutcome};
