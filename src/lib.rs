//! # Trio
//!
//! A turn-based matching card game engine for 3-6 players.
//!
//! On their turn, the active player reveals cards one at a time from the
//! table center or from their own hand, trying to expose three cards of the
//! same rank. A matched triple scores a point immediately; a mismatch holds
//! the table for a fixed delay, then returns every exposed card to its owner
//! and passes the turn. The first player to three points wins, after which
//! the room tears itself down.
//!
//! ## Architecture
//!
//! The crate is split along the sync/async seam:
//!
//! - [`game`]: the pure state machine. Deck and deal, reveal validation, the
//!   running revealed set, match/mismatch decisions, scoring, and win
//!   detection. It never sleeps; decidable outcomes are reported to the
//!   caller as [`game::Resolution`] values.
//! - [`room`]: the ownership layer. One tokio actor per room owns the game,
//!   serializes concurrent reveal/snapshot requests through an mpsc inbox,
//!   and runs the resolution timers that apply mismatch returns and the
//!   post-win teardown.
//!
//! Everything outside those two concerns (HTTP routing, sessions, room
//! membership, UI polling) belongs to external collaborators that talk to a
//! [`room::RoomHandle`].
//!
//! ## Example
//!
//! ```
//! use trio::game::entities::{Player, Username};
//! use trio::game::Game;
//!
//! let players = vec![
//!     Player::new(Username::new("alice")),
//!     Player::new(Username::new("bob")),
//!     Player::new(Username::new("carol")),
//! ];
//! let game = Game::new(players).unwrap();
//! ```

/// Core game logic: deck, entities, and the reveal state machine.
pub mod game;
pub use game::{
    Game, GameError,
    constants::{self, MAX_PLAYERS, MIN_PLAYERS, WIN_SCORE},
    entities,
};

/// Async room engine: actor, handle, messages, and resolution timers.
pub mod room;
pub use room::{RoomActor, RoomConfig, RoomHandle, RoomMessage};
