//! Per-room engine ownership with an async actor model.
//!
//! This module implements:
//! - `RoomActor`: async actor exclusively owning one room's [`Game`](crate::game::Game)
//! - `RoomHandle`: cloneable handle the collaborator layer calls into
//! - Message-based communication with tokio channels
//! - Timer-driven mismatch/win resolution scheduling
//!
//! ## Architecture
//!
//! Each room's engine runs in a separate tokio task with an mpsc message
//! inbox. Reveal requests, snapshot requests, and the internal resolution
//! timers all flow through that inbox, so engine state is mutated by exactly
//! one task and snapshots never observe a half-applied transition. Room
//! creation, joining, and id allocation live in the owning collaborator, not
//! here.
//!
//! ## Example
//!
//! ```
//! use trio::game::entities::{Player, Username};
//! use trio::room::{RoomActor, RoomConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let players = vec![
//!         Player::new(Username::new("alice")),
//!         Player::new(Username::new("bob")),
//!         Player::new(Username::new("carol")),
//!     ];
//!     let viewer = players[0].id;
//!
//!     let on_teardown = Box::new(|| println!("room closed"));
//!     let (actor, handle) = RoomActor::new(players, RoomConfig::default(), on_teardown).unwrap();
//!
//!     // Spawn the room engine
//!     tokio::spawn(actor.run());
//!
//!     // Use the handle to reveal cards and poll snapshots
//!     let view = handle.snapshot(viewer).await.unwrap();
//!     assert_eq!(view.center_count, 9);
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{RoomActor, RoomHandle};
pub use config::RoomConfig;
pub use messages::{RoomMessage, TeardownFn};
