//! Room actor message types.

use crate::game::GameError;
use crate::game::entities::{Criterion, GameView, PlayerId, Rank};
use tokio::sync::oneshot;

/// Callback handed in by the owning room, invoked once when the
/// win-resolution delay elapses.
pub type TeardownFn = Box<dyn FnOnce() + Send + 'static>;

/// Messages that can be sent to a [`RoomActor`](crate::room::RoomActor).
#[derive(Debug)]
pub enum RoomMessage {
    /// Reveal the center card at `index`
    RevealCenter {
        index: usize,
        response: oneshot::Sender<Result<Rank, GameError>>,
    },

    /// Reveal the biggest or smallest card of the acting player's own hand
    RevealFromHand {
        player: PlayerId,
        criterion: Criterion,
        response: oneshot::Sender<Result<Rank, GameError>>,
    },

    /// Get a read-only snapshot for a specific viewer
    Snapshot {
        viewer: PlayerId,
        response: oneshot::Sender<Option<GameView>>,
    },

    /// Internal: apply a mismatch resolution (posted by the mismatch timer)
    ResolveMismatch,

    /// Internal: tear the room down (posted by the win timer)
    TearDown,
}
