//! Room engine actor with async message handling.
//!
//! One actor task exclusively owns the [`Game`] for one room. External
//! callers (HTTP handlers) talk to it through a cloneable [`RoomHandle`], so
//! every mutation and every snapshot is serialized through the actor's inbox.
//! Resolution delays are timer tasks that post internal messages back into
//! the same inbox; they are never cancelled, and the engine's pending guard
//! ensures at most one is in flight.

use super::{config::RoomConfig, messages::{RoomMessage, TeardownFn}};
use crate::game::{
    Game, GameError, Resolution, RevealOutcome,
    entities::{Criterion, GameView, Player, PlayerId, Rank},
};
use tokio::{
    sync::{mpsc, oneshot},
    time::Duration,
};

/// Room engine handle for sending messages
#[derive(Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
}

impl RoomHandle {
    /// Reveal the center card at `index`, returning its rank.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`GameError`]; once the room has torn down, the
    /// channel is closed and every mutating call reports
    /// [`GameError::GameAlreadyWon`].
    pub async fn reveal_center(&self, index: usize) -> Result<Rank, GameError> {
        let (response, rx) = oneshot::channel();
        let message = RoomMessage::RevealCenter { index, response };
        if self.sender.send(message).await.is_err() {
            return Err(GameError::GameAlreadyWon);
        }
        rx.await.unwrap_or(Err(GameError::GameAlreadyWon))
    }

    /// Reveal the biggest or smallest card of `player`'s own hand.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`GameError`]; once the room has torn down, the
    /// channel is closed and every mutating call reports
    /// [`GameError::GameAlreadyWon`].
    pub async fn reveal_from_hand(
        &self,
        player: PlayerId,
        criterion: Criterion,
    ) -> Result<Rank, GameError> {
        let (response, rx) = oneshot::channel();
        let message = RoomMessage::RevealFromHand {
            player,
            criterion,
            response,
        };
        if self.sender.send(message).await.is_err() {
            return Err(GameError::GameAlreadyWon);
        }
        rx.await.unwrap_or(Err(GameError::GameAlreadyWon))
    }

    /// Get a read-only snapshot for `viewer`. Safe to call at any time,
    /// including mid-resolution; snapshots only ever reflect committed
    /// state. Returns `None` for unknown viewers and torn-down rooms.
    pub async fn snapshot(&self, viewer: PlayerId) -> Option<GameView> {
        let (response, rx) = oneshot::channel();
        let message = RoomMessage::Snapshot { viewer, response };
        if self.sender.send(message).await.is_err() {
            return None;
        }
        rx.await.unwrap_or(None)
    }
}

/// Actor managing the game engine of a single room
pub struct RoomActor {
    /// Game state, exclusively owned
    game: Game,

    /// Resolution delays
    config: RoomConfig,

    /// Message inbox
    inbox: mpsc::Receiver<RoomMessage>,

    /// Sender cloned into timer tasks so resolutions re-enter the inbox
    sender: mpsc::Sender<RoomMessage>,

    /// Invoked once when the win-resolution delay elapses
    on_teardown: Option<TeardownFn>,
}

impl RoomActor {
    /// Create a room actor for the final, ordered player list.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPlayerCount`] unless 3-6 players are given.
    pub fn new(
        players: Vec<Player>,
        config: RoomConfig,
        on_teardown: TeardownFn,
    ) -> Result<(Self, RoomHandle), GameError> {
        let game = Game::new(players)?;
        Ok(Self::with_game(game, config, on_teardown))
    }

    /// Create a room actor around an already-dealt game (deterministic
    /// decks, replays).
    pub fn with_game(
        game: Game,
        config: RoomConfig,
        on_teardown: TeardownFn,
    ) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(100);

        let actor = Self {
            game,
            config,
            inbox,
            sender: sender.clone(),
            on_teardown: Some(on_teardown),
        };
        let handle = RoomHandle { sender };

        (actor, handle)
    }

    /// Run the room engine event loop until teardown.
    pub async fn run(mut self) {
        log::info!(
            "room engine starting with {} players",
            self.game.player_count()
        );

        while let Some(message) = self.inbox.recv().await {
            match message {
                RoomMessage::RevealCenter { index, response } => {
                    let result = self.game.reveal_center(index);
                    let _ = response.send(self.finish_reveal(result));
                }

                RoomMessage::RevealFromHand {
                    player,
                    criterion,
                    response,
                } => {
                    let result = self.game.reveal_from_hand(player, criterion);
                    let _ = response.send(self.finish_reveal(result));
                }

                RoomMessage::Snapshot { viewer, response } => {
                    let _ = response.send(self.game.view(viewer));
                }

                RoomMessage::ResolveMismatch => {
                    self.game.resolve_mismatch();
                }

                RoomMessage::TearDown => {
                    if let Some(teardown) = self.on_teardown.take() {
                        teardown();
                    }
                    break;
                }
            }
        }

        log::info!("room engine stopped");
    }

    /// Schedules whatever resolution the reveal decided on and strips the
    /// outcome down to the rank the caller gets back.
    fn finish_reveal(
        &self,
        result: Result<RevealOutcome, GameError>,
    ) -> Result<Rank, GameError> {
        let outcome = result?;
        match outcome.resolution {
            Some(Resolution::Mismatch) => {
                log::debug!("mismatch decided, returning cards in {:?}", self.config.mismatch_delay());
                self.schedule(RoomMessage::ResolveMismatch, self.config.mismatch_delay());
            }
            Some(Resolution::Win) => {
                log::info!("win decided, tearing down in {:?}", self.config.win_delay());
                self.schedule(RoomMessage::TearDown, self.config.win_delay());
            }
            None => {}
        }
        Ok(outcome.rank)
    }

    fn schedule(&self, message: RoomMessage, delay: Duration) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(message).await;
        });
    }
}
