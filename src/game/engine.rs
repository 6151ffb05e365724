//! Turn and reveal state machine for a single game of Trio.
//!
//! The [`Game`] here is pure and synchronous: it validates reveal requests,
//! tracks the in-progress revealed set, and decides match/mismatch outcomes.
//! It never sleeps or spawns; when a resolution needs a delay it reports a
//! [`Resolution`] to the caller (the room actor), which owns the timers and
//! calls back into [`Game::resolve_mismatch`] once the delay elapses. The
//! pending marker that blocks further reveals is set in the same state
//! transition that reports the resolution, so no second reveal can slip in
//! between the decision and the timer.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::constants::{WIN_SCORE, deal_counts};
use super::entities::{
    CenterSlot, Criterion, Deck, GameView, Player, PlayerId, PlayerView, Rank, RevealSource,
    RevealedEntry, Username,
};

/// Errors returned to external callers. All are recoverable; none of them
/// leave the engine in a broken state.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("only 3-6 players are supported, got {0}")]
    InvalidPlayerCount(usize),
    #[error("center card {0} can't be revealed")]
    InvalidIndex(usize),
    #[error("no cards left in hand")]
    EmptyHand,
    #[error("not your turn")]
    NotYourTurn,
    #[error("a resolution is pending")]
    ResolutionPending,
    #[error("the game is already won")]
    GameAlreadyWon,
}

/// A delayed resolution the owner must schedule after a reveal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// Return the revealed cards to their owners after the mismatch delay.
    Mismatch,
    /// Tear the room down after the win delay.
    Win,
}

/// Result of a successful reveal: the exposed rank, plus the resolution to
/// schedule if the revealed set became decidable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RevealOutcome {
    pub rank: Rank,
    pub resolution: Option<Resolution>,
}

/// Per-player state, indexed by the turn cursor.
#[derive(Debug)]
struct Seat {
    id: PlayerId,
    name: Username,
    /// Kept sorted ascending after every mutation, so the biggest and
    /// smallest cards always sit at the ends.
    hand: Vec<Rank>,
    score: u32,
}

/// State for one game of Trio, owned exclusively by its room.
#[derive(Debug)]
pub struct Game {
    seats: Vec<Seat>,
    center: Vec<CenterSlot>,
    revealed: Vec<RevealedEntry>,
    turn: usize,
    winner: Option<PlayerId>,
    pending: Option<Resolution>,
}

impl Game {
    /// Deals a fresh game from a shuffled deck.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPlayerCount`] unless 3-6 players are given.
    pub fn new(players: Vec<Player>) -> Result<Self, GameError> {
        let deck = Deck::shuffled();
        Self::with_deck(players, deck)
    }

    /// Deals a game from a fixed deck ordering, for deterministic replays
    /// and tests.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPlayerCount`] unless 3-6 players are given.
    pub fn with_deck(players: Vec<Player>, mut deck: Deck) -> Result<Self, GameError> {
        let (per_player, center_count) =
            deal_counts(players.len()).ok_or(GameError::InvalidPlayerCount(players.len()))?;

        let seats = players
            .into_iter()
            .map(|player| {
                let mut hand = deck.deal(per_player);
                hand.sort_unstable();
                Seat {
                    id: player.id,
                    name: player.name,
                    hand,
                    score: 0,
                }
            })
            .collect();
        let center = deck
            .deal(center_count)
            .into_iter()
            .map(CenterSlot::Hidden)
            .collect();

        Ok(Self {
            seats,
            center,
            revealed: Vec::with_capacity(3),
            turn: 0,
            winner: None,
            pending: None,
        })
    }

    /// Exposes the center card at `index`.
    ///
    /// # Errors
    ///
    /// * [`GameError::GameAlreadyWon`] once a winner is set.
    /// * [`GameError::ResolutionPending`] while a resolution delay is in flight.
    /// * [`GameError::InvalidIndex`] if `index` is out of range, locked by a
    ///   previous match, or already part of the revealed set.
    pub fn reveal_center(&mut self, index: usize) -> Result<RevealOutcome, GameError> {
        self.check_open()?;

        let slot = self
            .center
            .get(index)
            .ok_or(GameError::InvalidIndex(index))?;
        if !slot.is_selectable() {
            return Err(GameError::InvalidIndex(index));
        }
        let rank = slot.rank();
        self.center[index] = CenterSlot::PendingReveal(rank);
        self.revealed.push(RevealedEntry {
            rank,
            source: RevealSource::Center { index },
        });
        debug!("center card {index} revealed: rank {rank}");

        Ok(RevealOutcome {
            rank,
            resolution: self.check_revealed(),
        })
    }

    /// Exposes the biggest or smallest card of the acting player's own hand.
    ///
    /// Turn ownership is enforced here rather than by the caller; a correct
    /// collaborator never trips it, an untrusted one can't bypass it.
    ///
    /// # Errors
    ///
    /// * [`GameError::GameAlreadyWon`] once a winner is set.
    /// * [`GameError::ResolutionPending`] while a resolution delay is in flight.
    /// * [`GameError::NotYourTurn`] if `acting` isn't the player at the cursor.
    /// * [`GameError::EmptyHand`] if the acting player has no cards left.
    pub fn reveal_from_hand(
        &mut self,
        acting: PlayerId,
        criterion: Criterion,
    ) -> Result<RevealOutcome, GameError> {
        self.check_open()?;

        let seat = &mut self.seats[self.turn];
        if seat.id != acting {
            return Err(GameError::NotYourTurn);
        }
        if seat.hand.is_empty() {
            return Err(GameError::EmptyHand);
        }
        let pick = match criterion {
            Criterion::Biggest => seat.hand.len() - 1,
            Criterion::Smallest => 0,
        };
        let rank = seat.hand.remove(pick);
        self.revealed.push(RevealedEntry {
            rank,
            source: RevealSource::Player {
                id: acting,
                criterion,
            },
        });
        debug!("{} reveals their {criterion} card: rank {rank}", seat.name);

        Ok(RevealOutcome {
            rank,
            resolution: self.check_revealed(),
        })
    }

    /// Returns every revealed card to its origin after a mismatch, clears
    /// the revealed set, advances the turn, and releases the pending guard.
    /// Invoked by the room actor once the mismatch delay elapses.
    pub fn resolve_mismatch(&mut self) {
        if self.pending != Some(Resolution::Mismatch) {
            // Timers are never cancelled and only one resolution can be in
            // flight, so this is unreachable under the actor's serialization.
            warn!("mismatch resolution fired without a pending mismatch");
            return;
        }

        let revealed = std::mem::take(&mut self.revealed);
        for entry in revealed {
            match entry.source {
                RevealSource::Center { index } => {
                    self.center[index] = CenterSlot::Hidden(entry.rank);
                }
                RevealSource::Player { id, .. } => {
                    if let Some(seat) = self.seats.iter_mut().find(|seat| seat.id == id) {
                        seat.hand.push(entry.rank);
                        seat.hand.sort_unstable();
                    }
                }
            }
        }
        self.pending = None;
        self.advance_turn();
        debug!("mismatch resolved, turn passes to seat {}", self.turn);
    }

    /// Produces a read-only snapshot for `viewer`, or `None` if `viewer`
    /// isn't part of this game.
    #[must_use]
    pub fn view(&self, viewer: PlayerId) -> Option<GameView> {
        let hand = self
            .seats
            .iter()
            .find(|seat| seat.id == viewer)?
            .hand
            .clone();

        let players = self
            .seats
            .iter()
            .map(|seat| PlayerView {
                id: seat.id,
                name: seat.name.clone(),
                cards_remaining: seat.hand.len(),
                score: seat.score,
            })
            .collect();
        let revealed_center: BTreeMap<usize, Rank> = self
            .center
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                CenterSlot::Locked(rank) => Some((index, *rank)),
                _ => None,
            })
            .collect();

        Some(GameView {
            players,
            center_count: self.center.len(),
            hand,
            turn: self.turn,
            revealed: self.revealed.clone(),
            revealed_center,
            winner: self.winner,
        })
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Whether a resolution delay is currently blocking reveals.
    #[must_use]
    pub fn resolution_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.seats[self.turn].id
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    fn check_open(&self) -> Result<(), GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameAlreadyWon);
        }
        if self.pending.is_some() {
            return Err(GameError::ResolutionPending);
        }
        Ok(())
    }

    /// Resolution decision, evaluated after every successful append:
    /// one card or an equal pair awaits the next reveal, an unequal pair or
    /// an unmatched triple schedules a mismatch, a matched triple applies
    /// immediately.
    fn check_revealed(&mut self) -> Option<Resolution> {
        match self.revealed.as_slice() {
            [] | [_] => None,
            [first, second] if first.rank == second.rank => None,
            [first, second, third] if first.rank == second.rank && second.rank == third.rank => {
                self.apply_match()
            }
            _ => {
                self.pending = Some(Resolution::Mismatch);
                Some(Resolution::Mismatch)
            }
        }
    }

    /// Locks center-sourced entries into the ledger, awards the point, and
    /// either advances the turn or begins the win sequence.
    fn apply_match(&mut self) -> Option<Resolution> {
        let revealed = std::mem::take(&mut self.revealed);
        for entry in revealed {
            if let RevealSource::Center { index } = entry.source {
                self.center[index] = CenterSlot::Locked(entry.rank);
            }
        }

        let seat = &mut self.seats[self.turn];
        seat.score += 1;
        info!("{} matched a triple and is at {} point(s)", seat.name, seat.score);
        if seat.score >= WIN_SCORE {
            self.winner = Some(seat.id);
            self.pending = Some(Resolution::Win);
            info!("{} wins the game", seat.name);
            return Some(Resolution::Win);
        }

        self.advance_turn();
        None
    }

    fn advance_turn(&mut self) {
        self.turn = (self.turn + 1) % self.seats.len();
    }
}
