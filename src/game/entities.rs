use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::BTreeMap, fmt};
use uuid::Uuid;

use super::constants::{self, COPIES_PER_RANK, DECK_SIZE, RANK_COUNT};

/// A card is nothing but its rank (1..=12). Ranks are interchangeable;
/// the deck holds exactly three copies of each.
pub type Rank = u8;

/// The deck of 36 ranks used to deal a single game.
#[derive(Debug)]
pub struct Deck(Vec<Rank>);

impl Deck {
    /// Builds the full 12x3 rank multiset and shuffles it uniformly.
    #[must_use]
    pub fn shuffled() -> Self {
        let mut cards: Vec<Rank> = (1..=RANK_COUNT).flat_map(|rank| [rank; 3]).collect();
        cards.shuffle(&mut rand::rng());
        Self(cards)
    }

    /// Builds a deck with a fixed ordering for deterministic replays and
    /// tests. The ordering must still be a legal deck: three copies of each
    /// rank, 36 cards total.
    #[must_use]
    pub fn from_ranks(cards: Vec<Rank>) -> Self {
        debug_assert_eq!(cards.len(), DECK_SIZE);
        debug_assert!(
            (1..=RANK_COUNT)
                .all(|rank| cards.iter().filter(|&&card| card == rank).count() == COPIES_PER_RANK)
        );
        Self(cards)
    }

    /// Deals the next `count` cards off the top of the deck.
    pub fn deal(&mut self, count: usize) -> Vec<Rank> {
        self.0.drain(..count).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stable player handle, assigned once at room-join time.
///
/// All per-request lookups go through this id; display names are never used
/// to identify players since two players may share a name.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sanitized display name. Used for rendering only, never for lookup.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        let mut username: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        username.truncate(constants::MAX_USERNAME_LENGTH);
        Self(username)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// A member of the room's final, ordered player list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: Username,
}

impl Player {
    #[must_use]
    pub fn new(name: Username) -> Self {
        Self {
            id: PlayerId::new(),
            name,
        }
    }
}

/// Selection criterion when revealing from the acting player's own hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Biggest,
    Smallest,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Biggest => "biggest",
            Self::Smallest => "smallest",
        };
        write!(f, "{repr}")
    }
}

/// State of a single center position. Positions are stable for the whole
/// game; a card leaves the `Hidden` state but never its slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CenterSlot {
    /// Face down and selectable.
    Hidden(Rank),
    /// Face up as part of the in-progress revealed set.
    PendingReveal(Rank),
    /// Permanently face up, consumed by a confirmed match.
    Locked(Rank),
}

impl CenterSlot {
    #[must_use]
    pub fn rank(&self) -> Rank {
        match self {
            Self::Hidden(rank) | Self::PendingReveal(rank) | Self::Locked(rank) => *rank,
        }
    }

    /// Whether a reveal may select this slot.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Hidden(_))
    }
}

/// Where a revealed card came from, so a mismatch can return it to the
/// exact same owner.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum RevealSource {
    Center { index: usize },
    Player { id: PlayerId, criterion: Criterion },
}

/// One entry of the in-progress revealed set (0-3 entries per turn).
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RevealedEntry {
    pub rank: Rank,
    #[serde(flatten)]
    pub source: RevealSource,
}

/// Per-player portion of a [`GameView`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: Username,
    pub cards_remaining: usize,
    pub score: u32,
}

/// Read-only snapshot of committed game state, produced for one viewer.
///
/// This is what the polling collaborator serializes out to clients; it
/// exposes the viewer's own hand but only card counts for everyone else.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameView {
    /// Players in fixed turn order.
    pub players: Vec<PlayerView>,
    /// Total number of center slots (stable for the whole game).
    pub center_count: usize,
    /// The viewer's own hand, sorted ascending.
    pub hand: Vec<Rank>,
    /// Index into `players` of the player whose turn it is.
    pub turn: usize,
    /// The in-progress revealed set, in reveal order.
    pub revealed: Vec<RevealedEntry>,
    /// Center indices consumed by confirmed matches, with their ranks.
    pub revealed_center: BTreeMap<usize, Rank>,
    pub winner: Option<PlayerId>,
}
