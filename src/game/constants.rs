//! Game-wide constants.

/// Number of distinct card ranks in the deck.
pub const RANK_COUNT: u8 = 12;

/// Copies of each rank in the deck.
pub const COPIES_PER_RANK: usize = 3;

/// Total deck size.
pub const DECK_SIZE: usize = RANK_COUNT as usize * COPIES_PER_RANK;

/// Minimum number of players required to start a game.
pub const MIN_PLAYERS: usize = 3;

/// Maximum number of players supported by the distribution table.
pub const MAX_PLAYERS: usize = 6;

/// Points required to win the game.
pub const WIN_SCORE: u32 = 3;

/// Maximum length of a sanitized display name.
pub const MAX_USERNAME_LENGTH: usize = 16;

/// Cards dealt per player and to the center, keyed by player count.
///
/// Every entry consumes the full deck:
/// `player_count * per_player + center == DECK_SIZE`.
#[must_use]
pub const fn deal_counts(player_count: usize) -> Option<(usize, usize)> {
    match player_count {
        3 => Some((9, 9)),
        4 => Some((7, 8)),
        5 => Some((6, 6)),
        6 => Some((5, 6)),
        _ => None,
    }
}
