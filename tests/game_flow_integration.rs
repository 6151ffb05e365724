//! Integration tests for full game flow scenarios.
//!
//! These drive the room engine through its public handle with paused tokio
//! time, covering deal distribution, match and mismatch resolution, and the
//! pending-window guard.

use tokio::sync::oneshot;
use tokio::time::Duration;

use trio::game::constants::{DECK_SIZE, RANK_COUNT};
use trio::game::entities::{Criterion, Deck, Player, Rank, Username};
use trio::game::{Game, GameError};
use trio::room::{RoomActor, RoomConfig, RoomHandle};

fn players(count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| Player::new(Username::new(&format!("player{i}"))))
        .collect()
}

/// Legal 36-card deck for a 3-player game whose center section starts with
/// `center_head` (the 27 hand cards come first).
fn rigged_deck(center_head: &[Rank]) -> Deck {
    let mut pool: Vec<Rank> = (1..=RANK_COUNT).flat_map(|rank| [rank; 3]).collect();
    for &rank in center_head {
        let at = pool.iter().position(|&card| card == rank).unwrap();
        pool.remove(at);
    }
    let mut cards = pool[..27].to_vec();
    cards.extend_from_slice(center_head);
    cards.extend_from_slice(&pool[27..]);
    Deck::from_ranks(cards)
}

fn spawn_room(game: Game) -> (RoomHandle, oneshot::Receiver<()>) {
    let (torn_down, teardown_signal) = oneshot::channel();
    let on_teardown = Box::new(move || {
        let _ = torn_down.send(());
    });
    let (actor, handle) = RoomActor::with_game(game, RoomConfig::default(), on_teardown);
    tokio::spawn(actor.run());
    (handle, teardown_signal)
}

#[tokio::test(start_paused = true)]
async fn test_deal_distribution_for_all_player_counts() {
    for count in 3..=6 {
        let roster = players(count);
        let ids: Vec<_> = roster.iter().map(|player| player.id).collect();
        let (actor, handle) = RoomActor::new(roster, RoomConfig::default(), Box::new(|| {}))
            .expect("3-6 players are supported");
        tokio::spawn(actor.run());

        let view = handle.snapshot(ids[0]).await.unwrap();
        let in_hands: usize = view
            .players
            .iter()
            .map(|player| player.cards_remaining)
            .sum();
        assert_eq!(in_hands + view.center_count, DECK_SIZE);
        assert!(view.hand.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(view.turn, 0);
        assert!(view.revealed.is_empty());
        assert!(view.revealed_center.is_empty());
        assert_eq!(view.winner, None);
    }
}

#[tokio::test(start_paused = true)]
async fn test_center_triple_scores_immediately() {
    let roster = players(3);
    let first = roster[0].id;
    let game = Game::with_deck(roster, rigged_deck(&[7, 7, 7])).unwrap();
    let (handle, _teardown) = spawn_room(game);

    assert_eq!(handle.reveal_center(0).await, Ok(7));
    assert_eq!(handle.reveal_center(1).await, Ok(7));
    assert_eq!(handle.reveal_center(2).await, Ok(7));

    // No delay on success: the point, the ledger, and the turn rotation are
    // all visible at once.
    let view = handle.snapshot(first).await.unwrap();
    assert_eq!(view.players[0].score, 1);
    assert_eq!(view.turn, 1);
    assert!(view.revealed.is_empty());
    assert_eq!(view.revealed_center.len(), 3);
    assert_eq!(view.revealed_center.get(&1), Some(&7));

    // Locked indices are permanently out of play.
    assert_eq!(
        handle.reveal_center(0).await,
        Err(GameError::InvalidIndex(0))
    );
}

#[tokio::test(start_paused = true)]
async fn test_mixed_source_triple_locks_only_center_entries() {
    let roster = players(3);
    let first = roster[0].id;
    let game = Game::with_deck(roster, rigged_deck(&[1, 1])).unwrap();
    let (handle, _teardown) = spawn_room(game);

    // The acting player's smallest card is the lone remaining 1.
    assert_eq!(
        handle.reveal_from_hand(first, Criterion::Smallest).await,
        Ok(1)
    );
    assert_eq!(handle.reveal_center(0).await, Ok(1));
    assert_eq!(handle.reveal_center(1).await, Ok(1));

    let view = handle.snapshot(first).await.unwrap();
    assert_eq!(view.players[0].score, 1);
    assert_eq!(view.players[0].cards_remaining, 8);
    assert_eq!(view.revealed_center.len(), 2);
    assert_eq!(view.turn, 1);
}

#[tokio::test(start_paused = true)]
async fn test_unmatched_triple_restores_the_table_after_the_delay() {
    let roster = players(3);
    let first = roster[0].id;
    let game = Game::with_deck(roster, rigged_deck(&[7, 7, 4])).unwrap();
    let (handle, _teardown) = spawn_room(game);

    assert_eq!(handle.reveal_center(0).await, Ok(7));
    assert_eq!(handle.reveal_center(1).await, Ok(7));
    assert_eq!(handle.reveal_center(2).await, Ok(4));

    // A fourth reveal during the pending window yields no new entry.
    assert_eq!(
        handle.reveal_center(3).await,
        Err(GameError::ResolutionPending)
    );
    assert_eq!(
        handle.reveal_from_hand(first, Criterion::Biggest).await,
        Err(GameError::ResolutionPending)
    );
    let view = handle.snapshot(first).await.unwrap();
    assert_eq!(view.revealed.len(), 3);

    tokio::time::sleep(Duration::from_millis(4_001)).await;

    // Indices 0, 1, 2 are independently re-revealable and the turn moved on.
    let view = handle.snapshot(first).await.unwrap();
    assert!(view.revealed.is_empty());
    assert!(view.revealed_center.is_empty());
    assert_eq!(view.turn, 1);
    assert_eq!(view.players[0].score, 0);
    assert_eq!(handle.reveal_center(0).await, Ok(7));
    assert_eq!(handle.reveal_center(1).await, Ok(7));
    assert_eq!(handle.reveal_center(2).await, Ok(4));

    // The same cards mismatch again and the table restores once more.
    tokio::time::sleep(Duration::from_millis(4_001)).await;
    let view = handle.snapshot(first).await.unwrap();
    assert!(view.revealed.is_empty());
    assert_eq!(view.turn, 2);
}

#[tokio::test(start_paused = true)]
async fn test_mismatched_player_card_returns_to_its_owner() {
    let roster = players(3);
    let first = roster[0].id;
    let game = Game::with_deck(roster, rigged_deck(&[12, 12, 12])).unwrap();
    let (handle, _teardown) = spawn_room(game);

    let before = handle.snapshot(first).await.unwrap().hand;
    let biggest = *before.last().unwrap();

    assert_eq!(
        handle.reveal_from_hand(first, Criterion::Biggest).await,
        Ok(biggest)
    );
    // Rank 12 sits only in the center, so this pair can't match.
    assert_eq!(handle.reveal_center(0).await, Ok(12));

    tokio::time::sleep(Duration::from_millis(4_001)).await;

    // Round-trip: the exact card is back in the exact hand, still sorted.
    let view = handle.snapshot(first).await.unwrap();
    assert_eq!(view.hand, before);
    assert_eq!(view.turn, 1);
}
