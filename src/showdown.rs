//! Titan Discard Engine — Best-Hand Search
//!
//! Showdown pools in this variant are two retained cards plus a six-card
//! board, so the search sees up to 8 cards (9 when a discard lands on an
//! already complete board).
//!
//! ## Combinatorics
//!
//! | Cards | C(n,5) |
//! |-------|--------|
//! | 5     | 1      |
//! | 6     | 6      |
//! | 7     | 21     |
//! | 8     | 56     |
//! | 9     | 126    |
//!
//! Every subset is scored with the full `HandRank` comparison; a later
//! subset can share the category but carry better kickers.

use crate::card::Card;
use crate::deck::CardSet;
use crate::error::{EngineError, Result};
use crate::evaluator::{self, HandRank};

/// Checked entry point: 5 to 8 distinct cards.
pub fn evaluate_hand(cards: &[Card]) -> Result<HandRank> {
    EngineError::check_count("evaluate_hand", cards.len(), 5, 8)?;
    CardSet::from_cards(cards)?;
    Ok(best_hand(cards))
}

/// Best five-card value among `cards`. Pools of five or fewer are
/// classified directly.
pub fn best_hand(cards: &[Card]) -> HandRank {
    let n = cards.len();
    if n <= 5 {
        return evaluator::classify(cards);
    }

    let mut best = HandRank::MIN;
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let rank = evaluator::eval5(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if rank > best {
                            best = rank;
                        }
                    }
                }
            }
        }
    }
    best
}

/// Best value of `held` combined with `board`, without allocating.
pub fn best_with_board(held: &[Card], board: &[Card]) -> HandRank {
    let mut pool = [Card::from_id(0); 9];
    let n = held.len() + board.len();
    debug_assert!(n <= pool.len());
    pool[..held.len()].copy_from_slice(held);
    pool[held.len()..n].copy_from_slice(board);
    best_hand(&pool[..n])
}

// ── Tests ───────────────────────────────────────────────────────────
