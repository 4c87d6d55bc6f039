//! Titan Discard Engine — Cheap Hand Heuristics
//!
//! Simulation-free signals for the betting policy: a preflop point count
//! for three-card hands and a "wet board" test for draw-heavy boards.

use crate::card::Card;
use crate::error::{EngineError, Result};

/// Preflop point count for a three-card starting hand.
///
/// Rank sum (2..=14 each), then bonuses:
///   - any pair +20, trips a further +30
///   - three suited +12, two suited +3
///   - three-card run +12, one connected gap +4
pub fn preflop_points(cards: &[Card]) -> Result<u32> {
    EngineError::check_count("preflop hand", cards.len(), 3, 3)?;

    let mut ranks = [cards[0].rank(), cards[1].rank(), cards[2].rank()];
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let mut points: u32 = ranks.iter().map(|&r| u32::from(r)).sum();

    if ranks[0] == ranks[1] || ranks[1] == ranks[2] {
        points += 20;
        if ranks[0] == ranks[2] {
            points += 30;
        }
    }

    let [a, b, c] = [cards[0].suit(), cards[1].suit(), cards[2].suit()];
    if a == b && b == c {
        points += 12;
    } else if a == b || b == c || a == c {
        points += 3;
    }

    let gap_high = ranks[0] - ranks[1];
    let gap_low = ranks[1] - ranks[2];
    if gap_high == 1 && gap_low == 1 {
        points += 12;
    } else if gap_high == 1 || gap_low == 1 {
        points += 4;
    }

    Ok(points)
}

/// Draw-heavy board: at least three cards and either three of one suit
/// or three ranks within a span of four.
pub fn board_is_wet(board: &[Card]) -> bool {
    if board.len() < 3 {
        return false;
    }

    let mut suits = [0u8; 4];
    for card in board {
        suits[card.suit() as usize] += 1;
    }
    if suits.iter().any(|&n| n >= 3) {
        return true;
    }

    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank()).collect();
    ranks.sort_unstable();
    ranks.windows(3).any(|w| w[2] - w[0] <= 4)
}

// ── Tests ───────────────────────────────────────────────────────────
