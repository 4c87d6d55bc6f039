//! Titan Discard Engine — Retention (2-of-3 reduction)
//!
//! Decides which two of three held cards survive to showdown. The
//! simulator applies it to the sampled opponent hand, and to our own hand
//! when we have not discarded yet.

use crate::card::Card;
use crate::showdown;

/// Opponent model: pick the two cards kept from three.
pub trait Retention {
    fn keep(&self, three: [Card; 3], board: &[Card]) -> [Card; 2];
}

/// Keeps the pair that makes the strongest hand with the board as it
/// stands now. Ignores draws and discard timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestMadeHand;

impl Retention for BestMadeHand {
    fn keep(&self, three: [Card; 3], board: &[Card]) -> [Card; 2] {
        let mut best_keep = retained(three, 0);
        let mut best_rank = showdown::best_with_board(&best_keep, board);

        for drop in 1..3 {
            let keep = retained(three, drop);
            let rank = showdown::best_with_board(&keep, board);
            if rank > best_rank {
                best_rank = rank;
                best_keep = keep;
            }
        }
        best_keep
    }
}

/// The two cards left after dropping index `drop`.
#[inline]
pub fn retained(three: [Card; 3], drop: usize) -> [Card; 2] {
    match drop {
        0 => [three[1], three[2]],
        1 => [three[0], three[2]],
        _ => [three[0], three[1]],
    }
}

// ── Tests ───────────────────────────────────────────────────────────
