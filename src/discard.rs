//! Titan Discard Engine — Discard Selection
//!
//! The discarded card joins the public board, so each candidate is scored
//! as "our other two cards on board + discard". The arg-max wins; ties go
//! to the lowest index.

use crate::cache::EquityCache;
use crate::card::Card;
use crate::deck::CardSet;
use crate::equity::{EquitySource, BOARD_TARGET};
use crate::error::{EngineError, Result};
use crate::retention::retained;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscardChoice {
    /// Index into the three private cards.
    pub index: usize,
    /// Post-discard equity for each candidate index.
    pub equities: [f64; 3],
}

impl DiscardChoice {
    pub fn equity(&self) -> f64 {
        self.equities[self.index]
    }
}

/// Score all three discards through the cache and pick the best.
pub fn select_discard<S: EquitySource>(
    cache: &mut EquityCache<S>,
    hand: &[Card],
    board: &[Card],
    stage: u8,
    iterations: u32,
) -> Result<DiscardChoice> {
    EngineError::check_count("discard hand", hand.len(), 3, 3)?;
    EngineError::check_count("board", board.len(), 0, BOARD_TARGET)?;
    let mut used = CardSet::from_cards(hand)?;
    used.extend_unique(board)?;

    let three = [hand[0], hand[1], hand[2]];
    let mut after = Vec::with_capacity(board.len() + 1);
    let mut equities = [0.0; 3];

    for (drop, slot) in equities.iter_mut().enumerate() {
        after.clear();
        after.extend_from_slice(board);
        after.push(three[drop]);
        *slot = cache.estimate(&retained(three, drop), &after, stage, iterations)?;
    }

    let mut index = 0;
    for i in 1..3 {
        if equities[i] > equities[index] {
            index = i;
        }
    }

    log::debug!(
        "discard {} from {:?} on {:?}: equities {:.3?}",
        three[index],
        three,
        board,
        equities
    );
    Ok(DiscardChoice { index, equities })
}

// ── Tests ───────────────────────────────────────────────────────────
