//! Titan Discard Engine — Deck
//!
//! Card sets are a 52-bit mask (bit `id` set = card present). The mask is
//! order-independent, which also makes it the canonical cache key form.

use crate::card::Card;
use crate::error::{EngineError, Result};

pub const DECK_SIZE: usize = 52;

const FULL_MASK: u64 = (1u64 << DECK_SIZE) - 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardSet(u64);

impl CardSet {
    pub fn new() -> CardSet {
        CardSet(0)
    }

    pub fn full() -> CardSet {
        CardSet(FULL_MASK)
    }

    /// Build a set, rejecting any card seen twice.
    pub fn from_cards(cards: &[Card]) -> Result<CardSet> {
        let mut set = CardSet::new();
        set.extend_unique(cards)?;
        Ok(set)
    }

    /// Insert a card. Returns `false` if it was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = self.0 & card.mask() == 0;
        self.0 |= card.mask();
        fresh
    }

    /// Insert every card, failing on the first duplicate.
    pub fn extend_unique(&mut self, cards: &[Card]) -> Result<()> {
        for &card in cards {
            if !self.insert(card) {
                return Err(EngineError::DuplicateCard(card));
            }
        }
        Ok(())
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & card.mask() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Cards in ID order.
    pub fn iter(&self) -> impl Iterator<Item = Card> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Card::from_id(id))
        })
    }

    pub fn complement(&self) -> CardSet {
        CardSet(!self.0 & FULL_MASK)
    }
}

/// All 52 cards in ID order.
pub fn full_deck() -> Vec<Card> {
    CardSet::full().iter().collect()
}

/// The unseen deck: everything not in `used`.
pub fn remaining(used: &CardSet) -> Vec<Card> {
    used.complement().iter().collect()
}

// ── Tests ───────────────────────────────────────────────────────────
