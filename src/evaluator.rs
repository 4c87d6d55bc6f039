//! Titan Discard Engine — 5-Card Hand Classifier
//!
//! Count-based classifier: tally ranks and suits, detect flush and
//! straight, then fall back to rank multiplicities.
//!
//! ## Hand Ranking (higher = better)
//!
//! | Category | Hand Type        | Tie-break payload              |
//! |----------|------------------|--------------------------------|
//! | 8        | Straight Flush   | high card                      |
//! | 7        | Four of a Kind   | quad rank, kicker              |
//! | 6        | Full House       | trips rank, pair rank          |
//! | 5        | Flush            | all five ranks, descending     |
//! | 4        | Straight         | high card (wheel = 5)          |
//! | 3        | Three of a Kind  | trips rank, kickers descending |
//! | 2        | Two Pair         | high pair, low pair, kicker    |
//! | 1        | One Pair         | pair rank, kickers descending  |
//! | 0        | High Card        | all five ranks, descending     |
//!
//! Every multiplicity category's payload is simply the distinct ranks
//! ordered by (count, rank) descending, which is how it is built below.

use std::fmt;

use serde::Serialize;

use crate::card::{Card, ACE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// Totally ordered hand strength. Field order matters: the derived `Ord`
/// compares category first, then the tie-break ranks left to right.
/// Unused tie-break slots are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HandRank {
    category: Category,
    tiebreak: [u8; 5],
}

impl HandRank {
    /// Lowest possible value; anything real compares above it.
    pub const MIN: HandRank = HandRank {
        category: Category::HighCard,
        tiebreak: [0; 5],
    };

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tiebreak(&self) -> &[u8; 5] {
        &self.tiebreak
    }

    /// Leading tie-break rank: the straight's high card, the quad rank, etc.
    pub fn high(&self) -> u8 {
        self.tiebreak[0]
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.ranks())
    }
}

impl HandRank {
    fn ranks(&self) -> Vec<u8> {
        self.tiebreak.iter().copied().take_while(|&r| r != 0).collect()
    }
}

// ── Core Classifier ─────────────────────────────────────────────────

/// Classify exactly five cards.
#[inline]
pub fn eval5(cards: &[Card; 5]) -> HandRank {
    classify(cards)
}

/// Classify one to five cards.
///
/// Flushes and straights need all five cards; shorter hands (a retention
/// scored against a short board) rank by multiplicity alone.
pub fn classify(cards: &[Card]) -> HandRank {
    debug_assert!(!cards.is_empty() && cards.len() <= 5);

    let mut counts = [0u8; 15];
    let mut ranks = [0u8; 5];
    for (slot, card) in ranks.iter_mut().zip(cards) {
        *slot = card.rank();
        counts[card.rank() as usize] += 1;
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let full = cards.len() == 5;
    let is_flush = full && cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight_high = if full { straight_high(&ranks, &counts) } else { None };

    if let (true, Some(high)) = (is_flush, straight_high) {
        return HandRank {
            category: Category::StraightFlush,
            tiebreak: [high, 0, 0, 0, 0],
        };
    }

    // Distinct ranks ordered by (count, rank) descending.
    let mut groups = [(0u8, 0u8); 5];
    let mut n_groups = 0;
    for rank in (2..=ACE).rev() {
        if counts[rank as usize] > 0 {
            groups[n_groups] = (counts[rank as usize], rank);
            n_groups += 1;
        }
    }
    let groups = &mut groups[..n_groups];
    groups.sort_by(|a, b| b.cmp(a));

    let mut grouped = [0u8; 5];
    for (slot, &(_, rank)) in grouped.iter_mut().zip(groups.iter()) {
        *slot = rank;
    }

    let top = groups[0].0;
    let second = groups.get(1).map_or(0, |g| g.0);

    let (category, tiebreak) = if top == 4 {
        (Category::FourOfAKind, grouped)
    } else if top == 3 && second == 2 {
        (Category::FullHouse, grouped)
    } else if is_flush {
        (Category::Flush, ranks)
    } else if let Some(high) = straight_high {
        (Category::Straight, [high, 0, 0, 0, 0])
    } else if top == 3 {
        (Category::ThreeOfAKind, grouped)
    } else if top == 2 && second == 2 {
        (Category::TwoPair, grouped)
    } else if top == 2 {
        (Category::OnePair, grouped)
    } else {
        (Category::HighCard, ranks)
    };

    HandRank { category, tiebreak }
}

/// High card of a five-distinct-rank straight, treating A-2-3-4-5 as 5-high.
fn straight_high(ranks: &[u8; 5], counts: &[u8; 15]) -> Option<u8> {
    if counts.iter().any(|&c| c > 1) {
        return None;
    }
    if ranks[0] - ranks[4] == 4 {
        return Some(ranks[0]);
    }
    if *ranks == [ACE, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

// ── Tests ───────────────────────────────────────────────────────────
