//! Titan Discard Engine — Card Model
//!
//! ## Card Encoding
//!
//! Each card is an ID 0-51, the same layout the protocol layer uses:
//!   - `rank = (id >> 2) + 2`  (2..=14, A = 14)
//!   - `suit = id & 3`         (0=♣, 1=♦, 2=♥, 3=♠)
//!
//! Tokens are two characters: a rank from `23456789TJQKA` followed by a
//! suit from `cdhs`, e.g. `"Ah"`, `"Tc"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const RANK_CHARS: &[u8; 13] = b"23456789TJQKA";
const SUIT_CHARS: &[u8; 4] = b"cdhs";

/// Lowest and highest rank values.
pub const MIN_RANK: u8 = 2;
pub const ACE: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn from_char(c: char) -> Option<Suit> {
        SUIT_CHARS
            .iter()
            .position(|&s| s as char == c)
            .map(|i| Suit::ALL[i])
    }

    pub fn to_char(self) -> char {
        SUIT_CHARS[self as usize] as char
    }
}

/// A single playing card. Equality is by rank and suit; ordering is by
/// rank first, suit second.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card(u8);

impl Card {
    /// Build a card from a rank in `2..=14` and a suit.
    ///
    /// Returns `None` for ranks outside that range.
    pub fn new(rank: u8, suit: Suit) -> Option<Card> {
        if !(MIN_RANK..=ACE).contains(&rank) {
            return None;
        }
        Some(Card((rank - MIN_RANK) * 4 + suit as u8))
    }

    /// Build a card from its dense ID.
    pub(crate) fn from_id(id: u8) -> Card {
        debug_assert!(id < 52, "card id {id} out of range");
        Card(id)
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn rank(self) -> u8 {
        (self.0 >> 2) + MIN_RANK
    }

    #[inline]
    pub fn suit(self) -> Suit {
        Suit::ALL[(self.0 & 3) as usize]
    }

    /// Single-bit mask for set membership.
    #[inline]
    pub fn mask(self) -> u64 {
        1u64 << self.0
    }
}

pub fn rank_from_char(c: char) -> Option<u8> {
    RANK_CHARS
        .iter()
        .position(|&r| r as char == c)
        .map(|i| i as u8 + MIN_RANK)
}

pub fn rank_to_char(rank: u8) -> char {
    RANK_CHARS[(rank - MIN_RANK) as usize] as char
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let (r, s) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err(ParseError::Length(token.to_string())),
        };
        let rank = rank_from_char(r).ok_or_else(|| ParseError::Rank {
            token: token.to_string(),
            rank: r,
        })?;
        let suit = Suit::from_char(s).ok_or_else(|| ParseError::Suit {
            token: token.to_string(),
            suit: s,
        })?;
        Ok(Card((rank - MIN_RANK) * 4 + suit as u8))
    }
}

impl TryFrom<String> for Card {
    type Error = ParseError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_to_char(self.rank()), self.suit().to_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Parse a list of protocol tokens, failing on the first bad one.
pub fn parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|t| t.as_ref().parse()).collect()
}

// ── Tests ───────────────────────────────────────────────────────────
