//! Titan Discard Engine — Errors
//!
//! Two layers: [`ParseError`] for malformed card tokens coming from the
//! engine protocol, and [`EngineError`] for everything the core rejects.
//! Nothing here is retried; an error aborts the current decision and the
//! caller falls back to a safe action.

use thiserror::Error;

use crate::card::Card;

/// A card token that does not name one of the 52 cards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("card token {0:?} must be exactly two characters")]
    Length(String),

    #[error("unknown rank {rank:?} in card token {token:?}")]
    Rank { token: String, rank: char },

    #[error("unknown suit {suit:?} in card token {token:?}")]
    Suit { token: String, suit: char },
}

/// Errors raised by the evaluator, simulator, cache and session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The same card was seen twice across hand, board and dead cards.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),

    #[error("{what} requires {min}..={max} cards, got {got}")]
    CardCount {
        what: &'static str,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("deck exhausted: need {needed} unseen cards, only {available} left")]
    DeckExhausted { needed: usize, available: usize },

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Check a card count against an inclusive range.
    pub(crate) fn check_count(what: &'static str, got: usize, min: usize, max: usize) -> Result<()> {
        if got < min || got > max {
            return Err(EngineError::CardCount { what, min, max, got });
        }
        Ok(())
    }
}
