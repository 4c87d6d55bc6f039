//! Titan Discard Engine — Entry Point
//!
//! Equity core for three-card discard hold'em: each player holds three
//! cards, discards one face up onto the board, and shows down the best
//! five of two kept cards plus a six-card board.
//!
//! ## Architecture
//!
//! ```text
//! betting policy / protocol layer (external)
//!     │
//!     ▼
//! lib.rs  ──────────────────────────  This file (entry point)
//!     ├── session.rs                 Decision session: owns cache + RNG
//!     ├── discard.rs                 Arg-max over the 3 possible discards
//!     ├── cache.rs                   Equity memo with iteration buckets
//!     ├── equity.rs                  Monte Carlo equity (rayon optional)
//!     ├── retention.rs               Best-2-of-3 opponent model
//!     ├── showdown.rs                Best 5 of n (n ≤ 9) search
//!     ├── evaluator.rs               5-card classifier
//!     ├── deck.rs / card.rs          Card tokens, ids, 52-bit sets
//!     ├── config.rs                  JSON config + iteration schedule
//!     └── heuristics.rs              Preflop points, wet-board test
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use titan_discard_engine::{parse_cards, EngineConfig, Session};
//!
//! titan_discard_engine::init();
//! let mut session = Session::new(EngineConfig::default())?;
//! let hand = parse_cards(["Ah", "Kh", "7c"])?;
//! let board = parse_cards(["Qh", "2d"])?;
//! let discard = session.select_discard(&hand, &board)?;
//! println!("discard {}", hand[discard]);
//! # Ok::<(), titan_discard_engine::EngineError>(())
//! ```

pub mod cache;
pub mod card;
pub mod config;
pub mod deck;
pub mod discard;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod heuristics;
pub mod retention;
pub mod session;
pub mod showdown;

pub use cache::{BucketStep, EquityCache, IterationBuckets};
pub use card::{parse_cards, Card, Suit};
pub use config::{iterations_for, EngineConfig, IterationSchedule};
pub use discard::DiscardChoice;
pub use equity::{EquitySource, MonteCarlo};
pub use error::{EngineError, ParseError};
pub use evaluator::{Category, HandRank};
pub use retention::{BestMadeHand, Retention};
pub use session::Session;
pub use showdown::evaluate_hand;

/// Install the logger. Safe to call more than once.
pub fn init() {
    env_logger::try_init().ok();
    log::info!("{} ready", version());
}

/// Return the engine version string.
pub fn version() -> String {
    format!("titan-discard-engine v{}", env!("CARGO_PKG_VERSION"))
}

/// Load a config from JSON and open a session with it.
pub fn session_from_json(json: &str) -> Result<Session, EngineError> {
    let config = EngineConfig::from_json(json)?;
    log::info!(
        "session: buckets {:?}, clear every {} rounds, {} worker(s)",
        config.buckets.steps(),
        config.clear_every_rounds,
        config.workers
    );
    Session::new(config)
}
