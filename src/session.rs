//! Titan Discard Engine — Decision Session
//!
//! One `Session` per bot instance. It owns the equity cache (and through
//! it the simulator and its generator), so two sessions never share state
//! and tests get isolated, seedable instances.
//!
//! ## Call Flow
//!
//! ```text
//! betting policy ──► equity_for / estimate_equity ──► EquityCache ──► MonteCarlo
//! discard action ──► select_discard ──► (3 × EquityCache) ──► arg-max
//! round start    ──► new_round ──► periodic cache clear
//! ```

use crate::cache::EquityCache;
use crate::card::Card;
use crate::config::EngineConfig;
use crate::discard::{self, DiscardChoice};
use crate::equity::{EquitySource, MonteCarlo, BOARD_TARGET};
use crate::error::{EngineError, Result};

pub struct Session<S = MonteCarlo> {
    cache: EquityCache<S>,
    config: EngineConfig,
}

impl Session {
    /// Session with an entropy-seeded simulator.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let workers = config.workers;
        Self::with_source(config, MonteCarlo::from_entropy().with_workers(workers))
    }

    /// Deterministic session for a fixed seed.
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self> {
        let workers = config.workers;
        Self::with_source(config, MonteCarlo::seeded(seed).with_workers(workers))
    }
}

impl<S: EquitySource> Session<S> {
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self> {
        config.validate()?;
        let cache = EquityCache::new(source, config.buckets.clone(), config.clear_every_rounds);
        Ok(Self { cache, config })
    }

    /// Equity of 2 or 3 private cards on a 0..=6 card board. May be
    /// served from the cache.
    pub fn estimate_equity(&mut self, private: &[Card], board: &[Card], stage: u8, iterations: u32) -> Result<f64> {
        EngineError::check_count("private cards", private.len(), 2, 3)?;
        EngineError::check_count("board", board.len(), 0, BOARD_TARGET)?;
        self.cache.estimate(private, board, stage, iterations)
    }

    /// Equity with the iteration count picked from pot size and board depth.
    pub fn equity_for(&mut self, private: &[Card], board: &[Card], stage: u8, pot: u32) -> Result<f64> {
        let iterations = self.config.schedule.iterations_for(pot, board.len());
        self.estimate_equity(private, board, stage, iterations)
    }

    /// Index (0..3) of the private card to discard.
    pub fn select_discard(&mut self, private: &[Card], board: &[Card]) -> Result<usize> {
        Ok(self.discard_choice(private, board)?.index)
    }

    /// Post-discard equity of each candidate, in index order.
    pub fn discard_equities(&mut self, private: &[Card], board: &[Card]) -> Result<[f64; 3]> {
        Ok(self.discard_choice(private, board)?.equities)
    }

    pub fn discard_choice(&mut self, private: &[Card], board: &[Card]) -> Result<DiscardChoice> {
        let iterations = self.config.schedule.discard_iterations(board.len());
        discard::select_discard(&mut self.cache, private, board, self.config.discard_stage, iterations)
    }

    /// Round-start hook.
    pub fn new_round(&mut self, round_num: u32) {
        self.cache.on_new_round(round_num);
    }

    pub fn cache(&self) -> &EquityCache<S> {
        &self.cache
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

// ── Tests ───────────────────────────────────────────────────────────
