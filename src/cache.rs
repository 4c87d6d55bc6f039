//! Titan Discard Engine — Equity Cache
//!
//! Memoizes simulator output per decision session. Keys are
//!
//! ```text
//! (hand mask, board mask, stage, bucketed iterations)
//! ```
//!
//! Card masks make hand and board order-independent. Iteration requests
//! are rounded into a few buckets so that nearby requests share a slot:
//!
//! | Requested | Simulated |
//! |-----------|-----------|
//! | ≤ 45      | 40        |
//! | ≤ 70      | 60        |
//! | ≤ 100     | 90        |
//! | larger    | 120       |
//!
//! Entries never expire individually; the whole map is dropped every N-th
//! round to bound memory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::deck::CardSet;
use crate::equity::EquitySource;
use crate::error::{EngineError, Result};

// ── Iteration Buckets ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStep {
    /// Largest request that falls in this bucket.
    pub up_to: u32,
    /// Iterations actually simulated for the bucket.
    pub iterations: u32,
}

/// Ordered bucket table. The last step also takes every request above
/// its `up_to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IterationBuckets(Vec<BucketStep>);

impl Default for IterationBuckets {
    fn default() -> Self {
        IterationBuckets(vec![
            BucketStep { up_to: 45, iterations: 40 },
            BucketStep { up_to: 70, iterations: 60 },
            BucketStep { up_to: 100, iterations: 90 },
            BucketStep { up_to: u32::MAX, iterations: 120 },
        ])
    }
}

impl IterationBuckets {
    pub fn new(steps: Vec<BucketStep>) -> Result<Self> {
        let buckets = IterationBuckets(steps);
        buckets.validate()?;
        Ok(buckets)
    }

    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(EngineError::Config("iteration buckets must not be empty".into()));
        }
        if self.0.iter().any(|s| s.iterations == 0) {
            return Err(EngineError::Config("bucket iterations must be positive".into()));
        }
        if self.0.windows(2).any(|w| w[0].up_to >= w[1].up_to) {
            return Err(EngineError::Config("bucket bounds must be strictly ascending".into()));
        }
        Ok(())
    }

    /// Simulated iteration count for a request.
    pub fn bucket(&self, requested: u32) -> u32 {
        self.0
            .iter()
            .find(|s| requested <= s.up_to)
            .or_else(|| self.0.last())
            .map_or(requested, |s| s.iterations)
    }

    pub fn steps(&self) -> &[BucketStep] {
        &self.0
    }
}

// ── Cache ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hand: u64,
    board: u64,
    stage: u8,
    iterations: u32,
}

impl CacheKey {
    /// Canonical key; fails on any card repeated across hand and board.
    pub fn new(hand: &[Card], board: &[Card], stage: u8, iterations: u32) -> Result<Self> {
        let hand_set = CardSet::from_cards(hand)?;
        let board_set = CardSet::from_cards(board)?;
        if let Some(card) = hand.iter().copied().find(|&c| board_set.contains(c)) {
            return Err(EngineError::DuplicateCard(card));
        }
        Ok(CacheKey {
            hand: hand_set.bits(),
            board: board_set.bits(),
            stage,
            iterations,
        })
    }
}

#[derive(Debug)]
pub struct EquityCache<S> {
    source: S,
    buckets: IterationBuckets,
    clear_every: u32,
    entries: HashMap<CacheKey, f64>,
    hits: u64,
    misses: u64,
}

impl<S: EquitySource> EquityCache<S> {
    pub fn new(source: S, buckets: IterationBuckets, clear_every: u32) -> Self {
        Self {
            source,
            buckets,
            clear_every,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached equity of `hand` on `board`. A miss simulates with the
    /// bucket's iteration count, not the requested one.
    pub fn estimate(&mut self, hand: &[Card], board: &[Card], stage: u8, iterations: u32) -> Result<f64> {
        if iterations == 0 {
            return Err(EngineError::ZeroIterations);
        }
        let sims = self.buckets.bucket(iterations);
        let key = CacheKey::new(hand, board, stage, sims)?;

        if let Some(&equity) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(equity);
        }

        self.misses += 1;
        let equity = self.source.equity(hand, board, sims)?;
        log::debug!(
            "cache miss: {:?} | {:?} stage {} ({} -> {} sims) = {:.3}",
            hand,
            board,
            stage,
            iterations,
            sims,
            equity
        );
        self.entries.insert(key, equity);
        Ok(equity)
    }

    /// Round hook: clears everything every `clear_every`-th round.
    /// Returns whether a clear happened.
    pub fn on_new_round(&mut self, round_num: u32) -> bool {
        if self.clear_every == 0 || round_num % self.clear_every != 0 {
            return false;
        }
        log::debug!(
            "round {}: clearing {} cached equities ({} hits / {} misses)",
            round_num,
            self.entries.len(),
            self.hits,
            self.misses
        );
        self.clear();
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn buckets(&self) -> &IterationBuckets {
        &self.buckets
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use crate::equity::MonteCarlo;

    /// Real simulator that records every call it receives.
    struct Counting {
        inner: MonteCarlo,
        calls: Vec<u32>,
    }

    impl Counting {
        fn new(seed: u64) -> Self {
            Self {
                inner: MonteCarlo::seeded(seed),
                calls: Vec::new(),
            }
        }
    }

    impl EquitySource for Counting {
        fn equity(&mut self, hand: &[Card], board: &[Card], iterations: u32) -> Result<f64> {
            self.calls.push(iterations);
            self.inner.equity(hand, board, iterations)
        }
    }

    fn cache() -> EquityCache<Counting> {
        EquityCache::new(Counting::new(42), IterationBuckets::default(), 10)
    }

    #[test]
    fn test_default_buckets() {
        let b = IterationBuckets::default();
        assert_eq!(b.bucket(1), 40);
        assert_eq!(b.bucket(40), 40);
        assert_eq!(b.bucket(45), 40);
        assert_eq!(b.bucket(46), 60);
        assert_eq!(b.bucket(70), 60);
        assert_eq!(b.bucket(90), 90);
        assert_eq!(b.bucket(101), 120);
        assert_eq!(b.bucket(5000), 120);
    }

    #[test]
    fn test_last_bucket_catches_overflow() {
        let b = IterationBuckets::new(vec![
            BucketStep { up_to: 45, iterations: 40 },
            BucketStep { up_to: 4000, iterations: 4000 },
        ])
        .unwrap();
        assert_eq!(b.bucket(4000), 4000);
        assert_eq!(b.bucket(9000), 4000);
    }

    #[test]
    fn test_bucket_validation() {
        assert!(IterationBuckets::new(vec![]).is_err());
        assert!(IterationBuckets::new(vec![BucketStep { up_to: 10, iterations: 0 }]).is_err());
        let unordered = vec![
            BucketStep { up_to: 70, iterations: 60 },
            BucketStep { up_to: 45, iterations: 40 },
        ];
        assert!(matches!(IterationBuckets::new(unordered), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_hit_is_bit_identical_without_resimulating() {
        let mut cache = cache();
        let hand = parse_cards(["Ac", "Kd"]).unwrap();
        let board = parse_cards(["7h", "2s"]).unwrap();

        let first = cache.estimate(&hand, &board, 1, 60).unwrap();
        let second = cache.estimate(&hand, &board, 1, 60).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(cache.source().calls, vec![60], "second query must not simulate");
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn test_key_ignores_card_order() {
        let mut cache = cache();
        let first = cache
            .estimate(&parse_cards(["Ac", "Kd"]).unwrap(), &parse_cards(["7h", "2s", "9c"]).unwrap(), 2, 90)
            .unwrap();
        let permuted = cache
            .estimate(&parse_cards(["Kd", "Ac"]).unwrap(), &parse_cards(["9c", "7h", "2s"]).unwrap(), 2, 90)
            .unwrap();
        assert_eq!(first.to_bits(), permuted.to_bits());
        assert_eq!(cache.source().calls.len(), 1);
    }

    #[test]
    fn test_nearby_requests_share_bucket() {
        let mut cache = cache();
        let hand = parse_cards(["Qs", "Qh"]).unwrap();
        let a = cache.estimate(&hand, &[], 0, 40).unwrap();
        let b = cache.estimate(&hand, &[], 0, 43).unwrap();
        let c = cache.estimate(&hand, &[], 0, 45).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
        assert_eq!(a.to_bits(), c.to_bits());
        assert_eq!(cache.source().calls, vec![40]);

        cache.estimate(&hand, &[], 0, 46).unwrap();
        assert_eq!(cache.source().calls, vec![40, 60]);
    }

    #[test]
    fn test_stage_is_part_of_key() {
        let mut cache = cache();
        let hand = parse_cards(["Jc", "Tc"]).unwrap();
        cache.estimate(&hand, &[], 0, 40).unwrap();
        cache.estimate(&hand, &[], 1, 40).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_round_cadence_clears() {
        let mut cache = cache();
        let hand = parse_cards(["5c", "5d"]).unwrap();
        cache.estimate(&hand, &[], 0, 40).unwrap();

        assert!(!cache.on_new_round(9));
        assert_eq!(cache.len(), 1);
        assert!(cache.on_new_round(10));
        assert!(cache.is_empty());

        cache.estimate(&hand, &[], 0, 40).unwrap();
        assert_eq!(cache.source().calls.len(), 2, "cleared entries are recomputed");
    }

    #[test]
    fn test_duplicates_rejected_before_simulating() {
        let mut cache = cache();
        let hand = parse_cards(["Ac", "Kd"]).unwrap();
        let board = parse_cards(["Kd", "2s"]).unwrap();
        let err = cache.estimate(&hand, &board, 0, 40).unwrap_err();
        assert_eq!(err, EngineError::DuplicateCard("Kd".parse().unwrap()));
        assert!(cache.source().calls.is_empty());
        assert_eq!(cache.estimate(&hand, &[], 0, 0), Err(EngineError::ZeroIterations));
    }
}
