//! Titan Discard Engine — Monte Carlo Equity
//!
//! Heads-up equity under the discard variant's showdown rules:
//!
//! 1. Shuffle only the part of the unseen deck an iteration consumes
//! 2. Deal the opponent three cards and reduce them to two (`Retention`)
//! 3. Run the board out to six cards
//! 4. Compare best five-card hands from 2 kept + 6 board
//!
//! Wins score two half-points, ties one. Estimate = half-points / (2 × sims).
//!
//! With `workers > 1` the iterations are split across rayon workers, each
//! with its own Xoshiro generator seeded from the instance generator, and
//! the half-point counts are summed.

use std::cmp::Ordering;

use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::card::Card;
use crate::deck::{self, CardSet};
use crate::error::{EngineError, Result};
use crate::retention::{BestMadeHand, Retention};
use crate::showdown;

/// Public board size at showdown.
pub const BOARD_TARGET: usize = 6;

/// Largest board the simulator accepts: a full board plus one discard.
pub const MAX_BOARD: usize = BOARD_TARGET + 1;

const OPPONENT_CARDS: usize = 3;

/// Anything that can turn (hand, board, iterations) into an equity.
pub trait EquitySource {
    fn equity(&mut self, hand: &[Card], board: &[Card], iterations: u32) -> Result<f64>;
}

/// Monte Carlo simulator owning its generator and opponent model.
#[derive(Debug, Clone)]
pub struct MonteCarlo<R = Xoshiro256PlusPlus, M = BestMadeHand> {
    rng: R,
    model: M,
    workers: usize,
}

impl MonteCarlo {
    /// Deterministic simulator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Xoshiro256PlusPlus::seed_from_u64(seed), BestMadeHand)
    }

    /// Simulator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(Xoshiro256PlusPlus::from_entropy(), BestMadeHand)
    }
}

impl<R: Rng, M: Retention + Sync> MonteCarlo<R, M> {
    pub fn with_rng(rng: R, model: M) -> Self {
        Self { rng, model, workers: 1 }
    }

    /// Split sampling across `workers` rayon tasks (1 = sequential).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    fn run(&mut self, deal: &Deal<'_>, iterations: u32) -> u64 {
        if self.workers == 1 {
            let mut deck = deal.deck.clone();
            return sample(deal, &mut deck, iterations, &mut self.rng, &self.model);
        }

        let chunks = split(iterations, self.workers);
        let seeds: Vec<u64> = chunks.iter().map(|_| self.rng.gen()).collect();
        let model = &self.model;

        chunks
            .into_par_iter()
            .zip(seeds)
            .map(|(sims, seed)| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                let mut deck = deal.deck.clone();
                sample(deal, &mut deck, sims, &mut rng, model)
            })
            .sum()
    }
}

impl<R: Rng, M: Retention + Sync> EquitySource for MonteCarlo<R, M> {
    fn equity(&mut self, hand: &[Card], board: &[Card], iterations: u32) -> Result<f64> {
        if iterations == 0 {
            return Err(EngineError::ZeroIterations);
        }
        let deal = Deal::prepare(hand, board, &self.model)?;
        let points = self.run(&deal, iterations);
        let equity = points as f64 / (2.0 * iterations as f64);

        log::trace!(
            "equity {:?} | {:?} over {} sims = {:.4}",
            hand,
            board,
            iterations,
            equity
        );
        Ok(equity)
    }
}

// ── Simulation ──────────────────────────────────────────────────────

/// Per-query state shared by every iteration.
struct Deal<'a> {
    /// Our two showdown cards.
    own: [Card; 2],
    board: &'a [Card],
    /// Unseen cards.
    deck: Vec<Card>,
    /// Board cards still to come.
    runout: usize,
}

impl<'a> Deal<'a> {
    fn prepare<M: Retention>(hand: &[Card], board: &'a [Card], model: &M) -> Result<Self> {
        EngineError::check_count("hand", hand.len(), 2, 3)?;
        EngineError::check_count("board", board.len(), 0, MAX_BOARD)?;

        let mut used = CardSet::from_cards(hand)?;
        used.extend_unique(board)?;

        let deck = deck::remaining(&used);
        let runout = BOARD_TARGET.saturating_sub(board.len());
        let needed = OPPONENT_CARDS + runout;
        if deck.len() < needed {
            return Err(EngineError::DeckExhausted {
                needed,
                available: deck.len(),
            });
        }

        // Our own retention depends only on the known board, so it is
        // fixed for the whole run.
        let own = match hand {
            &[a, b, c] => model.keep([a, b, c], board),
            &[a, b] => [a, b],
            _ => unreachable!("hand size checked above"),
        };

        Ok(Self {
            own,
            board,
            deck,
            runout,
        })
    }
}

fn sample<R: Rng, M: Retention>(
    deal: &Deal<'_>,
    deck: &mut [Card],
    sims: u32,
    rng: &mut R,
    model: &M,
) -> u64 {
    let needed = OPPONENT_CARDS + deal.runout;
    let known = deal.board.len();
    let full = known + deal.runout;

    let mut board = [Card::from_id(0); MAX_BOARD];
    board[..known].copy_from_slice(deal.board);

    let mut points: u64 = 0;
    for _ in 0..sims {
        // Fisher-Yates partial shuffle (only shuffle what we need)
        let deck_len = deck.len();
        for k in 0..needed {
            let swap_idx = rng.gen_range(k..deck_len);
            deck.swap(k, swap_idx);
        }

        let villain = model.keep([deck[0], deck[1], deck[2]], deal.board);
        board[known..full].copy_from_slice(&deck[OPPONENT_CARDS..needed]);

        let hero_rank = showdown::best_with_board(&deal.own, &board[..full]);
        let villain_rank = showdown::best_with_board(&villain, &board[..full]);

        points += match hero_rank.cmp(&villain_rank) {
            Ordering::Greater => 2,
            Ordering::Equal => 1,
            Ordering::Less => 0,
        };
    }
    points
}

/// Split `total` into `parts` near-equal chunks, dropping empty ones.
fn split(total: u32, parts: usize) -> Vec<u32> {
    let parts = parts as u32;
    let base = total / parts;
    let extra = total % parts;
    (0..parts)
        .map(|i| base + u32::from(i < extra))
        .filter(|&n| n > 0)
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;

    /// Equity of A♣A♦ on an empty board under the best-2-of-3 opponent.
    const ACES_EQUITY: f64 = 0.78;

    #[test]
    fn test_aces_converge() {
        let hand = parse_cards(["Ac", "Ad"]).unwrap();
        let mut sim = MonteCarlo::seeded(2024);

        let rough = sim.equity(&hand, &[], 40).unwrap();
        assert!((0.0..=1.0).contains(&rough));

        let equity = sim.equity(&hand, &[], 4000).unwrap();
        assert!(
            (equity - ACES_EQUITY).abs() < 0.03,
            "AA equity should be near {:.2}, got {:.3}",
            ACES_EQUITY,
            equity
        );
    }

    #[test]
    fn test_same_seed_same_estimate() {
        let hand = parse_cards(["9s", "8s"]).unwrap();
        let board = parse_cards(["7s", "2d", "Kh"]).unwrap();
        let a = MonteCarlo::seeded(11).equity(&hand, &board, 300).unwrap();
        let b = MonteCarlo::seeded(11).equity(&hand, &board, 300).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_locked_nuts_always_win() {
        let hand = parse_cards(["Ah", "Kh"]).unwrap();
        let board = parse_cards(["Qh", "Jh", "Th", "2c", "3d", "4s"]).unwrap();
        let equity = MonteCarlo::seeded(1).equity(&hand, &board, 200).unwrap();
        assert_eq!(equity, 1.0);
    }

    #[test]
    fn test_board_royal_always_splits() {
        let hand = parse_cards(["3c", "4d"]).unwrap();
        let board = parse_cards(["Ah", "Kh", "Qh", "Jh", "Th", "2c"]).unwrap();
        let equity = MonteCarlo::seeded(1).equity(&hand, &board, 200).unwrap();
        assert_eq!(equity, 0.5);
    }

    #[test]
    fn test_three_card_hand_is_reduced() {
        // Keeping A♥K♥ makes a royal flush on this board.
        let hand = parse_cards(["Ah", "Kh", "2c"]).unwrap();
        let board = parse_cards(["Qh", "Jh", "Th", "3d", "4s", "5s"]).unwrap();
        let equity = MonteCarlo::seeded(5).equity(&hand, &board, 100).unwrap();
        assert_eq!(equity, 1.0);
    }

    #[test]
    fn test_discard_on_full_board_runs() {
        let hand = parse_cards(["Ah", "Ad"]).unwrap();
        let board = parse_cards(["2c", "7d", "9h", "Js", "3c", "Kd", "As"]).unwrap();
        let equity = MonteCarlo::seeded(3).equity(&hand, &board, 100).unwrap();
        assert!(equity > 0.75, "set of aces should dominate, got {:.3}", equity);
    }

    #[test]
    fn test_parallel_workers() {
        let hand = parse_cards(["Ac", "Ad"]).unwrap();
        let run = || {
            MonteCarlo::seeded(77)
                .with_workers(4)
                .equity(&hand, &[], 4000)
                .unwrap()
        };
        let first = run();
        assert_eq!(first.to_bits(), run().to_bits(), "fixed seed and worker count are deterministic");
        assert!((first - ACES_EQUITY).abs() < 0.03, "parallel AA equity off: {:.3}", first);
    }

    #[test]
    fn test_custom_opponent_model() {
        /// Opponent who never looks at the board.
        struct FirstTwo;
        impl Retention for FirstTwo {
            fn keep(&self, three: [Card; 3], _board: &[Card]) -> [Card; 2] {
                [three[0], three[1]]
            }
        }

        let hand = parse_cards(["Ah", "Kh"]).unwrap();
        let board = parse_cards(["Qh", "Jh", "Th", "2c", "3d", "4s"]).unwrap();
        let mut sim = MonteCarlo::with_rng(Xoshiro256PlusPlus::seed_from_u64(9), FirstTwo);
        assert_eq!(sim.equity(&hand, &board, 50).unwrap(), 1.0);
    }

    #[test]
    fn test_rejects_bad_queries() {
        let mut sim = MonteCarlo::seeded(0);
        let one = parse_cards(["Ac"]).unwrap();
        assert!(matches!(sim.equity(&one, &[], 10), Err(EngineError::CardCount { what: "hand", .. })));

        let hand = parse_cards(["Ac", "Kd"]).unwrap();
        let dup_board = parse_cards(["Ac", "2d"]).unwrap();
        assert!(matches!(sim.equity(&hand, &dup_board, 10), Err(EngineError::DuplicateCard(_))));

        let big_board = parse_cards(["2c", "3c", "4c", "5c", "6c", "7c", "8c", "9c"]).unwrap();
        assert!(matches!(sim.equity(&hand, &big_board, 10), Err(EngineError::CardCount { what: "board", .. })));

        assert_eq!(sim.equity(&hand, &[], 0), Err(EngineError::ZeroIterations));
    }

    #[test]
    fn test_split_chunks() {
        assert_eq!(split(10, 4), vec![3, 3, 2, 2]);
        assert_eq!(split(2, 4), vec![1, 1]);
        assert_eq!(split(9, 1), vec![9]);
    }
}
