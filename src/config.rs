//! Titan Discard Engine — Configuration
//!
//! Everything tunable about a decision session. Loaded from JSON with
//! serde; every field has a default so partial documents are fine:
//!
//! ```json
//! { "clear_every_rounds": 20, "workers": 4 }
//! ```

use serde::{Deserialize, Serialize};

use crate::cache::IterationBuckets;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cache iteration buckets.
    pub buckets: IterationBuckets,
    /// Clear the equity cache every N rounds (0 = never).
    pub clear_every_rounds: u32,
    /// Stage recorded for post-discard queries.
    pub discard_stage: u8,
    /// Iteration counts by pot size and board depth.
    pub schedule: IterationSchedule,
    /// Rayon workers per simulation (1 = sequential).
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buckets: IterationBuckets::default(),
            clear_every_rounds: 10,
            discard_stage: 1,
            schedule: IterationSchedule::default(),
            workers: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.buckets.validate()?;
        self.schedule.validate()?;
        if self.workers == 0 {
            return Err(EngineError::Config("workers must be at least 1".into()));
        }
        Ok(())
    }
}

/// Threshold step: at or above `at`, use `iterations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub at: u32,
    pub iterations: u32,
}

/// More iterations when the pot is bigger or the board is deeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationSchedule {
    pub base: u32,
    /// Pot-size tiers, ascending; the highest reached tier replaces `base`.
    pub pot: Vec<Tier>,
    /// Board-length floors, ascending; each reached tier raises the count.
    pub board: Vec<Tier>,
    pub discard: u32,
    /// Discard iterations once the board holds `discard_deep.at` cards.
    pub discard_deep: Tier,
}

impl Default for IterationSchedule {
    fn default() -> Self {
        Self {
            base: 50,
            pot: vec![Tier { at: 80, iterations: 70 }, Tier { at: 200, iterations: 90 }],
            board: vec![Tier { at: 4, iterations: 80 }, Tier { at: 5, iterations: 110 }],
            discard: 50,
            discard_deep: Tier { at: 2, iterations: 60 },
        }
    }
}

impl IterationSchedule {
    pub fn validate(&self) -> Result<()> {
        if self.base == 0 || self.discard == 0 || self.discard_deep.iterations == 0 {
            return Err(EngineError::Config("scheduled iterations must be positive".into()));
        }
        for (name, tiers) in [("pot", &self.pot), ("board", &self.board)] {
            if tiers.iter().any(|t| t.iterations == 0) {
                return Err(EngineError::Config(format!("{name} tier iterations must be positive")));
            }
            if tiers.windows(2).any(|w| w[0].at >= w[1].at) {
                return Err(EngineError::Config(format!("{name} tiers must be strictly ascending")));
            }
        }
        Ok(())
    }

    /// Iterations for a betting decision.
    pub fn iterations_for(&self, pot: u32, board_len: usize) -> u32 {
        let mut iterations = self
            .pot
            .iter()
            .rev()
            .find(|t| pot >= t.at)
            .map_or(self.base, |t| t.iterations);

        for tier in &self.board {
            if board_len >= tier.at as usize {
                iterations = iterations.max(tier.iterations);
            }
        }
        iterations
    }

    /// Iterations for scoring each discard candidate.
    pub fn discard_iterations(&self, board_len: usize) -> u32 {
        if board_len >= self.discard_deep.at as usize {
            self.discard_deep.iterations
        } else {
            self.discard
        }
    }
}

/// Default schedule as a free function.
pub fn iterations_for(pot: u32, board_len: usize) -> u32 {
    IterationSchedule::default().iterations_for(pot, board_len)
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        assert_eq!(iterations_for(0, 0), 50);
        assert_eq!(iterations_for(79, 3), 50);
        assert_eq!(iterations_for(80, 3), 70);
        assert_eq!(iterations_for(250, 2), 90);
        assert_eq!(iterations_for(10, 4), 80);
        assert_eq!(iterations_for(250, 4), 90);
        assert_eq!(iterations_for(10, 5), 110);
        assert_eq!(iterations_for(500, 6), 110);
    }

    #[test]
    fn test_discard_iterations() {
        let schedule = IterationSchedule::default();
        assert_eq!(schedule.discard_iterations(0), 50);
        assert_eq!(schedule.discard_iterations(1), 50);
        assert_eq!(schedule.discard_iterations(2), 60);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "clear_every_rounds": 20, "workers": 4 }"#).unwrap();
        assert_eq!(config.clear_every_rounds, 20);
        assert_eq!(config.workers, 4);
        assert_eq!(config.buckets, IterationBuckets::default());
        assert_eq!(config.schedule, IterationSchedule::default());
        assert_eq!(config.discard_stage, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_custom_buckets_from_json() {
        let config = EngineConfig::from_json(
            r#"{ "buckets": [ { "up_to": 45, "iterations": 40 }, { "up_to": 4000, "iterations": 4000 } ] }"#,
        )
        .unwrap();
        assert_eq!(config.buckets.bucket(3000), 4000);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(EngineConfig::from_json("{ not json"), Err(EngineError::Config(_))));
        assert!(matches!(EngineConfig::from_json(r#"{ "workers": 0 }"#), Err(EngineError::Config(_))));
        assert!(EngineConfig::from_json(r#"{ "buckets": [] }"#).is_err());
        assert!(EngineConfig::from_json(
            r#"{ "schedule": { "pot": [ { "at": 200, "iterations": 90 }, { "at": 80, "iterations": 70 } ] } }"#
        )
        .is_err());
    }
}
