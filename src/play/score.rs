use serde::{Deserialize, Serialize};

use crate::config::ScoreConfig;

/// Accuracy classification, tightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Excellent,
    Great,
    Good,
    Bad,
}

impl Tier {
    pub fn all() -> &'static [Tier] {
        &[Tier::Excellent, Tier::Great, Tier::Good, Tier::Bad]
    }

    /// Returns the index for this tier (for array indexing).
    pub fn index(self) -> usize {
        match self {
            Self::Excellent => 0,
            Self::Great => 1,
            Self::Good => 2,
            Self::Bad => 3,
        }
    }

    /// Returns true if this tier continues combo.
    pub fn continues_combo(self) -> bool {
        !matches!(self, Self::Bad)
    }

    /// Feedback text shown at the hit line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT!",
            Self::Great => "GREAT!",
            Self::Good => "GOOD",
            Self::Bad => "BAD",
        }
    }
}

/// Minimum score ratio for each star count, best first.
const STAR_THRESHOLDS: [(f64, u8); 4] = [(0.90, 5), (0.75, 4), (0.50, 3), (0.25, 2)];

/// Read-only score view for presentation and result output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub total_score: i64,
    pub excellent: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
    pub total_judged: u32,
    pub max_possible_score: i64,
    pub combo: u32,
    pub max_combo: u32,
    pub early: u32,
    pub late: u32,
    pub star_rating: u8,
}

/// Converts timing differences and misses into tiers, points and totals.
/// Knows nothing about the chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreEngine {
    config: ScoreConfig,
    total_score: i64,
    tier_counts: [u32; 4],
    total_judged: u32,
    combo: u32,
    max_combo: u32,
    early_count: u32,
    late_count: u32,
}

impl ScoreEngine {
    pub fn new(config: ScoreConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Tier for a timing difference, without recording anything.
    pub fn classify(&self, timing_diff: f64) -> Tier {
        let abs_diff = timing_diff.abs();
        if abs_diff <= self.config.excellent.bound {
            Tier::Excellent
        } else if abs_diff <= self.config.great.bound {
            Tier::Great
        } else if abs_diff <= self.config.good.bound {
            Tier::Good
        } else {
            Tier::Bad
        }
    }

    pub fn points(&self, tier: Tier) -> i32 {
        match tier {
            Tier::Excellent => self.config.excellent.points,
            Tier::Great => self.config.great.points,
            Tier::Good => self.config.good.points,
            Tier::Bad => self.config.bad_points,
        }
    }

    /// Record a judged hit and return its tier.
    pub fn record_hit(&mut self, timing_diff: f64) -> Tier {
        let tier = self.classify(timing_diff);
        self.apply(tier);

        // Excellent hits count as neither early nor late
        if tier != Tier::Excellent {
            if timing_diff < 0.0 {
                self.early_count += 1;
            } else if timing_diff > 0.0 {
                self.late_count += 1;
            }
        }
        tier
    }

    /// Record a missed note. Always scored as Bad.
    pub fn record_miss(&mut self) {
        self.apply(Tier::Bad);
    }

    fn apply(&mut self, tier: Tier) {
        self.tier_counts[tier.index()] += 1;
        self.total_score += i64::from(self.points(tier));
        self.total_judged += 1;

        if tier.continues_combo() {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        } else {
            self.combo = 0;
        }
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn count(&self, tier: Tier) -> u32 {
        self.tier_counts[tier.index()]
    }

    pub fn total_judged(&self) -> u32 {
        self.total_judged
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn early_count(&self) -> u32 {
        self.early_count
    }

    pub fn late_count(&self) -> u32 {
        self.late_count
    }

    /// Score if every judged note had been Excellent.
    pub fn max_possible_score(&self) -> i64 {
        i64::from(self.total_judged) * i64::from(self.config.excellent.points)
    }

    /// Achieved share of the maximum, or None before anything is judged.
    pub fn score_ratio(&self) -> Option<f64> {
        let max = self.max_possible_score();
        if self.total_judged == 0 || max <= 0 {
            return None;
        }
        Some(self.total_score as f64 / max as f64)
    }

    /// 0 stars before anything is judged, otherwise 1 to 5.
    pub fn star_rating(&self) -> u8 {
        let Some(ratio) = self.score_ratio() else {
            return 0;
        };
        STAR_THRESHOLDS
            .iter()
            .find(|(threshold, _)| ratio >= *threshold)
            .map_or(1, |&(_, stars)| stars)
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            total_score: self.total_score,
            excellent: self.count(Tier::Excellent),
            great: self.count(Tier::Great),
            good: self.count(Tier::Good),
            bad: self.count(Tier::Bad),
            total_judged: self.total_judged,
            max_possible_score: self.max_possible_score(),
            combo: self.combo,
            max_combo: self.max_combo,
            early: self.early_count,
            late: self.late_count,
            star_rating: self.star_rating(),
        }
    }

    /// Zero all counters and the score. The tier ladder is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScoreEngine {
        ScoreEngine::new(ScoreConfig::default())
    }

    #[test]
    fn classify_default_ladder() {
        let score = engine();
        assert_eq!(score.classify(0.0), Tier::Excellent);
        assert_eq!(score.classify(0.10), Tier::Excellent);
        assert_eq!(score.classify(-0.10), Tier::Excellent);
        assert_eq!(score.classify(0.11), Tier::Great);
        assert_eq!(score.classify(-0.25), Tier::Great);
        assert_eq!(score.classify(0.26), Tier::Good);
        assert_eq!(score.classify(0.50), Tier::Good);
        assert_eq!(score.classify(0.51), Tier::Bad);
    }

    #[test]
    fn record_hit_points() {
        let mut score = engine();
        assert_eq!(score.record_hit(0.05), Tier::Excellent);
        assert_eq!(score.total_score(), 10);
        assert_eq!(score.record_hit(0.3), Tier::Good);
        assert_eq!(score.total_score(), 12);
        assert_eq!(score.record_hit(0.9), Tier::Bad);
        assert_eq!(score.total_score(), 2);
        assert_eq!(score.total_judged(), 3);
    }

    #[test]
    fn record_miss_is_bad() {
        let mut score = engine();
        score.record_miss();
        assert_eq!(score.total_score(), -10);
        assert_eq!(score.count(Tier::Bad), 1);
        assert_eq!(score.total_judged(), 1);
    }

    #[test]
    fn star_rating_thresholds() {
        let mut score = engine();
        assert_eq!(score.star_rating(), 0);

        score.record_hit(0.0);
        assert_eq!(score.star_rating(), 5);

        score.record_miss();
        // (10 - 10) / 20 = 0%
        assert_eq!(score.star_rating(), 1);
    }

    #[test]
    fn star_rating_steps() {
        // 4 notes, max 40: 3 Excellent + 1 Great = 35 -> 87.5% -> 4 stars
        let mut score = engine();
        for _ in 0..3 {
            score.record_hit(0.0);
        }
        score.record_hit(0.2);
        assert_eq!(score.star_rating(), 4);

        // 2 Excellent + 2 Good = 24 / 40 = 60% -> 3 stars
        let mut score = engine();
        score.record_hit(0.0);
        score.record_hit(0.0);
        score.record_hit(0.4);
        score.record_hit(0.4);
        assert_eq!(score.star_rating(), 3);

        // 1 Excellent + 3 Good = 16 / 40 = 40% -> 2 stars
        let mut score = engine();
        score.record_hit(0.0);
        for _ in 0..3 {
            score.record_hit(0.4);
        }
        assert_eq!(score.star_rating(), 2);
    }

    #[test]
    fn negative_score_is_one_star() {
        let mut score = engine();
        score.record_miss();
        score.record_miss();
        assert_eq!(score.total_score(), -20);
        assert_eq!(score.star_rating(), 1);
    }

    #[test]
    fn combo_and_early_late() {
        let mut score = engine();
        score.record_hit(-0.2);
        score.record_hit(0.0);
        score.record_hit(0.3);
        assert_eq!(score.combo(), 3);
        assert_eq!(score.early_count(), 1);
        assert_eq!(score.late_count(), 1);

        score.record_miss();
        assert_eq!(score.combo(), 0);
        assert_eq!(score.max_combo(), 3);
    }

    #[test]
    fn reset_keeps_ladder() {
        let config = ScoreConfig {
            bad_points: -3,
            ..Default::default()
        };
        let mut score = ScoreEngine::new(config.clone());
        score.record_miss();
        score.reset();
        assert_eq!(score, ScoreEngine::new(config));
    }

    #[test]
    fn snapshot_reflects_counts() {
        let mut score = engine();
        score.record_hit(0.0);
        score.record_hit(0.2);
        score.record_miss();
        let snap = score.snapshot();
        assert_eq!(snap.total_score, 5);
        assert_eq!(snap.excellent, 1);
        assert_eq!(snap.great, 1);
        assert_eq!(snap.bad, 1);
        assert_eq!(snap.max_possible_score, 30);
        assert_eq!(snap.star_rating, 1);
    }
}
