mod config;
mod policy;
mod rules;

pub use config::{ScoringConfig, ScoringConfigError};
pub use policy::RiskZone;
pub use rules::{RuleId, ScoreRule, BONUS_RULES, PENALTY_RULES};

use super::domain::{ApplicantProfile, ApplicantSubmission, ProfileError};
use rules::{tally, Adjustment};
use serde::{Deserialize, Serialize};

/// Stateless engine turning a model probability into the playground decision.
#[derive(Debug, Clone, Default)]
pub struct RiskScoringEngine {
    config: ScoringConfig,
}

impl RiskScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compose the final score for an already validated profile.
    ///
    /// Fails only when `raw_probability` is not a number in `[0, 1]`.
    pub fn compute_score(
        &self,
        profile: &ApplicantProfile,
        raw_probability: f64,
    ) -> Result<ScoreBreakdown, ScoringError> {
        if !(0.0..=1.0).contains(&raw_probability) {
            return Err(ScoringError::InvalidProbability(raw_probability));
        }

        let base_score = self.config.base_score(raw_probability);
        let penalties = tally(PENALTY_RULES, profile, Adjustment::Penalty);
        let bonuses = tally(BONUS_RULES, profile, Adjustment::Bonus);

        let composite = base_score + f64::from(penalties.total) - f64::from(bonuses.total);
        let final_score = self.config.clamp_final(composite);
        let zone = self.config.classify(final_score);

        let mut components = penalties.components;
        components.extend(bonuses.components);

        Ok(ScoreBreakdown {
            raw_probability,
            base_score,
            penalty_total: penalties.total,
            bonus_total: bonuses.total,
            final_score,
            zone,
            triggered_penalties: penalties.triggered,
            triggered_bonuses: bonuses.triggered,
            components,
        })
    }

    /// Validate a raw submission, then score it. No arithmetic runs for an invalid profile.
    pub fn compute_score_from_submission(
        &self,
        submission: ApplicantSubmission,
        raw_probability: f64,
    ) -> Result<ScoreBreakdown, ScoringError> {
        let profile = ApplicantProfile::try_from(submission)?;
        self.compute_score(&profile, raw_probability)
    }
}

/// Score with the default playground calibration.
pub fn compute_score(
    profile: &ApplicantProfile,
    raw_probability: f64,
) -> Result<ScoreBreakdown, ScoringError> {
    RiskScoringEngine::default().compute_score(profile, raw_probability)
}

/// Signed contribution of one triggered rule, kept for the explanation panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: RuleId,
    pub points: i32,
    pub label: String,
}

/// Full, explainable result of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub raw_probability: f64,
    pub base_score: f64,
    pub penalty_total: u32,
    pub bonus_total: u32,
    pub final_score: f64,
    pub zone: RiskZone,
    pub triggered_penalties: Vec<RuleId>,
    pub triggered_bonuses: Vec<RuleId>,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn risk_drivers(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter(|component| component.points > 0)
            .map(|component| component.label.as_str())
            .collect()
    }

    pub fn safety_drivers(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter(|component| component.points < 0)
            .map(|component| component.label.as_str())
            .collect()
    }

    /// Whole-percent progress value for gauges, truncated like the playground bar.
    pub fn progress_percent(&self) -> u8 {
        self.final_score as u8
    }

    pub fn summary(&self) -> String {
        format!(
            "final {:.1}% ({}) = base {:.1}% + {} penalty - {} bonus",
            self.final_score,
            self.zone.headline(),
            self.base_score,
            self.penalty_total,
            self.bonus_total
        )
    }
}

/// Precondition violations reported by the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid profile field: {0}")]
    InvalidProfileField(#[from] ProfileError),
    #[error("raw probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}
