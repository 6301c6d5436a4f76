use serde::{Deserialize, Serialize};

use super::policy::RiskZone;

/// Calibration constants for the playground composite score.
///
/// The defaults are the published playground calibration; changing them changes decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Amplification applied to the model's percentage before capping.
    pub probability_multiplier: f64,
    pub base_score_ceiling: f64,
    pub final_score_floor: f64,
    pub final_score_ceiling: f64,
    /// Scores at or above this value leave the approved zone.
    pub manual_review_threshold: f64,
    /// Scores at or above this value are high risk.
    pub high_risk_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            probability_multiplier: 3.0,
            base_score_ceiling: 95.0,
            final_score_floor: 1.0,
            final_score_ceiling: 99.9,
            manual_review_threshold: 40.0,
            high_risk_threshold: 75.0,
        }
    }
}

impl ScoringConfig {
    /// Reject calibrations the engine cannot apply without panicking or misclassifying.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let bounds = [
            ("probability_multiplier", self.probability_multiplier),
            ("base_score_ceiling", self.base_score_ceiling),
            ("final_score_floor", self.final_score_floor),
            ("final_score_ceiling", self.final_score_ceiling),
            ("manual_review_threshold", self.manual_review_threshold),
            ("high_risk_threshold", self.high_risk_threshold),
        ];
        if let Some((field, _)) = bounds.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(ScoringConfigError::NonFinite { field });
        }
        if self.probability_multiplier < 0.0 {
            return Err(ScoringConfigError::NegativeMultiplier(
                self.probability_multiplier,
            ));
        }
        if self.final_score_floor > self.final_score_ceiling {
            return Err(ScoringConfigError::InvertedClamp {
                floor: self.final_score_floor,
                ceiling: self.final_score_ceiling,
            });
        }
        if self.manual_review_threshold > self.high_risk_threshold {
            return Err(ScoringConfigError::InvertedThresholds {
                manual_review: self.manual_review_threshold,
                high_risk: self.high_risk_threshold,
            });
        }
        Ok(())
    }

    pub fn base_score(&self, raw_probability: f64) -> f64 {
        (raw_probability * 100.0 * self.probability_multiplier).min(self.base_score_ceiling)
    }

    pub fn clamp_final(&self, composite: f64) -> f64 {
        composite.clamp(self.final_score_floor, self.final_score_ceiling)
    }

    pub fn classify(&self, final_score: f64) -> RiskZone {
        if final_score < self.manual_review_threshold {
            RiskZone::Approved
        } else if final_score < self.high_risk_threshold {
            RiskZone::ManualReview
        } else {
            RiskZone::HighRisk
        }
    }
}

/// Calibration rejected by [`ScoringConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scoring config `{field}` must be a finite number")]
    NonFinite { field: &'static str },
    #[error("probability multiplier {0} must not be negative")]
    NegativeMultiplier(f64),
    #[error("final score floor {floor} exceeds ceiling {ceiling}")]
    InvertedClamp { floor: f64, ceiling: f64 },
    #[error("manual review threshold {manual_review} exceeds high risk threshold {high_risk}")]
    InvertedThresholds { manual_review: f64, high_risk: f64 },
}
