use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ApplicantProfile, ApplicantSubmission};
use super::inference::{InferenceAdapter, InferenceError};
use super::scoring::{
    RiskScoringEngine, ScoreBreakdown, ScoringConfig, ScoringConfigError, ScoringError,
};

/// Service composing submission validation, inference, and the scoring engine.
pub struct RiskPlaygroundService<I: ?Sized> {
    adapter: Arc<I>,
    engine: Arc<RiskScoringEngine>,
}

impl<I> RiskPlaygroundService<I>
where
    I: InferenceAdapter + ?Sized + 'static,
{
    pub fn new(adapter: Arc<I>, config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        Ok(Self {
            adapter,
            engine: Arc::new(RiskScoringEngine::new(config)?),
        })
    }

    pub fn engine(&self) -> &RiskScoringEngine {
        &self.engine
    }

    /// Validate a raw submission, ask the model for a probability, and compose the score.
    pub fn assess(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<RiskAssessment, PlaygroundError> {
        let profile = validate(submission)?;
        self.assess_profile(profile)
    }

    pub fn assess_profile(
        &self,
        profile: ApplicantProfile,
    ) -> Result<RiskAssessment, PlaygroundError> {
        let raw_probability = self.adapter.infer(&profile).map_err(|error| {
            warn!(%error, "inference failed; no score composed");
            error
        })?;

        self.compose(profile, raw_probability).map_err(|error| {
            warn!(%error, "model returned a probability outside its contract");
            PlaygroundError::from(error)
        })
    }

    /// Score a submission against a caller-supplied probability, bypassing the model.
    pub fn what_if(
        &self,
        submission: ApplicantSubmission,
        raw_probability: f64,
    ) -> Result<RiskAssessment, PlaygroundError> {
        let profile = validate(submission)?;
        self.compose(profile, raw_probability).map_err(|error| {
            warn!(%error, "rejected what-if probability");
            PlaygroundError::from(error)
        })
    }

    fn compose(
        &self,
        profile: ApplicantProfile,
        raw_probability: f64,
    ) -> Result<RiskAssessment, ScoringError> {
        let breakdown = self.engine.compute_score(&profile, raw_probability)?;

        info!(
            raw_probability,
            final_score = breakdown.final_score,
            zone = breakdown.zone.label(),
            penalties = breakdown.triggered_penalties.len(),
            bonuses = breakdown.triggered_bonuses.len(),
            "risk assessment composed"
        );

        Ok(RiskAssessment {
            profile,
            breakdown,
            assessed_at: Utc::now(),
        })
    }
}

fn validate(submission: ApplicantSubmission) -> Result<ApplicantProfile, PlaygroundError> {
    ApplicantProfile::try_from(submission).map_err(|error| {
        warn!(field = error.field(), %error, "rejected playground submission");
        PlaygroundError::Scoring(ScoringError::from(error))
    })
}

/// Scored request returned to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub profile: ApplicantProfile,
    pub breakdown: ScoreBreakdown,
    pub assessed_at: DateTime<Utc>,
}

/// Error raised by the playground service.
#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
