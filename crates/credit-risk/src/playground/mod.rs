//! Risk playground: applicant intake, model inference, and the explainable composite score.

pub mod domain;
pub mod inference;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantProfile, ApplicantSubmission, CardUsageCategory, District, Gender, LoanAmountBucket,
    LoanDurationBucket, MonthlyExpensesBucket, ProfileError, ProfileOptions, Region,
    MAX_APPLICANT_AGE, MIN_APPLICANT_AGE,
};
pub use inference::{
    encode_features, InferenceAdapter, InferenceError, LinearModelAdapter, LinearModelArtifact,
    ModelLoadError, StaticProbability, UnavailableModel,
};
pub use router::{playground_router, WhatIfRequest};
pub use scoring::{
    compute_score, RiskScoringEngine, RiskZone, RuleId, ScoreBreakdown, ScoreComponent,
    ScoreRule, ScoringConfig, ScoringConfigError, ScoringError, BONUS_RULES, PENALTY_RULES,
};
pub use service::{PlaygroundError, RiskAssessment, RiskPlaygroundService};
