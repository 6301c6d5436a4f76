//! Inference boundary: anything that maps an applicant profile to a default probability.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;

/// Capability consumed by the playground: estimate the probability of the "bad" class.
///
/// Implementations own their feature encoding and may block.
pub trait InferenceAdapter: Send + Sync {
    fn infer(&self, profile: &ApplicantProfile) -> Result<f64, InferenceError>;
}

/// Failure raised when no probability can be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("inference unavailable: {0}")]
    Unavailable(String),
}

/// Adapter returning a caller-supplied probability, used for what-if runs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticProbability(pub f64);

impl InferenceAdapter for StaticProbability {
    fn infer(&self, _profile: &ApplicantProfile) -> Result<f64, InferenceError> {
        Ok(self.0)
    }
}

/// Adapter standing in for a model that failed to load; every call reports the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableModel {
    reason: String,
}

impl UnavailableModel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl InferenceAdapter for UnavailableModel {
    fn infer(&self, _profile: &ApplicantProfile) -> Result<f64, InferenceError> {
        Err(InferenceError::Unavailable(self.reason.clone()))
    }
}

/// One-hot feature row in the column naming used by model artifacts.
///
/// Numeric columns are `age` and `tech_adoption_flag`; every categorical field
/// expands to a single `<field>=<label>` column set to `1.0`.
pub fn encode_features(profile: &ApplicantProfile) -> BTreeMap<String, f64> {
    let mut row = BTreeMap::new();
    row.insert("age".to_string(), f64::from(profile.age));
    row.insert(
        "tech_adoption_flag".to_string(),
        if profile.tech_adoption_flag { 1.0 } else { 0.0 },
    );

    let categorical = [
        ("gender", profile.gender.label()),
        ("region", profile.region.label()),
        ("district_name", profile.district_name.label()),
        ("loan_amount", profile.loan_amount_bucket.label()),
        ("loan_duration", profile.loan_duration_bucket.label()),
        ("total_monthly_order", profile.monthly_expenses_bucket.label()),
        ("card_usage_cat", profile.card_usage_category.label()),
    ];
    for (field, label) in categorical {
        row.insert(format!("{field}={label}"), 1.0);
    }

    row
}

/// Serialized logistic model: intercept plus named coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub intercept: f64,
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,
}

/// Adapter evaluating a [`LinearModelArtifact`] loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModelAdapter {
    artifact: LinearModelArtifact,
}

impl LinearModelAdapter {
    pub fn new(artifact: LinearModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let artifact: LinearModelArtifact = serde_json::from_reader(reader)?;
        if !artifact.intercept.is_finite()
            || artifact.coefficients.values().any(|weight| !weight.is_finite())
        {
            return Err(ModelLoadError::NonFiniteWeight);
        }
        Ok(Self::new(artifact))
    }

    pub fn artifact(&self) -> &LinearModelArtifact {
        &self.artifact
    }
}

impl InferenceAdapter for LinearModelAdapter {
    fn infer(&self, profile: &ApplicantProfile) -> Result<f64, InferenceError> {
        let logit = encode_features(profile)
            .iter()
            .filter_map(|(name, value)| {
                self.artifact
                    .coefficients
                    .get(name)
                    .map(|weight| weight * value)
            })
            .fold(self.artifact.intercept, |acc, term| acc + term);

        let probability = 1.0 / (1.0 + (-logit).exp());
        if probability.is_finite() {
            Ok(probability)
        } else {
            Err(InferenceError::Unavailable(format!(
                "model produced a non-finite probability for logit {logit}"
            )))
        }
    }
}

/// Error raised while reading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("unable to open model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    Format(#[from] serde_json::Error),
    #[error("model artifact contains a non-finite weight")]
    NonFiniteWeight,
}
