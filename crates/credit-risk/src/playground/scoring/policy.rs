use serde::{Deserialize, Serialize};

/// Decision bucket derived from the clamped final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskZone {
    Approved,
    ManualReview,
    HighRisk,
}

impl RiskZone {
    pub const fn label(self) -> &'static str {
        match self {
            RiskZone::Approved => "approved",
            RiskZone::ManualReview => "manual_review",
            RiskZone::HighRisk => "high_risk",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            RiskZone::Approved => "APPROVED (Green Zone)",
            RiskZone::ManualReview => "MANUAL REVIEW (Yellow Zone)",
            RiskZone::HighRisk => "HIGH RISK (Red Zone)",
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            RiskZone::Approved => "low risk applicant, safe to approve",
            RiskZone::ManualReview => "moderate risk, an analyst must review the application",
            RiskZone::HighRisk => "high risk applicant",
        }
    }
}
