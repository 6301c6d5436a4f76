use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::playground::domain::{
    ApplicantProfile, ApplicantSubmission, CardUsageCategory, District, Gender, LoanAmountBucket,
    LoanDurationBucket, MonthlyExpensesBucket, Region,
};
use crate::playground::inference::{InferenceAdapter, InferenceError};
use crate::playground::scoring::{RiskScoringEngine, ScoringConfig};
use crate::playground::service::RiskPlaygroundService;

/// Applicant with no penalties who earns the tech adopter and high card usage bonuses.
pub(super) fn baseline_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 28,
        gender: Gender::Male,
        region: Region::SouthBohemia,
        district_name: District::Tabor,
        loan_amount_bucket: LoanAmountBucket::Mid,
        loan_duration_bucket: LoanDurationBucket::LongTerm,
        monthly_expenses_bucket: MonthlyExpensesBucket::Medium,
        tech_adoption_flag: true,
        card_usage_category: CardUsageCategory::HighUsage,
    }
}

/// Offline, cardless applicant in a high-risk district with high expenses.
pub(super) fn risky_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 52,
        gender: Gender::Female,
        region: Region::NorthBohemia,
        district_name: District::Most,
        loan_amount_bucket: LoanAmountBucket::High,
        loan_duration_bucket: LoanDurationBucket::LongTerm,
        monthly_expenses_bucket: MonthlyExpensesBucket::High,
        tech_adoption_flag: false,
        card_usage_category: CardUsageCategory::NoUsage,
    }
}

/// Digital, low-expense Prague applicant on a short loan.
pub(super) fn safe_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 33,
        gender: Gender::Male,
        region: Region::Prague,
        district_name: District::HlmPraha,
        loan_amount_bucket: LoanAmountBucket::Low,
        loan_duration_bucket: LoanDurationBucket::ShortTerm,
        monthly_expenses_bucket: MonthlyExpensesBucket::Low,
        tech_adoption_flag: true,
        card_usage_category: CardUsageCategory::LowUsage,
    }
}

pub(super) fn submission(profile: ApplicantProfile) -> ApplicantSubmission {
    ApplicantSubmission::from(profile)
}

/// Every combination of the attributes the rule tables inspect.
pub(super) fn rule_relevant_profiles() -> Vec<ApplicantProfile> {
    let locations = [
        (Region::Prague, District::HlmPraha),
        (Region::NorthMoravia, District::Olomouc),
        (Region::CentralBohemia, District::Kladno),
        (Region::NorthBohemia, District::Most),
    ];
    let mut profiles = Vec::new();
    for (region, district_name) in locations {
        for &monthly_expenses_bucket in MonthlyExpensesBucket::ALL {
            for &loan_duration_bucket in LoanDurationBucket::ALL {
                for &card_usage_category in CardUsageCategory::ALL {
                    for tech_adoption_flag in [false, true] {
                        profiles.push(ApplicantProfile {
                            region,
                            district_name,
                            monthly_expenses_bucket,
                            loan_duration_bucket,
                            card_usage_category,
                            tech_adoption_flag,
                            ..baseline_profile()
                        });
                    }
                }
            }
        }
    }
    profiles
}

pub(super) fn engine() -> RiskScoringEngine {
    RiskScoringEngine::new(ScoringConfig::default()).expect("default calibration")
}

/// Deterministic adapter that records how often it was asked.
pub(super) struct CountingAdapter {
    probability: f64,
    calls: AtomicUsize,
}

impl CountingAdapter {
    pub(super) fn new(probability: f64) -> Self {
        Self {
            probability,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InferenceAdapter for CountingAdapter {
    fn infer(&self, _profile: &ApplicantProfile) -> Result<f64, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.probability)
    }
}

pub(super) fn build_service(
    probability: f64,
) -> (RiskPlaygroundService<CountingAdapter>, Arc<CountingAdapter>) {
    let adapter = Arc::new(CountingAdapter::new(probability));
    let service = RiskPlaygroundService::new(adapter.clone(), ScoringConfig::default())
        .expect("default calibration");
    (service, adapter)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
