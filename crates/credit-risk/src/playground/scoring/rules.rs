use serde::{Deserialize, Serialize};

use super::super::domain::{
    ApplicantProfile, CardUsageCategory, LoanDurationBucket, MonthlyExpensesBucket, Region,
};
use super::ScoreComponent;

/// Stable identifier of a playground adjustment rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    NoTech,
    NoCardHistory,
    HighRiskRegion,
    HighExpenses,
    LowExpenses,
    TechAdopter,
    ShortLoanTerm,
    CardUsageTier,
}

impl RuleId {
    pub const fn key(self) -> &'static str {
        match self {
            RuleId::NoTech => "no_tech",
            RuleId::NoCardHistory => "no_card_history",
            RuleId::HighRiskRegion => "high_risk_region",
            RuleId::HighExpenses => "high_expenses",
            RuleId::LowExpenses => "low_expenses",
            RuleId::TechAdopter => "tech_adopter",
            RuleId::ShortLoanTerm => "short_loan_term",
            RuleId::CardUsageTier => "card_usage_tier",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RuleId::NoTech => "No Tech",
            RuleId::NoCardHistory => "No History",
            RuleId::HighRiskRegion => "Bad Region",
            RuleId::HighExpenses => "High Exp",
            RuleId::LowExpenses => "Low Exp",
            RuleId::TechAdopter => "Tech User",
            RuleId::ShortLoanTerm => "Short Term",
            RuleId::CardUsageTier => "Card Usage",
        }
    }
}

/// Declarative adjustment: a fixed weight applied when the predicate holds.
#[derive(Clone, Copy)]
pub struct ScoreRule {
    pub id: RuleId,
    pub points: u32,
    predicate: fn(&ApplicantProfile) -> bool,
}

impl ScoreRule {
    pub fn applies(&self, profile: &ApplicantProfile) -> bool {
        (self.predicate)(profile)
    }
}

impl std::fmt::Debug for ScoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreRule")
            .field("id", &self.id)
            .field("points", &self.points)
            .finish()
    }
}

/// Penalties in explanation order.
pub const PENALTY_RULES: &[ScoreRule] = &[
    ScoreRule {
        id: RuleId::NoTech,
        points: 15,
        predicate: lacks_digital_channel,
    },
    ScoreRule {
        id: RuleId::NoCardHistory,
        points: 15,
        predicate: has_no_card_history,
    },
    ScoreRule {
        id: RuleId::HighRiskRegion,
        points: 10,
        predicate: lives_in_high_risk_region,
    },
    ScoreRule {
        id: RuleId::HighExpenses,
        points: 10,
        predicate: has_high_expenses,
    },
];

/// Bonuses in explanation order. The two card usage tiers share one identifier
/// and are mutually exclusive.
pub const BONUS_RULES: &[ScoreRule] = &[
    ScoreRule {
        id: RuleId::LowExpenses,
        points: 15,
        predicate: has_low_expenses,
    },
    ScoreRule {
        id: RuleId::TechAdopter,
        points: 10,
        predicate: uses_digital_channel,
    },
    ScoreRule {
        id: RuleId::ShortLoanTerm,
        points: 5,
        predicate: has_short_term_loan,
    },
    ScoreRule {
        id: RuleId::CardUsageTier,
        points: 10,
        predicate: has_low_card_usage,
    },
    ScoreRule {
        id: RuleId::CardUsageTier,
        points: 5,
        predicate: has_high_card_usage,
    },
];

/// Only the region is consulted; the district picker is independent of it.
const HIGH_RISK_REGIONS: [Region; 2] = [Region::NorthBohemia, Region::NorthMoravia];

fn lacks_digital_channel(profile: &ApplicantProfile) -> bool {
    !profile.tech_adoption_flag
}

fn uses_digital_channel(profile: &ApplicantProfile) -> bool {
    profile.tech_adoption_flag
}

fn has_no_card_history(profile: &ApplicantProfile) -> bool {
    profile.card_usage_category == CardUsageCategory::NoUsage
}

fn has_low_card_usage(profile: &ApplicantProfile) -> bool {
    profile.card_usage_category == CardUsageCategory::LowUsage
}

fn has_high_card_usage(profile: &ApplicantProfile) -> bool {
    profile.card_usage_category == CardUsageCategory::HighUsage
}

fn lives_in_high_risk_region(profile: &ApplicantProfile) -> bool {
    HIGH_RISK_REGIONS.contains(&profile.region)
}

fn has_high_expenses(profile: &ApplicantProfile) -> bool {
    profile.monthly_expenses_bucket == MonthlyExpensesBucket::High
}

fn has_low_expenses(profile: &ApplicantProfile) -> bool {
    profile.monthly_expenses_bucket == MonthlyExpensesBucket::Low
}

fn has_short_term_loan(profile: &ApplicantProfile) -> bool {
    profile.loan_duration_bucket == LoanDurationBucket::ShortTerm
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Adjustment {
    Penalty,
    Bonus,
}

pub(crate) struct RuleTally {
    pub total: u32,
    pub triggered: Vec<RuleId>,
    pub components: Vec<ScoreComponent>,
}

/// Folds a rule table over the profile, keeping the table order in the trail.
pub(crate) fn tally(
    rules: &[ScoreRule],
    profile: &ApplicantProfile,
    adjustment: Adjustment,
) -> RuleTally {
    let mut tally = RuleTally {
        total: 0,
        triggered: Vec::new(),
        components: Vec::new(),
    };

    for rule in rules.iter().filter(|rule| rule.applies(profile)) {
        tally.total += rule.points;
        tally.triggered.push(rule.id);

        let (points, sign) = match adjustment {
            Adjustment::Penalty => (rule.points as i32, '+'),
            Adjustment::Bonus => (-(rule.points as i32), '-'),
        };
        tally.components.push(ScoreComponent {
            rule: rule.id,
            points,
            label: format!("{} ({}{}%)", rule.id.label(), sign, rule.points),
        });
    }

    tally
}
