use crate::infra::playground_service;
use clap::Args;
use credit_risk::analytics::catalog;
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::playground::{
    ApplicantSubmission, LinearModelAdapter, RiskAssessment, UnavailableModel,
};
use std::path::PathBuf;
use std::sync::Arc;

const GAUGE_WIDTH: usize = 40;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Raw default probability to score against instead of running the model
    #[arg(long)]
    pub(crate) probability: Option<f64>,
    /// Model artifact to load when no probability is given (defaults to RISK_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Applicant age in years (18-80)
    #[arg(long)]
    pub(crate) age: Option<i64>,
    /// Male or Female
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Region label, e.g. "north Bohemia"
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// District label, e.g. "Ostrava - mesto"
    #[arg(long)]
    pub(crate) district: Option<String>,
    /// low_amount, mid_amount or high_amount
    #[arg(long)]
    pub(crate) loan_amount: Option<String>,
    /// short_term or long_term
    #[arg(long)]
    pub(crate) loan_duration: Option<String>,
    /// Low_Expenses, Medium_Expenses or High_Expenses
    #[arg(long)]
    pub(crate) expenses: Option<String>,
    /// No Usage, Low Usage or High Usage
    #[arg(long)]
    pub(crate) card_usage: Option<String>,
    /// Applicant uses digital banking
    #[arg(long)]
    pub(crate) tech_adopter: bool,
}

impl ScoreArgs {
    fn split(self) -> (ApplicantSubmission, Option<f64>, Option<PathBuf>) {
        let submission = ApplicantSubmission {
            age: self.age,
            gender: self.gender,
            region: self.region,
            district_name: self.district,
            loan_amount_bucket: self.loan_amount,
            loan_duration_bucket: self.loan_duration,
            monthly_expenses_bucket: self.expenses,
            tech_adoption_flag: Some(self.tech_adopter),
            card_usage_category: self.card_usage,
        };
        (submission, self.probability, self.model)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct QueriesArgs {
    /// Print the SQL text of every query
    #[arg(long)]
    pub(crate) sql: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let (submission, probability, model) = args.split();

    let assessment = match probability {
        Some(raw_probability) => {
            let service = playground_service(Arc::new(UnavailableModel::new(
                "probability supplied on the command line",
            )))?;
            service.what_if(submission, raw_probability)?
        }
        None => {
            let path = match model {
                Some(path) => path,
                None => AppConfig::load()?.data.model_path,
            };
            let adapter = LinearModelAdapter::from_path(&path)?;
            playground_service(Arc::new(adapter))?.assess(submission)?
        }
    };

    print!("{}", render_assessment(&assessment));
    Ok(())
}

pub(crate) fn run_queries(args: QueriesArgs) {
    println!("Analytics queries");
    for descriptor in catalog() {
        println!("- {}: {}", descriptor.key, descriptor.title);
        if args.sql {
            for line in descriptor.sql.trim().lines() {
                println!("    {line}");
            }
        }
    }
}

pub(crate) fn render_assessment(assessment: &RiskAssessment) -> String {
    let profile = &assessment.profile;
    let breakdown = &assessment.breakdown;
    let mut out = String::new();

    out.push_str("Risk playground assessment\n");
    out.push_str(&format!(
        "Applicant: {} y/o {}, {} / {}\n",
        profile.age, profile.gender, profile.region, profile.district_name
    ));
    out.push_str(&format!(
        "Raw model probability: {:.1}%\n",
        breakdown.raw_probability * 100.0
    ));
    out.push_str(&format!("Base score: {:.1}%\n", breakdown.base_score));
    out.push_str(&format!(
        "Adjustments: +{}% penalties, -{}% bonuses\n",
        breakdown.penalty_total, breakdown.bonus_total
    ));

    out.push_str(&driver_line("Risk factors", &breakdown.risk_drivers()));
    out.push_str(&driver_line("Safety factors", &breakdown.safety_drivers()));

    let filled = usize::from(breakdown.progress_percent()) * GAUGE_WIDTH / 100;
    out.push_str(&format!(
        "Final score: {:.1}% [{}{}]\n",
        breakdown.final_score,
        "#".repeat(filled),
        ".".repeat(GAUGE_WIDTH - filled)
    ));
    out.push_str(&format!(
        "Decision: {} - {}\n",
        breakdown.zone.headline(),
        breakdown.zone.summary()
    ));
    out
}

fn driver_line(title: &str, drivers: &[&str]) -> String {
    if drivers.is_empty() {
        format!("{title}: none\n")
    } else {
        format!("{title}: {}\n", drivers.join(", "))
    }
}
