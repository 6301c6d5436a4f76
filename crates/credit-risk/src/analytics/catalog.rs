use std::fmt;

use serde::{Deserialize, Serialize};

/// The nine fixed exploratory queries over the banking schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsQuery {
    OverallDefaultRate,
    UnemploymentCorrelation,
    DurationCorrelation,
    ClientDemographics,
    VipClients,
    AvgAgeJoined,
    MinBalanceComparison,
    TransactionRatios,
    SanctionInterest,
}

impl AnalyticsQuery {
    pub const ALL: [AnalyticsQuery; 9] = [
        AnalyticsQuery::OverallDefaultRate,
        AnalyticsQuery::UnemploymentCorrelation,
        AnalyticsQuery::DurationCorrelation,
        AnalyticsQuery::ClientDemographics,
        AnalyticsQuery::VipClients,
        AnalyticsQuery::AvgAgeJoined,
        AnalyticsQuery::MinBalanceComparison,
        AnalyticsQuery::TransactionRatios,
        AnalyticsQuery::SanctionInterest,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            AnalyticsQuery::OverallDefaultRate => "overall_default_rate",
            AnalyticsQuery::UnemploymentCorrelation => "unemployment_correlation",
            AnalyticsQuery::DurationCorrelation => "duration_correlation",
            AnalyticsQuery::ClientDemographics => "client_demographics",
            AnalyticsQuery::VipClients => "vip_clients",
            AnalyticsQuery::AvgAgeJoined => "avg_age_joined",
            AnalyticsQuery::MinBalanceComparison => "min_balance_comparison",
            AnalyticsQuery::TransactionRatios => "transaction_ratios",
            AnalyticsQuery::SanctionInterest => "sanction_interest",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            AnalyticsQuery::OverallDefaultRate => "Overall Default Rate",
            AnalyticsQuery::UnemploymentCorrelation => "Unemployment vs Defaults",
            AnalyticsQuery::DurationCorrelation => "Duration vs Default Rate",
            AnalyticsQuery::ClientDemographics => "Client Demographics",
            AnalyticsQuery::VipClients => "VIP Clients (Gold Cards)",
            AnalyticsQuery::AvgAgeJoined => "Client Loyalty Trend",
            AnalyticsQuery::MinBalanceComparison => "Balance: Defaulters vs Good",
            AnalyticsQuery::TransactionRatios => "Cash vs Card Volume",
            AnalyticsQuery::SanctionInterest => "Fines Analysis",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|query| query.key() == key.trim())
    }

    /// Read-only SQL executed against the banking schema.
    pub const fn sql(self) -> &'static str {
        match self {
            AnalyticsQuery::OverallDefaultRate => OVERALL_DEFAULT_RATE_SQL,
            AnalyticsQuery::UnemploymentCorrelation => UNEMPLOYMENT_CORRELATION_SQL,
            AnalyticsQuery::DurationCorrelation => DURATION_CORRELATION_SQL,
            AnalyticsQuery::ClientDemographics => CLIENT_DEMOGRAPHICS_SQL,
            AnalyticsQuery::VipClients => VIP_CLIENTS_SQL,
            AnalyticsQuery::AvgAgeJoined => AVG_AGE_JOINED_SQL,
            AnalyticsQuery::MinBalanceComparison => MIN_BALANCE_COMPARISON_SQL,
            AnalyticsQuery::TransactionRatios => TRANSACTION_RATIOS_SQL,
            AnalyticsQuery::SanctionInterest => SANCTION_INTEREST_SQL,
        }
    }
}

impl fmt::Display for AnalyticsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Catalog entry served to callers listing the available queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub sql: &'static str,
}

pub fn catalog() -> Vec<QueryDescriptor> {
    AnalyticsQuery::ALL
        .into_iter()
        .map(|query| QueryDescriptor {
            key: query.key(),
            title: query.title(),
            sql: query.sql(),
        })
        .collect()
}

const OVERALL_DEFAULT_RATE_SQL: &str = r#"
SELECT
    COUNT(*) AS total_loans,
    SUM(CASE WHEN status IN ('B', 'D') THEN 1 ELSE 0 END) AS bad_loans,
    ROUND((SUM(CASE WHEN status IN ('B', 'D') THEN 1 ELSE 0 END)::NUMERIC / COUNT(*)) * 100, 2) AS default_rate
FROM loan;
"#;

const UNEMPLOYMENT_CORRELATION_SQL: &str = r#"
WITH corr_data AS (
    SELECT d."District_name" AS District,
           d."Unemployment_rate_95" AS Unemployment,
           COUNT(l.loan_id) Total_loans,
           SUM(CASE WHEN status IN ('B', 'D') THEN 1 ELSE 0 END) AS bad_loans,
           ROUND((SUM(CASE WHEN status IN ('B', 'D') THEN 1 ELSE 0 END)::NUMERIC / COUNT(*)) * 100, 2) AS Default_rate
    FROM loan AS l
    JOIN account AS a ON l.account_id = a.account_id
    JOIN district AS d ON d."District_code" = a.district_id
    GROUP BY d."District_name", "Unemployment_rate_95"
    HAVING COUNT(l.loan_id) > 10
    ORDER BY d."Unemployment_rate_95" DESC
)
SELECT ROUND(CORR(Default_rate, Unemployment)::NUMERIC, 3) AS Correlation
FROM corr_data;
"#;

const DURATION_CORRELATION_SQL: &str = r#"
WITH data_loan_corr AS (
    SELECT duration AS duration,
           COUNT(*) AS total_loans,
           SUM(CASE WHEN status IN ('B', 'D') THEN 1 ELSE 0 END) AS bad_loans,
           ROUND((SUM(CASE WHEN status IN ('B', 'D') THEN 1 ELSE 0 END)::NUMERIC / COUNT(*)) * 100, 2) AS Default_rate
    FROM loan
    GROUP BY duration
    ORDER BY duration ASC
)
SELECT ROUND(CORR(Duration, Default_rate)::NUMERIC, 2) * 100 AS correlation
FROM data_loan_corr;
"#;

const CLIENT_DEMOGRAPHICS_SQL: &str = r#"
SELECT
    CASE
        WHEN (1999 - (1900 + SUBSTRING(birth_number::text, 1, 2)::int)) < 25 THEN 'Under 25'
        WHEN (1999 - (1900 + SUBSTRING(birth_number::text, 1, 2)::int)) BETWEEN 25 AND 40 THEN '25-40'
        WHEN (1999 - (1900 + SUBSTRING(birth_number::text, 1, 2)::int)) BETWEEN 41 AND 55 THEN '41-55'
        WHEN (1999 - (1900 + SUBSTRING(birth_number::text, 1, 2)::int)) > 55 THEN 'Over 55'
    END AS age_group,
    SUM(CASE WHEN gender = 'Male' THEN 1 ELSE 0 END) AS Num_males,
    SUM(CASE WHEN gender = 'Female' THEN 1 ELSE 0 END) AS Num_females,
    COUNT(*) AS total_clients
FROM client
GROUP BY age_group
ORDER BY age_group ASC;
"#;

const VIP_CLIENTS_SQL: &str = r#"
SELECT dis."Region" AS Region,
       dis."District_name" AS District,
       COUNT(c.card_id) AS Gold_cards
FROM card AS c
JOIN disp AS d ON c.disp_id = d.disp_id
JOIN client AS cl ON cl.client_id = d.client_id
JOIN district AS dis ON dis."District_code" = cl.district_id
WHERE c.type = 'gold'
GROUP BY dis."Region", dis."District_name"
ORDER BY COUNT(c.card_id) DESC;
"#;

const AVG_AGE_JOINED_SQL: &str = r#"
WITH client_first_acc AS (
    SELECT c.client_id AS Client_id,
           c.birth_year AS Birth_year,
           MIN(acc_date) AS first_acc
    FROM client AS c
    JOIN disp d ON c.client_id = d.client_id
    JOIN account a ON a.account_id = d.account_id
    GROUP BY c.client_id, c.birth_year
)
SELECT EXTRACT(YEAR FROM first_acc) AS join_year,
       ROUND(AVG(EXTRACT(YEAR FROM first_acc) - Birth_year), 1) AS avg_age_joined
FROM client_first_acc
GROUP BY join_year
ORDER BY join_year ASC;
"#;

const MIN_BALANCE_COMPARISON_SQL: &str = r#"
SELECT
    CASE
        WHEN l.status IN ('B', 'D') THEN 'Defaulter (Bad Loan)'
        WHEN l.status IN ('A', 'C') THEN 'Non-Defaulter (Good Loan)'
    END AS loan_category,
    ROUND(AVG(min_bal)::numeric, 2) AS avg_minimum_balance_ever
FROM loan l
JOIN (
    SELECT account_id, MIN(balance) AS min_bal
    FROM trans
    GROUP BY account_id
) t ON l.account_id = t.account_id
GROUP BY loan_category
ORDER BY avg_minimum_balance_ever DESC;
"#;

const TRANSACTION_RATIOS_SQL: &str = r#"
SELECT
    SUM(CASE WHEN operation = 'Cash_Withdrawal' THEN 1 ELSE 0 END) AS cash_withdrawal_count,
    SUM(CASE WHEN operation = 'Credit_Card_Withdrawal' THEN 1 ELSE 0 END) AS card_withdrawal_count,
    ROUND(
        SUM(CASE WHEN operation = 'Cash_Withdrawal' THEN 1.0 ELSE 0 END) /
        NULLIF(SUM(CASE WHEN operation = 'Credit_Card_Withdrawal' THEN 1.0 ELSE 0 END), 0),
        1
    ) AS transaction_ratio_cash_to_card,
    ROUND(SUM(CASE WHEN operation = 'Cash_Withdrawal' THEN amount ELSE 0 END)::NUMERIC, 0) AS cash_withdrawal_amount,
    ROUND(SUM(CASE WHEN operation = 'Credit_Card_Withdrawal' THEN amount ELSE 0 END)::NUMERIC, 0) AS card_withdrawal_amount
FROM trans;
"#;

const SANCTION_INTEREST_SQL: &str = r#"
SELECT
    CASE
        WHEN l.status IN ('B', 'D') THEN 'Defaulter (Bad Loan)'
        WHEN l.status IN ('A', 'C') THEN 'Non-Defaulter (Good Loan)'
    END AS client_category,
    COUNT(DISTINCT l.loan_id) AS Total_clients,
    ROUND(COUNT(DISTINCT CASE WHEN t.k_symbol = 'Sanction_Interest' THEN l.loan_id END)::NUMERIC /
    COUNT(DISTINCT l.loan_id) * 100, 2) AS per_with_fines
FROM trans AS t
JOIN loan AS l ON t.account_id = l.account_id
GROUP BY client_category;
"#;
