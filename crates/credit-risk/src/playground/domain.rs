use std::fmt;

use serde::{Deserialize, Serialize};

/// Youngest applicant the playground form accepts.
pub const MIN_APPLICANT_AGE: u8 = 18;
/// Oldest applicant the playground form accepts.
pub const MAX_APPLICANT_AGE: u8 = 80;

/// Declares a closed set of categorical values together with their wire labels.
macro_rules! closed_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_label(value: &str) -> Option<Self> {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.label() == value)
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|value| value.label()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

closed_vocabulary! {
    Gender {
        Male => "Male",
        Female => "Female",
    }
}

closed_vocabulary! {
    /// Administrative regions of the Czech dataset.
    Region {
        Prague => "Prague",
        CentralBohemia => "central Bohemia",
        SouthBohemia => "south Bohemia",
        WestBohemia => "west Bohemia",
        NorthBohemia => "north Bohemia",
        EastBohemia => "east Bohemia",
        SouthMoravia => "south Moravia",
        NorthMoravia => "north Moravia",
    }
}

closed_vocabulary! {
    /// District catalog of the `district` table.
    District {
        HlmPraha => "Hl.m. Praha",
        Benesov => "Benesov",
        Beroun => "Beroun",
        Kladno => "Kladno",
        Kolin => "Kolin",
        KutnaHora => "Kutna Hora",
        Melnik => "Melnik",
        MladaBoleslav => "Mlada Boleslav",
        Nymburk => "Nymburk",
        PrahaVychod => "Praha - vychod",
        PrahaZapad => "Praha - zapad",
        Pribram => "Pribram",
        Rakovnik => "Rakovnik",
        CeskeBudejovice => "Ceske Budejovice",
        CeskyKrumlov => "Cesky Krumlov",
        JindrichuvHradec => "Jindrichuv Hradec",
        Pelhrimov => "Pelhrimov",
        Pisek => "Pisek",
        Prachatice => "Prachatice",
        Strakonice => "Strakonice",
        Tabor => "Tabor",
        Domazlice => "Domazlice",
        Cheb => "Cheb",
        KarlovyVary => "Karlovy Vary",
        Klatovy => "Klatovy",
        PlzenMesto => "Plzen - mesto",
        PlzenJih => "Plzen - jih",
        PlzenSever => "Plzen - sever",
        Rokycany => "Rokycany",
        Sokolov => "Sokolov",
        Tachov => "Tachov",
        CeskaLipa => "Ceska Lipa",
        Decin => "Decin",
        Chomutov => "Chomutov",
        JablonecNadNisou => "Jablonec n. Nisou",
        Liberec => "Liberec",
        Litomerice => "Litomerice",
        Louny => "Louny",
        Most => "Most",
        Teplice => "Teplice",
        UstiNadLabem => "Usti nad Labem",
        HavlickuvBrod => "Havlickuv Brod",
        HradecKralove => "Hradec Kralove",
        Chrudim => "Chrudim",
        Jicin => "Jicin",
        Nachod => "Nachod",
        Pardubice => "Pardubice",
        RychnovNadKneznou => "Rychnov nad Kneznou",
        Semily => "Semily",
        Svitavy => "Svitavy",
        Trutnov => "Trutnov",
        UstiNadOrlici => "Usti nad Orlici",
        Blansko => "Blansko",
        BrnoMesto => "Brno - mesto",
        BrnoVenkov => "Brno - venkov",
        Breclav => "Breclav",
        Hodonin => "Hodonin",
        Jihlava => "Jihlava",
        Kromeriz => "Kromeriz",
        Prostejov => "Prostejov",
        Trebic => "Trebic",
        UherskeHradiste => "Uherske Hradiste",
        Vyskov => "Vyskov",
        Zlin => "Zlin",
        Znojmo => "Znojmo",
        ZdarNadSazavou => "Zdar nad Sazavou",
        Bruntal => "Bruntal",
        FrydekMistek => "Frydek - Mistek",
        Karvina => "Karvina",
        NovyJicin => "Novy Jicin",
        Olomouc => "Olomouc",
        Opava => "Opava",
        OstravaMesto => "Ostrava - mesto",
        Prerov => "Prerov",
        Sumperk => "Sumperk",
        Vsetin => "Vsetin",
        Jesenik => "Jesenik",
    }
}

closed_vocabulary! {
    LoanAmountBucket {
        Low => "low_amount",
        Mid => "mid_amount",
        High => "high_amount",
    }
}

closed_vocabulary! {
    LoanDurationBucket {
        ShortTerm => "short_term",
        LongTerm => "long_term",
    }
}

closed_vocabulary! {
    /// Bucketed total of standing monthly orders.
    MonthlyExpensesBucket {
        Low => "Low_Expenses",
        Medium => "Medium_Expenses",
        High => "High_Expenses",
    }
}

closed_vocabulary! {
    CardUsageCategory {
        NoUsage => "No Usage",
        LowUsage => "Low Usage",
        HighUsage => "High Usage",
    }
}

/// Validated applicant attributes consumed by inference and the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u8,
    pub gender: Gender,
    pub region: Region,
    pub district_name: District,
    pub loan_amount_bucket: LoanAmountBucket,
    pub loan_duration_bucket: LoanDurationBucket,
    pub monthly_expenses_bucket: MonthlyExpensesBucket,
    pub tech_adoption_flag: bool,
    pub card_usage_category: CardUsageCategory,
}

/// Raw form input as received from callers; every field is checked before scoring.
///
/// Aliases accept the column names used by the training feature frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default, alias = "loan_amount")]
    pub loan_amount_bucket: Option<String>,
    #[serde(default, alias = "loan_duration")]
    pub loan_duration_bucket: Option<String>,
    #[serde(default, alias = "total_monthly_order")]
    pub monthly_expenses_bucket: Option<String>,
    #[serde(default)]
    pub tech_adoption_flag: Option<bool>,
    #[serde(default, alias = "card_usage_cat")]
    pub card_usage_category: Option<String>,
}

impl From<ApplicantProfile> for ApplicantSubmission {
    fn from(profile: ApplicantProfile) -> Self {
        Self {
            age: Some(i64::from(profile.age)),
            gender: Some(profile.gender.label().to_string()),
            region: Some(profile.region.label().to_string()),
            district_name: Some(profile.district_name.label().to_string()),
            loan_amount_bucket: Some(profile.loan_amount_bucket.label().to_string()),
            loan_duration_bucket: Some(profile.loan_duration_bucket.label().to_string()),
            monthly_expenses_bucket: Some(profile.monthly_expenses_bucket.label().to_string()),
            tech_adoption_flag: Some(profile.tech_adoption_flag),
            card_usage_category: Some(profile.card_usage_category.label().to_string()),
        }
    }
}

impl TryFrom<ApplicantSubmission> for ApplicantProfile {
    type Error = ProfileError;

    fn try_from(submission: ApplicantSubmission) -> Result<Self, Self::Error> {
        let age = submission.age.ok_or(ProfileError::MissingField { field: "age" })?;
        if age < i64::from(MIN_APPLICANT_AGE) || age > i64::from(MAX_APPLICANT_AGE) {
            return Err(ProfileError::AgeOutOfRange {
                value: age,
                min: MIN_APPLICANT_AGE,
                max: MAX_APPLICANT_AGE,
            });
        }

        Ok(Self {
            age: age as u8,
            gender: parse_field("gender", submission.gender, Gender::from_label)?,
            region: parse_field("region", submission.region, Region::from_label)?,
            district_name: parse_field(
                "district_name",
                submission.district_name,
                District::from_label,
            )?,
            loan_amount_bucket: parse_field(
                "loan_amount_bucket",
                submission.loan_amount_bucket,
                LoanAmountBucket::from_label,
            )?,
            loan_duration_bucket: parse_field(
                "loan_duration_bucket",
                submission.loan_duration_bucket,
                LoanDurationBucket::from_label,
            )?,
            monthly_expenses_bucket: parse_field(
                "monthly_expenses_bucket",
                submission.monthly_expenses_bucket,
                MonthlyExpensesBucket::from_label,
            )?,
            tech_adoption_flag: submission
                .tech_adoption_flag
                .ok_or(ProfileError::MissingField {
                    field: "tech_adoption_flag",
                })?,
            card_usage_category: parse_field(
                "card_usage_category",
                submission.card_usage_category,
                CardUsageCategory::from_label,
            )?,
        })
    }
}

fn parse_field<T>(
    field: &'static str,
    raw: Option<String>,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ProfileError> {
    let raw = raw.ok_or(ProfileError::MissingField { field })?;
    parse(&raw).ok_or(ProfileError::UnknownValue { field, value: raw })
}

/// Rejection raised while turning a submission into an [`ApplicantProfile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` does not accept `{value}`")]
    UnknownValue { field: &'static str, value: String },
    #[error("age {value} is outside the accepted range {min}-{max}")]
    AgeOutOfRange { value: i64, min: u8, max: u8 },
}

impl ProfileError {
    pub fn field(&self) -> &'static str {
        match self {
            ProfileError::MissingField { field } | ProfileError::UnknownValue { field, .. } => {
                field
            }
            ProfileError::AgeOutOfRange { .. } => "age",
        }
    }
}

/// Accepted values for every playground input, used to render selection forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileOptions {
    pub age_range: [u8; 2],
    pub gender: Vec<&'static str>,
    pub region: Vec<&'static str>,
    pub district_name: Vec<&'static str>,
    pub loan_amount_bucket: Vec<&'static str>,
    pub loan_duration_bucket: Vec<&'static str>,
    pub monthly_expenses_bucket: Vec<&'static str>,
    pub tech_adoption_flag: [bool; 2],
    pub card_usage_category: Vec<&'static str>,
}

impl ProfileOptions {
    pub fn catalog() -> Self {
        Self {
            age_range: [MIN_APPLICANT_AGE, MAX_APPLICANT_AGE],
            gender: Gender::labels(),
            region: Region::labels(),
            district_name: District::labels(),
            loan_amount_bucket: LoanAmountBucket::labels(),
            loan_duration_bucket: LoanDurationBucket::labels(),
            monthly_expenses_bucket: MonthlyExpensesBucket::labels(),
            tech_adoption_flag: [false, true],
            card_usage_category: CardUsageCategory::labels(),
        }
    }
}
