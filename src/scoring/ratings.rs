use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lowest accepted rating value.
pub const RATING_MIN: i64 = 1;
/// Highest accepted rating value.
pub const RATING_MAX: i64 = 5;

/// The five validation dimensions a concept is rated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingField {
    CompanyFit,
    CostStability,
    Manufacturability,
    CustomerAcceptance,
    Repurchase,
}

impl RatingField {
    /// All fields in scoring order (the order weights are applied in).
    pub const ALL: [RatingField; 5] = [
        RatingField::CompanyFit,
        RatingField::CostStability,
        RatingField::Manufacturability,
        RatingField::CustomerAcceptance,
        RatingField::Repurchase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingField::CompanyFit => "company_fit",
            RatingField::CostStability => "cost_stability",
            RatingField::Manufacturability => "manufacturability",
            RatingField::CustomerAcceptance => "customer_acceptance",
            RatingField::Repurchase => "repurchase",
        }
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rating failed validation. Wrong-type and out-of-range violations are
/// distinct variants so callers can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRating {
    #[error("{field}: expected a whole-number rating, got {value}")]
    NotAnInteger { field: RatingField, value: String },

    #[error("{field}: rating {value} is outside {RATING_MIN}..={RATING_MAX}")]
    OutOfRange { field: RatingField, value: i64 },
}

/// Five validated 1-5 ratings for one concept.
///
/// Fields are private: a `RatingSet` can only be built through the
/// validating constructors, so holding one means every value is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingSet {
    company_fit: u8,
    cost_stability: u8,
    manufacturability: u8,
    customer_acceptance: u8,
    repurchase: u8,
}

impl RatingSet {
    /// Build a rating set from raw integers, checking each field in scoring
    /// order. Fails on the first out-of-range value; no partially built set
    /// is ever observable.
    pub fn new(
        company_fit: i64,
        cost_stability: i64,
        manufacturability: i64,
        customer_acceptance: i64,
        repurchase: i64,
    ) -> Result<Self, InvalidRating> {
        Ok(Self {
            company_fit: check_range(RatingField::CompanyFit, company_fit)?,
            cost_stability: check_range(RatingField::CostStability, cost_stability)?,
            manufacturability: check_range(RatingField::Manufacturability, manufacturability)?,
            customer_acceptance: check_range(RatingField::CustomerAcceptance, customer_acceptance)?,
            repurchase: check_range(RatingField::Repurchase, repurchase)?,
        })
    }

    /// Parse a rating set from a JSON object with exactly the five rating
    /// fields, e.g. `{"company_fit": 3, "cost_stability": 3, ...}`.
    ///
    /// JSON keeps integers and floats distinct, so `3.0` is rejected as
    /// `NotAnInteger` even though its value is whole: a float where an
    /// integer is required. Missing and unknown fields are parse errors.
    pub fn from_json(text: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            company_fit: serde_json::Number,
            cost_stability: serde_json::Number,
            manufacturability: serde_json::Number,
            customer_acceptance: serde_json::Number,
            repurchase: serde_json::Number,
        }

        let raw: Raw = serde_json::from_str(text)
            .context("ratings JSON must be an object with the five rating fields")?;

        let set = Self::new(
            check_integer(RatingField::CompanyFit, &raw.company_fit)?,
            check_integer(RatingField::CostStability, &raw.cost_stability)?,
            check_integer(RatingField::Manufacturability, &raw.manufacturability)?,
            check_integer(RatingField::CustomerAcceptance, &raw.customer_acceptance)?,
            check_integer(RatingField::Repurchase, &raw.repurchase)?,
        )?;
        Ok(set)
    }

    pub fn company_fit(&self) -> u8 {
        self.company_fit
    }

    pub fn cost_stability(&self) -> u8 {
        self.cost_stability
    }

    pub fn manufacturability(&self) -> u8 {
        self.manufacturability
    }

    pub fn customer_acceptance(&self) -> u8 {
        self.customer_acceptance
    }

    pub fn repurchase(&self) -> u8 {
        self.repurchase
    }

    /// Look up one rating by field.
    pub fn get(&self, field: RatingField) -> u8 {
        match field {
            RatingField::CompanyFit => self.company_fit,
            RatingField::CostStability => self.cost_stability,
            RatingField::Manufacturability => self.manufacturability,
            RatingField::CustomerAcceptance => self.customer_acceptance,
            RatingField::Repurchase => self.repurchase,
        }
    }

    /// All (field, rating) pairs in scoring order.
    pub fn entries(&self) -> [(RatingField, u8); 5] {
        RatingField::ALL.map(|field| (field, self.get(field)))
    }

    /// Compact display form, e.g. "3/3/4/4/4" (scoring order).
    pub fn compact(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.company_fit,
            self.cost_stability,
            self.manufacturability,
            self.customer_acceptance,
            self.repurchase
        )
    }
}

// Deserialization funnels through RatingSet::new so an edited cache or
// state file cannot smuggle an out-of-range value past the constructor.
impl<'de> Deserialize<'de> for RatingSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            company_fit: i64,
            cost_stability: i64,
            manufacturability: i64,
            customer_acceptance: i64,
            repurchase: i64,
        }

        let raw = Raw::deserialize(deserializer)?;
        RatingSet::new(
            raw.company_fit,
            raw.cost_stability,
            raw.manufacturability,
            raw.customer_acceptance,
            raw.repurchase,
        )
        .map_err(serde::de::Error::custom)
    }
}

fn check_range(field: RatingField, value: i64) -> Result<u8, InvalidRating> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(value as u8)
    } else {
        Err(InvalidRating::OutOfRange { field, value })
    }
}

fn check_integer(field: RatingField, value: &serde_json::Number) -> Result<i64, InvalidRating> {
    value.as_i64().ok_or_else(|| InvalidRating::NotAnInteger {
        field,
        value: value.to_string(),
    })
}
