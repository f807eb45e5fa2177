use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{ScError, ScResult};

/// One observation of a company's price on a given day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    company: String,
    date: NaiveDate,
    open: f64,
    close: f64,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Company {
    #[default]
    Apple,
    Microsoft,
    Amazon,
    Google,
    Meta,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    January = 0,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    #[default]
    November,
    December,
}

impl DataPoint {
    /// Validated construction; the only way a record enters the chart.
    /// The company name is kept verbatim, matching is exact.
    pub fn new(company: &str, date: NaiveDate, open: f64, close: f64) -> ScResult<Self> {
        if company.trim().is_empty() {
            return Err(ScError::Invalid {
                code: "INVALID_COMPANY",
                message: "Company name is empty".to_string(),
            });
        }

        for (name, value) in [("Open", open), ("Close", close)] {
            if !value.is_finite() {
                return Err(ScError::Invalid {
                    code: "INVALID_PRICE",
                    message: format!("{name} price of {company} at {date} is not finite"),
                });
            }
        }

        Ok(Self {
            company: company.to_string(),
            date,
            open,
            close,
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    /// Close minus Open
    pub fn diff(&self) -> f64 {
        self.close - self.open
    }

    pub fn low(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn high(&self) -> f64 {
        self.open.max(self.close)
    }

    pub fn is_company(&self, company: Company) -> bool {
        self.company == company.as_str()
    }

    pub fn is_month(&self, month: Month) -> bool {
        self.date.month0() == month.index()
    }
}

impl Company {
    pub fn as_str(&self) -> &'static str {
        match self {
            Company::Apple => "Apple",
            Company::Microsoft => "Microsoft",
            Company::Amazon => "Amazon",
            Company::Google => "Google",
            Company::Meta => "Meta",
        }
    }
}

impl Month {
    /// Zero-based calendar index, January is 0
    pub fn index(&self) -> u32 {
        *self as u32
    }
}
