use serde::Serialize;

use crate::data::point::{Company, Month};

/// Current company/month filter; starts at Apple / November.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FilterSelection {
    company: Company,
    month: Month,
}

impl FilterSelection {
    pub fn new(company: Company, month: Month) -> Self {
        Self { company, month }
    }

    pub fn company(&self) -> Company {
        self.company
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Returns whether the selection changed.
    pub fn set_company(&mut self, company: Company) -> bool {
        let changed = self.company != company;
        self.company = company;
        changed
    }

    /// Returns whether the selection changed.
    pub fn set_month(&mut self, month: Month) -> bool {
        let changed = self.month != month;
        self.month = month;
        changed
    }
}
