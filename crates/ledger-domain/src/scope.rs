//! Report scopes select which periods an export covers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{common::Displayable, period::PeriodKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Selects every period of the ledger or one explicit calendar month.
pub enum ReportScope {
    AllPeriods,
    SpecificPeriod(PeriodKey),
}

impl ReportScope {
    pub fn includes(&self, period: &PeriodKey) -> bool {
        match self {
            ReportScope::AllPeriods => true,
            ReportScope::SpecificPeriod(selected) => selected == period,
        }
    }
}

impl Displayable for ReportScope {
    fn display_label(&self) -> String {
        match self {
            ReportScope::AllPeriods => "All Months".into(),
            ReportScope::SpecificPeriod(period) => period.display_label(),
        }
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportScope::AllPeriods => f.write_str("all"),
            ReportScope::SpecificPeriod(period) => write!(f, "{period}"),
        }
    }
}
