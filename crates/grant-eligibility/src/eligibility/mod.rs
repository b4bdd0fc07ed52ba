//! Career-stage eligibility for research funding grants.
//!
//! Each researcher is measured against four grant families. Within a family
//! the tiers are tried from junior to senior and the first match wins;
//! families are independent of each other.

pub mod dates;
pub mod domain;
mod error;
pub mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use dates::{children_corrected_phd_date, parse_record_date, Anchors};
pub use domain::{
    DateField, EligibilityResult, Gender, GrantFamily, GrantLabel, ResearcherRecord,
};
pub use error::EligibilityError;
pub use policy::{EligibilityPolicy, VENI_LOWER_BOUND_YEARS};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

/// Stateless evaluator applying the policy to researcher records.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    policy: EligibilityPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    /// Evaluates one record against every grant family as of `today`.
    pub fn evaluate(&self, record: &ResearcherRecord, today: NaiveDate) -> ResearcherEvaluation {
        let (anchors, mut issues) = Anchors::resolve(record);

        let msca = match rules::msca(&anchors, &self.policy, || record.display_name()) {
            Ok(label) => label,
            Err(err) => {
                if !issues.iter().any(|issue| issue.field() == err.field()) {
                    issues.push(err);
                }
                None
            }
        };

        let eligibility = EligibilityResult {
            nwo_talent: rules::nwo_talent(&anchors, today, &self.policy),
            nwo_oc: rules::nwo_oc(&anchors, today),
            erc: rules::erc(&anchors, today),
            msca,
        };

        ResearcherEvaluation {
            eligibility,
            issues,
        }
    }

    /// Evaluates a roster in order. Rows never affect each other.
    pub fn evaluate_roster(
        &self,
        records: &[ResearcherRecord],
        today: NaiveDate,
    ) -> RosterEvaluation {
        let mut results = Vec::with_capacity(records.len());
        let mut notices = Vec::new();

        for (row, record) in records.iter().enumerate() {
            let evaluation = self.evaluate(record, today);
            debug!(row, researcher = %record.display_name(), eligibility = ?evaluation.eligibility, "evaluated researcher");

            for error in evaluation.issues {
                warn!(row, %error, "eligibility data problem");
                notices.push(RosterNotice { row, error });
            }
            results.push(evaluation.eligibility);
        }

        RosterEvaluation { results, notices }
    }
}

/// Eligibility of one researcher plus the data problems met on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearcherEvaluation {
    pub eligibility: EligibilityResult,
    pub issues: Vec<EligibilityError>,
}

/// A data problem tied to its zero-based roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterNotice {
    pub row: usize,
    pub error: EligibilityError,
}

impl RosterNotice {
    pub fn message(&self) -> String {
        format!("row {}: {}", self.row + 1, self.error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterEvaluation {
    /// One entry per input record, in input order.
    pub results: Vec<EligibilityResult>,
    pub notices: Vec<RosterNotice>,
}
