use crate::eligibility::{EligibilityEngine, EligibilityPolicy, Gender, ResearcherRecord};
use chrono::NaiveDate;

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Processing date somewhere in the given year; only the year matters to the rules.
pub(super) fn processing_in(year: i32) -> NaiveDate {
    date(year, 6, 15)
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityPolicy::default())
}

/// Researcher without parental leave: both career clocks start at `phd`.
pub(super) fn researcher(phd: &str) -> ResearcherRecord {
    ResearcherRecord::new("Test", "User")
        .with_phd_defense_date(phd)
        .with_children_corrected_phd_date(phd)
}

pub(super) fn researcher_with_leave(
    phd: &str,
    corrected: &str,
    gender: Gender,
    children: u32,
) -> ResearcherRecord {
    ResearcherRecord::new("Test", "User")
        .with_phd_defense_date(phd)
        .with_children_corrected_phd_date(corrected)
        .with_gender(gender)
        .with_children(children)
}

pub(super) fn label_text(label: Option<&crate::eligibility::GrantLabel>) -> Option<String> {
    label.map(ToString::to_string)
}
