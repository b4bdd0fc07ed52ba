use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Lower bound of the Veni window, in years since the corrected PhD date.
///
/// Earlier revisions of the rules used -1 to admit researchers shortly before
/// their defense. Zero admits only researchers who have defended.
pub const VENI_LOWER_BOUND_YEARS: f64 = 0.0;

pub const MSCA_MAX_YEARS_SINCE_PHD: f64 = 8.0;
pub const MSCA_MAX_MONTHS_IN_COUNTRY: f64 = 12.0;

/// Tunable thresholds of the rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub veni_lower_bound_years: f64,
    pub msca_deadline: NaiveDate,
    pub msca_max_years_since_phd: f64,
    pub msca_max_months_in_country: f64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            veni_lower_bound_years: VENI_LOWER_BOUND_YEARS,
            msca_deadline: NaiveDate::from_ymd_opt(2024, 9, 11).unwrap_or_default(),
            msca_max_years_since_phd: MSCA_MAX_YEARS_SINCE_PHD,
            msca_max_months_in_country: MSCA_MAX_MONTHS_IN_COUNTRY,
        }
    }
}

/// Month and day of a call deadline, placed in the processing year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDate {
    pub month: u32,
    pub day: u32,
}

impl ReferenceDate {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn in_year_of(&self, today: NaiveDate) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(today.year(), self.month, self.day)
    }
}

/// Range of elapsed years a tier accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    /// `low <= years < high`
    HalfOpen { low: f64, high: f64 },
    /// `years >= threshold`
    AtLeast(f64),
    /// `years > threshold`
    Above(f64),
}

impl Window {
    pub fn contains(&self, years: f64) -> bool {
        match *self {
            Window::HalfOpen { low, high } => low <= years && years < high,
            Window::AtLeast(threshold) => years >= threshold,
            Window::Above(threshold) => years > threshold,
        }
    }
}

/// Which career-clock date a tier measures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    PhdDefense,
    ChildrenCorrected,
    /// Corrected date for female researchers, defense date for everyone else.
    GenderCorrected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub code: &'static str,
    pub anchor: AnchorKind,
    pub reference: ReferenceDate,
    pub window: Window,
    /// Added to the anchor year to give the last eligible year.
    pub terminal_years: Option<i32>,
}

pub fn nwo_talent_tiers(policy: &EligibilityPolicy) -> [Tier; 3] {
    [
        Tier {
            code: "Veni",
            anchor: AnchorKind::ChildrenCorrected,
            reference: ReferenceDate::new(1, 1),
            window: Window::HalfOpen {
                low: policy.veni_lower_bound_years,
                high: 3.0,
            },
            terminal_years: Some(3),
        },
        Tier {
            code: "Vidi",
            anchor: AnchorKind::ChildrenCorrected,
            reference: ReferenceDate::new(10, 1),
            window: Window::HalfOpen { low: 3.0, high: 8.0 },
            terminal_years: Some(8),
        },
        Tier {
            code: "Vici",
            anchor: AnchorKind::ChildrenCorrected,
            reference: ReferenceDate::new(3, 1),
            window: Window::HalfOpen {
                low: 8.0,
                high: 15.0,
            },
            terminal_years: Some(15),
        },
    ]
}

/// M/L is tested before M; the M window overlaps it and only catches what M/L leaves.
pub const NWO_OC_TIERS: [Tier; 3] = [
    Tier {
        code: "Xs",
        anchor: AnchorKind::PhdDefense,
        reference: ReferenceDate::new(3, 19),
        window: Window::HalfOpen {
            low: 5.0,
            high: 10.0,
        },
        terminal_years: Some(10),
    },
    Tier {
        code: "M/L",
        anchor: AnchorKind::PhdDefense,
        reference: ReferenceDate::new(9, 1),
        window: Window::Above(16.0),
        terminal_years: None,
    },
    Tier {
        code: "M",
        anchor: AnchorKind::PhdDefense,
        reference: ReferenceDate::new(11, 1),
        window: Window::Above(10.0),
        terminal_years: None,
    },
];

pub const ERC_TIERS: [Tier; 3] = [
    Tier {
        code: "StG",
        anchor: AnchorKind::GenderCorrected,
        reference: ReferenceDate::new(1, 1),
        window: Window::HalfOpen { low: 2.0, high: 7.0 },
        terminal_years: Some(7),
    },
    Tier {
        code: "CoG",
        anchor: AnchorKind::GenderCorrected,
        reference: ReferenceDate::new(1, 1),
        window: Window::HalfOpen {
            low: 7.0,
            high: 12.0,
        },
        terminal_years: Some(12),
    },
    Tier {
        code: "AdG",
        anchor: AnchorKind::PhdDefense,
        reference: ReferenceDate::new(1, 1),
        window: Window::AtLeast(12.0),
        terminal_years: None,
    },
];

pub const MSCA_LABEL: &str = "Eligible until";
