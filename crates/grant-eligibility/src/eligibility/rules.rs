use super::dates::{months_between, years_between, Anchors};
use super::domain::{DateField, Gender, GrantLabel};
use super::error::EligibilityError;
use super::policy::{
    nwo_talent_tiers, AnchorKind, EligibilityPolicy, Tier, ERC_TIERS, MSCA_LABEL, NWO_OC_TIERS,
};
use chrono::{Datelike, NaiveDate};

impl Anchors {
    fn for_kind(&self, kind: AnchorKind) -> Option<NaiveDate> {
        match kind {
            AnchorKind::PhdDefense => self.phd_defense,
            AnchorKind::ChildrenCorrected => self.children_corrected,
            AnchorKind::GenderCorrected => match self.gender {
                Gender::Female => self.children_corrected,
                Gender::Male | Gender::Other => self.phd_defense,
            },
        }
    }
}

/// Returns the first tier whose window holds the elapsed years.
///
/// Each tier measures from its own anchor; a tier whose anchor is absent is
/// skipped rather than ending the search.
pub(crate) fn first_matching_tier(
    tiers: &[Tier],
    anchors: &Anchors,
    today: NaiveDate,
) -> Option<GrantLabel> {
    tiers.iter().find_map(|tier| {
        let anchor = anchors.for_kind(tier.anchor)?;
        let reference = tier.reference.in_year_of(today)?;
        if !tier.window.contains(years_between(anchor, reference)) {
            return None;
        }

        Some(match tier.terminal_years {
            Some(offset) => GrantLabel::until(tier.code, anchor.year() + offset),
            None => GrantLabel::open_ended(tier.code),
        })
    })
}

pub(crate) fn nwo_talent(
    anchors: &Anchors,
    today: NaiveDate,
    policy: &EligibilityPolicy,
) -> Option<GrantLabel> {
    first_matching_tier(&nwo_talent_tiers(policy), anchors, today)
}

pub(crate) fn nwo_oc(anchors: &Anchors, today: NaiveDate) -> Option<GrantLabel> {
    first_matching_tier(&NWO_OC_TIERS, anchors, today)
}

pub(crate) fn erc(anchors: &Anchors, today: NaiveDate) -> Option<GrantLabel> {
    first_matching_tier(&ERC_TIERS, anchors, today)
}

/// Postdoctoral fellowship: recent PhD and at most a year in the host country
/// by the call deadline. The deadline is fixed, not relative to today.
///
/// Both dates are required once a PhD date is known, so a missing employment
/// start is reported even when the PhD alone already rules the researcher out.
pub(crate) fn msca(
    anchors: &Anchors,
    policy: &EligibilityPolicy,
    researcher: impl FnOnce() -> String,
) -> Result<Option<GrantLabel>, EligibilityError> {
    let Some(phd_date) = anchors.phd_defense else {
        return Ok(None);
    };

    let Some(start) = anchors.employment_start else {
        return Err(EligibilityError::MissingField {
            researcher: researcher(),
            field: DateField::EmploymentStart,
        });
    };

    if years_between(phd_date, policy.msca_deadline) >= policy.msca_max_years_since_phd {
        return Ok(None);
    }

    if months_between(start, policy.msca_deadline) > policy.msca_max_months_in_country {
        return Ok(None);
    }

    let horizon = policy.msca_max_years_since_phd.ceil() as i32;
    Ok(Some(GrantLabel::until(MSCA_LABEL, phd_date.year() + horizon)))
}
