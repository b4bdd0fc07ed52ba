use super::common::*;
use crate::eligibility::{
    EligibilityEngine, EligibilityPolicy, Gender, GrantFamily, ResearcherRecord,
};

fn talent(engine: &EligibilityEngine, record: &ResearcherRecord, year: i32) -> Option<String> {
    let evaluation = engine.evaluate(record, processing_in(year));
    label_text(evaluation.eligibility.get(GrantFamily::NwoTalent))
}

fn open_competition(record: &ResearcherRecord, year: i32) -> Option<String> {
    let evaluation = engine().evaluate(record, processing_in(year));
    label_text(evaluation.eligibility.get(GrantFamily::NwoOc))
}

#[test]
fn recent_defense_is_eligible_for_veni() {
    assert_eq!(
        talent(&engine(), &researcher("2020-01-01"), 2022),
        Some("Veni 2023".to_string())
    );
}

#[test]
fn mid_career_moves_to_vidi() {
    assert_eq!(
        talent(&engine(), &researcher("2018-01-01"), 2024),
        Some("Vidi 2026".to_string())
    );
}

#[test]
fn senior_researcher_is_offered_vici() {
    assert_eq!(
        talent(&engine(), &researcher("2012-01-01"), 2024),
        Some("Vici 2027".to_string())
    );
}

#[test]
fn talent_scheme_ends_after_fifteen_years() {
    assert_eq!(talent(&engine(), &researcher("2005-01-01"), 2024), None);
}

#[test]
fn veni_closes_once_three_years_pass_on_its_reference_date() {
    // 1095 days before 2024-01-01 is still under three years.
    assert_eq!(
        talent(&engine(), &researcher("2021-01-01"), 2024),
        Some("Veni 2024".to_string())
    );
    // 1096 days is past three years, so Vidi takes over.
    assert_eq!(
        talent(&engine(), &researcher("2020-12-31"), 2024),
        Some("Vidi 2028".to_string())
    );
}

#[test]
fn defense_after_the_veni_reference_date_needs_policy_allowance() {
    let record = researcher("2025-06-01");
    assert_eq!(talent(&engine(), &record, 2025), None);

    let lenient = EligibilityEngine::new(EligibilityPolicy {
        veni_lower_bound_years: -1.0,
        ..EligibilityPolicy::default()
    });
    assert_eq!(talent(&lenient, &record, 2025), Some("Veni 2028".to_string()));
}

#[test]
fn talent_scheme_measures_from_leave_corrected_date() {
    let corrected = researcher_with_leave("2018-06-01", "2021-06-01", Gender::Female, 2);
    assert_eq!(
        talent(&engine(), &corrected, 2024),
        Some("Veni 2024".to_string())
    );

    let uncorrected = researcher("2018-06-01");
    assert_eq!(
        talent(&engine(), &uncorrected, 2024),
        Some("Vidi 2026".to_string())
    );
}

#[test]
fn talent_scheme_without_corrected_date_is_ineligible() {
    let record = ResearcherRecord::new("Test", "User")
        .with_phd_defense_date("2020-01-01")
        .with_employment_start_date("2019-01-01");
    let evaluation = engine().evaluate(&record, processing_in(2022));

    assert_eq!(evaluation.eligibility.nwo_talent, None);
    assert!(evaluation.issues.is_empty());
    assert!(evaluation.eligibility.erc.is_some());
}

#[test]
fn open_competition_xs_window() {
    assert_eq!(
        open_competition(&researcher("2015-01-01"), 2024),
        Some("Xs 2025".to_string())
    );
    assert_eq!(
        open_competition(&researcher("2019-03-19"), 2024),
        Some("Xs 2029".to_string())
    );
    assert_eq!(open_competition(&researcher("2019-03-21"), 2024), None);
}

#[test]
fn open_competition_long_careers_get_m_l() {
    assert_eq!(
        open_competition(&researcher("2005-01-01"), 2024),
        Some("M/L".to_string())
    );
}

#[test]
fn open_competition_overlap_prefers_m_l() {
    // Also past the M threshold; M/L is tried first.
    assert_eq!(
        open_competition(&researcher("2007-06-01"), 2024),
        Some("M/L".to_string())
    );
}

#[test]
fn open_competition_between_xs_and_m_l_gets_m() {
    assert_eq!(
        open_competition(&researcher("2012-06-01"), 2024),
        Some("M".to_string())
    );
}

#[test]
fn open_competition_ignores_parental_leave() {
    let record = researcher_with_leave("2015-01-01", "2018-01-01", Gender::Female, 2);
    assert_eq!(open_competition(&record, 2024), Some("Xs 2025".to_string()));
}

#[test]
fn early_career_has_no_open_competition_tier() {
    assert_eq!(open_competition(&researcher("2020-01-01"), 2024), None);
}
