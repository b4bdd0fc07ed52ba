use chrono::NaiveDate;
use grant_eligibility::eligibility::{
    DateField, EligibilityEngine, EligibilityError, EligibilityPolicy, GrantFamily,
};
use grant_eligibility::roster::hr_update::{StaffListUpdate, DEFAULT_RESEARCHER_FUNCTIONS};
use grant_eligibility::roster::synthetic::consecutive_defense_dates;
use grant_eligibility::roster::RosterImporter;
use std::io::Cursor;

const ROSTER: &str = "\
First Name,Last name,Initials,PhD Defense Date,Employment Start Date,Gender,Count of children applicable,Children corrected PhD date
Ada,Lovelace,A.,2018-06-01,2024-02-01,Female,2,2021-06-01
Alan,Turing,A.M.,2010-01-01,2015-01-01,Male,0,2010-01-01
Grace,Hopper,G.,,2024-01-01,Female,1,
Marie,Curie,M.,2020-03-15,,Female,0,2020-03-15
";

fn processing_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid processing date")
}

#[test]
fn roster_is_augmented_with_one_column_per_family() {
    let roster = RosterImporter::from_reader(Cursor::new(ROSTER)).expect("roster imports");
    let engine = EligibilityEngine::new(EligibilityPolicy::default());

    let evaluation = engine.evaluate_roster(roster.records(), processing_date());

    let mut buffer = Vec::new();
    roster
        .write_with_eligibility(&evaluation.results, &mut buffer)
        .expect("roster exports");
    let output = String::from_utf8(buffer).expect("utf8 output");
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines[0].ends_with(
        "Children corrected PhD date,Eligible NWO Talent,Eligible NWO OC,Eligible ERC,Eligible MSCA"
    ));
    assert!(lines[1].ends_with("2021-06-01,Veni 2024,Xs 2028,StG 2028,Eligible until 2026"));
    assert!(lines[2].ends_with("2010-01-01,Vici 2025,M,AdG,"));
    assert!(lines[3].ends_with(",,,,"));
    assert!(lines[4].ends_with("2020-03-15,Vidi 2028,,StG 2027,"));
}

#[test]
fn notices_name_the_row_and_problem() {
    let roster = RosterImporter::from_reader(Cursor::new(ROSTER)).expect("roster imports");
    let engine = EligibilityEngine::new(EligibilityPolicy::default());

    let evaluation = engine.evaluate_roster(roster.records(), processing_date());

    let summary: Vec<(usize, DateField)> = evaluation
        .notices
        .iter()
        .map(|notice| (notice.row, notice.error.field()))
        .collect();
    assert_eq!(
        summary,
        vec![(2, DateField::PhdDefense), (3, DateField::EmploymentStart)]
    );
    assert!(matches!(
        evaluation.notices[1].error,
        EligibilityError::MissingField { .. }
    ));
    assert_eq!(evaluation.notices[0].error.researcher(), "Grace Hopper");
}

#[test]
fn refreshed_staff_list_feeds_the_engine() {
    let hr_export = "\
First Name,Last name,Initials,Employment Start Date,Function
Ada,Lovelace,A.,2024-02-01 00:00:00,Postdoc
";
    let previous = "\
First Name,Last name,Initials,PhD Defense Date,Gender,Count of children applicable
Ada,Lovelace,A.,2018-06-01,Female,2
";
    let functions: Vec<String> = DEFAULT_RESEARCHER_FUNCTIONS
        .iter()
        .map(|keyword| keyword.to_string())
        .collect();
    let update =
        StaffListUpdate::from_readers(Cursor::new(hr_export), Cursor::new(previous), &functions)
            .expect("staff list updates");
    assert!(update.notices.is_empty());

    let mut buffer = Vec::new();
    update.write(&mut buffer).expect("staff list writes");

    let roster = RosterImporter::from_reader(Cursor::new(buffer)).expect("roster imports");
    let evaluation =
        EligibilityEngine::default().evaluate_roster(roster.records(), processing_date());

    let ada = &evaluation.results[0];
    assert_eq!(
        ada.get(GrantFamily::NwoTalent).map(ToString::to_string),
        Some("Veni 2024".to_string())
    );
    assert_eq!(
        ada.get(GrantFamily::Msca).map(ToString::to_string),
        Some("Eligible until 2026".to_string())
    );
}

#[test]
fn synthetic_roster_evaluates_without_notices() {
    let start = NaiveDate::from_ymd_opt(2005, 1, 1).expect("valid start");
    let hired = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid hire date");
    let records = consecutive_defense_dates(start, 7670, hired);

    let engine = EligibilityEngine::default();
    let first = engine.evaluate_roster(&records, processing_date());
    let second = engine.evaluate_roster(&records, processing_date());

    assert_eq!(first.results.len(), 7670);
    assert!(first.notices.is_empty());
    assert_eq!(first, second);
}
