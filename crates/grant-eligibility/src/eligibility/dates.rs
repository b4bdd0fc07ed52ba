use super::domain::{DateField, Gender, ResearcherRecord};
use super::error::EligibilityError;
use chrono::{Months, NaiveDate};

pub const ROSTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Divisor turning a day count into fractional years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Average month length used for the MSCA residence check.
pub const DAYS_PER_MONTH: f64 = 30.44;

const FEMALE_LEAVE_MONTHS_PER_CHILD: u32 = 18;
const MALE_LEAVE_MONTHS_PER_CHILD: u32 = 6;

/// Reads one date field of a record. Blank text counts as absent.
pub fn parse_record_date(
    record: &ResearcherRecord,
    field: DateField,
) -> Result<Option<NaiveDate>, EligibilityError> {
    let Some(raw) = record.date_text(field) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, ROSTER_DATE_FORMAT)
        .map(Some)
        .map_err(|_| EligibilityError::DateParse {
            researcher: record.display_name(),
            field,
            value: Some(trimmed.to_string()),
        })
}

/// PhD defense date pushed forward by parental leave.
pub fn children_corrected_phd_date(
    phd_defense_date: NaiveDate,
    gender: Gender,
    children: u32,
) -> Option<NaiveDate> {
    let months_per_child = match gender {
        Gender::Female => FEMALE_LEAVE_MONTHS_PER_CHILD,
        Gender::Male => MALE_LEAVE_MONTHS_PER_CHILD,
        Gender::Other => 0,
    };

    let months = months_per_child.checked_mul(children)?;
    phd_defense_date.checked_add_months(Months::new(months))
}

pub fn years_between(anchor: NaiveDate, reference: NaiveDate) -> f64 {
    reference.signed_duration_since(anchor).num_days() as f64 / DAYS_PER_YEAR
}

pub fn months_between(start: NaiveDate, reference: NaiveDate) -> f64 {
    reference.signed_duration_since(start).num_days() as f64 / DAYS_PER_MONTH
}

/// Career-clock dates of one researcher, parsed once per evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub phd_defense: Option<NaiveDate>,
    pub children_corrected: Option<NaiveDate>,
    pub employment_start: Option<NaiveDate>,
    pub gender: Gender,
}

impl Anchors {
    /// Parses every date field, collecting one diagnostic per unusable field.
    ///
    /// An absent PhD defense date is reported because every grant family
    /// depends on it. An absent corrected date or employment start is left to
    /// the rules that need them.
    pub fn resolve(record: &ResearcherRecord) -> (Self, Vec<EligibilityError>) {
        let mut issues = Vec::new();
        let mut read = |field: DateField| match parse_record_date(record, field) {
            Ok(date) => date,
            Err(err) => {
                issues.push(err);
                None
            }
        };

        let anchors = Self {
            phd_defense: read(DateField::PhdDefense),
            children_corrected: read(DateField::ChildrenCorrectedPhd),
            employment_start: read(DateField::EmploymentStart),
            gender: record.gender,
        };

        let phd_blank = record
            .date_text(DateField::PhdDefense)
            .map_or(true, |raw| raw.trim().is_empty());
        if phd_blank {
            issues.insert(
                0,
                EligibilityError::DateParse {
                    researcher: record.display_name(),
                    field: DateField::PhdDefense,
                    value: None,
                },
            );
        }

        (anchors, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_trimmed_iso_dates() {
        let record = ResearcherRecord::new("Ada", "Lovelace").with_phd_defense_date(" 2018-06-01 ");
        assert_eq!(
            parse_record_date(&record, DateField::PhdDefense),
            Ok(Some(date(2018, 6, 1)))
        );
    }

    #[test]
    fn blank_text_is_absent_not_an_error() {
        let record = ResearcherRecord::new("Ada", "Lovelace").with_phd_defense_date("   ");
        assert_eq!(parse_record_date(&record, DateField::PhdDefense), Ok(None));
        assert_eq!(parse_record_date(&record, DateField::EmploymentStart), Ok(None));
    }

    #[test]
    fn malformed_text_names_researcher_and_value() {
        let record = ResearcherRecord::new("Ada", "Lovelace").with_phd_defense_date("01/06/2018");
        let err = parse_record_date(&record, DateField::PhdDefense).expect_err("must fail");
        assert_eq!(
            err,
            EligibilityError::DateParse {
                researcher: "Ada Lovelace".to_string(),
                field: DateField::PhdDefense,
                value: Some("01/06/2018".to_string()),
            }
        );
        assert!(err.to_string().contains("'01/06/2018'"));
    }

    #[test]
    fn female_leave_is_eighteen_months_per_child() {
        assert_eq!(
            children_corrected_phd_date(date(2018, 6, 1), Gender::Female, 2),
            Some(date(2021, 6, 1))
        );
    }

    #[test]
    fn male_leave_is_six_months_per_child() {
        assert_eq!(
            children_corrected_phd_date(date(2018, 6, 1), Gender::Male, 3),
            Some(date(2019, 12, 1))
        );
    }

    #[test]
    fn unspecified_gender_keeps_the_defense_date() {
        assert_eq!(
            children_corrected_phd_date(date(2018, 6, 1), Gender::Other, 4),
            Some(date(2018, 6, 1))
        );
    }

    #[test]
    fn leave_clamps_to_end_of_month() {
        assert_eq!(
            children_corrected_phd_date(date(2019, 8, 31), Gender::Female, 1),
            Some(date(2021, 2, 28))
        );
    }

    #[test]
    fn elapsed_years_use_quarter_day_divisor() {
        let elapsed = years_between(date(2020, 1, 1), date(2022, 1, 1));
        assert!((elapsed - 731.0 / 365.25).abs() < f64::EPSILON);
        assert!(years_between(date(2025, 6, 1), date(2025, 1, 1)) < 0.0);
    }

    #[test]
    fn resolve_reports_absent_phd_once() {
        let record = ResearcherRecord::new("Grace", "Hopper").with_employment_start_date("2023-01-01");
        let (anchors, issues) = Anchors::resolve(&record);

        assert_eq!(anchors.phd_defense, None);
        assert_eq!(anchors.employment_start, Some(date(2023, 1, 1)));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field(), DateField::PhdDefense);
    }

    #[test]
    fn resolve_collects_each_malformed_field() {
        let record = ResearcherRecord::new("Grace", "Hopper")
            .with_phd_defense_date("2018-02-30")
            .with_children_corrected_phd_date("2019-01-01")
            .with_employment_start_date("soon");
        let (anchors, issues) = Anchors::resolve(&record);

        assert_eq!(anchors.phd_defense, None);
        assert_eq!(anchors.children_corrected, Some(date(2019, 1, 1)));
        let fields: Vec<_> = issues.iter().map(EligibilityError::field).collect();
        assert_eq!(fields, vec![DateField::PhdDefense, DateField::EmploymentStart]);
    }
}
