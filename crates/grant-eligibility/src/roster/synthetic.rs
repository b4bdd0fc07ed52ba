//! Generated rosters for demos and sweeps over the tier boundaries.

use crate::eligibility::dates::ROSTER_DATE_FORMAT;
use crate::eligibility::ResearcherRecord;
use chrono::{Duration, NaiveDate};

/// One researcher per day starting at `first_defense`, all hired on `employment_start`.
pub fn consecutive_defense_dates(
    first_defense: NaiveDate,
    count: usize,
    employment_start: NaiveDate,
) -> Vec<ResearcherRecord> {
    let employment_start = employment_start.format(ROSTER_DATE_FORMAT).to_string();

    (0..count)
        .map_while(|offset| {
            let defense = first_defense.checked_add_signed(Duration::days(offset as i64))?;
            let defense = defense.format(ROSTER_DATE_FORMAT).to_string();
            Some(
                ResearcherRecord::new("Test", "User")
                    .with_phd_defense_date(defense.clone())
                    .with_children_corrected_phd_date(defense)
                    .with_employment_start_date(employment_start.clone()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_advance_one_day_per_row() {
        let start = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        let hired = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let roster = consecutive_defense_dates(start, 3, hired);

        let dates: Vec<_> = roster
            .iter()
            .map(|record| record.phd_defense_date.as_deref().unwrap())
            .collect();
        assert_eq!(dates, vec!["2005-01-01", "2005-01-02", "2005-01-03"]);
        assert!(roster
            .iter()
            .all(|record| record.employment_start_date.as_deref() == Some("2024-01-01")));
    }
}
