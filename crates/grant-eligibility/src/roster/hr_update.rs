//! Refreshes the researchers roster from a new HR staff export.
//!
//! HR knows who is employed; the grants office knows gender, children and
//! PhD dates. The update keeps researcher positions from the HR export,
//! carries the grants office's columns over from the previous roster and
//! recomputes the leave-corrected PhD date.

use super::normalizer::{
    normalize_date_cell, normalize_name, pad_record, parse_children_count,
};
use super::parser::empty_string_as_none;
use super::RosterError;
use crate::eligibility::dates::ROSTER_DATE_FORMAT;
use crate::eligibility::{
    children_corrected_phd_date, parse_record_date, Gender, ResearcherRecord, RosterNotice,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use tracing::{info, warn};

/// Function-name fragments that mark a researcher position.
pub const DEFAULT_RESEARCHER_FUNCTIONS: &[&str] = &[
    "onderzoeker",
    "researcher",
    "postdoc",
    "promovendus",
    "phd candidate",
    "docent",
    "lecturer",
    "hoogleraar",
    "professor",
];

/// Output column order of the refreshed roster.
pub const STAFF_COLUMNS: [&str; 16] = [
    "First Name",
    "Tussenv.",
    "Last name",
    "Initials",
    "FTE",
    "Faculty",
    "Research Group",
    "PhD Defense Date",
    "Employment Start Date",
    "Employment Termination Date",
    "Function",
    "Birth Date",
    "Gender",
    "Count of children applicable",
    "Remarks",
    "Children corrected PhD date",
];

/// One staff member as it appears in both the HR export and the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRow {
    #[serde(rename = "First Name", default, deserialize_with = "empty_string_as_none")]
    pub first_name: Option<String>,
    #[serde(rename = "Tussenv.", default, deserialize_with = "empty_string_as_none")]
    pub tussenvoegsel: Option<String>,
    #[serde(
        rename = "Last name",
        alias = "Last Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub last_name: Option<String>,
    #[serde(rename = "Initials", default, deserialize_with = "empty_string_as_none")]
    pub initials: Option<String>,
    #[serde(rename = "FTE", default, deserialize_with = "empty_string_as_none")]
    pub fte: Option<String>,
    #[serde(rename = "Faculty", default, deserialize_with = "empty_string_as_none")]
    pub faculty: Option<String>,
    #[serde(
        rename = "Research Group",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub research_group: Option<String>,
    #[serde(
        rename = "PhD Defense Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub phd_defense_date: Option<String>,
    #[serde(
        rename = "Employment Start Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub employment_start_date: Option<String>,
    #[serde(
        rename = "Employment Termination Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub employment_termination_date: Option<String>,
    #[serde(rename = "Function", default, deserialize_with = "empty_string_as_none")]
    pub function: Option<String>,
    #[serde(rename = "Birth Date", default, deserialize_with = "empty_string_as_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "Gender", default, deserialize_with = "empty_string_as_none")]
    pub gender: Option<String>,
    #[serde(
        rename = "Count of children applicable",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub children: Option<String>,
    #[serde(rename = "Remarks", default, deserialize_with = "empty_string_as_none")]
    pub remarks: Option<String>,
    #[serde(
        rename = "Children corrected PhD date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub children_corrected_phd_date: Option<String>,
}

impl StaffRow {
    fn join_key(&self) -> Option<(String, String)> {
        let last_name = normalize_name(self.last_name.as_deref()?);
        let initials = normalize_name(self.initials.as_deref().unwrap_or_default());
        Some((last_name, initials))
    }

    fn holds_function(&self, keywords: &[String]) -> bool {
        let Some(function) = self.function.as_deref() else {
            return false;
        };
        let function = normalize_name(function);
        keywords
            .iter()
            .any(|keyword| function.contains(keyword.as_str()))
    }

    fn researcher(&self) -> ResearcherRecord {
        ResearcherRecord {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            phd_defense_date: self.phd_defense_date.clone(),
            children_corrected_phd_date: None,
            gender: self
                .gender
                .as_deref()
                .map(Gender::parse)
                .unwrap_or_default(),
            children_count: self
                .children
                .as_deref()
                .and_then(parse_children_count)
                .unwrap_or(0),
            employment_start_date: self.employment_start_date.clone(),
        }
    }

    fn carry_over(&mut self, previous: &StaffRow) {
        fn prefer(target: &mut Option<String>, preferred: &Option<String>) {
            if preferred.is_some() {
                target.clone_from(preferred);
            }
        }

        prefer(&mut self.first_name, &previous.first_name);
        prefer(&mut self.gender, &previous.gender);
        prefer(&mut self.children, &previous.children);
        prefer(&mut self.remarks, &previous.remarks);
        prefer(&mut self.phd_defense_date, &previous.phd_defense_date);
    }

    fn normalize_dates(&mut self) {
        for cell in [
            &mut self.phd_defense_date,
            &mut self.employment_start_date,
            &mut self.employment_termination_date,
            &mut self.birth_date,
        ] {
            if let Some(value) = cell.as_mut() {
                *value = normalize_date_cell(value);
            }
        }
    }
}

/// Refreshed roster rows and the data problems found while building them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffListUpdate {
    pub rows: Vec<StaffRow>,
    pub notices: Vec<RosterNotice>,
}

impl StaffListUpdate {
    pub fn from_readers<H: Read, P: Read>(
        hr_export: H,
        previous_roster: P,
        functions: &[String],
    ) -> Result<Self, RosterError> {
        let hr_rows = read_staff_rows(hr_export)?;
        let previous = read_staff_rows(previous_roster)?;
        Ok(update_staff_list(hr_rows, &previous, functions))
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), RosterError> {
        write_staff_rows(&self.rows, writer)
    }
}

/// Filters HR rows to researchers, merges the previous roster into them and
/// recomputes the corrected PhD date.
pub fn update_staff_list(
    hr_rows: Vec<StaffRow>,
    previous: &[StaffRow],
    functions: &[String],
) -> StaffListUpdate {
    let keywords: Vec<String> = functions
        .iter()
        .map(|keyword| normalize_name(keyword))
        .filter(|keyword| !keyword.is_empty())
        .collect();

    let mut known: HashMap<(String, String), &StaffRow> = HashMap::new();
    for row in previous {
        if let Some(key) = row.join_key() {
            known.entry(key).or_insert(row);
        }
    }

    let hr_total = hr_rows.len();
    let mut rows: Vec<StaffRow> = Vec::new();
    for mut row in hr_rows
        .into_iter()
        .filter(|row| row.holds_function(&keywords))
    {
        if let Some(previous) = row.join_key().and_then(|key| known.get(&key)) {
            row.carry_over(previous);
        }
        row.normalize_dates();
        row.children_corrected_phd_date = None;

        if !rows.contains(&row) {
            rows.push(row);
        }
    }

    let mut notices = Vec::new();
    for (index, row) in rows.iter_mut().enumerate() {
        let researcher = row.researcher();
        match parse_record_date(&researcher, crate::eligibility::DateField::PhdDefense) {
            Ok(Some(phd)) => {
                row.children_corrected_phd_date =
                    children_corrected_phd_date(phd, researcher.gender, researcher.children_count)
                        .map(|date| date.format(ROSTER_DATE_FORMAT).to_string());
            }
            Ok(None) => {}
            Err(error) => {
                warn!(row = index, %error, "corrected PhD date left blank");
                notices.push(RosterNotice { row: index, error });
            }
        }
    }

    info!(
        hr_rows = hr_total,
        researchers = rows.len(),
        "staff list updated"
    );

    StaffListUpdate { rows, notices }
}

pub fn read_staff_rows<R: Read>(reader: R) -> Result<Vec<StaffRow>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let mut record = result?;
        pad_record(&mut record, headers.len());
        rows.push(record.deserialize(Some(&headers))?);
    }
    Ok(rows)
}

pub fn write_staff_rows<W: Write>(rows: &[StaffRow], writer: W) -> Result<(), RosterError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(STAFF_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
