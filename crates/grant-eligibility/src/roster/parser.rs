use super::normalizer::parse_children_count;
use crate::eligibility::{Gender, ResearcherRecord};
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Columns of the researchers roster the engine reads. Anything else passes through.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterRow {
    #[serde(
        rename = "First Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    first_name: Option<String>,
    #[serde(
        rename = "Last name",
        alias = "Last Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_name: Option<String>,
    #[serde(rename = "Gender", default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(
        rename = "PhD Defense Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    phd_defense_date: Option<String>,
    #[serde(
        rename = "Children corrected PhD date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    children_corrected_phd_date: Option<String>,
    #[serde(
        rename = "Count of children applicable",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    children: Option<String>,
    #[serde(
        rename = "Employment Start Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    employment_start_date: Option<String>,
}

impl RosterRow {
    pub(crate) fn into_record(self, row: usize) -> ResearcherRecord {
        let children_count = match self.children.as_deref() {
            None => 0,
            Some(raw) => parse_children_count(raw).unwrap_or_else(|| {
                warn!(row, value = raw, "unreadable children count, assuming none");
                0
            }),
        };

        ResearcherRecord {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            phd_defense_date: self.phd_defense_date,
            children_corrected_phd_date: self.children_corrected_phd_date,
            gender: self
                .gender
                .as_deref()
                .map(Gender::parse)
                .unwrap_or_default(),
            children_count,
            employment_start_date: self.employment_start_date,
        }
    }
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}
