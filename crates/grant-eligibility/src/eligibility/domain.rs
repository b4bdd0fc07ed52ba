use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Gender as recorded by the grants office; drives the parental-leave adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" | "f" | "woman" => Self::Female,
            "male" | "m" | "man" => Self::Male,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Other => "Other",
        }
    }
}

impl From<Option<String>> for Gender {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.label().to_string()
    }
}

/// One row of the researchers roster.
///
/// Dates are kept as the text the roster supplied; `dates::parse_record_date`
/// is the only place that turns them into calendar dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phd_defense_date: Option<String>,
    #[serde(default)]
    pub children_corrected_phd_date: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub children_count: u32,
    #[serde(default)]
    pub employment_start_date: Option<String>,
}

impl ResearcherRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_phd_defense_date(mut self, value: impl Into<String>) -> Self {
        self.phd_defense_date = Some(value.into());
        self
    }

    pub fn with_children_corrected_phd_date(mut self, value: impl Into<String>) -> Self {
        self.children_corrected_phd_date = Some(value.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_children(mut self, count: u32) -> Self {
        self.children_count = count;
        self
    }

    pub fn with_employment_start_date(mut self, value: impl Into<String>) -> Self {
        self.employment_start_date = Some(value.into());
        self
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn date_text(&self, field: DateField) -> Option<&str> {
        match field {
            DateField::PhdDefense => self.phd_defense_date.as_deref(),
            DateField::ChildrenCorrectedPhd => self.children_corrected_phd_date.as_deref(),
            DateField::EmploymentStart => self.employment_start_date.as_deref(),
        }
    }
}

/// Selects one of the date fields of a [`ResearcherRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    PhdDefense,
    ChildrenCorrectedPhd,
    EmploymentStart,
}

impl DateField {
    pub fn column(&self) -> &'static str {
        match self {
            DateField::PhdDefense => "PhD Defense Date",
            DateField::ChildrenCorrectedPhd => "Children corrected PhD date",
            DateField::EmploymentStart => "Employment Start Date",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantFamily {
    NwoTalent,
    NwoOc,
    Erc,
    Msca,
}

impl GrantFamily {
    pub const ALL: [GrantFamily; 4] = [
        GrantFamily::NwoTalent,
        GrantFamily::NwoOc,
        GrantFamily::Erc,
        GrantFamily::Msca,
    ];

    /// Column header used when the roster is written back out.
    pub fn column(&self) -> &'static str {
        match self {
            GrantFamily::NwoTalent => "Eligible NWO Talent",
            GrantFamily::NwoOc => "Eligible NWO OC",
            GrantFamily::Erc => "Eligible ERC",
            GrantFamily::Msca => "Eligible MSCA",
        }
    }
}

/// A tier code with the last year the researcher may apply, when the tier has one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantLabel {
    pub code: &'static str,
    pub terminal_year: Option<i32>,
}

impl GrantLabel {
    pub fn open_ended(code: &'static str) -> Self {
        Self {
            code,
            terminal_year: None,
        }
    }

    pub fn until(code: &'static str, year: i32) -> Self {
        Self {
            code,
            terminal_year: Some(year),
        }
    }
}

impl fmt::Display for GrantLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.terminal_year {
            Some(year) => write!(f, "{} {}", self.code, year),
            None => f.write_str(self.code),
        }
    }
}

impl Serialize for GrantLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Best matching tier per grant family for one researcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub nwo_talent: Option<GrantLabel>,
    pub nwo_oc: Option<GrantLabel>,
    pub erc: Option<GrantLabel>,
    pub msca: Option<GrantLabel>,
}

impl EligibilityResult {
    pub fn get(&self, family: GrantFamily) -> Option<&GrantLabel> {
        match family {
            GrantFamily::NwoTalent => self.nwo_talent.as_ref(),
            GrantFamily::NwoOc => self.nwo_oc.as_ref(),
            GrantFamily::Erc => self.erc.as_ref(),
            GrantFamily::Msca => self.msca.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrantFamily, Option<&GrantLabel>)> + '_ {
        GrantFamily::ALL
            .into_iter()
            .map(move |family| (family, self.get(family)))
    }
}
