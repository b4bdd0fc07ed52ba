use super::domain::DateField;
use serde::Serialize;
use thiserror::Error;

/// Data problems found while evaluating a researcher. None of them stop a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityError {
    #[error("could not read {field} of researcher {researcher}: {}", describe_value(.value))]
    DateParse {
        researcher: String,
        field: DateField,
        value: Option<String>,
    },
    #[error("researcher {researcher} has no {field}, which MSCA eligibility requires")]
    MissingField { researcher: String, field: DateField },
}

impl EligibilityError {
    pub fn field(&self) -> DateField {
        match self {
            EligibilityError::DateParse { field, .. }
            | EligibilityError::MissingField { field, .. } => *field,
        }
    }

    pub fn researcher(&self) -> &str {
        match self {
            EligibilityError::DateParse { researcher, .. }
            | EligibilityError::MissingField { researcher, .. } => researcher,
        }
    }
}

fn describe_value(value: &Option<String>) -> String {
    match value {
        Some(text) => format!("'{text}' is not a YYYY-MM-DD date"),
        None => "no date given".to_string(),
    }
}
