use super::{var, ConfigError};
use crate::eligibility::dates::ROSTER_DATE_FORMAT;
use crate::eligibility::EligibilityPolicy;
use chrono::NaiveDate;

/// Starts from the built-in policy and applies `ELIGIBILITY_*` overrides.
pub(super) fn from_env() -> Result<EligibilityPolicy, ConfigError> {
    let mut policy = EligibilityPolicy::default();

    if let Some(value) = var("ELIGIBILITY_VENI_LOWER_BOUND") {
        policy.veni_lower_bound_years = match value.trim().parse::<f64>() {
            Ok(years) if years.is_finite() => years,
            _ => return Err(ConfigError::InvalidVeniLowerBound { value }),
        };
    }

    if let Some(value) = var("ELIGIBILITY_MSCA_DEADLINE") {
        policy.msca_deadline = match NaiveDate::parse_from_str(value.trim(), ROSTER_DATE_FORMAT) {
            Ok(deadline) => deadline,
            Err(source) => return Err(ConfigError::InvalidMscaDeadline { value, source }),
        };
    }

    Ok(policy)
}
