//! Configuration validation and resolution into runtime values.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::loader::{
    default_user_agent, AccountConfig, DateBound, FiltersConfig, DEFAULT_CLIENT_ID,
};
use crate::error::{Error, Result};
use crate::filters::{parse_id_bound, FilterSet};

/// Resolved API credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub user_agent: String,
}

/// Resolve account credentials, enforcing that a custom client id and a
/// custom user agent are only used together.
pub fn resolve_credentials(account: &AccountConfig) -> Credentials {
    let custom_id = account.client_id != DEFAULT_CLIENT_ID;
    let custom_agent = account.user_agent != default_user_agent();

    if custom_id != custom_agent {
        tracing::warn!(
            "'client-id' and 'user-agent' must be overridden together; \
             falling back to the built-in credentials"
        );
        return Credentials {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            user_agent: default_user_agent(),
        };
    }

    Credentials {
        client_id: account.client_id.clone(),
        user_agent: account.user_agent.clone(),
    }
}

/// Resolve the configured filter bounds into a [`FilterSet`].
pub fn resolve_filters(filters: &FiltersConfig) -> Result<FilterSet> {
    let mut resolved = FilterSet::default();

    if let Some(value) = nonempty(&filters.id_min) {
        resolved.ids.min = parse_id_bound(value).ok_or_else(|| Error::ConfigValidation {
            field: "id-min".to_string(),
            message: format!("'{}' is not a base-36 id", value),
        })?;
    }
    if let Some(value) = nonempty(&filters.id_max) {
        resolved.ids.max = parse_id_bound(value).ok_or_else(|| Error::ConfigValidation {
            field: "id-max".to_string(),
            message: format!("'{}' is not a base-36 id", value),
        })?;
    }
    if let Some(bound) = &filters.date_min {
        resolved.dates.min = parse_date_bound("date-min", bound)?;
    }
    if let Some(bound) = &filters.date_max {
        resolved.dates.max = parse_date_bound("date-max", bound)?;
    }

    Ok(resolved)
}

/// Return the refresh token if one is configured and non-empty.
pub fn resolve_refresh_token(account: &AccountConfig) -> Option<String> {
    account
        .refresh_token
        .clone()
        .filter(|token| !token.is_empty())
}

fn nonempty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_date_bound(field: &str, bound: &DateBound) -> Result<i64> {
    match bound {
        DateBound::Epoch(seconds) => Ok(*seconds),
        DateBound::Text(text) => parse_date_text(text).ok_or_else(|| Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' is not an epoch timestamp or ISO date", text),
        }),
    }
}

/// Parse a date string as epoch seconds, `YYYY-MM-DDTHH:MM:SS` or
/// `YYYY-MM-DD` (midnight UTC).
fn parse_date_text(text: &str) -> Option<i64> {
    if let Ok(seconds) = text.parse::<i64>() {
        return Some(seconds);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.and_utc().timestamp());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}
