//! Identifier and date range filters applied to listing items.

/// Default upper bound for identifier filtering.
pub const ID_MAX_DEFAULT: u64 = 2147483647;

/// Default upper bound for date filtering (year 9999).
pub const DATE_MAX_DEFAULT: i64 = 253402210800;

/// Decodes a base-36 identifier over the alphabet `0-9a-z` into its
/// numeric value.
///
/// Returns `None` when the input contains a character outside the
/// alphabet; uppercase input must be lowercased by the caller first.
pub fn decode_id(id: &str) -> Option<u64> {
    let mut value: u64 = 0;
    for byte in id.bytes() {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'z' => byte - b'a' + 10,
            _ => return None,
        };
        value = value.checked_mul(36)?.checked_add(u64::from(digit))?;
    }
    Some(value)
}

/// Parses a configured identifier bound.
///
/// Accepts values carrying a type prefix (`t3_abc123`) in any case by
/// taking the part after the last underscore, lowercased.
pub fn parse_id_bound(value: &str) -> Option<u64> {
    let bare = value.rsplit('_').next().unwrap_or(value);
    decode_id(&bare.to_lowercase())
}

/// Inclusive identifier range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub min: u64,
    pub max: u64,
}

impl Default for IdRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: ID_MAX_DEFAULT,
        }
    }
}

impl IdRange {
    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Inclusive creation-date range in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub min: i64,
    pub max: i64,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: DATE_MAX_DEFAULT,
        }
    }
}

impl DateRange {
    pub fn contains(&self, timestamp: f64) -> bool {
        self.min as f64 <= timestamp && timestamp <= self.max as f64
    }
}

/// Combined listing filters evaluated per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterSet {
    pub ids: IdRange,
    pub dates: DateRange,
}

impl FilterSet {
    /// Checks one listing item against both ranges.
    ///
    /// Identifiers that cannot be decoded are treated as out of range and
    /// dropped rather than aborting the listing walk.
    pub fn accepts(&self, id: &str, created_utc: f64) -> bool {
        if !self.dates.contains(created_utc) {
            return false;
        }
        match decode_id(id) {
            Some(value) => self.ids.contains(value),
            None => {
                tracing::debug!("undecodable id '{}' dropped by filter", id);
                false
            }
        }
    }
}
