use chrono::NaiveDate;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Strict calendar-date pattern (YYYY-MM-DD, year 19xx/20xx).
/// Using LazyLock for thread-safe initialization. Kept strict to avoid
/// false positives on ID strings like "P-2024-001".
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(19|20)\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap()
});

/// A typed sort key extracted from a record field.
///
/// Records store dates and clock times as display strings; the accessors
/// on each record type parse them into `Date` / `ClockTime` so ordering
/// is chronological rather than lexical ("9:15 AM" must sort before
/// "10:30 AM"). Anything unparseable becomes `Null`, which compares
/// below every other value and therefore sorts first ascending.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    /// Minutes since midnight.
    ClockTime(u16),
    Null,
}

impl FieldValue {
    /// Parse a `YYYY-MM-DD` date string. Failure yields `Null`.
    pub fn date(s: &str) -> Self {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(FieldValue::Date)
            .unwrap_or(FieldValue::Null)
    }

    /// Parse a 12-hour clock string like `"10:30 AM"` into minutes since
    /// midnight. Hour 12 in the AM period maps to 0; hours 1-11 in the
    /// PM period add 12. Failure yields `Null`.
    pub fn clock(s: &str) -> Self {
        parse_clock_minutes(s)
            .map(FieldValue::ClockTime)
            .unwrap_or(FieldValue::Null)
    }

    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::ClockTime(m) => write!(f, "{:02}:{:02}", m / 60, m % 60),
            FieldValue::Null => write!(f, ""),
        }
    }
}

/// Convert `"h:mm AM|PM"` to minutes since midnight.
fn parse_clock_minutes(s: &str) -> Option<u16> {
    let (time, period) = s.trim().split_once(' ')?;
    let (hours, minutes) = time.split_once(':')?;
    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;

    if !(1..=12).contains(&hours) || minutes > 59 {
        return None;
    }

    let hours = if period.eq_ignore_ascii_case("PM") && hours != 12 {
        hours + 12
    } else if period.eq_ignore_ascii_case("AM") && hours == 12 {
        0
    } else if period.eq_ignore_ascii_case("AM") || period.eq_ignore_ascii_case("PM") {
        hours
    } else {
        return None;
    };

    Some(hours * 60 + minutes)
}

/// Check whether a string looks like a `YYYY-MM-DD` date.
///
/// Used by the loaders to warn about malformed date columns without
/// rejecting the record.
pub fn looks_like_date(value: &str) -> bool {
    // Quick length check before the regex
    if value.len() != 10 {
        return false;
    }
    DATE_PATTERN.is_match(value)
}

/// Total comparison over field values.
///
/// Same-type pairs use natural ordering, Integer/Float pairs compare
/// numerically, and Null sorts below everything. Remaining cross-type
/// pairs fall back to a fixed type rank so the ordering stays total:
/// Null < Integer/Float < String < Date < ClockTime.
pub fn compare_field_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    use FieldValue::*;

    match (a, b) {
        (Integer(a), Integer(b)) => a.cmp(b),
        (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (String(a), String(b)) => a.cmp(b),
        (Date(a), Date(b)) => a.cmp(b),
        (ClockTime(a), ClockTime(b)) => a.cmp(b),

        (Integer(i), Float(f)) => (*i as f64).partial_cmp(f).unwrap_or(Ordering::Equal),
        (Float(f), Integer(i)) => f.partial_cmp(&(*i as f64)).unwrap_or(Ordering::Equal),

        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,

        (a, b) => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &FieldValue) -> u8 {
    match v {
        FieldValue::Null => 0,
        FieldValue::Integer(_) | FieldValue::Float(_) => 1,
        FieldValue::String(_) => 2,
        FieldValue::Date(_) => 3,
        FieldValue::ClockTime(_) => 4,
    }
}
