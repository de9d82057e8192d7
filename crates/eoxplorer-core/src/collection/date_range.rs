use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EoError, Result};

/// Half-open acquisition window: `start <= t < end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DateRangeRepr", into = "DateRangeRepr")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(EoError::InvalidDateRange(format!(
                "end {end} is not after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Midnight-to-midnight window; `end` itself is excluded.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(
            start.and_time(NaiveTime::MIN).and_utc(),
            end.and_time(NaiveTime::MIN).and_utc(),
        )
    }

    /// Caller guarantees `start < end`.
    pub(crate) fn from_dates_unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start < end);
        Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end: end.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Parse each bound either as `YYYY-MM-DD` or as RFC 3339.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_bound(start)?, parse_bound(end)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

fn parse_bound(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| EoError::InvalidDateRange(format!("cannot parse '{s}': {e}")))
}

#[derive(Serialize, Deserialize)]
struct DateRangeRepr {
    start: String,
    end: String,
}

impl TryFrom<DateRangeRepr> for DateRange {
    type Error = EoError;

    fn try_from(repr: DateRangeRepr) -> Result<Self> {
        Self::parse(&repr.start, &repr.end)
    }
}

impl From<DateRange> for DateRangeRepr {
    fn from(range: DateRange) -> Self {
        let fmt_bound = |t: DateTime<Utc>| {
            if t.time() == NaiveTime::MIN {
                t.date_naive().format("%Y-%m-%d").to_string()
            } else {
                t.to_rfc3339()
            }
        };
        Self {
            start: fmt_bound(range.start),
            end: fmt_bound(range.end),
        }
    }
}
