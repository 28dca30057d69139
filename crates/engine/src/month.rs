//! Month selector to date-range derivation.

use crate::{EngineError, ResultEngine};

/// Half-open date interval `[start, end)` covering one calendar month.
///
/// `end` is always the first day of the following month, so consumers can
/// query `date >= start AND date < end` without knowing month lengths or
/// leap years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRange {
    /// First day of the month, ISO `YYYY-MM-DD`.
    pub start: String,
    /// First day of the following month, excluded.
    pub end: String,
}

impl MonthRange {
    /// Returns `true` if the ISO date falls inside the interval.
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && date < self.end.as_str()
    }
}

/// Derives the date interval for a `YYYY-MM` selector.
///
/// The input must be exactly four digits, a dash and two digits, with the
/// month in `[01, 12]`; anything else is [`EngineError::InvalidMonth`].
/// December rolls over into January of the next year.
pub fn resolve(month: &str) -> ResultEngine<MonthRange> {
    let (year_raw, month_raw) = month
        .split_once('-')
        .ok_or_else(|| EngineError::InvalidMonth(month.to_string()))?;

    if year_raw.len() != 4
        || month_raw.len() != 2
        || !year_raw.bytes().all(|b| b.is_ascii_digit())
        || !month_raw.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(EngineError::InvalidMonth(month.to_string()));
    }

    let year: i32 = year_raw
        .parse()
        .map_err(|_| EngineError::InvalidMonth(month.to_string()))?;
    let month_num: u32 = month_raw
        .parse()
        .map_err(|_| EngineError::InvalidMonth(month.to_string()))?;
    if !(1..=12).contains(&month_num) {
        return Err(EngineError::InvalidMonth(month.to_string()));
    }

    let start = format!("{year:04}-{month_num:02}-01");
    let end = if month_num == 12 {
        format!("{:04}-01-01", year + 1)
    } else {
        format!("{year:04}-{:02}-01", month_num + 1)
    };

    Ok(MonthRange { start, end })
}
