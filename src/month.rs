use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, the granularity of the location statistics views.
/// Displays and parses as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseYearMonthError(String);

impl fmt::Display for ParseYearMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid month '{}', expected YYYY-MM", self.0)
    }
}

impl std::error::Error for ParseYearMonthError {}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether `date` falls inside this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseYearMonthError(s.to_string());
        let (year_s, month_s) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year_s.parse().map_err(|_| err())?;
        let month: u32 = month_s.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        Ok(Self { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_year_month() {
        let ym: YearMonth = "2024-05".parse().unwrap();
        assert_eq!(ym, YearMonth::new(2024, 5));
        assert_eq!(ym.to_string(), "2024-05");
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("may-2024".parse::<YearMonth>().is_err());
    }

    #[test]
    fn contains_checks_year_and_month() {
        let ym = YearMonth::new(2024, 5);
        assert!(ym.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2023, 5, 10).unwrap()));
    }
}
