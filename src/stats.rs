use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::course::CourseRecord;
use crate::month::YearMonth;

/// Per-location hour totals for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationHours {
    pub location: String,
    pub total_hours: f64,
}

/// Result of the monthly per-location breakdown. A month without any
/// matching records is reported explicitly, never as an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthlyBreakdown {
    NoData,
    Locations(Vec<LocationHours>),
}

/// Records sorted by date descending. The sort is stable, so records
/// sharing a date keep their relative collection order.
pub fn by_date_desc(records: &[CourseRecord]) -> Vec<CourseRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Sum of `duration` over the whole collection, unfiltered by month.
pub fn total_hours(records: &[CourseRecord]) -> f64 {
    records.iter().map(|record| record.duration).sum()
}

/// Hours per location restricted to one calendar month. Output is sorted
/// by location name; the grouping itself carries no order.
pub fn location_breakdown(records: &[CourseRecord], month: YearMonth) -> MonthlyBreakdown {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| month.contains(r.date)) {
        *totals.entry(record.location.as_str()).or_insert(0.0) += record.duration;
    }
    if totals.is_empty() {
        return MonthlyBreakdown::NoData;
    }
    MonthlyBreakdown::Locations(
        totals
            .into_iter()
            .map(|(location, total_hours)| LocationHours {
                location: location.to_string(),
                total_hours,
            })
            .collect(),
    )
}

/// Selector options: the distinct months present across the collection,
/// most recent first. The month containing `today` is always offered; when
/// no record falls in it, it goes to the front of the list regardless of
/// how it would sort.
pub fn month_options(records: &[CourseRecord], today: NaiveDate) -> Vec<YearMonth> {
    let mut months: Vec<YearMonth> = records
        .iter()
        .map(|record| YearMonth::from_date(record.date))
        .collect();
    months.sort();
    months.dedup();
    months.reverse();

    let current = YearMonth::from_date(today);
    if !months.contains(&current) {
        months.insert(0, current);
    }
    months
}
