use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Gateway aggregate for one calendar day, commission split included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total_earnings: f64,
    pub total_appointments: u32,
    pub admin_receives: f64,
    pub barber_receives: f64,
}

/// Gateway aggregate over a date range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSummary {
    pub total_earnings: f64,
    pub total_appointments: u32,
}

/// Per-barber earnings over a range. Read-only; never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarberSummary {
    pub barber_id: String,
    pub barber_name: String,
    pub total: f64,
}

/// Earnings variation versus the previous day, in percent. Zero when there
/// is no baseline to compare against.
pub fn variation_percent(today: f64, yesterday: f64) -> f64 {
    if yesterday > 0.0 {
        (today - yesterday) / yesterday * 100.0
    } else {
        0.0
    }
}

/// First and last day of a calendar month, for the monthly summary range.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first - Days::new(1)))
}
