use anyhow::{anyhow, Result};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in dailycheck. Both streak records
/// and block headers use it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| anyhow!("Can't parse {value:?} into a date: {e}"))
}

/// Returns the previous calendar day.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().expect("Start of time should never happen")
}
