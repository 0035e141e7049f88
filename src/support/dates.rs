use chrono::{Datelike, NaiveDate};

use crate::support::numbers::nth_number;

/// "Tuesday, October 20th"
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%A, %B"), nth_number(i64::from(date.day())))
}
