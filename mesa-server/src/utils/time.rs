//! Time helpers — business timezone conversions
//!
//! Reservation dates and times are naive values local to the restaurant;
//! every "now" comparison goes through the configured business timezone.

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use shared::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// Current wall-clock time in the business timezone
pub fn local_now(tz: Tz) -> NaiveDateTime {
    chrono::Utc::now().with_timezone(&tz).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date() {
        let d = parse_date("2026-09-04").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2026, 9, 4));
        assert!(parse_date("04/09/2026").is_err());
        assert!(parse_date("not-a-date").is_err());
    }
}
