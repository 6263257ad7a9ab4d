use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Half-open UTC interval `[start, end)` covering a calendar unit.
pub type UtcWindow = (DateTime<Utc>, DateTime<Utc>);

pub fn year_window(year: i32) -> Option<UtcWindow> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
    Some((midnight(start), midnight(end)))
}

pub fn month_window(year: i32, month: u32) -> Option<UtcWindow> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((midnight(start), midnight(end)))
}

pub fn day_window(year: i32, month: u32, day: u32) -> Option<UtcWindow> {
    let start = NaiveDate::from_ymd_opt(year, month, day)?;
    let end = start.succ_opt()?;
    Some((midnight(start), midnight(end)))
}

/// The day window that contains the given instant. Used for the per-day
/// slug uniqueness check on writes.
pub fn day_window_of(instant: DateTime<Utc>) -> UtcWindow {
    let start = instant.date_naive();
    // succ_opt only fails at NaiveDate::MAX
    let end = start.succ_opt().unwrap_or(start);
    (midnight(start), midnight(end))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn year_window_spans_the_full_year() {
        let (start, end) = year_window(2024).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn december_rolls_over_to_the_next_year() {
        let (start, end) = month_window(2023, 12).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(month_window(2024, 13).is_none());
        assert!(day_window(2024, 2, 30).is_none());
        assert!(day_window(2023, 2, 29).is_none());
    }

    #[test]
    fn leap_day_is_a_valid_window() {
        let (start, end) = day_window(2024, 2, 29).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn day_window_of_contains_its_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap();
        let (start, end) = day_window_of(instant);
        assert!(start <= instant && instant < end);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap());
    }
}
