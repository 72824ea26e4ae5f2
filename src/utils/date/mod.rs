// Date utility functions
// Month arithmetic, local day boundaries and day labels

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};

use crate::models::appearance::Appearance;

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// Number of days in the month containing `date` (28 to 31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    match NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1) {
        Some(next_first) => (next_first - first).num_days() as u32,
        // December
        None => 31,
    }
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Duration::days(days_in_month(date) as i64 - 1)
}

/// 1-based weekday index with Sunday = 1 and Saturday = 7.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().number_from_sunday()
}

/// Local midnight at the start of `date`.
///
/// Where midnight does not exist locally (DST gap) the earliest valid
/// instant of that wall-clock time is used, falling back to UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Local> {
    local_instant(date, NaiveTime::MIN)
}

/// Last second of `date` in local time.
pub fn end_of_day(date: NaiveDate) -> DateTime<Local> {
    match NaiveTime::from_hms_opt(23, 59, 59) {
        Some(time) => local_instant(date, time),
        None => start_of_day(date) + Duration::days(1) - Duration::seconds(1),
    }
}

fn local_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Local> {
    let naive = date.and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// Full weekday name, e.g. "Friday".
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Abbreviated weekday name, e.g. "Fri".
pub fn short_weekday_name(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Abbreviated month name, e.g. "Oct".
pub fn short_month_name(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Label for the day an instant falls on, relative to `now`.
///
/// Returns the appearance's "Today"/"Tomorrow" words, otherwise the short
/// weekday followed by the day of month ("Fri 17").
pub fn relative_day_label(
    instant: DateTime<Local>,
    now: DateTime<Local>,
    appearance: &Appearance,
) -> String {
    let day = instant.date_naive();
    let today = now.date_naive();

    if day == today {
        appearance.today_label.clone()
    } else if today.succ_opt() == Some(day) {
        appearance.tomorrow_label.clone()
    } else {
        format!("{} {}", short_weekday_name(day), day.day())
    }
}

/// Format a date in short form based on the date format setting.
pub fn format_short_date(date: NaiveDate, date_format: &str) -> String {
    if date_format.starts_with("DD/MM") {
        date.format("%d/%m").to_string()
    } else if date_format.starts_with("YYYY") {
        date.format("%Y/%m/%d").to_string()
    } else {
        date.format("%m/%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(2025, 1, 31; "january")]
    #[test_case(2025, 2, 28; "february common year")]
    #[test_case(2024, 2, 29; "february leap year")]
    #[test_case(2025, 4, 30; "april")]
    #[test_case(2025, 12, 31; "december")]
    fn test_days_in_month(year: i32, month: u32, expected: u32) {
        assert_eq!(days_in_month(date(year, month, 15)), expected);
    }

    #[test]
    fn test_first_and_last_of_month() {
        assert_eq!(first_of_month(date(2025, 3, 19)), date(2025, 3, 1));
        assert_eq!(last_of_month(date(2025, 3, 19)), date(2025, 3, 31));
        assert_eq!(last_of_month(date(2024, 2, 1)), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2025, 12, 25)), date(2025, 12, 31));
    }

    #[test]
    fn test_weekday_index() {
        // March 1, 2025 is a Saturday
        assert_eq!(weekday_index(date(2025, 3, 1)), 7);
        assert_eq!(weekday_index(date(2025, 3, 2)), 1);
        assert_eq!(weekday_index(date(2025, 3, 3)), 2);
    }

    #[test]
    fn test_day_boundaries() {
        let day = date(2025, 3, 15);
        assert_eq!(start_of_day(day).date_naive(), day);
        assert_eq!(end_of_day(day).date_naive(), day);
        assert!(start_of_day(day) < end_of_day(day));
    }

    #[test]
    fn test_names() {
        let day = date(2024, 12, 6);
        assert_eq!(weekday_name(day), "Friday");
        assert_eq!(short_weekday_name(day), "Fri");
        assert_eq!(short_month_name(day), "Dec");
    }

    #[test]
    fn test_relative_day_label() {
        let appearance = Appearance::default();
        let now = start_of_day(date(2024, 12, 6)) + Duration::hours(9);

        assert_eq!(relative_day_label(now + Duration::hours(3), now, &appearance), "Today");
        assert_eq!(relative_day_label(now + Duration::days(1), now, &appearance), "Tomorrow");
        assert_eq!(relative_day_label(now + Duration::days(4), now, &appearance), "Tue 10");
    }

    #[test]
    fn test_relative_day_label_uses_appearance_words() {
        let appearance = Appearance {
            today_label: "Heute".to_string(),
            ..Appearance::default()
        };
        let now = start_of_day(date(2024, 12, 6));
        assert_eq!(relative_day_label(now, now, &appearance), "Heute");
    }

    #[test]
    fn test_format_short_date() {
        let day = date(2024, 12, 4);
        assert_eq!(format_short_date(day, "DD/MM/YYYY"), "04/12");
        assert_eq!(format_short_date(day, "MM/DD/YYYY"), "12/04");
        assert_eq!(format_short_date(day, "YYYY/MM/DD"), "2024/12/04");
    }
}
