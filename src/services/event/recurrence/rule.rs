use chrono::{NaiveDate, Weekday};

/// Largest INTERVAL honoured; larger values are clamped.
pub(super) const MAX_INTERVAL: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// The subset of an RFC 5545 RRULE used for expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: i64,
    pub count: Option<usize>,
    pub until: Option<NaiveDate>,
    /// Plain BYDAY entries (`MO,WE`)
    pub by_day: Vec<Weekday>,
    /// Positional BYDAY entry (`1MO`, `-1FR`)
    pub positional_day: Option<(i32, Weekday)>,
    /// BYMONTHDAY, only 1 and -1 are honoured
    pub by_month_day: Option<i32>,
}

impl RecurrenceRule {
    /// Parse leniently: unknown parts are ignored and a missing FREQ means daily.
    pub fn parse(rrule: &str) -> Self {
        let mut rule = RecurrenceRule {
            frequency: Frequency::Daily,
            interval: 1,
            count: None,
            until: None,
            by_day: Vec::new(),
            positional_day: None,
            by_month_day: None,
        };

        let rrule = rrule.trim().trim_start_matches("RRULE:");
        for part in rrule.split(';') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "FREQ" => {
                    rule.frequency = match value {
                        "WEEKLY" => Frequency::Weekly,
                        "MONTHLY" => Frequency::Monthly,
                        "YEARLY" => Frequency::Yearly,
                        _ => Frequency::Daily,
                    }
                }
                "INTERVAL" => {
                    rule.interval = value.parse::<i64>().unwrap_or(1).clamp(1, MAX_INTERVAL)
                }
                "COUNT" => rule.count = value.parse().ok(),
                "UNTIL" => rule.until = parse_until(value),
                "BYMONTHDAY" => rule.by_month_day = value.parse().ok(),
                "BYDAY" => {
                    for code in value.split(',').map(str::trim) {
                        if code.len() > 2 {
                            let (position, weekday) = code.split_at(code.len() - 2);
                            match (position.parse::<i32>(), weekday_from_code(weekday)) {
                                (Ok(pos), Some(day)) if pos != 0 && (-5..=5).contains(&pos) => {
                                    rule.positional_day = Some((pos, day));
                                }
                                _ => log::debug!("Ignoring BYDAY entry '{}'", code),
                            }
                        } else if let Some(day) = weekday_from_code(code) {
                            rule.by_day.push(day);
                        }
                    }
                }
                _ => {}
            }
        }

        rule.by_day.sort_by_key(|day| day.num_days_from_monday());
        rule.by_day.dedup();
        rule
    }
}

/// Accepts `YYYYMMDD` with an optional `THHMMSS[Z]` suffix.
fn parse_until(value: &str) -> Option<NaiveDate> {
    let date = value.get(0..8)?;
    NaiveDate::parse_from_str(date, "%Y%m%d").ok()
}

fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code {
        "SU" => Some(Weekday::Sun),
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        _ => None,
    }
}
