use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::utils::date::start_of_day;

/// Join RFC 5545 folded lines (continuations start with a space or tab).
pub(super) fn unfold_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for raw in content.lines() {
        let raw = raw.trim_end_matches('\r');
        if let Some(rest) = raw.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push(raw.to_string());
    }

    lines
}

pub(super) fn unescape_text(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\N", "\n")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\")
}

/// Value of a `NAME=value` parameter in a property's key part.
pub(super) fn param<'a>(key_part: &'a str, name: &str) -> Option<&'a str> {
    key_part
        .split(';')
        .skip(1)
        .filter_map(|p| p.split_once('='))
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim_matches('"'))
}

pub(super) fn parse_datetime_with_tzid(s: &str, tzid: Option<&str>) -> Result<DateTime<Local>> {
    let has_utc_suffix = s.ends_with('Z');
    let normalized = s.trim_end_matches('Z');

    let naive = NaiveDateTime::parse_from_str(normalized, "%Y%m%dT%H%M%S")
        .map_err(|_| anyhow!("Invalid datetime format: {}", s))?;

    if has_utc_suffix {
        return Ok(Utc.from_utc_datetime(&naive).with_timezone(&Local));
    }

    if let Some(tz_name) = tzid {
        match Tz::from_str(tz_name) {
            Ok(timezone) => {
                if let Some(dt) = timezone.from_local_datetime(&naive).earliest() {
                    return Ok(dt.with_timezone(&Local));
                }
            }
            Err(_) => log::warn!("Unknown TZID '{}', using local time", tz_name),
        }
    }

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| anyhow!("Invalid local datetime: {}", s))
}

pub(super) fn parse_date(s: &str) -> Result<NaiveDate> {
    let digits = s.get(0..8).ok_or_else(|| anyhow!("Invalid date format: {}", s))?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").map_err(|_| anyhow!("Invalid date: {}", s))
}

/// DTSTART/DTEND/EXDATE value, honouring `VALUE=DATE` and `TZID=`.
pub(super) fn parse_instant(key_part: &str, value: &str) -> Result<(DateTime<Local>, bool)> {
    let is_date = param(key_part, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || !value.contains('T');

    if is_date {
        Ok((start_of_day(parse_date(value)?), true))
    } else {
        Ok((parse_datetime_with_tzid(value, param(key_part, "TZID"))?, false))
    }
}

/// All-day DTEND is exclusive; the stored end is the last second of the day before.
pub(super) fn inclusive_all_day_end(exclusive_end: DateTime<Local>) -> DateTime<Local> {
    let previous_day = exclusive_end.date_naive() - Duration::days(1);
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    Local
        .from_local_datetime(&previous_day.and_time(last_second))
        .earliest()
        .unwrap_or(exclusive_end - Duration::seconds(1))
}

/// Accepts `#RGB`, `#RRGGBB` and Apple's `#RRGGBBAA` (alpha dropped).
pub(super) fn normalize_color(value: &str) -> Option<String> {
    let value = value.trim();
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 | 6 => Some(value.to_uppercase()),
        8 => Some(format!("#{}", &hex[..6]).to_uppercase()),
        _ => None,
    }
}
