use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;

/// "<hours>h<minutes>" anywhere in a course type, e.g. "TP 2h" or "CM 1h30"
static RE_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)h([0-9]+)?").expect("valid duration regex"));

/// Day-of-week number for a day code: Sunday is 0, Monday 1, ... Saturday 6.
/// Unknown codes count as Monday.
pub fn day_number(day: &str) -> u32 {
    match day.to_ascii_lowercase().as_str() {
        "mo" => 1,
        "tu" => 2,
        "we" => 3,
        "th" => 4,
        "fr" | "f" => 5,
        "sa" => 6,
        "su" => 0,
        _ => 1,
    }
}

/// Calendar date of `day` in ISO-style week `week` of `year`.
///
/// Week 1 is the Monday-starting week holding the year's first Thursday.
/// Out-of-range weeks simply run into the neighbouring years. Returns
/// `None` when the result falls outside the supported calendar range.
pub fn get_day_date(day: &str, week: i64, year: i32) -> Option<NaiveDate> {
    let mut first_thursday = NaiveDate::from_ymd_opt(year, 1, 1)?;
    while first_thursday.weekday() != Weekday::Thu {
        first_thursday = first_thursday.succ_opt()?;
    }
    let week_one = first_thursday - Duration::days(3);

    let dow = day_number(day);
    let day_offset = if dow == 0 { 6 } else { i64::from(dow) - 1 };

    let offset = week.checked_sub(1)?.checked_mul(7)?.checked_add(day_offset)?;
    week_one.checked_add_signed(Duration::try_days(offset)?)
}

/// `date` at `hour` whole hours; hours past 23 roll into the next days
pub fn at_hour(date: NaiveDate, hour: i64) -> Option<NaiveDateTime> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::try_hours(hour)?)
}

/// Session length in minutes from a course type, or `default_minutes`
pub fn extract_duration_from_type(course_type: &str, default_minutes: i64) -> i64 {
    let Some(caps) = RE_DURATION.captures(course_type) else {
        return default_minutes;
    };
    // Digit runs too long for i64 are unreadable, not zero
    let Ok(hours) = caps[1].parse::<i64>() else {
        return default_minutes;
    };
    let minutes = match caps.get(2) {
        Some(m) => match m.as_str().parse::<i64>() {
            Ok(minutes) => minutes,
            Err(_) => return default_minutes,
        },
        None => 0,
    };
    hours.saturating_mul(60).saturating_add(minutes)
}
