//! Calendar views over persisted events: the member portal's current-week
//! listing, the dashboard's upcoming list, and time-of-day formatting.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};

use crate::models::event::{Event, EventInstance};

/// Anything placed on the calendar.
pub trait Scheduled {
    fn date(&self) -> NaiveDate;
    /// Time of day as entered, usually `HH:MM`.
    fn time(&self) -> &str;
}

impl Scheduled for Event {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn time(&self) -> &str {
        &self.time
    }
}

impl Scheduled for EventInstance {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn time(&self) -> &str {
        &self.time
    }
}

/// Monday through Saturday of the week containing `today`. A Sunday belongs
/// to the week that started six days earlier.
pub fn week_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = u64::from(today.weekday().num_days_from_monday());
    let monday = today - Days::new(back);
    let saturday = monday + Days::new(5);
    (monday, saturday)
}

/// Events inside [`week_window`] of `today`, earliest first.
pub fn events_in_week<T: Scheduled + Clone>(events: &[T], today: NaiveDate) -> Vec<T> {
    let (start, end) = week_window(today);
    let mut out: Vec<T> = events
        .iter()
        .filter(|e| (start..=end).contains(&e.date()))
        .cloned()
        .collect();
    sort_chronologically(&mut out);
    out
}

/// Events on or after `today`, earliest first, at most `limit` of them.
pub fn upcoming_events<T: Scheduled + Clone>(events: &[T], today: NaiveDate, limit: usize) -> Vec<T> {
    let mut out: Vec<T> = events.iter().filter(|e| e.date() >= today).cloned().collect();
    sort_chronologically(&mut out);
    out.truncate(limit);
    out
}

fn sort_chronologically<T: Scheduled>(events: &mut [T]) {
    events.sort_by_key(|e| (e.date(), parse_time(e.time())));
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(&format_time_24h(raw), "%H:%M").ok()
}

fn has_period(raw: &str) -> bool {
    let upper = raw.to_ascii_uppercase();
    upper.contains("AM") || upper.contains("PM")
}

fn split_hm(raw: &str) -> Option<(u32, u32)> {
    let (h, m) = raw.trim().split_once(':')?;
    Some((h.trim().parse().ok()?, m.trim().parse().ok()?))
}

/// `"14:30"` → `"2:30 PM"`. Values already carrying AM/PM, or that do not
/// parse, are returned unchanged.
pub fn format_time_12h(raw: &str) -> String {
    if raw.is_empty() || has_period(raw) {
        return raw.to_string();
    }
    let Some((hours, minutes)) = split_hm(raw) else {
        return raw.to_string();
    };
    let period = if hours >= 12 { "PM" } else { "AM" };
    let hour12 = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minutes:02} {period}")
}

/// `"2:30 PM"` → `"14:30"`. Values without AM/PM, or that do not parse,
/// are returned unchanged.
pub fn format_time_24h(raw: &str) -> String {
    if raw.is_empty() || !has_period(raw) {
        return raw.to_string();
    }
    let upper = raw.to_ascii_uppercase();
    let is_pm = upper.contains("PM");
    let bare = upper.replace("AM", "").replace("PM", "");
    let Some((hours, minutes)) = split_hm(&bare) else {
        return raw.to_string();
    };
    let hour24 = match (is_pm, hours) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };
    format!("{hour24:02}:{minutes:02}")
}
