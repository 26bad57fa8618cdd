use crate::models::{DayOpening, Restaurant};
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::OnceLock;

/// Service windows of the structured schedule, as `[start, end)` hours
const MORNING_HOURS: (u32, u32) = (6, 11);
const MIDDAY_HOURS: (u32, u32) = (11, 15);
const EVENING_HOURS: (u32, u32) = (18, 22);

/// Weekly schedule carried by a restaurant record
///
/// The API has shipped two shapes over time: per-day service flags and
/// free-text `"11h30 - 14h00"` ranges. Both are Monday-first, 7 slots.
#[derive(Debug, Clone, Copy)]
pub enum Schedule<'a> {
    Structured(&'a [DayOpening]),
    FreeText(&'a [String]),
}

impl<'a> Schedule<'a> {
    /// Pick the schedule shape present on the record, structured first
    pub fn of(restaurant: &'a Restaurant) -> Option<Self> {
        if let Some(days) = restaurant.jours_ouvert.as_deref().filter(|d| !d.is_empty()) {
            return Some(Schedule::Structured(days));
        }

        restaurant
            .horaires
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(Schedule::FreeText)
    }

    /// Whether this schedule is open at `now`, ignoring the active flag
    pub fn is_open_at(&self, now: NaiveDateTime) -> bool {
        let day = now.weekday().num_days_from_monday() as usize;

        match self {
            Schedule::Structured(days) => days
                .get(day)
                .is_some_and(|d| services_open(d, now.hour())),
            Schedule::FreeText(slots) => slots
                .get(day)
                .and_then(|slot| parse_time_range(slot))
                .is_some_and(|range| range.contains(now.hour() * 60 + now.minute())),
        }
    }
}

fn services_open(day: &DayOpening, hour: u32) -> bool {
    let in_window = |(start, end): (u32, u32)| hour >= start && hour < end;

    (in_window(MORNING_HOURS) && day.ouverture.matin)
        || (in_window(MIDDAY_HOURS) && day.ouverture.midi)
        || (in_window(EVENING_HOURS) && day.ouverture.soir)
}

/// Opening range of one day, in minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub open_minutes: u32,
    pub close_minutes: u32,
}

impl TimeRange {
    /// Inclusive on both ends
    pub fn contains(&self, minutes: u32) -> bool {
        self.open_minutes <= minutes && minutes <= self.close_minutes
    }
}

fn time_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,2})h(\d{2})\s*-\s*(\d{1,2})h(\d{2})").expect("valid regex")
    })
}

/// Parse a `"11h30 - 14h00"` style schedule slot
///
/// Returns `None` for empty slots or anything the pattern does not match.
pub fn parse_time_range(slot: &str) -> Option<TimeRange> {
    let caps = time_range_pattern().captures(slot)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    Some(TimeRange {
        open_minutes: number(1)? * 60 + number(2)?,
        close_minutes: number(3)? * 60 + number(4)?,
    })
}

/// Wall-clock time in `zone` at `instant`
///
/// Schedules are written in the restaurants' local time.
pub fn wall_clock_at(zone: Tz, instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

pub fn wall_clock_now(zone: Tz) -> NaiveDateTime {
    wall_clock_at(zone, Utc::now())
}

/// Open-now predicate: active and inside today's schedule
pub fn is_open_at(restaurant: &Restaurant, now: NaiveDateTime) -> bool {
    if !restaurant.is_active() {
        return false;
    }

    Schedule::of(restaurant).is_some_and(|schedule| schedule.is_open_at(now))
}
