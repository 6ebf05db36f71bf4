//! Calendar event types.
//!
//! Events carry floating local date-times: a user-created "09:00" is
//! 09:00 wherever the calendar is opened.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalError, CalResult};

/// Hour at which a user-created event starts.
pub const DEFAULT_START_HOUR: i64 = 9;
/// Hour at which a user-created event ends.
pub const DEFAULT_END_HOUR: i64 = 10;

const HOLIDAY_SUFFIX: &str = " (Holiday)";

/// Where an event came from. Rendering uses it to set holidays apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    UserCreated,
    External,
}

/// A calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub origin: Origin,
}

/// Two events with the same key are "the same" for merge purposes.
pub type DedupKey = (String, NaiveDate);

impl Event {
    /// A user-created event on `date` at the default 09:00-10:00 slot.
    pub fn user_created(date: NaiveDate, title: &str) -> Self {
        Event {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            start: at_hour(date, DEFAULT_START_HOUR),
            end: at_hour(date, DEFAULT_END_HOUR),
            origin: Origin::UserCreated,
        }
    }

    /// An externally sourced whole-day holiday.
    ///
    /// The id is derived from the date and name so that fetching the same
    /// year twice mints the same ids.
    pub fn holiday(date: NaiveDate, name: &str) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Event {
            id: format!("holiday-{}-{}", date.format("%Y-%m-%d"), slug::slugify(name)),
            title: format!("{}{}", name.trim(), HOLIDAY_SUFFIX),
            start,
            end: start,
            origin: Origin::External,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn dedup_key(&self) -> DedupKey {
        (self.title.clone(), self.day())
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.day() == date
    }

    /// Check the invariants every stored event must hold.
    pub fn validate(&self) -> CalResult<()> {
        if self.title.trim().is_empty() {
            return Err(CalError::Validation("Event title cannot be empty".into()));
        }
        if self.end < self.start {
            return Err(CalError::Validation(format!(
                "Event '{}' ends before it starts",
                self.title
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

fn at_hour(date: NaiveDate, hour: i64) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_user_created_uses_default_slot() {
        let event = Event::user_created(d(2024, 3, 5), "  Meeting ");

        assert_eq!(event.title, "Meeting");
        assert_eq!(event.start, d(2024, 3, 5).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(event.end, d(2024, 3, 5).and_hms_opt(10, 0, 0).unwrap());
        assert_eq!(event.origin, Origin::UserCreated);
    }

    #[test]
    fn test_holiday_is_whole_day_with_stable_id() {
        let a = Event::holiday(d(2024, 11, 1), "Diwali");
        let b = Event::holiday(d(2024, 11, 1), "Diwali");

        assert_eq!(a.title, "Diwali (Holiday)");
        assert_eq!(a.start, a.end);
        assert_eq!(a.start, d(2024, 11, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(a.origin, Origin::External);
        assert_eq!(a.id, "holiday-2024-11-01-diwali");
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_validate_rejects_blank_title_and_inverted_range() {
        let mut event = Event::user_created(d(2024, 1, 1), "ok");
        assert!(event.validate().is_ok());

        event.title = "   ".into();
        assert!(matches!(event.validate(), Err(CalError::Validation(_))));

        let mut event = Event::user_created(d(2024, 1, 1), "ok");
        std::mem::swap(&mut event.start, &mut event.end);
        assert!(matches!(event.validate(), Err(CalError::Validation(_))));
    }

    #[test]
    fn test_serialized_form_uses_iso_timestamps_and_kebab_origin() {
        let event = Event {
            id: "1".into(),
            title: "Standup".into(),
            start: d(2024, 3, 5).and_hms_opt(9, 0, 0).unwrap(),
            end: d(2024, 3, 5).and_hms_opt(10, 0, 0).unwrap(),
            origin: Origin::UserCreated,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start"], "2024-03-05T09:00:00");
        assert_eq!(json["end"], "2024-03-05T10:00:00");
        assert_eq!(json["origin"], "user-created");
    }

    #[test]
    fn test_dedup_key_is_title_and_day() {
        let morning = Event::user_created(d(2024, 5, 1), "Gym");
        let mut evening = Event::user_created(d(2024, 5, 1), "Gym");
        evening.start = d(2024, 5, 1).and_hms_opt(18, 0, 0).unwrap();
        evening.end = d(2024, 5, 1).and_hms_opt(19, 0, 0).unwrap();

        assert_eq!(morning.dedup_key(), evening.dedup_key());
        assert_ne!(
            morning.dedup_key(),
            Event::user_created(d(2025, 5, 1), "Gym").dedup_key()
        );
    }
}
