//! Holidays supplied by an external source.
//!
//! Sources hand back loosely shaped `RawHoliday` records. They are checked
//! here and turned into typed `Holiday` values before anything reaches
//! the event store; a single bad record rejects the whole batch.

use std::future::Future;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalError, CalResult};
use crate::event::Event;

/// A holiday as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHoliday {
    pub name: String,
    /// ISO-8601 date, or a full timestamp whose date part is used.
    pub iso_date: String,
}

/// A validated holiday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
}

impl Holiday {
    pub fn to_candidate(&self) -> Event {
        Event::holiday(self.date, &self.name)
    }
}

impl TryFrom<&RawHoliday> for Holiday {
    type Error = CalError;

    fn try_from(raw: &RawHoliday) -> CalResult<Self> {
        let name = raw.name.trim();
        if name.is_empty() {
            return Err(CalError::ExternalFetch("Holiday with empty name".into()));
        }

        let date = parse_iso_date(&raw.iso_date).ok_or_else(|| {
            CalError::ExternalFetch(format!(
                "Holiday '{}' has malformed date '{}'",
                name, raw.iso_date
            ))
        })?;

        Ok(Holiday {
            name: name.to_string(),
            date,
        })
    }
}

/// A plain date, an RFC 3339 timestamp, or a local timestamp without offset.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| s.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

/// Validate a fetched batch for `year`. Any bad record fails the batch.
pub fn validate_batch(year: i32, raw: &[RawHoliday]) -> CalResult<Vec<Holiday>> {
    raw.iter()
        .map(|r| {
            let holiday = Holiday::try_from(r)?;
            if holiday.date.year() != year {
                return Err(CalError::ExternalFetch(format!(
                    "Holiday '{}' on {} is outside requested year {}",
                    holiday.name, holiday.date, year
                )));
            }
            Ok(holiday)
        })
        .collect()
}

/// Anything that can list the holidays of a year.
pub trait HolidaySource: Send + Sync {
    /// Fails with an external-fetch error when the source is unreachable
    /// or returns malformed data.
    fn fetch(&self, year: i32) -> impl Future<Output = CalResult<Vec<Holiday>>> + Send;
}

/// A source that never has any holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidaySource for NoHolidays {
    async fn fetch(&self, _year: i32) -> CalResult<Vec<Holiday>> {
        Ok(Vec::new())
    }
}

/// An unconfigured source behaves like `NoHolidays`.
impl<S: HolidaySource> HolidaySource for Option<S> {
    async fn fetch(&self, year: i32) -> CalResult<Vec<Holiday>> {
        match self {
            Some(source) => source.fetch(year).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Origin;

    fn raw(name: &str, iso_date: &str) -> RawHoliday {
        RawHoliday {
            name: name.into(),
            iso_date: iso_date.into(),
        }
    }

    #[test]
    fn test_valid_batch_maps_to_candidates() {
        let holidays = validate_batch(
            2024,
            &[
                raw("Republic Day", "2024-01-26"),
                raw("Diwali", "2024-11-01T00:00:00+05:30"),
            ],
        )
        .unwrap();

        let candidates: Vec<_> = holidays.iter().map(Holiday::to_candidate).collect();
        assert_eq!(candidates[0].title, "Republic Day (Holiday)");
        assert_eq!(candidates[1].title, "Diwali (Holiday)");
        assert_eq!(
            candidates[1].start,
            NaiveDate::from_ymd_opt(2024, 11, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(candidates[1].start, candidates[1].end);
        assert!(candidates.iter().all(|c| c.origin == Origin::External));
    }

    #[test]
    fn test_one_bad_record_rejects_batch() {
        let err = validate_batch(
            2024,
            &[raw("Republic Day", "2024-01-26"), raw("Broken", "26/01/2024")],
        )
        .unwrap_err();
        assert!(err.is_external_fetch());

        let err = validate_batch(2024, &[raw("  ", "2024-01-26")]).unwrap_err();
        assert!(err.is_external_fetch());

        let err = validate_batch(2024, &[raw("Short", "2024")]).unwrap_err();
        assert!(err.is_external_fetch());
    }

    #[test]
    fn test_trailing_garbage_after_date_is_rejected() {
        let err = validate_batch(2024, &[raw("Republic Day", "2024-01-26garbage")]).unwrap_err();
        assert!(matches!(err, CalError::ExternalFetch(_)));

        let err = validate_batch(2024, &[raw("Republic Day", "2024-01-26T25:00:00")]).unwrap_err();
        assert!(matches!(err, CalError::ExternalFetch(_)));
    }

    #[test]
    fn test_timestamp_without_offset_uses_its_date() {
        let holidays = validate_batch(2024, &[raw("Holi", "2024-03-25T00:00:00")]).unwrap();
        assert_eq!(holidays[0].date, NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
    }

    #[test]
    fn test_holiday_outside_year_is_malformed() {
        let err = validate_batch(2024, &[raw("New Year", "2025-01-01")]).unwrap_err();
        assert!(matches!(err, CalError::ExternalFetch(_)));
    }

    #[tokio::test]
    async fn test_no_holidays_source_is_empty() {
        assert!(NoHolidays.fetch(2024).await.unwrap().is_empty());
        assert!(None::<NoHolidays>.fetch(2024).await.unwrap().is_empty());
    }
}
