//! In-memory owner of the canonical event set.

use chrono::NaiveDate;

use crate::error::CalResult;
use crate::event::Event;

#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events starting on the same calendar day as `date`, in store order.
    pub fn lookup(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_on(date)).collect()
    }

    /// Append an event. The store is unchanged if the event is invalid.
    pub fn add(&mut self, event: Event) -> CalResult<()> {
        event.validate()?;
        tracing::debug!(id = %event.id, title = %event.title, "adding event");
        self.events.push(event);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Swap in a whole new canonical set.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        tracing::debug!(before = self.events.len(), after = events.len(), "replacing event set");
        self.events = events;
    }

    pub fn snapshot(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut store = EventStore::new();
        store.add(Event::user_created(d(2024, 3, 5), "Meeting")).unwrap();

        let mut blank = Event::user_created(d(2024, 3, 5), "x");
        blank.title = "  ".into();

        assert!(matches!(store.add(blank), Err(CalError::Validation(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_matches_exact_day_only() {
        let mut store = EventStore::new();
        store.add(Event::user_created(d(2024, 3, 5), "This year")).unwrap();
        store.add(Event::user_created(d(2023, 3, 5), "Last year")).unwrap();
        store.add(Event::user_created(d(2024, 4, 5), "Next month")).unwrap();
        store.add(Event::holiday(d(2024, 3, 5), "Festival")).unwrap();

        let titles: Vec<_> = store
            .lookup(d(2024, 3, 5))
            .into_iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["This year", "Festival (Holiday)"]);
        assert!(store.lookup(d(2024, 3, 6)).is_empty());
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = EventStore::new();
        let event = Event::user_created(d(2024, 3, 5), "Dentist");
        let id = event.id.clone();
        store.add(event).unwrap();

        assert!(store.get(&id).is_some());
        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.title, "Dentist");
        assert!(store.is_empty());
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn test_replace_all_swaps_whole_set() {
        let mut store = EventStore::new();
        store.add(Event::user_created(d(2024, 1, 1), "old")).unwrap();

        let fresh = vec![
            Event::user_created(d(2024, 2, 1), "a"),
            Event::user_created(d(2024, 2, 2), "b"),
        ];
        store.replace_all(fresh.clone());

        assert_eq!(store.snapshot(), fresh.as_slice());
    }
}
