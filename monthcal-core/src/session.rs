//! A calendar session: one event store, one month view, one selection,
//! wired to persistence and a holiday source.
//!
//! The session is the only thing that mutates its store, so mutations are
//! serialized by `&mut self`. Holiday fetches run as spawned Tokio tasks so
//! that navigation can abandon them; their results are only merged from
//! `settle_holidays`, back on the session's own task.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::task::JoinHandle;

use crate::error::{CalError, CalResult};
use crate::event::Event;
use crate::grid::{CalendarCell, MonthView, WeekStart, generate_grid};
use crate::holiday::{Holiday, HolidaySource};
use crate::merge::merge_with_report;
use crate::persistence::PersistenceGateway;
use crate::selection::{SelectionController, SelectionState};
use crate::store::EventStore;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub week_start: WeekStart,
    pub fetch_timeout: Duration,
    /// Month shown when the session opens
    pub initial_view: MonthView,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            week_start: WeekStart::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            initial_view: MonthView::current(),
        }
    }
}

/// What `settle_holidays` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolidaySync {
    /// No fetch was in flight.
    Idle,
    /// The fetch finished for a year that is no longer viewed and was dropped.
    Stale { year: i32 },
    /// Holidays were merged into the store and persisted.
    Merged { year: i32, accepted: usize },
}

struct PendingFetch {
    year: i32,
    handle: JoinHandle<CalResult<Vec<Holiday>>>,
}

pub struct CalendarSession<P, H> {
    store: EventStore,
    selection: SelectionController,
    view: MonthView,
    settings: SessionSettings,
    persistence: P,
    holidays: H,
    pending: Option<PendingFetch>,
}

impl<P, H> CalendarSession<P, H>
where
    P: PersistenceGateway,
    H: HolidaySource + Clone + 'static,
{
    /// Load the persisted snapshot and seed the store.
    ///
    /// No holiday merge can happen before this returns, so a merge never
    /// replaces events that were not loaded yet.
    pub async fn open(persistence: P, holidays: H, settings: SessionSettings) -> CalResult<Self> {
        let mut store = EventStore::new();
        store.replace_all(persistence.load().await?);
        tracing::info!(events = store.len(), view = %settings.initial_view, "opened calendar");

        Ok(CalendarSession {
            store,
            selection: SelectionController::new(),
            view: settings.initial_view,
            settings,
            persistence,
            holidays,
            pending: None,
        })
    }

    // VIEW:

    pub fn view(&self) -> MonthView {
        self.view
    }

    pub fn week_start(&self) -> WeekStart {
        self.settings.week_start
    }

    pub fn grid(&self) -> Vec<CalendarCell> {
        generate_grid(self.view, self.settings.week_start)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.store.lookup(date)
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Jump to `view`. Returns true if the viewed year changed, in which
    /// case any in-flight holiday fetch was abandoned and a new one started.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn show(&mut self, view: MonthView) -> bool {
        let year_changed = view.year() != self.view.year();
        self.view = view;

        if year_changed {
            tracing::debug!(year = view.year(), "viewed year changed");
            self.request_holidays();
        }
        year_changed
    }

    pub fn next_month(&mut self) -> bool {
        self.show(self.view.next())
    }

    pub fn previous_month(&mut self) -> bool {
        self.show(self.view.previous())
    }

    // HOLIDAYS:

    /// Start fetching holidays for the viewed year, abandoning any fetch
    /// already in flight.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn request_holidays(&mut self) {
        self.abandon_pending();

        let year = self.view.year();
        let source = self.holidays.clone();
        let limit = self.settings.fetch_timeout;

        let handle = tokio::spawn(async move {
            match tokio::time::timeout(limit, source.fetch(year)).await {
                Ok(result) => result,
                Err(_) => Err(CalError::ExternalFetchTimeout(limit)),
            }
        });

        tracing::debug!(year, "requested holidays");
        self.pending = Some(PendingFetch { year, handle });
    }

    fn abandon_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            tracing::debug!(year = pending.year, "abandoned holiday fetch");
        }
    }

    pub fn has_pending_holidays(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the in-flight holiday fetch and merge its result.
    ///
    /// A failed fetch returns the error and leaves the store untouched.
    /// A fetch for a year that is no longer viewed is discarded.
    pub async fn settle_holidays(&mut self) -> CalResult<HolidaySync> {
        let Some(PendingFetch { year, handle }) = self.pending.take() else {
            return Ok(HolidaySync::Idle);
        };

        let result = match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => return Ok(HolidaySync::Stale { year }),
            Err(e) => Err(CalError::ExternalFetch(format!("Holiday task failed: {}", e))),
        };

        if year != self.view.year() {
            tracing::debug!(year, viewed = self.view.year(), "dropping stale holidays");
            return Ok(HolidaySync::Stale { year });
        }

        let holidays = match result {
            Ok(holidays) => holidays,
            Err(e) => {
                tracing::warn!(year, error = %e, "skipping holiday merge");
                return Err(e);
            }
        };

        let candidates: Vec<Event> = holidays.iter().map(Holiday::to_candidate).collect();
        let report = merge_with_report(self.store.snapshot(), &candidates);
        tracing::info!(year, accepted = report.accepted, skipped = report.skipped, "merged holidays");

        self.store.replace_all(report.merged);
        self.persist().await?;

        Ok(HolidaySync::Merged {
            year,
            accepted: report.accepted,
        })
    }

    /// Fetch and merge holidays for the viewed year.
    pub async fn sync_holidays(&mut self) -> CalResult<HolidaySync> {
        self.request_holidays();
        self.settle_holidays().await
    }

    // SELECTION:

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selection.select_date(date);
    }

    pub fn set_draft_title(&mut self, text: &str) -> CalResult<()> {
        self.selection.set_draft_title(text)
    }

    pub fn cancel(&mut self) {
        self.selection.cancel();
    }

    /// Create the drafted event and persist.
    ///
    /// If only the save fails the event stays in the store and the
    /// persistence error is returned; `save` can be retried.
    pub async fn confirm(&mut self) -> CalResult<Event> {
        let event = self.selection.confirm(&mut self.store)?;
        self.persist().await?;
        Ok(event)
    }

    // EVENTS:

    pub async fn add_event(&mut self, event: Event) -> CalResult<()> {
        self.store.add(event)?;
        self.persist().await
    }

    pub async fn remove_event(&mut self, id: &str) -> CalResult<Event> {
        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| CalError::Validation(format!("No event with id '{}'", id)))?;
        self.persist().await?;
        Ok(removed)
    }

    /// Write the current store to persistence. Safe to retry.
    pub async fn save(&self) -> CalResult<()> {
        self.persist().await
    }

    async fn persist(&self) -> CalResult<()> {
        if let Err(e) = self.persistence.save(self.store.snapshot()).await {
            tracing::warn!(error = %e, "failed to persist events");
            return Err(e);
        }
        Ok(())
    }
}

impl<P, H> Drop for CalendarSession<P, H> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}
