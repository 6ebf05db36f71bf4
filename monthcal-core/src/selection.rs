//! Date selection and the add-event dialog.

use chrono::NaiveDate;

use crate::error::{CalError, CalResult};
use crate::event::Event;
use crate::store::EventStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    DateSelected(NaiveDate),
    CreatingEvent { date: NaiveDate, draft_title: String },
}

#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::DateSelected(date) | SelectionState::CreatingEvent { date, .. } => {
                Some(date)
            }
        }
    }

    /// Click a date: selects it and opens the dialog with an empty draft.
    /// Clicking while a dialog is open moves the dialog to the new date.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.state = SelectionState::DateSelected(date);
        self.open_dialog();
    }

    fn open_dialog(&mut self) {
        if let SelectionState::DateSelected(date) = self.state {
            self.state = SelectionState::CreatingEvent {
                date,
                draft_title: String::new(),
            };
        }
    }

    pub fn set_draft_title(&mut self, text: &str) -> CalResult<()> {
        match &mut self.state {
            SelectionState::CreatingEvent { draft_title, .. } => {
                *draft_title = text.to_string();
                Ok(())
            }
            other => Err(CalError::InvalidState(format!(
                "Cannot edit a draft title while {}",
                describe(other)
            ))),
        }
    }

    /// Build the event from the draft and add it to `store`.
    ///
    /// On failure nothing changes: the dialog stays open with its draft.
    pub fn confirm(&mut self, store: &mut EventStore) -> CalResult<Event> {
        let SelectionState::CreatingEvent { date, draft_title } = &self.state else {
            return Err(CalError::InvalidState(format!(
                "Cannot confirm while {}",
                describe(&self.state)
            )));
        };

        if draft_title.trim().is_empty() {
            return Err(CalError::Validation("Event title cannot be empty".into()));
        }

        let event = Event::user_created(*date, draft_title);
        store.add(event.clone())?;
        self.state = SelectionState::Idle;
        Ok(event)
    }

    /// Close the dialog and drop the draft. A no-op when idle.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }
}

fn describe(state: &SelectionState) -> &'static str {
    match state {
        SelectionState::Idle => "idle",
        SelectionState::DateSelected(_) => "a date is selected",
        SelectionState::CreatingEvent { .. } => "creating an event",
    }
}
