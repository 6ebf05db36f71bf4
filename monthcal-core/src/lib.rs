//! Core of monthcal: a month grid with local events and merged holidays.
//!
//! - `grid` builds the fixed 42-cell month grid
//! - `store` owns the canonical event set, `merge` folds holidays into it
//! - `selection` is the click-a-date / add-event dialog state machine
//! - `session` wires them to persistence and a holiday source

pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod holiday;
pub mod merge;
pub mod persistence;
pub mod protocol;
pub mod provider;
pub mod selection;
pub mod session;
pub mod store;

pub use error::{CalError, CalResult};
pub use event::{Event, Origin};
pub use grid::{CalendarCell, GRID_CELLS, MonthView, WeekStart, generate_grid, generate_grid_at};
pub use holiday::{Holiday, HolidaySource, NoHolidays, RawHoliday};
pub use merge::merge;
pub use persistence::{JsonFileGateway, MemoryGateway, PersistenceGateway};
pub use selection::{SelectionController, SelectionState};
pub use session::{CalendarSession, HolidaySync, SessionSettings};
pub use store::EventStore;
