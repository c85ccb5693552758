pub mod activity;
pub mod calendar;
pub mod fixtures;
pub mod heat_map;
pub mod input;
pub mod ledger;
pub mod storage;
pub mod ui;

pub use activity::{Habit, Todo};
pub use calendar::{CalendarEvent, Category, EventDraft, HabitColor};
pub use fixtures::Fixtures;
pub use heat_map::{ActivityKind, HeatBucket, Intensity, build_heat_map};
pub use ledger::{CommandOutcome, Ledger};

pub use input::command_mode;
