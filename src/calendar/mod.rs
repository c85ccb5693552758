pub mod category;
pub mod day;
pub mod event;

pub use category::{Category, HabitColor};
pub use day::{day_key, parse_day, parse_time, same_day};
pub use event::{CalendarEvent, DraftError, EventDraft};
