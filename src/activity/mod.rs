pub mod habit;
pub mod todo;

pub use habit::Habit;
pub use todo::Todo;
