use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::activity::{Habit, Todo, todo};
use crate::calendar::{CalendarEvent, Category, DraftError, EventDraft, day_key};
use crate::fixtures::Fixtures;
use crate::heat_map::{self, ActivityKind, HeatBucket};
use crate::input::command_mode::Command;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied(String),
    NotFound(String),
    Rejected(String),
    HeatMap(ActivityKind),
    Agenda(NaiveDate),
    Theme(String),
    Help,
    Quit,
}

/// Session-scoped store for the planner's events, todos and habits.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    events: Vec<CalendarEvent>,
    todos: Vec<Todo>,
    habits: Vec<Habit>,
    selected_date: Option<NaiveDate>,
}

impl Ledger {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            events: dedup_by_id(fixtures.events, |e| &e.id, "event"),
            todos: dedup_by_id(fixtures.todos, |t| &t.id, "todo"),
            habits: dedup_by_id(fixtures.habits, |h| &h.id, "habit"),
            selected_date: None,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Day that date-less commands act on. Falls back to `today`.
    pub fn selected_date(&self, today: NaiveDate) -> NaiveDate {
        self.selected_date.unwrap_or(today)
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    pub fn events_for_date(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|event| event.day() == Some(date))
            .collect();
        events.sort_by_key(|e| (e.start_time, e.end_time));
        events
    }

    pub fn todos_for_date(&self, date: NaiveDate) -> Vec<&Todo> {
        let mut todos: Vec<&Todo> = self.todos.iter().filter(|t| t.is_on(date)).collect();
        // Stable: untimed todos keep their insertion order after the timed ones.
        todos.sort_by_key(|t| (t.start_time.is_none(), t.start_time));
        todos
    }

    pub fn habits_completed_on(&self, date: NaiveDate) -> Vec<&Habit> {
        self.habits.iter().filter(|h| h.is_completed_on(date)).collect()
    }

    /// `(completed, total)` todos scheduled on `date`.
    pub fn day_progress(&self, date: NaiveDate) -> (usize, usize) {
        let todos = self.todos_for_date(date);
        let done = todos.iter().filter(|t| t.completed).count();
        (done, todos.len())
    }

    pub fn heat_map(&self, kind: ActivityKind, today: NaiveDate) -> Vec<HeatBucket> {
        heat_map::build_heat_map(kind, &self.todos, &self.habits, today)
    }

    pub fn add_event(&mut self, draft: EventDraft) -> Result<&CalendarEvent, DraftError> {
        let event = draft.into_event()?;
        debug!(id = %event.id, date = %event.date, "added event");
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    pub fn delete_event(&mut self, id: &str) -> Option<CalendarEvent> {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            warn!(id, "delete requested for unknown event");
            return None;
        };
        debug!(id, "deleted event");
        Some(self.events.remove(index))
    }

    pub fn add_todo(
        &mut self,
        text: &str,
        category: Category,
        date: NaiveDate,
        times: Option<(NaiveTime, NaiveTime)>,
    ) -> &Todo {
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            completed: false,
            category,
            date: day_key(date),
            start_time: times.map(|(start, _)| start),
            end_time: times.map(|(_, end)| end),
        };
        debug!(id = %todo.id, date = %todo.date, "added todo");
        self.todos.push(todo);
        &self.todos[self.todos.len() - 1]
    }

    pub fn delete_todo(&mut self, id: &str) -> Option<Todo> {
        let removed = todo::remove(&mut self.todos, id);
        match removed {
            Some(_) => debug!(id, "deleted todo"),
            None => warn!(id, "delete requested for unknown todo"),
        }
        removed
    }

    /// Flips one todo's completion flag; an unknown id changes nothing.
    pub fn toggle_todo_completion(&mut self, id: &str) -> &[Todo] {
        if todo::toggle_completion(&mut self.todos, id) {
            debug!(id, "toggled todo");
        } else {
            warn!(id, "toggle requested for unknown todo");
        }
        &self.todos
    }

    /// Marks or unmarks `date` on a habit. Returns the updated habit, or
    /// `None` when no habit has that id.
    pub fn toggle_habit_for_date(&mut self, habit_id: &str, date: NaiveDate) -> Option<&Habit> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == habit_id) else {
            warn!(habit_id, "toggle requested for unknown habit");
            return None;
        };
        let marked = habit.toggle_date(date);
        debug!(habit_id, %date, marked, streak = habit.streak, "toggled habit");
        Some(&*habit)
    }

    pub fn apply(&mut self, command: Command, today: NaiveDate) -> CommandOutcome {
        let selected = self.selected_date(today);
        match command {
            Command::Quit => CommandOutcome::Quit,
            Command::Help => CommandOutcome::Help,
            Command::HeatMap(kind) => CommandOutcome::HeatMap(kind),
            Command::Agenda(date) => {
                let date = date.unwrap_or(selected);
                self.select_date(date);
                CommandOutcome::Agenda(date)
            }
            Command::Theme(name) => CommandOutcome::Theme(name),
            Command::AddEvent(draft) => match self.add_event(draft) {
                Ok(event) => CommandOutcome::Applied(format!("Added event {}", event.id)),
                Err(e) => CommandOutcome::Rejected(e.to_string()),
            },
            Command::DeleteEvent(id) => match self.delete_event(&id) {
                Some(event) => CommandOutcome::Applied(format!("Deleted event '{}'", event.title)),
                None => CommandOutcome::NotFound(id),
            },
            Command::AddTodo { text, category } => {
                let todo = self.add_todo(&text, category, selected, None);
                CommandOutcome::Applied(format!("Added todo {}", todo.id))
            }
            Command::ToggleTodo(id) => {
                self.toggle_todo_completion(&id);
                match self.todos.iter().find(|t| t.id == id) {
                    Some(t) if t.completed => CommandOutcome::Applied(format!("Completed '{}'", t.text)),
                    Some(t) => CommandOutcome::Applied(format!("Reopened '{}'", t.text)),
                    None => CommandOutcome::NotFound(id),
                }
            }
            Command::DeleteTodo(id) => match self.delete_todo(&id) {
                Some(todo) => CommandOutcome::Applied(format!("Deleted todo '{}'", todo.text)),
                None => CommandOutcome::NotFound(id),
            },
            Command::ToggleHabit { id, date } => {
                let date = date.unwrap_or(today);
                match self.toggle_habit_for_date(&id, date) {
                    Some(habit) => CommandOutcome::Applied(format!(
                        "{} on {}: streak {}",
                        habit.name,
                        day_key(date),
                        habit.streak
                    )),
                    None => CommandOutcome::NotFound(id),
                }
            }
            Command::Error(message) => CommandOutcome::Rejected(message),
        }
    }
}

fn dedup_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> &String, kind: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(id(record).clone());
            if !fresh {
                warn!(kind, id = %id(record), "dropping record with duplicate id");
            }
            fresh
        })
        .collect()
}
