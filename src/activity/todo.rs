use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::Category;
use crate::calendar::day::{self, hh_mm_opt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub date: String,
    #[serde(default, with = "hh_mm_opt", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hh_mm_opt", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
}

impl Todo {
    pub fn is_on(&self, date: NaiveDate) -> bool {
        day::same_day(&self.date, date)
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed && self.is_on(date)
    }
}

/// Flips the completion flag of the todo with `id`. Returns whether a record
/// matched; an unknown id leaves the collection untouched.
pub fn toggle_completion(todos: &mut [Todo], id: &str) -> bool {
    match todos.iter_mut().find(|todo| todo.id == id) {
        Some(todo) => {
            todo.completed = !todo.completed;
            true
        }
        None => false,
    }
}

pub fn remove(todos: &mut Vec<Todo>, id: &str) -> Option<Todo> {
    let index = todos.iter().position(|todo| todo.id == id)?;
    Some(todos.remove(index))
}
