use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::HabitColor;
use crate::calendar::day;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: HabitColor,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub completed_dates: BTreeSet<String>,
}

impl Habit {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            color: HabitColor::Other,
            streak: 0,
            completed_dates: BTreeSet::new(),
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&day::day_key(date))
    }

    /// Marks or unmarks `date`. The streak moves by one in either direction,
    /// saturating at both ends. Returns whether the day is now marked.
    pub fn toggle_date(&mut self, date: NaiveDate) -> bool {
        let key = day::day_key(date);
        if self.completed_dates.remove(&key) {
            self.streak = self.streak.saturating_sub(1);
            false
        } else {
            self.completed_dates.insert(key);
            self.streak = self.streak.saturating_add(1);
            true
        }
    }
}
