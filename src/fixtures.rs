use std::collections::BTreeSet;
use std::path::Path;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::{Habit, Todo};
use crate::calendar::{CalendarEvent, Category, HabitColor, day_key};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse fixtures: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Initial records handed to a [`crate::ledger::Ledger`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub habits: Vec<Habit>,
}

impl Fixtures {
    pub fn from_json(content: &str) -> Result<Self, FixtureError> {
        serde_json::from_str(content).map_err(FixtureError::from)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// A small planner week laid out around `today`.
    pub fn sample(today: NaiveDate) -> Self {
        let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
        let days_ahead = |n: u64| today.checked_add_days(Days::new(n)).unwrap_or(today);

        let events = [
            ("Morning Standup", today, (9, 0), (9, 30), Category::Work, "Daily sync with the team"),
            ("Yoga Class", today, (18, 0), (19, 0), Category::Health, ""),
            ("Dinner with Sam", days_ahead(1), (19, 30), (21, 0), Category::Social, "Downtown"),
            ("Sprint Planning", days_ahead(2), (14, 0), (15, 30), Category::Work, ""),
            ("Language Lesson", days_ago(1), (17, 0), (18, 0), Category::Learning, "Chapter 4"),
        ]
        .into_iter()
        .enumerate()
        .filter_map(|(i, (title, date, start, end, category, description))| {
            Some(CalendarEvent {
                id: format!("event_{}", i + 1),
                title: title.to_string(),
                date: day_key(date),
                start_time: NaiveTime::from_hms_opt(start.0, start.1, 0)?,
                end_time: NaiveTime::from_hms_opt(end.0, end.1, 0)?,
                description: description.to_string(),
                category,
            })
        })
        .collect();

        let todos = [
            ("Review pull requests", today, true, Category::Work, Some((10, 0))),
            ("Buy groceries", today, false, Category::Personal, None),
            ("Call the dentist", today, false, Category::Health, Some((12, 0))),
            ("Finish slide deck", days_ago(1), true, Category::Work, None),
            ("Water the plants", days_ago(1), true, Category::Personal, None),
            ("Read two chapters", days_ago(2), true, Category::Learning, None),
            ("Plan the weekend", days_ahead(1), false, Category::Social, None),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (text, date, completed, category, start))| {
            let start_time = start.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0));
            Todo {
                id: format!("todo_{}", i + 1),
                text: text.to_string(),
                completed,
                category,
                date: day_key(date),
                start_time,
                end_time: start_time.map(|t| t + chrono::Duration::minutes(30)),
            }
        })
        .collect();

        let habits = [
            ("Drink water", "droplet", HabitColor::Blue, vec![0, 1, 2, 3]),
            ("Morning run", "shoe", HabitColor::Orange, vec![1, 2]),
            ("Meditate", "lotus", HabitColor::Purple, vec![0, 2, 5]),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, icon, color, offsets))| {
            let completed_dates: BTreeSet<String> =
                offsets.into_iter().map(|n| day_key(days_ago(n))).collect();
            Habit {
                id: format!("habit_{}", i + 1),
                name: name.to_string(),
                icon: icon.to_string(),
                color,
                streak: completed_dates.len() as u32,
                completed_dates,
            }
        })
        .collect();

        Self { events, todos, habits }
    }
}
