use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::activity::{Habit, Todo};
use crate::calendar::day;

pub const HEAT_MAP_DAYS: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Tasks,
    Habits,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Tasks => write!(f, "tasks"),
            ActivityKind::Habits => write!(f, "habits"),
        }
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tasks" | "task" | "todos" => Ok(ActivityKind::Tasks),
            "habits" | "habit" => Ok(ActivityKind::Habits),
            other => Err(format!("Unknown activity kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Intensity::None,
            1 => Intensity::Low,
            2 => Intensity::Medium,
            _ => Intensity::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatBucket {
    pub date: NaiveDate,
    pub date_str: String,
    pub count: usize,
}

impl HeatBucket {
    pub fn intensity(&self) -> Intensity {
        Intensity::from_count(self.count)
    }
}

/// Daily activity counts for the 42 days ending at `today`, oldest first.
///
/// Tasks count completed todos dated on each day; habits count habits whose
/// completed set contains the day. Records with unparseable dates are skipped.
pub fn build_heat_map(
    kind: ActivityKind,
    todos: &[Todo],
    habits: &[Habit],
    today: NaiveDate,
) -> Vec<HeatBucket> {
    let tally = match kind {
        ActivityKind::Tasks => tally_tasks(todos),
        ActivityKind::Habits => tally_habits(habits),
    };

    (0..HEAT_MAP_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| HeatBucket {
            date,
            date_str: day::day_key(date),
            count: tally.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

fn tally_tasks(todos: &[Todo]) -> HashMap<NaiveDate, usize> {
    let mut tally = HashMap::new();
    for todo in todos.iter().filter(|t| t.completed) {
        if let Some(date) = day::parse_day(&todo.date) {
            *tally.entry(date).or_insert(0) += 1;
        }
    }
    tally
}

fn tally_habits(habits: &[Habit]) -> HashMap<NaiveDate, usize> {
    let mut tally = HashMap::new();
    for date in habits
        .iter()
        .flat_map(|habit| habit.completed_dates.iter())
        .filter_map(|d| day::parse_day(d))
    {
        *tally.entry(date).or_insert(0) += 1;
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Category;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn todo(id: &str, date: NaiveDate, completed: bool) -> Todo {
        Todo {
            id: id.to_string(),
            text: format!("Todo {}", id),
            completed,
            category: Category::Work,
            date: day::day_key(date),
            start_time: None,
            end_time: None,
        }
    }

    fn habit_with(id: &str, dates: &[NaiveDate]) -> Habit {
        let mut habit = Habit::new(id, format!("Habit {}", id));
        habit.completed_dates = dates.iter().map(|d| day::day_key(*d)).collect();
        habit.streak = dates.len() as u32;
        habit
    }

    fn count_on(buckets: &[HeatBucket], date: NaiveDate) -> usize {
        buckets.iter().find(|b| b.date == date).map(|b| b.count).unwrap()
    }

    #[test]
    fn empty_inputs_still_produce_42_days() {
        let today = date(2025, 3, 10);

        for kind in [ActivityKind::Tasks, ActivityKind::Habits] {
            let buckets = build_heat_map(kind, &[], &[], today);
            assert_eq!(buckets.len(), 42);
            assert!(buckets.iter().all(|b| b.count == 0));
        }
    }

    #[test]
    fn window_runs_oldest_to_today() {
        let today = date(2025, 3, 10);
        let buckets = build_heat_map(ActivityKind::Tasks, &[], &[], today);

        assert_eq!(buckets[0].date, date(2025, 1, 28));
        assert_eq!(buckets[41].date, today);
        assert_eq!(buckets[41].date_str, "2025-03-10");
        assert!(buckets.windows(2).all(|w| w[0].date.succ_opt() == Some(w[1].date)));
    }

    #[test]
    fn only_completed_todos_are_counted() {
        let today = date(2025, 3, 10);
        let yesterday = date(2025, 3, 9);
        let todos = vec![
            todo("1", today, true),
            todo("2", today, false),
            todo("3", yesterday, true),
        ];

        let buckets = build_heat_map(ActivityKind::Tasks, &todos, &[], today);

        assert_eq!(count_on(&buckets, today), 1);
        assert_eq!(count_on(&buckets, yesterday), 1);
    }

    #[test]
    fn todos_outside_the_window_are_ignored() {
        let today = date(2025, 3, 10);
        let todos = vec![
            todo("old", date(2025, 1, 27), true),
            todo("future", date(2025, 3, 11), true),
        ];

        let buckets = build_heat_map(ActivityKind::Tasks, &todos, &[], today);

        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 0);
    }

    #[test]
    fn malformed_todo_dates_contribute_nothing() {
        let today = date(2025, 3, 10);
        let mut broken = todo("1", today, true);
        broken.date = "10/03/2025".to_string();
        let mut missing = todo("2", today, true);
        missing.date = String::new();
        let mut unpadded = todo("3", today, true);
        unpadded.date = "2025-3-10".to_string();

        let buckets = build_heat_map(ActivityKind::Tasks, &[broken, missing, unpadded], &[], today);

        assert_eq!(count_on(&buckets, today), 0);
    }

    #[test]
    fn habits_count_once_per_habit_per_day() {
        let today = date(2025, 3, 10);
        let yesterday = date(2025, 3, 9);
        let habits = vec![
            habit_with("a", &[today, yesterday]),
            habit_with("b", &[today]),
            habit_with("c", &[]),
        ];

        let buckets = build_heat_map(ActivityKind::Habits, &[], &habits, today);

        assert_eq!(count_on(&buckets, today), 2);
        assert_eq!(count_on(&buckets, yesterday), 1);
    }

    #[test]
    fn non_canonical_habit_dates_contribute_nothing() {
        let today = date(2025, 3, 7);
        let mut habit = Habit::new("a", "Habit a");
        habit.completed_dates = ["2025-3-7", " 2025-03-06 "].map(String::from).into();

        let buckets = build_heat_map(ActivityKind::Habits, &[], &[habit], today);

        assert_eq!(count_on(&buckets, today), 0);
        assert_eq!(count_on(&buckets, date(2025, 3, 6)), 0);
    }

    #[test]
    fn kind_selects_the_collection() {
        let today = date(2025, 3, 10);
        let todos = vec![todo("1", today, true)];
        let habits = vec![habit_with("a", &[today]), habit_with("b", &[today])];

        let tasks = build_heat_map(ActivityKind::Tasks, &todos, &habits, today);
        let habit_map = build_heat_map(ActivityKind::Habits, &todos, &habits, today);

        assert_eq!(tasks[41].count, 1);
        assert_eq!(habit_map[41].count, 2);
    }

    #[test]
    fn intensity_saturates_at_three() {
        assert_eq!(Intensity::from_count(0), Intensity::None);
        assert_eq!(Intensity::from_count(1), Intensity::Low);
        assert_eq!(Intensity::from_count(2), Intensity::Medium);
        assert_eq!(Intensity::from_count(3), Intensity::High);
        assert_eq!(Intensity::from_count(40), Intensity::High);
    }

    #[test]
    fn activity_kind_parses_from_text() {
        assert_eq!("tasks".parse::<ActivityKind>(), Ok(ActivityKind::Tasks));
        assert_eq!("Habits".parse::<ActivityKind>(), Ok(ActivityKind::Habits));
        assert!("steps".parse::<ActivityKind>().is_err());
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0u64..3650).prop_map(|offset| date(2020, 1, 1) + Days::new(offset))
    }

    fn arb_todos() -> impl Strategy<Value = Vec<Todo>> {
        prop::collection::vec((arb_date(), any::<bool>()), 0..30).prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (d, done))| todo(&i.to_string(), d, done))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn last_bucket_is_always_today(todos in arb_todos(), today in arb_date()) {
            let buckets = build_heat_map(ActivityKind::Tasks, &todos, &[], today);

            prop_assert_eq!(buckets.len(), 42);
            prop_assert_eq!(&buckets[41].date_str, &day::day_key(today));
        }

        #[test]
        fn total_count_matches_completed_todos_in_window(todos in arb_todos(), today in arb_date()) {
            let buckets = build_heat_map(ActivityKind::Tasks, &todos, &[], today);
            let first = buckets[0].date;
            let expected = todos
                .iter()
                .filter(|t| t.completed)
                .filter_map(|t| day::parse_day(&t.date))
                .filter(|d| *d >= first && *d <= today)
                .count();

            prop_assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), expected);
        }
    }
}
