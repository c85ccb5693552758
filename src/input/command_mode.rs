use chrono::NaiveDate;

use crate::calendar::{Category, EventDraft, day};
use crate::heat_map::ActivityKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    HeatMap(ActivityKind),
    Agenda(Option<NaiveDate>),
    AddEvent(EventDraft),
    DeleteEvent(String),
    AddTodo { text: String, category: Category },
    ToggleTodo(String),
    DeleteTodo(String),
    ToggleHabit { id: String, date: Option<NaiveDate> },
    Theme(String),
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "help" => Command::Help,
        "heatmap" => match parts.get(1) {
            None => Command::HeatMap(ActivityKind::Tasks),
            Some(kind) => match kind.parse::<ActivityKind>() {
                Ok(kind) => Command::HeatMap(kind),
                Err(e) => Command::Error(e),
            },
        },
        "agenda" => match parts.get(1) {
            None => Command::Agenda(None),
            Some(raw) => match day::parse_day(raw) {
                Some(date) => Command::Agenda(Some(date)),
                None => Command::Error(format!("Invalid date format: {}", raw)),
            },
        },
        "todo" => {
            if parts.len() < 3 {
                Command::Error("todo requires a category and text".to_string())
            } else {
                let category = parts[1].parse::<Category>().unwrap_or_default();
                Command::AddTodo {
                    text: parts[2..].join(" "),
                    category,
                }
            }
        }
        "done" => with_id(&parts, "done", Command::ToggleTodo),
        "rm-todo" => with_id(&parts, "rm-todo", Command::DeleteTodo),
        "rm-event" => with_id(&parts, "rm-event", Command::DeleteEvent),
        "habit" => {
            if parts.len() < 2 {
                Command::Error("habit requires a habit id".to_string())
            } else if let Some(raw) = parts.get(2) {
                match day::parse_day(raw) {
                    Some(date) => Command::ToggleHabit {
                        id: parts[1].to_string(),
                        date: Some(date),
                    },
                    None => Command::Error(format!("Invalid date format: {}", raw)),
                }
            } else {
                Command::ToggleHabit {
                    id: parts[1].to_string(),
                    date: None,
                }
            }
        }
        "event" => parse_event(&parts[1..]),
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

fn with_id(parts: &[&str], name: &str, build: fn(String) -> Command) -> Command {
    match parts.get(1) {
        Some(id) => build(id.to_string()),
        None => Command::Error(format!("{} requires an id", name)),
    }
}

// :event <date> <start> <end> <category> <title...>
fn parse_event(args: &[&str]) -> Command {
    if args.len() < 5 {
        return Command::Error("event requires date, start, end, category and title".to_string());
    }

    Command::AddEvent(EventDraft {
        title: args[4..].join(" "),
        date: args[0].to_string(),
        start_time: args[1].to_string(),
        end_time: args[2].to_string(),
        description: String::new(),
        category: args[3].parse::<Category>().unwrap_or_default(),
    })
}

pub fn help_text() -> &'static str {
    "\
:heatmap [tasks|habits]                 show the 42-day activity heat map
:agenda [YYYY-MM-DD]                    show events, todos and habits for a day
:todo <category> <text>                 add a todo for the selected day
:done <id>                              toggle a todo's completion
:rm-todo <id>                           delete a todo
:habit <id> [YYYY-MM-DD]                toggle a habit for a day (default today)
:event <date> <start> <end> <cat> <title>  add a calendar event
:rm-event <id>                          delete a calendar event
:theme <name>                           switch heat map palette
:q                                      quit"
}
