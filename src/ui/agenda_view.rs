use std::fmt::Write;

use chrono::NaiveDate;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::activity::{Habit, Todo};
use crate::calendar::{CalendarEvent, day::TIME_FORMAT, day_key};
use crate::ledger::Ledger;
use crate::ui::theme::Theme;

/// Styled agenda for one day: events, todos with progress, then every habit
/// with its check mark. Categories and habits are coloured from `theme`.
pub fn agenda_lines(ledger: &Ledger, date: NaiveDate, date_format: &str, theme: &Theme) -> Vec<Line<'static>> {
    let heading = Style::default().fg(theme.weekday_header).add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(theme.neutral);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Agenda – {}", heading_date(date, date_format)),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    let events = ledger.events_for_date(date);
    lines.push(Line::from(Span::styled("Events", heading)));
    if events.is_empty() {
        lines.push(Line::from(Span::styled("  No events scheduled.", muted)));
    }
    for event in &events {
        let clashes = events.iter().any(|other| other.id != event.id && event.overlaps(other));
        lines.push(event_line(event, clashes, theme));
    }

    lines.push(Line::default());
    let (done, total) = ledger.day_progress(date);
    lines.push(Line::from(Span::styled(format!("Todos ({}/{})", done, total), heading)));
    let todos = ledger.todos_for_date(date);
    if todos.is_empty() {
        lines.push(Line::from(Span::styled("  Nothing to do.", muted)));
    }
    for todo in todos {
        lines.push(todo_line(todo, theme));
    }

    lines.push(Line::default());
    let completed = ledger.habits_completed_on(date).len();
    lines.push(Line::from(Span::styled(
        format!("Habits ({}/{})", completed, ledger.habits().len()),
        heading,
    )));
    for habit in ledger.habits() {
        lines.push(habit_line(habit, date, theme));
    }

    lines
}

pub fn agenda_text(ledger: &Ledger, date: NaiveDate, date_format: &str) -> String {
    agenda_lines(ledger, date, date_format, &Theme::default())
        .iter()
        .map(|line| line.spans.iter().map(|span| &*span.content).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// A bad user-supplied format string falls back to the canonical key.
fn heading_date(date: NaiveDate, date_format: &str) -> String {
    let mut heading = String::new();
    if write!(heading, "{}", date.format(date_format)).is_err() {
        return day_key(date);
    }
    heading
}

fn check(done: bool) -> &'static str {
    if done { "x" } else { " " }
}

fn event_line(event: &CalendarEvent, clashes: bool, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!(
            "  {}-{}  {} ",
            event.start_time.format(TIME_FORMAT),
            event.end_time.format(TIME_FORMAT),
            event.title
        )),
        Span::styled(format!("[{}]", event.category), theme.category_style(event.category)),
    ];
    if !event.description.is_empty() {
        spans.push(Span::raw(format!(" – {}", event.description)));
    }
    if clashes {
        spans.push(Span::styled(
            " (overlaps)",
            Style::default().fg(theme.today).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn todo_line(todo: &Todo, theme: &Theme) -> Line<'static> {
    let time = match todo.start_time {
        Some(start) => format!("{} ", start.format(TIME_FORMAT)),
        None => String::new(),
    };
    Line::from(vec![
        Span::raw(format!("  [{}] {}{} ", check(todo.completed), time, todo.text)),
        Span::styled(format!("[{}]", todo.category), theme.category_style(todo.category)),
        Span::styled(format!("  #{}", todo.id), Style::default().fg(theme.neutral)),
    ])
}

fn habit_line(habit: &Habit, date: NaiveDate, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  [{}] ", check(habit.is_completed_on(date)))),
        Span::styled(habit.name.clone(), Style::default().fg(theme.habit_color(habit.color))),
        Span::raw(format!(" (streak {})", habit.streak)),
        Span::styled(format!("  #{}", habit.id), Style::default().fg(theme.neutral)),
    ])
}
