use std::{
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use planner_ledger::{
    ActivityKind, CommandOutcome, Fixtures, Ledger,
    calendar::parse_day,
    command_mode::{self, parse_command},
    storage::config::Config,
    ui::{
        agenda_view::{agenda_lines, agenda_text},
        ansi::lines_to_ansi,
        heat_map_view::{heat_map_lines, heat_map_text},
        theme::Theme,
    },
};

pub const USAGE: &str = "Usage: planner-ledger [--heatmap [tasks|habits]] [--agenda [YYYY-MM-DD]] [--repl] [--fixtures PATH] [--exec COMMAND]...";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    HeatMap(Option<ActivityKind>),
    Agenda(Option<NaiveDate>),
    Repl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub fixtures: Option<PathBuf>,
    pub exec: Vec<String>,
}

pub enum CliRequest {
    Run(CliOptions),
    Help,
}

pub fn parse_cli_mode<I: IntoIterator<Item = String>>(raw: I) -> Result<CliRequest, String> {
    let mut mode = None;
    let mut fixtures = None;
    let mut exec = Vec::new();
    let mut args = raw.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--heatmap" => {
                let kind = match args.next_if(|next| !next.starts_with("--")) {
                    Some(value) => Some(value.parse::<ActivityKind>()?),
                    None => None,
                };
                mode = Some(CliMode::HeatMap(kind));
            }
            "--agenda" => {
                let date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(value) => Some(
                        parse_day(&value)
                            .ok_or_else(|| format!("Invalid date '{}'. Use YYYY-MM-DD.", value))?,
                    ),
                    None => None,
                };
                mode = Some(CliMode::Agenda(date));
            }
            "--repl" => mode = Some(CliMode::Repl),
            "--fixtures" => {
                let path = args.next().ok_or("--fixtures requires a path")?;
                fixtures = Some(PathBuf::from(path));
            }
            "--exec" => {
                let command = args.next().ok_or("--exec requires a command")?;
                exec.push(command);
            }
            "--help" | "-h" => return Ok(CliRequest::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliRequest::Run(CliOptions {
        mode: mode.unwrap_or(CliMode::HeatMap(None)),
        fixtures,
        exec,
    }))
}

pub fn args() -> impl Iterator<Item = String> {
    env::args().skip(1)
}

pub struct Session {
    pub ledger: Ledger,
    pub theme: Theme,
    pub config: Config,
    pub today: NaiveDate,
    pub color: bool,
}

impl Session {
    pub fn open(config: Config, fixtures_override: Option<PathBuf>, today: NaiveDate) -> Result<Self> {
        let fixtures = match fixtures_override.or_else(|| config.planner.fixtures.clone()) {
            Some(path) => {
                info!(path = %path.display(), "loading fixtures");
                Fixtures::load(&path)
                    .with_context(|| format!("loading fixtures from {}", path.display()))?
            }
            None => Fixtures::sample(today),
        };

        Ok(Self {
            ledger: Ledger::new(fixtures),
            theme: Theme::get_by_name(&config.ui.theme),
            config,
            today,
            color: false,
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self, outcome: &CommandOutcome) -> Option<String> {
        match outcome {
            CommandOutcome::Applied(message) => Some(message.clone()),
            CommandOutcome::NotFound(id) => Some(format!("No record with id '{}'", id)),
            CommandOutcome::Rejected(reason) => Some(format!("Error: {}", reason)),
            CommandOutcome::HeatMap(kind) => Some(self.heat_map(*kind)),
            CommandOutcome::Agenda(date) => Some(self.agenda(*date)),
            CommandOutcome::Theme(name) => Some(format!("Theme set to {}", name)),
            CommandOutcome::Help => Some(command_mode::help_text().to_string()),
            CommandOutcome::Quit => None,
        }
    }

    pub fn heat_map(&self, kind: ActivityKind) -> String {
        let buckets = self.ledger.heat_map(kind, self.today);
        if self.color {
            lines_to_ansi(&heat_map_lines(kind, &buckets, &self.theme))
        } else {
            heat_map_text(kind, &buckets)
        }
    }

    pub fn agenda(&self, date: NaiveDate) -> String {
        let format = &self.config.ui.date_format;
        if self.color {
            lines_to_ansi(&agenda_lines(&self.ledger, date, format, &self.theme))
        } else {
            agenda_text(&self.ledger, date, format)
        }
    }

    /// Agenda for `date`, or for the day last selected with `:agenda`.
    pub fn agenda_for(&self, date: Option<NaiveDate>) -> String {
        self.agenda(date.unwrap_or(self.ledger.selected_date(self.today)))
    }

    pub fn execute(&mut self, input: &str) -> CommandOutcome {
        let outcome = self.ledger.apply(parse_command(input), self.today);
        match &outcome {
            CommandOutcome::Theme(name) => self.theme = Theme::get_by_name(name),
            CommandOutcome::Rejected(reason) => warn!(input, reason = reason.as_str(), "command rejected"),
            _ => {}
        }
        outcome
    }

    /// Applies `--exec` commands in order. Only their status lines are
    /// printed; views are shown once by the selected mode.
    pub fn run_batch(&mut self, commands: &[String], out: &mut impl Write) -> io::Result<()> {
        for command in commands {
            let outcome = self.execute(command);
            if let CommandOutcome::Applied(_) | CommandOutcome::NotFound(_) | CommandOutcome::Rejected(_) = outcome
                && let Some(text) = self.render(&outcome)
            {
                writeln!(out, "{}", text)?;
            }
        }
        Ok(())
    }

    pub fn run_repl(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.heat_map(self.config.planner.default_heat_map))?;
        writeln!(out, "Type :help for commands, :q to quit.")?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let outcome = self.execute(&line);
            match self.render(&outcome) {
                Some(text) => writeln!(out, "{}", text)?,
                None => break,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn run(args: &[&str]) -> Result<CliRequest, String> {
        parse_cli_mode(args.iter().map(|a| a.to_string()))
    }

    fn options(args: &[&str]) -> CliOptions {
        match run(args) {
            Ok(CliRequest::Run(options)) => options,
            _ => panic!("expected run options for {:?}", args),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    fn session() -> Session {
        Session::open(Config::default(), None, today()).unwrap()
    }

    #[test]
    fn no_arguments_shows_default_heat_map() {
        assert_eq!(options(&[]).mode, CliMode::HeatMap(None));
    }

    #[test]
    fn heatmap_accepts_kind() {
        assert_eq!(options(&["--heatmap", "habits"]).mode, CliMode::HeatMap(Some(ActivityKind::Habits)));
    }

    #[test]
    fn agenda_without_date_before_other_flag() {
        let parsed = options(&["--agenda", "--fixtures", "f.json"]);
        assert_eq!(parsed.mode, CliMode::Agenda(None));
        assert_eq!(parsed.fixtures, Some(PathBuf::from("f.json")));
    }

    #[test]
    fn agenda_with_invalid_date_is_an_error() {
        assert!(run(&["--agenda", "2025/04/20"]).is_err());
    }

    #[test]
    fn exec_flags_accumulate_in_order() {
        let parsed = options(&["--exec", ":done todo_2", "--exec", ":habit habit_2"]);
        assert_eq!(parsed.exec, vec![":done todo_2", ":habit habit_2"]);
    }

    #[test]
    fn unknown_argument_is_an_error() {
        assert!(run(&["--sample"]).is_err());
    }

    #[test]
    fn help_flag_requests_usage() {
        assert!(matches!(run(&["--help"]), Ok(CliRequest::Help)));
    }

    #[test]
    fn missing_fixture_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let result = Session::open(Config::default(), Some(dir.path().join("none.json")), today());
        assert!(result.is_err());
    }

    #[test]
    fn batch_commands_change_the_heat_map() {
        let mut session = session();
        let before = session.ledger.heat_map(ActivityKind::Tasks, today())[41].count;
        let mut out = Vec::new();

        session.run_batch(&[":done todo_2".to_string()], &mut out).unwrap();

        let after = session.ledger.heat_map(ActivityKind::Tasks, today())[41].count;
        assert_eq!(after, before + 1);
        assert_eq!(String::from_utf8(out).unwrap(), "Completed 'Buy groceries'\n");
    }

    #[test]
    fn colored_heat_map_keeps_every_row() {
        let session = session().with_color(true);

        let text = session.heat_map(ActivityKind::Habits);

        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("Habit check-ins"));
    }

    #[test]
    fn theme_command_switches_palette() {
        let mut session = session();
        session.execute(":theme nord");
        assert_eq!(session.theme.name, "nord");
    }

    #[test]
    fn repl_stops_at_quit() {
        let mut session = session();
        let input = b":habit habit_2\n:q\n:habit habit_2\n" as &[u8];
        let mut out = Vec::new();

        session.run_repl(input, &mut out).unwrap();

        let habit = session.ledger.habit("habit_2").unwrap();
        assert!(habit.is_completed_on(today()));
        assert_eq!(habit.streak, 3);
        assert!(String::from_utf8(out).unwrap().contains("Morning run on 2025-04-20: streak 3"));
    }

    #[test]
    fn agenda_flag_follows_day_selected_by_exec() {
        let mut session = session();
        let mut out = Vec::new();

        session.run_batch(&[":agenda 2025-02-01".to_string()], &mut out).unwrap();

        assert!(session.agenda_for(None).starts_with("Agenda – Saturday, February 01, 2025"));
        assert!(session.agenda_for(Some(today())).starts_with("Agenda – Sunday, April 20, 2025"));
    }

    #[test]
    fn colored_agenda_uses_escape_codes() {
        let session = session().with_color(true);

        let text = session.agenda(today());

        assert!(text.contains('\x1b'));
        assert!(text.contains("Morning Standup"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn warnings_while(f: impl FnOnce()) -> usize {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        logs.lines().filter(|line| line.contains("WARN")).count()
    }

    #[test]
    fn missing_targets_warn_once_per_command() {
        let mut session = session();

        for command in [":done ghost", ":rm-todo ghost", ":rm-event ghost", ":habit ghost"] {
            let outcome = session.execute(command);
            assert_eq!(outcome, CommandOutcome::NotFound("ghost".to_string()));
            let warnings = warnings_while(|| {
                session.execute(command);
            });
            assert_eq!(warnings, 1, "{}", command);
        }
    }
}
