//! Interactive session: the terminal stand-in for the browser page.
//!
//! Reads one command per line, drives [`AppState`] and prints the resulting
//! toast, status line and views after each command. The loop ends on
//! `quit`, `exit` or end of input.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::app::AppState;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::notify::HINT_TEXT;
use crate::task::Strategy;
use crate::validate::TaskForm;

const PROMPT: &str = "taskmatrix> ";
const PASTE_END: &str = ".";

const HELP: &str = "\
Commands:
  add               add one task through prompts
  paste             paste a JSON array of tasks, ending with a line containing only '.'
  load <path>       load a JSON array of tasks from a file
  list              show pending tasks
  clear             remove pending tasks and results
  strategy [name]   show or set the default strategy
  analyze [name]    score pending tasks (smart, fastest, high_impact, deadline)
  suggest           fetch today's top 3 tasks
  results           show the last results and the Eisenhower matrix
  status            show the status line
  help              show this list
  quit | exit       leave the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Prompt for one task.
    Add,
    /// Read a pasted JSON array.
    Paste,
    /// Load a JSON array from a file; empty when no path was given.
    Load(String),
    /// Show pending tasks.
    List,
    /// Clear tasks and results.
    Clear,
    /// Show or set the default strategy.
    Strategy(Option<String>),
    /// Analyze, optionally with a one-off strategy.
    Analyze(Option<String>),
    /// Fetch suggestions.
    Suggest,
    /// Show results and matrix.
    Results,
    /// Show the status line.
    Status,
    /// Show the command list.
    Help,
    /// End the session.
    Quit,
    /// Blank line.
    Empty,
    /// Anything else.
    Unknown(String),
}

/// Parses one input line.
#[must_use]
pub fn parse_command(input: &str) -> SessionCommand {
    let input = input.trim();
    let (word, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let rest = rest.trim();
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_lowercase().as_str() {
        "" => SessionCommand::Empty,
        "add" => SessionCommand::Add,
        "paste" | "json" => SessionCommand::Paste,
        "load" => SessionCommand::Load(rest.to_string()),
        "list" | "ls" => SessionCommand::List,
        "clear" => SessionCommand::Clear,
        "strategy" => SessionCommand::Strategy(arg),
        "analyze" => SessionCommand::Analyze(arg),
        "suggest" => SessionCommand::Suggest,
        "results" => SessionCommand::Results,
        "status" => SessionCommand::Status,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        _ => SessionCommand::Unknown(input.to_string()),
    }
}

/// Runs an interactive session over `reader` and `writer`.
///
/// # Errors
///
/// Returns an error only when reading input or writing output fails.
pub async fn run<R: BufRead, W: Write>(
    ctx: &ServiceContext,
    settings: &Settings,
    reader: R,
    writer: W,
) -> Result<(), String> {
    let app = AppState::new(settings.api_base.as_str(), settings.strategy);
    Session::new(app, ctx, reader, writer).run().await.map(|_| ())
}

/// State for one interactive session.
pub struct Session<'c, R: BufRead, W: Write> {
    app: AppState,
    ctx: &'c ServiceContext,
    reader: R,
    writer: W,
}

impl<'c, R: BufRead, W: Write> Session<'c, R, W> {
    /// Creates a session around existing application state.
    pub fn new(app: AppState, ctx: &'c ServiceContext, reader: R, writer: W) -> Self {
        Self { app, ctx, reader, writer }
    }

    /// Runs until `quit` or end of input and returns the final state.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run(mut self) -> Result<AppState, String> {
        self.line("taskmatrix session. Type `help` for the list of commands.")?;
        self.report()?;

        while let Some(line) = self.prompt(PROMPT)? {
            match parse_command(&line) {
                SessionCommand::Quit => break,
                SessionCommand::Empty => {}
                SessionCommand::Add => self.add()?,
                SessionCommand::Paste => self.paste()?,
                SessionCommand::Load(path) => self.load(&path)?,
                SessionCommand::List => {
                    let view = self.app.pending_view();
                    self.text(&view)?;
                }
                SessionCommand::Clear => {
                    self.app.clear(self.ctx.clock.now());
                    self.report()?;
                }
                SessionCommand::Strategy(name) => self.strategy(name.as_deref())?,
                SessionCommand::Analyze(name) => self.analyze(name.as_deref()).await?,
                SessionCommand::Suggest => self.suggest().await?,
                SessionCommand::Results => self.show_results()?,
                SessionCommand::Status => self.report()?,
                SessionCommand::Help => self.line(HELP)?,
                SessionCommand::Unknown(input) => {
                    self.line(&format!("Unknown command '{input}'. Type `help` for the list of commands."))?;
                }
            }
        }

        self.line("Bye.")?;
        Ok(self.app)
    }

    async fn analyze(&mut self, name: Option<&str>) -> Result<(), String> {
        let strategy = match name {
            None => None,
            Some(name) => match Strategy::parse(name) {
                Some(strategy) => Some(strategy),
                None => return self.unknown_strategy(name),
            },
        };

        let writer = &mut self.writer;
        let mut loading_write = Ok(());
        let outcome = self
            .app
            .analyze(self.ctx, strategy, |notifier| {
                loading_write = writeln!(writer, "{}", notifier.status());
            })
            .await;
        loading_write.map_err(|e| format!("write error: {e}"))?;
        self.report()?;
        if outcome.is_ok() {
            self.show_results()?;
        }
        Ok(())
    }

    async fn suggest(&mut self) -> Result<(), String> {
        let writer = &mut self.writer;
        let mut loading_write = Ok(());
        let outcome = self
            .app
            .suggest(self.ctx, |notifier| {
                loading_write = writeln!(writer, "{}", notifier.status());
            })
            .await;
        loading_write.map_err(|e| format!("write error: {e}"))?;
        self.report()?;
        if outcome.is_ok() {
            self.show_results()?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<(), String> {
        let mut fields = Vec::with_capacity(5);
        for label in [
            "Title: ",
            "Due date (YYYY-MM-DD): ",
            "Estimated hours: ",
            "Importance (1-10): ",
            "Dependencies (comma-separated, optional): ",
        ] {
            let Some(value) = self.prompt(label)? else {
                return self.line("Add cancelled.");
            };
            fields.push(value);
        }
        let [title, due_date, estimated_hours, importance, dependencies]: [String; 5] =
            fields.try_into().map_err(|_| "add: incomplete form".to_string())?;

        let form = TaskForm { title, due_date, estimated_hours, importance, dependencies };
        let _ = self.app.add_from_form(&form, self.ctx.clock.now());
        self.report()
    }

    fn paste(&mut self) -> Result<(), String> {
        self.line("Paste a JSON array of tasks. End with a line containing only '.'")?;
        let mut raw = String::new();
        loop {
            let mut line = String::new();
            let read =
                self.reader.read_line(&mut line).map_err(|e| format!("read error: {e}"))?;
            if read == 0 || line.trim() == PASTE_END {
                break;
            }
            raw.push_str(&line);
        }
        let _ = self.app.load_json(&raw, self.ctx.clock.now());
        self.report()
    }

    fn load(&mut self, path: &str) -> Result<(), String> {
        if path.is_empty() {
            return self.line("Usage: load <path>");
        }
        match std::fs::read_to_string(Path::new(path)) {
            Ok(raw) => {
                let _ = self.app.load_json(&raw, self.ctx.clock.now());
                self.report()
            }
            Err(e) => self.line(&format!("Could not read {path}: {e}")),
        }
    }

    fn strategy(&mut self, name: Option<&str>) -> Result<(), String> {
        match name {
            None => self.line(&format!("Strategy: {}", self.app.strategy())),
            Some(name) => match Strategy::parse(name) {
                Some(strategy) => {
                    self.app.set_strategy(strategy);
                    self.line(&format!("Strategy set to {strategy}."))
                }
                None => self.unknown_strategy(name),
            },
        }
    }

    fn unknown_strategy(&mut self, name: &str) -> Result<(), String> {
        self.line(&format!(
            "Unknown strategy '{name}'. Choose one of: smart, fastest, high_impact, deadline."
        ))
    }

    fn show_results(&mut self) -> Result<(), String> {
        let now = self.ctx.clock.now();
        let results = self.app.results_view();
        let matrix = self.app.matrix_view(now);
        self.text(&results)?;
        self.text(&matrix)
    }

    /// Prints the visible toast, the status line and the hint.
    fn report(&mut self) -> Result<(), String> {
        let now = self.ctx.clock.now();
        let notifier = self.app.notifier();
        if let Some(toast) = notifier.active_toast(now) {
            writeln!(self.writer, "{toast}").map_err(|e| format!("write error: {e}"))?;
        }
        writeln!(self.writer, "Status: {}", notifier.status())
            .map_err(|e| format!("write error: {e}"))?;
        if notifier.hint_visible(now) {
            writeln!(self.writer, "{HINT_TEXT}").map_err(|e| format!("write error: {e}"))?;
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, String> {
        write!(self.writer, "{label}").map_err(|e| format!("write error: {e}"))?;
        self.writer.flush().map_err(|e| format!("flush error: {e}"))?;
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|e| format!("read error: {e}"))?;
        Ok((read > 0).then(|| line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn text(&mut self, view: &impl std::fmt::Display) -> Result<(), String> {
        write!(self.writer, "{view}").map_err(|e| format!("write error: {e}"))
    }

    fn line(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.writer, "{text}").map_err(|e| format!("write error: {e}"))
    }
}
