//! FILENAME: app/cli/src/session.rs
// PURPOSE: Line-oriented interactive session over one loaded table.
// CONTEXT: The whole session state lives in an UndoHistory. Commands that
// change what is loaded, selected or pivoted push a new entry; undo/redo move
// through those entries and announce the restored state via the history's
// callbacks.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use engine::{ParsedTable, UndoHistory};
use pivot_engine::{AggregateFunction, PivotDefinition};

use crate::commands::{group_for, pivot_for, render, stats_for, TableSummary, Workspace};

pub const PROMPT: &str = "workhub> ";

const HELP: &str = "\
commands:
  load <file>                          load a csv/xlsx/xls file
  columns                              list columns and inferred types
  select <column>                      choose the column used by `stats`
  stats [column]                       statistics for a column
  group <by> <value> [fn]              aggregate value grouped by a field
  pivot <row> <column> <value> [fn]    two-field pivot
  undo | redo                          move through session history
  reset                                clear the session
  history                              show recorded states
  quit                                 leave the shell
fn is one of sum, count, average, min, max (default sum)";

/// Everything the user can undo.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub table: Option<Rc<ParsedTable>>,
    pub selected_column: Option<String>,
    pub pivot: Option<PivotDefinition>,
}

impl SessionState {
    /// One-line description used by `history` and undo/redo notices.
    pub fn describe(&self) -> String {
        let Some(table) = &self.table else {
            return "(empty)".to_string();
        };
        let mut text = format!("{} [{} rows]", table.source_name, table.row_count);
        if let Some(column) = &self.selected_column {
            text.push_str(&format!(" column={}", column));
        }
        if let Some(pivot) = &self.pivot {
            text.push_str(&format!(
                " pivot={} x {} ({} of {})",
                pivot.row_field, pivot.column_field, pivot.aggregation, pivot.value_field
            ));
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'w> {
    workspace: &'w mut Workspace,
    history: UndoHistory<SessionState>,
    notices: Rc<RefCell<Vec<String>>>,
}

impl<'w> Session<'w> {
    pub fn new(workspace: &'w mut Workspace) -> Self {
        let notices: Rc<RefCell<Vec<String>>> = Rc::default();
        let undo_notices = Rc::clone(&notices);
        let redo_notices = Rc::clone(&notices);

        let options = workspace.config().history_options();
        let history = UndoHistory::with_options(SessionState::default(), options)
            .on_undo(move |state: &SessionState| {
                undo_notices.borrow_mut().push(format!("undo -> {}", state.describe()));
            })
            .on_redo(move |state: &SessionState| {
                redo_notices.borrow_mut().push(format!("redo -> {}", state.describe()));
            });

        Session {
            workspace,
            history,
            notices,
        }
    }

    pub fn state(&self) -> SessionState {
        self.history.current()
    }

    pub fn history(&self) -> &UndoHistory<SessionState> {
        &self.history
    }

    /// Reads commands until `quit` or end of input. Command errors are
    /// reported on `output` and do not end the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok((flow, text)) => {
                    if !text.is_empty() {
                        writeln!(output, "{}", text)?;
                    }
                    if flow == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(e) => {
                    log::warn!(target: "SHELL", "{}: {:#}", line.trim(), e);
                    writeln!(output, "error: {:#}", e)?;
                }
            }
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }
        Ok(())
    }

    /// Runs one command line and returns the text to show.
    pub fn execute(&mut self, line: &str) -> Result<(Flow, String)> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();
        log::debug!(target: "SHELL", "command={} args={:?}", command, args);

        let text = match command {
            "" => String::new(),
            "help" | "?" => HELP.to_string(),
            "quit" | "exit" => return Ok((Flow::Quit, String::new())),
            "load" => self.load(rest)?,
            "columns" => self.columns()?,
            "select" => self.select(&args)?,
            "stats" => self.stats(&args)?,
            "group" => self.group(&args)?,
            "pivot" => self.pivot(&args)?,
            "undo" => self.step(true),
            "redo" => self.step(false),
            "reset" => {
                self.history.reset(SessionState::default());
                "session cleared".to_string()
            }
            "history" => self.describe_history(),
            other => bail!("unknown command {:?} (try `help`)", other),
        };
        Ok((Flow::Continue, text))
    }

    fn table(&self) -> Result<Rc<ParsedTable>> {
        self.state()
            .table
            .ok_or_else(|| anyhow!("no table loaded (use `load <file>`)"))
    }

    fn load(&mut self, path: &str) -> Result<String> {
        if path.is_empty() {
            bail!("usage: load <file>");
        }
        let table = self.workspace.load(Path::new(path))?;
        let summary = render(&TableSummary::of(&table))?;
        self.history.set_state(SessionState {
            table: Some(Rc::new(table)),
            selected_column: None,
            pivot: None,
        });
        Ok(summary)
    }

    fn columns(&self) -> Result<String> {
        let table = self.table()?;
        let lines: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("{} ({})", c.key, c.column_type))
            .collect();
        Ok(lines.join("\n"))
    }

    fn select(&mut self, args: &[&str]) -> Result<String> {
        let [column] = args else {
            bail!("usage: select <column>");
        };
        let table = self.table()?;
        if table.column(column).is_none() {
            bail!("unknown column {:?}", column);
        }
        let mut next = self.state();
        next.selected_column = Some(column.to_string());
        self.history.set_state(next);
        Ok(format!("selected {}", column))
    }

    fn stats(&self, args: &[&str]) -> Result<String> {
        let table = self.table()?;
        let column = match args {
            [column] => column.to_string(),
            [] => self
                .state()
                .selected_column
                .ok_or_else(|| anyhow!("no column selected (use `select <column>` or `stats <column>`)"))?,
            _ => bail!("usage: stats [column]"),
        };
        render(&stats_for(&table, &column)?)
    }

    fn group(&self, args: &[&str]) -> Result<String> {
        let (by, value, function) = match args {
            [by, value] => (by, value, AggregateFunction::default()),
            [by, value, function] => (by, value, function.parse::<AggregateFunction>()?),
            _ => bail!("usage: group <by> <value> [fn]"),
        };
        let table = self.table()?;
        render(&group_for(&table, by, value, function)?)
    }

    fn pivot(&mut self, args: &[&str]) -> Result<String> {
        let definition = match args {
            [row, column, value] => {
                PivotDefinition::new(*row, *column, *value, AggregateFunction::default())
            }
            [row, column, value, function] => {
                let aggregation = function.parse::<AggregateFunction>()?;
                PivotDefinition::new(*row, *column, *value, aggregation)
            }
            _ => bail!("usage: pivot <row> <column> <value> [fn]"),
        };
        let table = self.table()?;
        let result = pivot_for(&table, &definition)?;

        let mut next = self.state();
        next.pivot = Some(definition);
        self.history.set_state(next);
        render(&result)
    }

    fn step(&mut self, undo: bool) -> String {
        let moved = if undo { self.history.undo() } else { self.history.redo() };
        if moved.is_none() {
            return if undo { "nothing to undo" } else { "nothing to redo" }.to_string();
        }
        self.notices.borrow_mut().drain(..).collect::<Vec<_>>().join("\n")
    }

    fn describe_history(&self) -> String {
        let snapshot = self.history.snapshot();
        snapshot
            .entries
            .iter()
            .enumerate()
            .map(|(i, state)| {
                let marker = if i == snapshot.current_index { '*' } else { ' ' };
                format!("{} {}: {}", marker, i, state.describe())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
