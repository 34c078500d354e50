use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::cli::commands::{Cli, Commands};
use crate::cli::output::{TableStyle, render_table};
use crate::io::config_io::ConfigError;
use crate::io::input::{InputError, LineInput, PromptInput};
use crate::io::selector::{SelectError, Selector, ShellSelector};
use crate::io::store_io::{self, StoreError};
use crate::model::config::Config;
use crate::model::entry::Entry;
use crate::parse::{ParseError, parse_entry};

const PROMPT: &str = ">>> ";

/// Error type for a single command invocation
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("no selection made")]
    NoSelection,
    #[error("selection does not match any task: {0}")]
    NoMatch(String),
    #[error("could not write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Broad failure categories, independent of which module raised them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigIo,
    StoreIo,
    Decode,
    Format,
    Validation,
    CollaboratorFailure,
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::Config(_) => ErrorKind::ConfigIo,
            CommandError::Store(StoreError::Decode { .. }) => ErrorKind::Decode,
            CommandError::Store(_) => ErrorKind::StoreIo,
            CommandError::Parse(ParseError::MissingName) => ErrorKind::Validation,
            CommandError::Parse(_) => ErrorKind::Format,
            CommandError::NoSelection | CommandError::NoMatch(_) => ErrorKind::Validation,
            CommandError::Input(_) | CommandError::Select(_) | CommandError::Output(_) => {
                ErrorKind::CollaboratorFailure
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against the real terminal, select command and stdout.
pub fn dispatch(cli: Cli, config: &Config) -> Result<(), CommandError> {
    match cli.command {
        Commands::Add => {
            let mut input = PromptInput::new()?;
            cmd_add(config, &mut input, Local::now().date_naive())?;
        }
        Commands::Delete => {
            let mut selector = ShellSelector::new(config.select_cmd.clone());
            cmd_delete(config, &mut selector)?;
        }
        Commands::List => {
            let stdout = std::io::stdout();
            cmd_list(config, &mut stdout.lock())?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Read one line of input, parse it and append the entry to the store.
///
/// Nothing is written if the line doesn't parse.
pub fn cmd_add(
    config: &Config,
    input: &mut dyn LineInput,
    today: NaiveDate,
) -> Result<Entry, CommandError> {
    let line = input.read_line(PROMPT)?;
    let entry = parse_entry(&line, today)?;

    let path = Path::new(&config.data_file);
    let mut entries = store_io::read_entries(path)?;
    entries.push(entry.clone());
    store_io::write_entries(path, &entries)?;
    tracing::debug!(task = %entry.task, count = entries.len(), "added task");
    Ok(entry)
}

/// Print the store as a table with a header. Never writes the store.
pub fn cmd_list(config: &Config, out: &mut dyn Write) -> Result<(), CommandError> {
    let entries = store_io::read_entries(Path::new(&config.data_file))?;
    for line in render_table(&entries, TableStyle::WithHeader) {
        writeln!(out, "{}", line).map_err(CommandError::Output)?;
    }
    out.flush().map_err(CommandError::Output)?;
    Ok(())
}

/// Let the selector pick a rendered row and remove the matching entry.
///
/// The first row (by position) containing the selected text is removed, so
/// identical rows, or a selection that is a substring of an earlier row,
/// resolve to the earliest entry.
pub fn cmd_delete(config: &Config, selector: &mut dyn Selector) -> Result<Entry, CommandError> {
    let path = Path::new(&config.data_file);
    let entries = store_io::read_entries(path)?;

    let lines = render_table(&entries, TableStyle::Borderless);
    let mut feed = lines.join("\n");
    if !feed.is_empty() {
        feed.push('\n');
    }

    let selected = selector.select(&feed)?;
    if selected.is_empty() {
        return Err(CommandError::NoSelection);
    }

    let index = lines
        .iter()
        .position(|line| line.contains(selected.as_str()))
        .ok_or_else(|| CommandError::NoMatch(selected.clone()))?;
    let removed = entries[index].clone();

    let entries = store_io::remove_at(entries, index);
    store_io::write_entries(path, &entries)?;
    tracing::debug!(index, task = %removed.task, "deleted task");
    Ok(removed)
}
