//! Interactive search session.
//!
//! The index is loaded once, then every query the user enters is filtered
//! against that same cached index. On a terminal the query is read with a
//! dialoguer prompt; otherwise lines are read from stdin, which keeps the
//! session scriptable.
//!
//! Commands recognised in place of a query:
//! - `:refresh` drops the cached index and loads it again
//! - `:quit` / `:q` ends the session (as does EOF)

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};
use tracing::debug;

use super::render::{OutputFormat, write_load_error, write_results};
use crate::loader::{DataLoader, LoadError};
use crate::model::DocIndex;
use crate::search::filter;

const PROMPT: &str = "Search Components";

/// Source of queries for an interactive session.
pub trait QueryPrompt {
    /// Next query, or `None` when the user is done.
    fn next_query(&mut self) -> io::Result<Option<String>>;
}

/// Prompt on a terminal using dialoguer.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryPrompt for TerminalPrompt {
    fn next_query(&mut self) -> io::Result<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text();
        match answer {
            Ok(query) => Ok(Some(query)),
            Err(err) => {
                let err = io::Error::from(err);
                match err.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }
}

/// Read one query per line, e.g. from piped stdin.
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> QueryPrompt for LinePrompt<R> {
    fn next_query(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Pick a dialoguer prompt on a terminal, line reading otherwise.
pub fn stdin_prompt() -> Box<dyn QueryPrompt> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompt::new())
    } else {
        Box::new(LinePrompt::new(io::stdin().lock()))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SessionInput<'a> {
    Query(&'a str),
    Refresh,
    Quit,
}

fn classify(line: &str) -> SessionInput<'_> {
    match line.trim() {
        ":quit" | ":q" => SessionInput::Quit,
        ":refresh" => SessionInput::Refresh,
        _ => SessionInput::Query(line),
    }
}

/// Run a session until the prompt is exhausted or the user quits.
///
/// Fails only if the initial load fails; a failed `:refresh` is reported and
/// the session keeps serving the index it already had.
pub async fn run_session<W: Write>(
    loader: &DataLoader,
    prompt: &mut dyn QueryPrompt,
    out: &mut W,
    format: OutputFormat,
    verbose: bool,
) -> Result<(), SessionError> {
    let mut index: Arc<DocIndex> = match loader.load().await {
        Ok(index) => index,
        Err(err) => {
            write_load_error(out, &err, verbose, format)?;
            return Err(SessionError::Load(err));
        }
    };

    if format == OutputFormat::Human {
        writeln!(
            out,
            "{}",
            format!("Loaded {} components. Type to search, :quit to exit.", index.len()).dimmed()
        )?;
    }

    while let Some(line) = prompt.next_query()? {
        match classify(&line) {
            SessionInput::Quit => break,
            SessionInput::Refresh => match loader.refresh().await {
                Ok(fresh) => {
                    debug!(entries = fresh.len(), "session index refreshed");
                    index = fresh;
                    if format == OutputFormat::Human {
                        writeln!(out, "Reloaded {} components.", index.len())?;
                    }
                }
                Err(err) => write_load_error(out, &err, verbose, format)?,
            },
            SessionInput::Query(query) => {
                write_results(out, &filter(&index, query), format)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

/// Errors that end an interactive session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
