//! Terminal and JSON rendering of search results and load failures.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

use crate::loader::{LoadError, LoadErrorKind};
use crate::model::DocLink;
use crate::search::SearchResults;

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown links with a colored summary line.
    #[default]
    Human,
    /// One JSON document per render, for scripts.
    Json,
}

pub const NO_MATCHES_MESSAGE: &str = "No components found matching your search criteria. \
     Try using a different search term or clearing the search box.";

#[derive(Serialize)]
struct ResultsDoc<'a> {
    query: &'a str,
    filtered: bool,
    count: usize,
    results: Vec<DocLink>,
}

#[derive(Serialize)]
struct ErrorDoc<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'static str,
    message: &'a str,
    detail: String,
}

fn kind_label(kind: LoadErrorKind) -> &'static str {
    match kind {
        LoadErrorKind::Fetch => "fetch",
        LoadErrorKind::Parse => "parse",
        LoadErrorKind::Schema => "schema",
        LoadErrorKind::InvalidRecord => "invalid_record",
    }
}

/// Write the outcome of one filter pass.
pub fn write_results<W: Write>(
    out: &mut W,
    results: &SearchResults<'_>,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = ResultsDoc {
                query: results.query(),
                filtered: results.is_filtered(),
                count: results.len(),
                results: results.links(),
            };
            serde_json::to_writer(&mut *out, &doc)?;
            writeln!(out)
        }
        OutputFormat::Human => {
            if results.is_filtered() {
                writeln!(
                    out,
                    "Found {} components matching '{}'",
                    results.len().to_string().bold(),
                    results.query().italic()
                )?;
            }
            for link in results.links() {
                writeln!(out, "{}", link.to_markdown())?;
            }
            if results.is_empty() {
                writeln!(out, "{}", NO_MATCHES_MESSAGE.yellow())?;
            }
            Ok(())
        }
    }
}

/// Write a load failure. `verbose` adds the diagnostic detail in human mode.
pub fn write_load_error<W: Write>(
    out: &mut W,
    err: &LoadError,
    verbose: bool,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = ErrorDoc {
                error: ErrorBody {
                    kind: kind_label(err.kind()),
                    message: err.user_message(),
                    detail: err.to_string(),
                },
            };
            serde_json::to_writer(&mut *out, &doc)?;
            writeln!(out)
        }
        OutputFormat::Human => {
            writeln!(out, "{}", err.user_message().red())?;
            if verbose || err.kind() == LoadErrorKind::Schema {
                writeln!(out, "  {}", err.to_string().dimmed())?;
            }
            Ok(())
        }
    }
}
