//! Command-line surface
//!
//! Every subcommand reads one source record from a file or stdin and writes
//! the result to stdout. Validation failures go to stderr and make the
//! command report failure.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cite_core::{
    combined_citation, format_in_text, format_reference, parse_record, parse_validated,
    CitationStyle, SourceRecord,
};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(
    name = "cite",
    version,
    about = "Format source details as APA, MLA, Chicago, Harvard, IEEE or Vancouver citations"
)]
pub struct Cli {
    /// Config file (default: <config dir>/cite/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the interactive citation form (default)
    Tui,

    /// Print the full reference
    Reference {
        /// Style id (apa, mla, chicago, harvard, ieee, vancouver)
        #[arg(short, long)]
        style: Option<String>,

        /// Append the in-text citation after a blank line
        #[arg(long)]
        in_text: bool,

        /// JSON source record; stdin when absent or "-"
        input: Option<PathBuf>,
    },

    /// Print the in-text citation
    InText {
        #[arg(short, long)]
        style: Option<String>,

        input: Option<PathBuf>,
    },

    /// Check a source record and print "valid" or the first problem
    Validate { input: Option<PathBuf> },

    /// Print the source record with defaults filled in, as JSON
    Parse { input: Option<PathBuf> },

    /// List the supported styles
    Styles,
}

fn read_source(input: Option<&PathBuf>, stdin: &mut dyn Read) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(fs::read_to_string(path)?),
        _ => {
            let mut raw = String::new();
            stdin.read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Run a non-interactive command. Returns `Ok(false)` when the input was
/// rejected.
pub fn run_command(
    command: &Command,
    config: &Config,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<bool> {
    let style_or_default = |style: &Option<String>| {
        style
            .clone()
            .unwrap_or_else(|| config.default_style.clone())
    };

    match command {
        Command::Tui => Ok(true),
        Command::Reference {
            style,
            in_text,
            input,
        } => {
            let raw = read_source(input.as_ref(), stdin)?;
            let Some(record) = validated(&raw, err)? else {
                return Ok(false);
            };
            let style = style_or_default(style);
            let reference = format_reference(&record, &style);
            if *in_text {
                let marker = format_in_text(&record, &style);
                writeln!(out, "{}", combined_citation(&reference, &marker))?;
            } else {
                writeln!(out, "{reference}")?;
            }
            Ok(true)
        }
        Command::InText { style, input } => {
            let raw = read_source(input.as_ref(), stdin)?;
            let Some(record) = validated(&raw, err)? else {
                return Ok(false);
            };
            writeln!(out, "{}", format_in_text(&record, &style_or_default(style)))?;
            Ok(true)
        }
        Command::Validate { input } => {
            let raw = read_source(input.as_ref(), stdin)?;
            let ok = validated(&raw, err)?.is_some();
            if ok {
                writeln!(out, "valid")?;
            }
            Ok(ok)
        }
        Command::Parse { input } => {
            let raw = read_source(input.as_ref(), stdin)?;
            match parse_record(&raw) {
                Ok(record) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
                    Ok(true)
                }
                Err(e) => {
                    writeln!(err, "{e}")?;
                    Ok(false)
                }
            }
        }
        Command::Styles => {
            for style in CitationStyle::ALL {
                writeln!(out, "{}\t{}", style.id(), style.display_name())?;
            }
            Ok(true)
        }
    }
}

fn validated(raw: &str, err: &mut dyn Write) -> Result<Option<SourceRecord>> {
    match parse_validated(raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            debug!(error = %e, "source rejected");
            writeln!(err, "{}", e.user_message())?;
            Ok(None)
        }
    }
}
