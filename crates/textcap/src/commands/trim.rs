//! Trim command: replay a file as one paste and keep what fits.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use textcap_core::{Enforcement, LimitConfig, TextBuffer};
use tracing::{debug, info, instrument};

use super::{LimitArgs, open_session, read_input_file};
use crate::status::TerminalStatus;

/// Arguments for the `trim` subcommand.
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// File to trim.
    pub file: Utf8PathBuf,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Write the trimmed text back to the file instead of stdout
    #[arg(short = 'w', long)]
    pub write: bool,
}

#[derive(Serialize)]
struct TrimOutput<'a> {
    file: &'a Utf8PathBuf,
    #[serde(flatten)]
    outcome: &'a Enforcement,
    text: &'a str,
}

/// Insert the file's content into an empty buffer under the bulk policy.
#[instrument(name = "cmd_trim", skip_all, fields(file = %args.file, write = args.write))]
pub fn cmd_trim(
    args: TrimArgs,
    global_json: bool,
    quiet: bool,
    defaults: &LimitConfig,
) -> anyhow::Result<()> {
    debug!(limits = ?args.limits, "executing trim command");

    let content = read_input_file(&args.file)?;
    let mut session = open_session(
        &args.file,
        defaults,
        &args.limits,
        TextBuffer::new(),
        TerminalStatus::new(quiet || global_json),
    )?;
    let outcome = session.on_bulk_insert(|buffer| buffer.insert_str(&content));
    session.on_content_changed();
    let (buffer, status) = session.into_parts();

    if args.write {
        if outcome.modified() {
            std::fs::write(args.file.as_std_path(), buffer.text())
                .with_context(|| format!("failed to write {}", args.file))?;
            info!(file = %args.file, "trimmed file written");
        } else {
            debug!(file = %args.file, "file fits, left untouched");
        }
    }

    if global_json {
        let output = TrimOutput {
            file: &args.file,
            outcome: &outcome,
            text: buffer.text(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !args.write {
        print!("{}", buffer.text());
    }
    status.print_indicator();

    Ok(())
}
