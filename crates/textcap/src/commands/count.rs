//! Count command: measure a file against its limit.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use schemars::JsonSchema;
use serde::Serialize;
use textcap_core::{CountReport, LimitConfig, RecordingStatus, TextBuffer, count_report};
use tracing::{debug, instrument};

use super::{LimitArgs, open_session, read_input_file};
use crate::status::paint;

/// Arguments for the `count` subcommand.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// File to measure.
    pub file: Utf8PathBuf,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// One `count --json` result.
#[derive(Serialize, JsonSchema)]
pub struct CountOutput {
    /// File as given on the command line.
    #[schemars(with = "String")]
    pub file: Utf8PathBuf,
    /// Whether the file matches `file_pattern`.
    pub in_scope: bool,
    /// Counts measured against the active limit.
    #[serde(flatten)]
    pub report: CountReport,
}

/// JSON Schema for [`CountOutput`].
pub fn output_schema() -> serde_json::Value {
    schemars::schema_for!(CountOutput).to_value()
}

/// Count a file and fail when an in-scope file is over its limit.
#[instrument(name = "cmd_count", skip_all, fields(file = %args.file))]
pub fn cmd_count(args: CountArgs, global_json: bool, defaults: &LimitConfig) -> anyhow::Result<()> {
    debug!(limits = ?args.limits, "executing count command");

    let content = read_input_file(&args.file)?;
    let session = open_session(
        &args.file,
        defaults,
        &args.limits,
        TextBuffer::new(),
        RecordingStatus::default(),
    )?;
    let output = CountOutput {
        in_scope: session.is_in_scope(),
        report: count_report(&content, session.config()),
        file: args.file,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let report = &output.report;
    if !output.in_scope {
        println!(
            "{} {} {}",
            output.file,
            report.characters,
            "(not limited)".dimmed()
        );
    } else if report.over_limit {
        bail!(
            "{} is {} {} (limit: {}). Trim it.",
            output.file,
            report.active_count().red(),
            report.limit_type.unit_label(),
            report.max,
        );
    } else {
        println!(
            "{} {} {}",
            "PASS:".green(),
            output.file,
            paint(&report.trailer(), report.tier),
        );
    }

    Ok(())
}
