//! Schema command: print the JSON Schema of `count --json` reports.

use clap::Args;
use tracing::instrument;

/// Arguments for the `schema` subcommand.
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {}

/// Print the report schema as pretty JSON.
#[instrument(name = "cmd_schema", skip_all)]
pub fn cmd_schema(_args: SchemaArgs) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&super::count::output_schema())?
    );
    Ok(())
}
