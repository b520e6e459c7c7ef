//! Info command: version and the effective limit settings.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use textcap_core::LimitConfig;
use textcap_core::config::{Config, ConfigSources};
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct Info<'a> {
    name: &'static str,
    version: &'static str,
    config: ConfigInfo<'a>,
}

#[derive(Serialize)]
struct ConfigInfo<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(flatten)]
    limits: &'a LimitConfig,
}

impl<'a> ConfigInfo<'a> {
    fn new(config: &'a Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            limits: &config.limits,
        }
    }

    /// Label/value rows for the text rendering.
    fn rows(&self) -> Vec<(&'static str, String)> {
        let limits = self.limits;
        let profiles = limits
            .profiles
            .iter()
            .map(|(name, max)| format!("{name}={max}"))
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            (
                "config",
                self.config_file
                    .clone()
                    .unwrap_or_else(|| "defaults".to_string()),
            ),
            ("mode", limits.limit_type.to_string()),
            ("max chars", limits.max_chars.to_string()),
            ("max words", limits.max_words.to_string()),
            (
                "tiers",
                format!(
                    "warning {}%, critical {}%",
                    limits.warning_threshold_pct, limits.critical_threshold_pct
                ),
            ),
            ("fill column", limits.fill_column.to_string()),
            ("files", limits.file_pattern.clone()),
            ("profiles", profiles),
        ]
    }
}

/// Print the version and the limits commands will apply.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = Info {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        config: ConfigInfo::new(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", info.name.bold(), info.version.green());
    println!("{}", "Limits".bold().underline());
    for (label, value) in info.config.rows() {
        println!("  {:<12} {value}", label.dimmed());
    }
    Ok(())
}
