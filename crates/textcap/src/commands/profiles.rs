//! Profiles command: list named character limits.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use textcap_core::LimitConfig;
use tracing::{debug, instrument};

/// Arguments for the `profiles` subcommand.
#[derive(Args, Debug, Default)]
pub struct ProfilesArgs {}

#[derive(Serialize)]
struct ProfileEntry<'a> {
    name: &'a str,
    max_chars: usize,
}

/// Print each configured profile with its limit, sorted by name.
#[instrument(name = "cmd_profiles", skip_all)]
pub fn cmd_profiles(
    _args: ProfilesArgs,
    global_json: bool,
    config: &LimitConfig,
) -> anyhow::Result<()> {
    debug!(count = config.profiles.len(), "executing profiles command");

    let entries: Vec<ProfileEntry<'_>> = config
        .profiles
        .iter()
        .map(|(name, &max_chars)| ProfileEntry { name, max_chars })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "no profiles configured".yellow());
        return Ok(());
    }
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
        println!(
            "{:<width$}  {} {}",
            entry.name.bold(),
            entry.max_chars,
            "characters".dimmed()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_default_profiles() {
        assert!(cmd_profiles(ProfilesArgs::default(), false, &LimitConfig::default()).is_ok());
        assert!(cmd_profiles(ProfilesArgs::default(), true, &LimitConfig::default()).is_ok());
    }

    #[test]
    fn empty_profiles_are_fine() {
        let config = LimitConfig {
            profiles: Default::default(),
            ..LimitConfig::default()
        };
        assert!(cmd_profiles(ProfilesArgs::default(), false, &config).is_ok());
    }
}
