//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use clap::Args;
use textcap_core::{GlobScope, LimitConfig, LimitSession, LimitType, StatusSurface, TextBuffer};

pub mod count;
pub mod info;
pub mod profiles;
pub mod schema;
pub mod trim;

/// Per-invocation limit overrides shared by `count` and `trim`.
#[derive(Args, Debug, Default, Clone)]
pub struct LimitArgs {
    /// Count characters or words (overrides config)
    #[arg(long, value_enum)]
    pub mode: Option<LimitType>,

    /// Apply a named profile's character limit
    #[arg(long)]
    pub profile: Option<String>,

    /// Maximum for the active mode (applied after --profile)
    #[arg(long)]
    pub max: Option<usize>,
}

/// Read a file into memory.
pub fn read_input_file(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Start a session for `file` and apply the command-line overrides to it.
///
/// Overrides go through the same commands an editor would use: toggle the
/// mode, select the profile, then set an explicit maximum.
pub fn open_session<S: StatusSurface>(
    file: &Utf8Path,
    defaults: &LimitConfig,
    args: &LimitArgs,
    buffer: TextBuffer,
    status: S,
) -> anyhow::Result<LimitSession<TextBuffer, S>> {
    let scope = GlobScope::from_config(defaults)?;
    let mut session = LimitSession::start(file.as_str(), defaults, &scope, buffer, status);

    if let Some(mode) = args.mode
        && mode != session.config().limit_type
    {
        session.toggle_limit_type();
    }
    if let Some(ref name) = args.profile {
        session.select_profile(name)?;
    }
    if let Some(max) = args.max {
        session.set_max(max);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textcap_core::RecordingStatus;

    #[test]
    fn overrides_apply_in_order() {
        let args = LimitArgs {
            mode: Some(LimitType::Words),
            profile: Some("micro".to_string()),
            max: Some(12),
        };
        let session = open_session(
            Utf8Path::new("post.md"),
            &LimitConfig::default(),
            &args,
            TextBuffer::new(),
            RecordingStatus::default(),
        )
        .unwrap();

        assert_eq!(session.config().limit_type, LimitType::Words);
        assert_eq!(session.config().max_chars, 500);
        assert_eq!(session.config().max_words, 12);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let args = LimitArgs {
            profile: Some("epic".to_string()),
            ..LimitArgs::default()
        };
        let err = open_session(
            Utf8Path::new("post.md"),
            &LimitConfig::default(),
            &args,
            TextBuffer::new(),
            RecordingStatus::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown profile: epic"));
    }

    #[test]
    fn read_missing_file_names_it() {
        let err = read_input_file(Utf8Path::new("/nonexistent/draft.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/draft.txt"));
    }
}
