//! Terminal status surface.
//!
//! Notices print to stderr as they arrive. The indicator is held back and
//! printed once with [`TerminalStatus::print_indicator`], so a command that
//! re-renders several times only shows the final state.

use owo_colors::{OwoColorize, Stream, Style};
use textcap_core::{FeedbackTier, StatusSurface};

/// Status surface backed by stderr.
#[derive(Debug, Default)]
pub struct TerminalStatus {
    quiet: bool,
    indicator: Option<(String, FeedbackTier)>,
}

impl TerminalStatus {
    /// Create a surface; `quiet` suppresses notices and the indicator.
    pub const fn new(quiet: bool) -> Self {
        Self {
            quiet,
            indicator: None,
        }
    }

    /// Most recent indicator text and tier.
    pub fn indicator(&self) -> Option<(&str, FeedbackTier)> {
        self.indicator
            .as_ref()
            .map(|(text, tier)| (text.as_str(), *tier))
    }

    /// Print the most recent indicator to stderr.
    pub fn print_indicator(&self) {
        if self.quiet {
            return;
        }
        if let Some((text, tier)) = self.indicator() {
            eprintln!("{}", paint(text, tier));
        }
    }
}

impl StatusSurface for TerminalStatus {
    fn set_indicator(&mut self, text: &str, tier: FeedbackTier) {
        self.indicator = Some((text.to_string(), tier));
    }

    fn notify(&mut self, message: &str) {
        if !self.quiet {
            eprintln!(
                "{} {message}",
                "note:".if_supports_color(Stream::Stderr, |t| t.cyan())
            );
        }
    }
}

/// Style `text` for `tier`: red for critical, amber for warning.
pub fn paint(text: &str, tier: FeedbackTier) -> String {
    let style = tier_style(tier);
    text.if_supports_color(Stream::Stderr, |t| t.style(style))
        .to_string()
}

fn tier_style(tier: FeedbackTier) -> Style {
    match tier {
        FeedbackTier::Critical => Style::new().red().bold(),
        FeedbackTier::Warning => Style::new().yellow().bold(),
        FeedbackTier::Normal => Style::new(),
    }
}
