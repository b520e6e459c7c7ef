//! Budget feedback: tier selection and the status indicator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::LimitConfig;
use crate::count::LimitType;
use crate::host::StatusSurface;

/// How close a document is to its limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    /// Below the warning threshold.
    #[default]
    Normal,
    /// At or above the warning threshold.
    Warning,
    /// At or above the critical threshold.
    Critical,
}

impl FeedbackTier {
    /// Returns the tier as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer percentage of `max` used by `current`. Zero when `max` is zero.
pub const fn percent_of(current: usize, max: usize) -> u64 {
    if max == 0 {
        0
    } else {
        (current as u64).saturating_mul(100) / max as u64
    }
}

/// Select the tier for a count. Critical is checked first.
pub const fn tier_for(current: usize, max: usize, warning_pct: u8, critical_pct: u8) -> FeedbackTier {
    let percent = percent_of(current, max);
    if percent >= critical_pct as u64 {
        FeedbackTier::Critical
    } else if percent >= warning_pct as u64 {
        FeedbackTier::Warning
    } else {
        FeedbackTier::Normal
    }
}

/// One rendering of the budget indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Indicator {
    /// Current size in `mode` units.
    pub current: usize,
    /// Maximum size for `mode`.
    pub max: usize,
    /// `max - current`; negative once over budget.
    pub remaining: i64,
    /// Integer percentage of the budget in use.
    pub percent: u64,
    /// Feedback tier.
    pub tier: FeedbackTier,
    /// Unit being counted.
    pub mode: LimitType,
}

impl Indicator {
    /// Compute the indicator for `current` against `config`'s active limit.
    pub fn compute(current: usize, config: &LimitConfig) -> Self {
        let max = config.active_max();
        Self {
            current,
            max,
            remaining: signed(max).saturating_sub(signed(current)),
            percent: percent_of(current, max),
            tier: tier_for(
                current,
                max,
                config.warning_threshold_pct,
                config.critical_threshold_pct,
            ),
            mode: config.limit_type,
        }
    }
}

fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} {}", self.current, self.max, self.mode.unit_label())
    }
}

/// Pushes indicator updates to a status surface.
///
/// Holds the last count it rendered so polling hosts can skip redraws.
#[derive(Debug, Clone, Default)]
pub struct FeedbackController {
    last_count: Option<usize>,
}

impl FeedbackController {
    /// Create a controller that has not rendered anything yet.
    pub const fn new() -> Self {
        Self { last_count: None }
    }

    /// The count from the most recent render.
    pub const fn last_count(&self) -> Option<usize> {
        self.last_count
    }

    /// Render unconditionally.
    #[tracing::instrument(level = "trace", skip(self, config, status))]
    pub fn refresh<S: StatusSurface + ?Sized>(
        &mut self,
        current: usize,
        config: &LimitConfig,
        status: &mut S,
    ) -> Indicator {
        let indicator = Indicator::compute(current, config);
        status.set_indicator(&indicator.to_string(), indicator.tier);
        self.last_count = Some(current);
        indicator
    }

    /// Render only if `current` differs from the last rendered count.
    pub fn poll<S: StatusSurface + ?Sized>(
        &mut self,
        current: usize,
        config: &LimitConfig,
        status: &mut S,
    ) -> Option<Indicator> {
        if self.last_count == Some(current) {
            return None;
        }
        Some(self.refresh(current, config, status))
    }

    /// Forget the cached count so the next poll redraws.
    pub const fn invalidate(&mut self) {
        self.last_count = None;
    }
}
