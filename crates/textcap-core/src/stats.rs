//! Count reports for export and statistics.
//!
//! Built from the same counting rules the enforcer uses, so a report never
//! disagrees with what editing would allow.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::LimitConfig;
use crate::count::{self, LimitType};
use crate::enforce::exceeds;
use crate::feedback::{FeedbackTier, Indicator};

/// Size of a document measured against its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountReport {
    /// Character count.
    pub characters: usize,
    /// Word count.
    pub words: usize,
    /// Mode the limit is enforced in.
    pub limit_type: LimitType,
    /// Maximum for that mode.
    pub max: usize,
    /// `max` minus the active count; negative when over.
    pub remaining: i64,
    /// Integer percentage of the budget in use.
    pub percent: u64,
    /// Feedback tier.
    pub tier: FeedbackTier,
    /// Whether the document breaks its limit.
    pub over_limit: bool,
}

impl CountReport {
    /// Count in the active mode.
    pub const fn active_count(&self) -> usize {
        match self.limit_type {
            LimitType::Characters => self.characters,
            LimitType::Words => self.words,
        }
    }

    /// Short trailer for appending to exported text, e.g. `[245/280 characters]`.
    pub fn trailer(&self) -> String {
        format!(
            "[{}/{} {}]",
            self.active_count(),
            self.max,
            self.limit_type.unit_label()
        )
    }
}

/// Measure `content` against `config`.
#[tracing::instrument(skip_all, fields(text_len = content.len()))]
pub fn count_report(content: &str, config: &LimitConfig) -> CountReport {
    let characters = count::count(content, LimitType::Characters);
    let words = count::count(content, LimitType::Words);
    let active = match config.limit_type {
        LimitType::Characters => characters,
        LimitType::Words => words,
    };
    let indicator = Indicator::compute(active, config);

    CountReport {
        characters,
        words,
        limit_type: config.limit_type,
        max: indicator.max,
        remaining: indicator.remaining,
        percent: indicator.percent,
        tier: indicator.tier,
        over_limit: exceeds(active, indicator.max),
    }
}
