//! Limit enforcement for the two shapes of input.
//!
//! Typed input arrives one character at a time and is checked after the
//! fact: a keystroke that pushes the document over budget is deleted again.
//! Bulk input (paste, yank) is measured around the insertion and the tail of
//! whatever overflowed is trimmed, keeping as much of it as fits.
//!
//! Both paths recount the live document instead of trusting a running
//! total, since hosts have other ways of changing content.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LimitConfig;
use crate::count::{self, LimitType};
use crate::host::EditSurface;

/// What enforcement did with an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Enforcement {
    /// The document is not subject to the limit; nothing was checked.
    PassThrough,
    /// The document fits its budget.
    WithinLimit {
        /// Size after the edit.
        count: usize,
    },
    /// A typed character was removed again.
    Reverted {
        /// Size after the revert.
        count: usize,
        /// Active maximum.
        max: usize,
        /// Active mode.
        mode: LimitType,
    },
    /// The tail of a bulk insertion was cut.
    Trimmed {
        /// Units the insertion added before trimming.
        inserted: usize,
        /// Units of the insertion that survived.
        kept: usize,
        /// Units removed by the trim.
        removed: usize,
        /// Size after trimming.
        count: usize,
        /// Active maximum.
        max: usize,
        /// Active mode.
        mode: LimitType,
    },
}

impl Enforcement {
    /// Whether enforcement changed the document.
    pub const fn modified(&self) -> bool {
        matches!(self, Self::Reverted { .. } | Self::Trimmed { .. })
    }

    /// The transient message a host should show, if any.
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::PassThrough | Self::WithinLimit { .. } => None,
            Self::Reverted { max, mode, .. } => {
                Some(format!("Limit reached: {max} {}", mode.unit_label()))
            }
            Self::Trimmed {
                inserted,
                kept,
                max,
                mode,
                ..
            } => Some(format!(
                "Insertion trimmed to fit: kept {kept} of {inserted} {} (limit {max})",
                mode.unit_label()
            )),
        }
    }
}

/// Whether `count` breaks a limit of `max`. A zero limit is always broken.
pub const fn exceeds(count: usize, max: usize) -> bool {
    max == 0 || count > max
}

/// Count the live document in `mode`, using the host's length when it has one.
pub fn live_count<E: EditSurface + ?Sized>(editor: &E, mode: LimitType) -> usize {
    match (mode, editor.live_char_count()) {
        (LimitType::Characters, Some(len)) => len,
        _ => count::count(&editor.full_content(), mode),
    }
}

/// Check the document after a single typed character.
///
/// Over budget means the character just typed goes away again, in its own
/// undo group.
#[tracing::instrument(level = "debug", skip_all, fields(mode = %config.limit_type))]
pub fn enforce_incremental<E: EditSurface + ?Sized>(
    editor: &mut E,
    config: &LimitConfig,
) -> Enforcement {
    let mode = config.limit_type;
    let max = config.active_max();
    let current = live_count(editor, mode);

    if !exceeds(current, max) {
        return Enforcement::WithinLimit { count: current };
    }

    editor.mark_undo_boundary();
    let removed = editor.delete_before_cursor(1);
    let count = live_count(editor, mode);
    info!(before = current, after = count, max, removed, "reverted keystroke over limit");

    Enforcement::Reverted { count, max, mode }
}

/// Run a bulk insertion and trim whatever does not fit.
///
/// `perform` inserts at the cursor and leaves the cursor after the inserted
/// text. Any excess is deleted backwards from the cursor, in whole units of
/// the active mode, until the document fits or the cursor reaches the start
/// of the document. A paste that ends inside a word merges with the text
/// after the cursor, so word mode may need more than one pass.
#[tracing::instrument(level = "debug", skip_all, fields(mode = %config.limit_type))]
pub fn enforce_bulk<E, F>(editor: &mut E, config: &LimitConfig, perform: F) -> Enforcement
where
    E: EditSurface + ?Sized,
    F: FnOnce(&mut E),
{
    let mode = config.limit_type;
    let max = config.active_max();
    let before = live_count(editor, mode);

    perform(&mut *editor);

    let after = live_count(editor, mode);
    let inserted = after.saturating_sub(before);
    debug!(before, after, max, "bulk insertion measured");

    let excess = after.saturating_sub(max);
    if !exceeds(after, max) || excess == 0 {
        return Enforcement::WithinLimit { count: after };
    }

    editor.mark_undo_boundary();
    let mut current = after;
    let mut removed = 0;
    let mut deleted = 0;
    while exceeds(current, max) {
        let cursor = editor.cursor_position();
        let excess = current.saturating_sub(max).max(1);
        let span = match mode {
            LimitType::Characters => excess,
            LimitType::Words => count::word_span_before(&editor.full_content(), cursor, excess),
        };
        let cut = chars_before(&editor.full_content(), cursor, span);
        let n = editor.delete_before_cursor(span);
        if n == 0 {
            break;
        }
        deleted += n;
        removed += count::count(&cut, mode);
        current = live_count(editor, mode);
    }
    let kept = inserted.saturating_sub(removed);
    info!(inserted, kept, removed, deleted, count = current, max, "trimmed bulk insertion");

    Enforcement::Trimmed {
        inserted,
        kept,
        removed,
        count: current,
        max,
        mode,
    }
}

/// The `span` characters ending at character offset `cursor`.
fn chars_before(content: &str, cursor: usize, span: usize) -> String {
    let start = cursor.saturating_sub(span);
    content.chars().skip(start).take(cursor - start).collect()
}
