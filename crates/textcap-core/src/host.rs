//! Seams between the limit engine and the editor hosting the document.
//!
//! The engine never owns document storage. A host hands it an
//! [`EditSurface`] for reading content and applying corrective deletions, a
//! [`StatusSurface`] for the budget indicator, and a [`ScopeMatcher`] that
//! decides whether a document is subject to the limit at all.

use std::borrow::Cow;

use crate::feedback::FeedbackTier;

/// Read access to a live document plus the two mutations enforcement needs.
///
/// Cursor positions are character offsets from the start of the document.
pub trait EditSurface {
    /// Full document content.
    fn full_content(&self) -> Cow<'_, str>;

    /// Current insertion point as a character offset.
    fn cursor_position(&self) -> usize;

    /// Character length if the host tracks it without scanning.
    fn live_char_count(&self) -> Option<usize> {
        None
    }

    /// Delete up to `n` characters immediately before the cursor.
    ///
    /// Implementations clamp at the start of the document and return the
    /// number of characters actually removed.
    fn delete_before_cursor(&mut self, n: usize) -> usize;

    /// Close the current undo group so the next change undoes separately.
    fn mark_undo_boundary(&mut self);
}

/// Where the budget indicator and transient notices are shown.
pub trait StatusSurface {
    /// Replace the indicator with `text`, styled for `tier`.
    fn set_indicator(&mut self, text: &str, tier: FeedbackTier);

    /// Show a short, non-modal message.
    fn notify(&mut self, message: &str);
}

/// Decides which documents the limit applies to.
pub trait ScopeMatcher {
    /// Whether `document` (a path or buffer name) is subject to enforcement.
    fn is_in_scope(&self, document: &str) -> bool;
}

impl<F> ScopeMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn is_in_scope(&self, document: &str) -> bool {
        self(document)
    }
}

impl<T: EditSurface + ?Sized> EditSurface for &mut T {
    fn full_content(&self) -> Cow<'_, str> {
        (**self).full_content()
    }

    fn cursor_position(&self) -> usize {
        (**self).cursor_position()
    }

    fn live_char_count(&self) -> Option<usize> {
        (**self).live_char_count()
    }

    fn delete_before_cursor(&mut self, n: usize) -> usize {
        (**self).delete_before_cursor(n)
    }

    fn mark_undo_boundary(&mut self) {
        (**self).mark_undo_boundary();
    }
}

impl<T: StatusSurface + ?Sized> StatusSurface for &mut T {
    fn set_indicator(&mut self, text: &str, tier: FeedbackTier) {
        (**self).set_indicator(text, tier);
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message);
    }
}

/// A status surface that remembers what it was given.
///
/// Handy for hosts that render on their own schedule and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingStatus {
    /// Most recent indicator text and tier.
    pub indicator: Option<(String, FeedbackTier)>,
    /// Number of times the indicator was set.
    pub redraws: usize,
    /// Every notice, oldest first.
    pub notices: Vec<String>,
}

impl StatusSurface for RecordingStatus {
    fn set_indicator(&mut self, text: &str, tier: FeedbackTier) {
        self.indicator = Some((text.to_string(), tier));
        self.redraws += 1;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
