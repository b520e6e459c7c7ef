//! In-memory text buffer implementing [`EditSurface`].
//!
//! A small reference host: a `String` with a character cursor and an undo
//! log split into groups by boundaries. The CLI drives sessions through it,
//! and so do the tests.

use std::borrow::Cow;

use crate::host::EditSurface;

/// A recorded change, enough to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UndoEntry {
    Boundary,
    Inserted { at: usize, text: String },
    Deleted { at: usize, text: String },
}

/// String-backed document with a cursor and grouped undo history.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    /// Cursor as a character offset.
    cursor: usize,
    /// Cached character length.
    chars: usize,
    undo_log: Vec<UndoEntry>,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the cursor at the end.
    ///
    /// The initial text is not part of the undo history.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self {
            text,
            cursor: chars,
            chars,
            undo_log: Vec::new(),
        }
    }

    /// Document content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document length in characters.
    pub const fn len_chars(&self) -> usize {
        self.chars
    }

    /// Whether the document is empty.
    pub const fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Cursor as a character offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the document.
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.chars);
    }

    /// Insert one character at the cursor and advance past it.
    pub fn insert_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut tmp));
    }

    /// Insert `text` at the cursor and advance past it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = self.cursor;
        self.raw_insert(at, text);
        self.undo_log.push(UndoEntry::Inserted {
            at,
            text: text.to_string(),
        });
    }

    /// Delete up to `n` characters after the cursor. Returns how many went.
    pub fn delete_forward(&mut self, n: usize) -> usize {
        let at = self.cursor;
        let n = n.min(self.chars - at);
        if n == 0 {
            return 0;
        }
        let removed = self.raw_delete(at, n);
        self.undo_log.push(UndoEntry::Deleted { at, text: removed });
        n
    }

    /// Close the current undo group.
    pub fn undo_boundary(&mut self) {
        if !matches!(self.undo_log.last(), None | Some(UndoEntry::Boundary)) {
            self.undo_log.push(UndoEntry::Boundary);
        }
    }

    /// Revert the most recent undo group. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        while matches!(self.undo_log.last(), Some(UndoEntry::Boundary)) {
            self.undo_log.pop();
        }

        let mut undone = false;
        while let Some(entry) = self.undo_log.pop() {
            match entry {
                UndoEntry::Boundary => break,
                UndoEntry::Inserted { at, text } => {
                    self.raw_delete(at, text.chars().count());
                    self.cursor = at;
                }
                UndoEntry::Deleted { at, text } => {
                    self.raw_insert(at, &text);
                }
            }
            undone = true;
        }
        undone
    }

    /// Number of undo groups currently recorded.
    pub fn undo_groups(&self) -> usize {
        self.undo_log
            .split(|entry| matches!(entry, UndoEntry::Boundary))
            .filter(|group| !group.is_empty())
            .count()
    }

    /// Cancel a deletion of `n` characters ending at `end` against the most
    /// recent insertion, if that insertion ended at `end`.
    ///
    /// Deleted text that was just inserted leaves no trace in the undo log,
    /// so undo never brings back content that was taken out again. Returns
    /// how many of the `n` characters were absorbed.
    fn absorb_into_last_insert(&mut self, end: usize, n: usize) -> usize {
        let Some(idx) = self
            .undo_log
            .iter()
            .rposition(|entry| !matches!(entry, UndoEntry::Boundary))
        else {
            return 0;
        };
        let UndoEntry::Inserted { at, text } = &mut self.undo_log[idx] else {
            return 0;
        };
        let len = text.chars().count();
        if *at + len != end {
            return 0;
        }
        let absorbed = n.min(len);
        if absorbed == len {
            self.undo_log.remove(idx);
        } else {
            *text = text.chars().take(len - absorbed).collect();
        }
        absorbed
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(idx, _)| idx)
    }

    /// Insert without touching the undo log; leaves the cursor after `text`.
    fn raw_insert(&mut self, at: usize, text: &str) {
        let byte = self.byte_offset(at);
        self.text.insert_str(byte, text);
        let inserted = text.chars().count();
        self.chars += inserted;
        self.cursor = at + inserted;
    }

    /// Delete `n` characters starting at `at` without touching the undo log.
    fn raw_delete(&mut self, at: usize, n: usize) -> String {
        let start = self.byte_offset(at);
        let end = self.byte_offset(at + n);
        let removed: String = self.text.drain(start..end).collect();
        self.chars -= n;
        if self.cursor > at + n {
            self.cursor -= n;
        } else if self.cursor > at {
            self.cursor = at;
        }
        removed
    }
}

impl EditSurface for TextBuffer {
    fn full_content(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn cursor_position(&self) -> usize {
        self.cursor
    }

    fn live_char_count(&self) -> Option<usize> {
        Some(self.chars)
    }

    fn delete_before_cursor(&mut self, n: usize) -> usize {
        let n = n.min(self.cursor);
        if n == 0 {
            return 0;
        }
        let end = self.cursor;
        let at = end - n;
        let removed = self.raw_delete(at, n);
        let absorbed = self.absorb_into_last_insert(end, n);
        if absorbed < n {
            let text: String = removed.chars().take(n - absorbed).collect();
            self.undo_log.push(UndoEntry::Deleted { at, text });
        }
        n
    }

    fn mark_undo_boundary(&mut self) {
        self.undo_boundary();
    }
}
