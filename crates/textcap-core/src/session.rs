//! Per-document enforcement sessions.
//!
//! A [`LimitSession`] owns one document's copy of the limit settings, its
//! feedback state, and the host surfaces injected at start. Edit events
//! arrive as method calls; enforcement always finishes before the host's
//! change notification reaches [`LimitSession::on_content_changed`].

use tracing::{debug, info, instrument, warn};

use crate::config::LimitConfig;
use crate::count::LimitType;
use crate::enforce::{self, Enforcement};
use crate::error::{LimitError, LimitResult};
use crate::feedback::{FeedbackController, Indicator};
use crate::host::{EditSurface, ScopeMatcher, StatusSurface};

/// Enforcement and feedback for a single open document.
#[derive(Debug)]
pub struct LimitSession<E, S> {
    document: String,
    in_scope: bool,
    config: LimitConfig,
    feedback: FeedbackController,
    editor: E,
    status: S,
}

impl<E: EditSurface, S: StatusSurface> LimitSession<E, S> {
    /// Start a session for `document`, copying `defaults`.
    ///
    /// The scope decision is made once, here. In-scope documents get their
    /// first indicator immediately.
    #[instrument(skip_all, fields(document = %document.as_ref()))]
    pub fn start(
        document: impl AsRef<str>,
        defaults: &LimitConfig,
        scope: &dyn ScopeMatcher,
        editor: E,
        status: S,
    ) -> Self {
        let document = document.as_ref().to_string();
        let in_scope = scope.is_in_scope(&document);
        let mut session = Self {
            document,
            in_scope,
            config: defaults.clone(),
            feedback: FeedbackController::new(),
            editor,
            status,
        };
        debug!(in_scope, max = session.config.active_max(), "session started");
        session.render();
        session
    }

    /// Name or path of the document.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Whether the limit applies to this document.
    pub const fn is_in_scope(&self) -> bool {
        self.in_scope
    }

    /// This document's limit settings.
    pub const fn config(&self) -> &LimitConfig {
        &self.config
    }

    /// The host edit surface.
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access to the edit surface, for edits the session does not
    /// need to see.
    pub const fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// The host status surface.
    pub const fn status(&self) -> &S {
        &self.status
    }

    /// Current size of the document in the active mode.
    pub fn current_count(&self) -> usize {
        enforce::live_count(&self.editor, self.config.limit_type)
    }

    /// Handle a single typed character that the host has already inserted.
    pub fn on_incremental_insert(&mut self) -> Enforcement {
        if !self.in_scope {
            return Enforcement::PassThrough;
        }
        let outcome = enforce::enforce_incremental(&mut self.editor, &self.config);
        self.announce(&outcome);
        outcome
    }

    /// Run a bulk insertion through the trim-to-fit policy.
    ///
    /// Out-of-scope documents get the insertion untouched.
    pub fn on_bulk_insert<F: FnOnce(&mut E)>(&mut self, perform: F) -> Enforcement {
        if !self.in_scope {
            perform(&mut self.editor);
            return Enforcement::PassThrough;
        }
        let outcome = enforce::enforce_bulk(&mut self.editor, &self.config, perform);
        self.announce(&outcome);
        outcome
    }

    /// Recompute feedback after the host reports a content change.
    pub fn on_content_changed(&mut self) -> Option<Indicator> {
        self.render()
    }

    /// Redraw only when the count moved since the last render.
    ///
    /// For hosts that poll instead of notifying.
    pub fn poll_feedback(&mut self) -> Option<Indicator> {
        if !self.in_scope {
            return None;
        }
        let current = self.current_count();
        self.feedback.poll(current, &self.config, &mut self.status)
    }

    /// Switch this document to a named character-limit profile.
    ///
    /// Unknown names leave the settings untouched. Returns the new limit.
    #[instrument(skip(self), fields(document = %self.document))]
    pub fn select_profile(&mut self, name: &str) -> LimitResult<usize> {
        let Some(&limit) = self.config.profiles.get(name) else {
            warn!(profile = name, "unknown profile");
            let err = LimitError::UnknownProfile {
                name: name.to_string(),
                available: self.config.profile_names(),
            };
            self.status.notify(&err.to_string());
            return Err(err);
        };
        self.config.max_chars = limit;
        info!(profile = name, max_chars = limit, "profile selected");
        self.render();
        Ok(limit)
    }

    /// Flip between counting characters and counting words.
    ///
    /// Never trims; an over-budget document is handled on the next edit.
    #[instrument(skip(self), fields(document = %self.document))]
    pub fn toggle_limit_type(&mut self) -> LimitType {
        self.config.limit_type = self.config.limit_type.toggled();
        info!(limit_type = %self.config.limit_type, "limit type toggled");
        self.render();
        self.config.limit_type
    }

    /// Set the maximum for the active mode on this document only.
    pub fn set_max(&mut self, max: usize) {
        self.config.set_active_max(max);
        debug!(max, limit_type = %self.config.limit_type, "limit overridden");
        self.render();
    }

    /// Tear down the session and hand back the host surfaces.
    pub fn into_parts(self) -> (E, S) {
        (self.editor, self.status)
    }

    fn announce(&mut self, outcome: &Enforcement) {
        if let Some(message) = outcome.notice() {
            self.status.notify(&message);
        }
    }

    fn render(&mut self) -> Option<Indicator> {
        if !self.in_scope {
            return None;
        }
        let current = self.current_count();
        Some(self.feedback.refresh(current, &self.config, &mut self.status))
    }
}
