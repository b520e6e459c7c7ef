//! Core library for textcap.
//!
//! Keeps a document inside a character or word budget while it is edited,
//! and reports how much of the budget is left.
//!
//! # Modules
//!
//! - [`count`] - Character and word counting
//! - [`enforce`] - Revert-on-keystroke and trim-on-paste enforcement
//! - [`feedback`] - Budget tiers and the status indicator
//! - [`session`] - Per-document sessions, profiles, and mode toggling
//! - [`host`] - Traits the hosting editor implements
//! - [`buffer`] - In-memory reference editor
//! - [`scope`] - Glob matching for which documents are limited
//! - [`stats`] - Count reports for export
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use textcap_core::{LimitConfig, LimitSession, RecordingStatus, TextBuffer};
//!
//! let limits = LimitConfig {
//!     max_chars: 10,
//!     ..LimitConfig::default()
//! };
//! let always = |_: &str| true;
//! let mut session = LimitSession::start(
//!     "draft.txt",
//!     &limits,
//!     &always,
//!     TextBuffer::with_text("hello"),
//!     RecordingStatus::default(),
//! );
//!
//! session.on_bulk_insert(|buf| buf.insert_str(", world!"));
//! assert_eq!(session.editor().text(), "hello, wor");
//! ```
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod count;
pub mod enforce;
pub mod error;
pub mod feedback;
pub mod host;
pub mod scope;
pub mod session;
pub mod stats;

pub use buffer::TextBuffer;
pub use config::{Config, ConfigLoader, ConfigSources, LimitConfig, LogLevel};
pub use count::{LimitType, count};
pub use enforce::Enforcement;
pub use error::{ConfigError, ConfigResult, LimitError, LimitResult};
pub use feedback::{FeedbackController, FeedbackTier, Indicator};
pub use host::{EditSurface, RecordingStatus, ScopeMatcher, StatusSurface};
pub use scope::GlobScope;
pub use session::LimitSession;
pub use stats::{CountReport, count_report};
