//! In-process diagnostic log.
//!
//! A process-wide, bounded ring buffer holding the most recent diagnostic
//! entries. Writers never block on IO and never panic; every entry is also
//! forwarded to [`tracing`] so the regular subscriber stack (and Sentry, if
//! configured) sees it too. The buffer exists so that recent failures can be
//! inspected from within the process after the fact.

use std::{
    collections::VecDeque,
    sync::{LazyLock, Mutex, PoisonError},
};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of entries retained before the oldest are evicted.
pub const DIAG_CAPACITY: usize = 50;

static DIAG: LazyLock<DiagLog> = LazyLock::new(|| DiagLog::with_capacity(DIAG_CAPACITY));

/// Returns the process-wide diagnostic log.
pub fn diag() -> &'static DiagLog {
    &DIAG
}

#[derive(Debug)]
pub struct DiagLog {
    entries: Mutex<VecDeque<DiagEntry>>,
    capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagEntry {
    pub level: DiagLevel,
    pub message: String,
    pub context: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagLevel {
    Error,
    Warning,
    Info,
}

impl DiagLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Records a failure together with the component it originated from.
    pub fn error(&self, message: impl Into<String>, context: &'static str) {
        let message = message.into();
        tracing::error!(context, "{message}");
        self.push(DiagLevel::Error, message, context);
    }

    pub fn warn(&self, message: impl Into<String>, context: &'static str) {
        let message = message.into();
        tracing::warn!(context, "{message}");
        self.push(DiagLevel::Warning, message, context);
    }

    pub fn info(&self, message: impl Into<String>, context: &'static str) {
        let message = message.into();
        tracing::info!(context, "{message}");
        self.push(DiagLevel::Info, message, context);
    }

    /// Returns the retained entries, oldest first.
    pub fn snapshot(&self) -> Vec<DiagEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, level: DiagLevel, message: String, context: &'static str) {
        let entry = DiagEntry {
            level,
            message,
            context,
            timestamp: Utc::now(),
        };
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<DiagEntry>> {
        // A poisoned buffer is still a usable buffer.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
