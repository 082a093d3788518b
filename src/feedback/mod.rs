//! Transient UI feedback: the deletion undo notice and the "copied" badge.
//!
//! Both are plain deadlines. Nothing runs in the background; callers pass
//! `now` and [`Feedback::tick`] drops whatever has expired. Neither ever
//! touches the field store or the archive.

use crate::fields::FieldKey;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionNotice {
    pub key: FieldKey,
    pub label: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Output,
    Field(FieldKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopiedIndicator {
    pub target: CopyTarget,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Feedback {
    deletion_ttl: Duration,
    copied_ttl: Duration,
    deletion: Option<DeletionNotice>,
    copied: Option<CopiedIndicator>,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_secs(2))
    }
}

impl Feedback {
    pub fn new(deletion_ttl: Duration, copied_ttl: Duration) -> Self {
        Self {
            deletion_ttl,
            copied_ttl,
            deletion: None,
            copied: None,
        }
    }

    /// Replaces any pending deletion notice.
    pub fn note_deleted(&mut self, key: FieldKey, label: impl Into<String>, now: Instant) {
        self.deletion = Some(DeletionNotice {
            key,
            label: label.into(),
            expires_at: now + self.deletion_ttl,
        });
    }

    /// Replaces any pending copied indicator.
    pub fn note_copied(&mut self, target: CopyTarget, now: Instant) {
        self.copied = Some(CopiedIndicator {
            target,
            expires_at: now + self.copied_ttl,
        });
    }

    pub fn tick(&mut self, now: Instant) {
        if self.deletion.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.deletion = None;
        }
        if self.copied.is_some_and(|c| now >= c.expires_at) {
            self.copied = None;
        }
    }

    pub fn deletion(&self) -> Option<&DeletionNotice> {
        self.deletion.as_ref()
    }

    pub fn copied(&self) -> Option<CopiedIndicator> {
        self.copied
    }

    /// Consumes the notice if it is still live at `now`.
    pub fn take_deletion(&mut self, now: Instant) -> Option<DeletionNotice> {
        self.tick(now);
        self.deletion.take()
    }

    pub fn dismiss_deletion(&mut self) {
        self.deletion = None;
    }
}
