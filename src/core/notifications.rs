//! Transient, dismissible error banners.
//!
//! A banner belongs to the tab that was active when it was raised and is shown
//! at the top of that tab's panel, newest first. It disappears when its time to
//! live elapses or when the user closes it, whichever comes first; the loser of
//! that race is a no-op.

use std::time::{Duration, Instant};

use super::tabs::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub tab: Tab,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    // Oldest first; rendering reverses.
    entries: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            ttl,
        }
    }

    pub fn show_error(
        &mut self,
        message: impl Into<String>,
        tab: Tab,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            message: message.into(),
            tab,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Remove a banner. Returns false when it is already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Close the newest banner shown on `tab`.
    pub fn dismiss_latest(&mut self, tab: Tab) -> Option<NotificationId> {
        let id = self
            .entries
            .iter()
            .rev()
            .find(|entry| entry.tab == tab)
            .map(|entry| entry.id)?;
        self.dismiss(id);
        Some(id)
    }

    /// Drop every banner whose deadline has passed. Returns how many went away.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.expires_at > now);
        before - self.entries.len()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Banners for `tab`, newest first.
    pub fn for_tab(&self, tab: Tab) -> impl Iterator<Item = &Notification> {
        self.entries.iter().rev().filter(move |entry| entry.tab == tab)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.expires_at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
