// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery of notifications produced by transitions.
//!
//! Mail delivery is not part of this service. The default notifier records
//! each notification as a structured log event.

use std::sync::{Arc, Mutex, PoisonError};

use confreview::Notification;
use tracing::info;

/// Receives notifications after their transition has been persisted.
pub trait Notifier {
    fn deliver(&self, notification: &Notification);
}

/// Emits each notification as an `info!` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, notification: &Notification) {
        match notification {
            Notification::Assignment {
                conference,
                role,
                user,
                contributions,
                removed,
            } => info!(
                %conference,
                %role,
                %user,
                contributions = contributions.len(),
                removed,
                "Assignment notification"
            ),
            Notification::Team {
                conference,
                role,
                user,
                added,
            } => info!(
                %conference,
                role = role.as_str(),
                %user,
                added,
                "Team notification"
            ),
            Notification::Judgement {
                conference,
                contribution,
                role,
                author,
                withdrawn,
                notify_authors,
            } => info!(
                %conference,
                %contribution,
                %role,
                %author,
                withdrawn,
                notify_authors,
                "Judgement notification"
            ),
        }
    }
}

/// Keeps every delivered notification in memory.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications delivered so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn deliver(&self, notification: &Notification) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
