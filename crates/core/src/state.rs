// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::notification::Notification;
use confreview_audit::{AuditEvent, StateSnapshot};
use confreview_domain::Conference;

/// The complete state of one conference.
///
/// State is scoped to a single conference; every transition replaces it as
/// a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub conference: Conference,
}

impl State {
    #[must_use]
    pub const fn new(conference: Conference) -> Self {
        Self { conference }
    }

    /// Converts the state to a summary snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let conference: &Conference = &self.conference;
        let review = &conference.review;
        let mut referees: usize = 0;
        let mut editors: usize = 0;
        let mut reviewers: usize = 0;
        let mut submitted: usize = 0;
        for contribution in conference.contributions.values() {
            let manager = &contribution.review_manager;
            referees += usize::from(manager.has_referee());
            editors += usize::from(manager.has_editor());
            reviewers += manager.reviewers().len();
            if let Some(last) = manager.last_review() {
                submitted += usize::from(last.referee_judgement.is_submitted());
                submitted += usize::from(last.editor_judgement.is_submitted());
                submitted += last
                    .reviewer_judgements
                    .values()
                    .filter(|j| j.is_submitted())
                    .count();
            }
        }
        StateSnapshot::new(format!(
            "conference={},mode={},team={}/{}/{}/{},assigned={referees}/{editors}/{reviewers},submitted={submitted},folders={}",
            conference.id,
            review.mode.choice(),
            review.paper_review_managers.len(),
            review.referees.len(),
            review.editors.len(),
            review.reviewers.len(),
            conference.folders.len(),
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Notifications to deliver once the transition is persisted.
    pub notifications: Vec<Notification>,
}
