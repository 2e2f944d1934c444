// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confreview_domain::{ConferenceId, ContributionId, ReviewRole, TeamRole, UserId};

/// A message a transition asks to have delivered once it is persisted.
///
/// Assignment and team notifications are only produced when the matching
/// conference setting is enabled. Judgement notifications are always
/// produced; `notify_authors` carries the setting instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A user gained or lost a role on some contributions.
    Assignment {
        conference: ConferenceId,
        role: ReviewRole,
        user: UserId,
        contributions: Vec<ContributionId>,
        removed: bool,
    },
    /// A user joined or left a conference team.
    Team {
        conference: ConferenceId,
        role: TeamRole,
        user: UserId,
        added: bool,
    },
    /// A judgement was submitted or withdrawn.
    Judgement {
        conference: ConferenceId,
        contribution: ContributionId,
        role: ReviewRole,
        author: UserId,
        withdrawn: bool,
        notify_authors: bool,
    },
}

impl Notification {
    /// The user the notification is addressed to.
    #[must_use]
    pub const fn recipient(&self) -> &UserId {
        match self {
            Self::Assignment { user, .. } | Self::Team { user, .. } => user,
            Self::Judgement { author, .. } => author,
        }
    }
}
