// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confreview_domain::{
    ContributionId, JudgementSlot, LinkedObject, NotificationSetting, ProtectionMode, ReviewRole,
    ReviewingMode, TeamRole, UserId,
};
use time::PrimitiveDateTime;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Each one applies to
/// a single conference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Change the reviewing mode.
    SetReviewingMode { mode: ReviewingMode },
    /// Replace the verdicts judgements may use.
    SetStates { states: Vec<String> },
    /// Replace the content reviewing questions.
    SetReviewingQuestions { questions: Vec<String> },
    /// Replace the layout criteria.
    SetLayoutCriteria { criteria: Vec<String> },
    /// Delete a paper template.
    DeleteTemplate { template_id: String },
    /// Replace the competences of a user.
    SetCompetences {
        user: UserId,
        competences: Vec<String>,
    },
    /// Set the conference default due date for a role.
    SetDefaultDueDate {
        role: ReviewRole,
        due: PrimitiveDateTime,
    },
    /// Set the default due date for abstract reviewers.
    SetAbstractReviewerDefaultDueDate { due: PrimitiveDateTime },
    /// Enable or disable an automatic notification.
    SetNotification {
        setting: NotificationSetting,
        enabled: bool,
    },

    /// Make `user` the referee of every listed contribution.
    AssignReferee {
        contributions: Vec<ContributionId>,
        user: UserId,
    },
    /// Remove the referee from every listed contribution.
    RemoveReferee { contributions: Vec<ContributionId> },
    /// Make `user` the editor of every listed contribution.
    AssignEditor {
        contributions: Vec<ContributionId>,
        user: UserId,
    },
    /// Remove the editor from every listed contribution.
    RemoveEditor { contributions: Vec<ContributionId> },
    /// Add `user` as a reviewer of every listed contribution.
    AddReviewer {
        contributions: Vec<ContributionId>,
        user: UserId,
    },
    /// Remove `user` from the reviewers of every listed contribution.
    RemoveReviewer {
        contributions: Vec<ContributionId>,
        user: UserId,
    },
    /// Remove every reviewer from the listed contributions.
    RemoveAllReviewers { contributions: Vec<ContributionId> },

    /// Add users to a conference team.
    AddTeamMembers { role: TeamRole, users: Vec<UserId> },
    /// Remove a user from a conference team, dropping their matching
    /// contribution assignments first.
    RemoveTeamMember { role: TeamRole, user: UserId },

    /// Set a due date on the current review cycle of a contribution.
    SetDueDate {
        contribution: ContributionId,
        role: ReviewRole,
        due: PrimitiveDateTime,
    },
    /// Record a verdict.
    SetVerdict {
        contribution: ContributionId,
        slot: JudgementSlot,
        verdict: String,
    },
    /// Replace judgement comments.
    SetComments {
        contribution: ContributionId,
        slot: JudgementSlot,
        comments: String,
    },
    /// Answer one criterion.
    SetAnswer {
        contribution: ContributionId,
        slot: JudgementSlot,
        question: String,
        value: i64,
    },
    /// Submit or withdraw a judgement.
    ToggleSubmitted {
        contribution: ContributionId,
        slot: JudgementSlot,
        author: UserId,
    },

    /// Create a titled attachment folder.
    CreateFolder {
        link: LinkedObject,
        title: String,
        description: String,
        protection: ProtectionMode,
        is_always_visible: bool,
    },
    /// Add a link attachment to a folder, or to the default folder of
    /// `link` when no folder is named.
    AddAttachment {
        link: LinkedObject,
        folder_id: Option<u64>,
        title: String,
        link_url: String,
    },
}

impl Command {
    /// Name recorded as the audit action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetReviewingMode { .. } => "SetReviewingMode",
            Self::SetStates { .. } => "SetStates",
            Self::SetReviewingQuestions { .. } => "SetReviewingQuestions",
            Self::SetLayoutCriteria { .. } => "SetLayoutCriteria",
            Self::DeleteTemplate { .. } => "DeleteTemplate",
            Self::SetCompetences { .. } => "SetCompetences",
            Self::SetDefaultDueDate { .. } => "SetDefaultDueDate",
            Self::SetAbstractReviewerDefaultDueDate { .. } => "SetAbstractReviewerDefaultDueDate",
            Self::SetNotification { .. } => "SetNotification",
            Self::AssignReferee { .. } => "AssignReferee",
            Self::RemoveReferee { .. } => "RemoveReferee",
            Self::AssignEditor { .. } => "AssignEditor",
            Self::RemoveEditor { .. } => "RemoveEditor",
            Self::AddReviewer { .. } => "AddReviewer",
            Self::RemoveReviewer { .. } => "RemoveReviewer",
            Self::RemoveAllReviewers { .. } => "RemoveAllReviewers",
            Self::AddTeamMembers { .. } => "AddTeamMembers",
            Self::RemoveTeamMember { .. } => "RemoveTeamMember",
            Self::SetDueDate { .. } => "SetDueDate",
            Self::SetVerdict { .. } => "SetVerdict",
            Self::SetComments { .. } => "SetComments",
            Self::SetAnswer { .. } => "SetAnswer",
            Self::ToggleSubmitted { .. } => "ToggleSubmitted",
            Self::CreateFolder { .. } => "CreateFolder",
            Self::AddAttachment { .. } => "AddAttachment",
        }
    }
}
