// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The closed set of RPC operations.

use std::str::FromStr;

use confreview_domain::{NotificationSetting, TeamRole};

use crate::error::ServiceError;

/// One RPC operation, named on the wire by [`Operation::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    // Conference setup
    /// Change or read the reviewing mode.
    ChangeReviewingMode,
    /// Change or read the verdicts judgements may use.
    ChangeStates,
    /// Change or read the content reviewing questions.
    ChangeQuestions,
    /// Change or read the layout criteria.
    ChangeCriteria,
    /// Delete a paper template.
    DeleteTemplate,
    /// Change or read the competences of a user.
    ChangeCompetences,
    /// Change or read a conference default due date.
    ChangeDefaultDueDate,
    /// Change or read the abstract reviewer default due date.
    ChangeAbstractReviewerDefaultDueDate,
    /// List the types, tracks or sessions used by contributions.
    AttributeList,
    /// List contributions having one of the selected attributes.
    ContributionsIdPerSelectedAttribute,
    /// List a team with its competences.
    UserCompetencesList,

    // Assignment
    AssignReferee,
    RemoveReferee,
    AssignEditor,
    RemoveEditor,
    AddReviewer,
    RemoveReviewer,
    RemoveAllReviewers,

    // Notification toggles
    PrmEmailNotif,
    RefereeEmailNotif,
    EditorEmailNotif,
    ReviewerEmailNotif,
    RefereeEmailNotifForContribution,
    EditorEmailNotifForContribution,
    ReviewerEmailNotifForContribution,
    RefereeEmailJudgementNotif,
    EditorEmailJudgementNotif,
    ReviewerEmailJudgementNotif,
    AuthorSubmittedMatRefereeNotif,
    AuthorSubmittedMatEditorNotif,
    AuthorSubmittedMatReviewerNotif,

    // Teams
    AssignTeamPrm,
    RemoveTeamPrm,
    AssignTeamReferee,
    RemoveTeamReferee,
    AssignTeamEditor,
    RemoveTeamEditor,
    AssignTeamReviewer,
    RemoveTeamReviewer,

    // Contribution judgements
    ContributionChangeDueDate,
    ContributionChangeComments,
    ContributionChangeJudgement,
    ContributionChangeCriteria,
    ContributionGetCriteria,
    ContributionSetSubmitted,

    // Attachments
    ListFolders,
    CreateFolder,
    AddAttachment,
}

impl Operation {
    /// Every operation, in registration order.
    pub const ALL: [Self; 48] = [
        Self::ChangeReviewingMode,
        Self::ChangeStates,
        Self::ChangeQuestions,
        Self::ChangeCriteria,
        Self::DeleteTemplate,
        Self::ChangeCompetences,
        Self::ChangeDefaultDueDate,
        Self::ChangeAbstractReviewerDefaultDueDate,
        Self::AttributeList,
        Self::ContributionsIdPerSelectedAttribute,
        Self::UserCompetencesList,
        Self::AssignReferee,
        Self::RemoveReferee,
        Self::AssignEditor,
        Self::RemoveEditor,
        Self::AddReviewer,
        Self::RemoveReviewer,
        Self::RemoveAllReviewers,
        Self::PrmEmailNotif,
        Self::RefereeEmailNotif,
        Self::EditorEmailNotif,
        Self::ReviewerEmailNotif,
        Self::RefereeEmailNotifForContribution,
        Self::EditorEmailNotifForContribution,
        Self::ReviewerEmailNotifForContribution,
        Self::RefereeEmailJudgementNotif,
        Self::EditorEmailJudgementNotif,
        Self::ReviewerEmailJudgementNotif,
        Self::AuthorSubmittedMatRefereeNotif,
        Self::AuthorSubmittedMatEditorNotif,
        Self::AuthorSubmittedMatReviewerNotif,
        Self::AssignTeamPrm,
        Self::RemoveTeamPrm,
        Self::AssignTeamReferee,
        Self::RemoveTeamReferee,
        Self::AssignTeamEditor,
        Self::RemoveTeamEditor,
        Self::AssignTeamReviewer,
        Self::RemoveTeamReviewer,
        Self::ContributionChangeDueDate,
        Self::ContributionChangeComments,
        Self::ContributionChangeJudgement,
        Self::ContributionChangeCriteria,
        Self::ContributionGetCriteria,
        Self::ContributionSetSubmitted,
        Self::ListFolders,
        Self::CreateFolder,
        Self::AddAttachment,
    ];

    /// The wire name of this operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ChangeReviewingMode => "conference.changeReviewingMode",
            Self::ChangeStates => "conference.changeStates",
            Self::ChangeQuestions => "conference.changeQuestions",
            Self::ChangeCriteria => "conference.changeCriteria",
            Self::DeleteTemplate => "conference.deleteTemplate",
            Self::ChangeCompetences => "conference.changeCompetences",
            Self::ChangeDefaultDueDate => "conference.changeDefaultDueDate",
            Self::ChangeAbstractReviewerDefaultDueDate => {
                "conference.changeAbstractReviewerDefaultDueDate"
            }
            Self::AttributeList => "conference.attributeList",
            Self::ContributionsIdPerSelectedAttribute => {
                "conference.contributionsIdPerSelectedAttribute"
            }
            Self::UserCompetencesList => "conference.userCompetencesList",
            Self::AssignReferee => "conference.assignReferee",
            Self::RemoveReferee => "conference.removeReferee",
            Self::AssignEditor => "conference.assignEditor",
            Self::RemoveEditor => "conference.removeEditor",
            Self::AddReviewer => "conference.addReviewer",
            Self::RemoveReviewer => "conference.removeReviewer",
            Self::RemoveAllReviewers => "conference.removeAllReviewers",
            Self::PrmEmailNotif => "conference.PRMEmailNotif",
            Self::RefereeEmailNotif => "conference.RefereeEmailNotif",
            Self::EditorEmailNotif => "conference.EditorEmailNotif",
            Self::ReviewerEmailNotif => "conference.ReviewerEmailNotif",
            Self::RefereeEmailNotifForContribution => "conference.RefereeEmailNotifForContribution",
            Self::EditorEmailNotifForContribution => "conference.EditorEmailNotifForContribution",
            Self::ReviewerEmailNotifForContribution => {
                "conference.ReviewerEmailNotifForContribution"
            }
            Self::RefereeEmailJudgementNotif => "conference.RefereeEmailJudgementNotif",
            Self::EditorEmailJudgementNotif => "conference.EditorEmailJudgementNotif",
            Self::ReviewerEmailJudgementNotif => "conference.ReviewerEmailJudgementNotif",
            Self::AuthorSubmittedMatRefereeNotif => "conference.AuthorSubmittedMatRefereeNotif",
            Self::AuthorSubmittedMatEditorNotif => "conference.AuthorSubmittedMatEditorNotif",
            Self::AuthorSubmittedMatReviewerNotif => "conference.AuthorSubmittedMatReviewerNotif",
            Self::AssignTeamPrm => "conference.assignTeamPRM",
            Self::RemoveTeamPrm => "conference.removeTeamPRM",
            Self::AssignTeamReferee => "conference.assignTeamReferee",
            Self::RemoveTeamReferee => "conference.removeTeamReferee",
            Self::AssignTeamEditor => "conference.assignTeamEditor",
            Self::RemoveTeamEditor => "conference.removeTeamEditor",
            Self::AssignTeamReviewer => "conference.assignTeamReviewer",
            Self::RemoveTeamReviewer => "conference.removeTeamReviewer",
            Self::ContributionChangeDueDate => "contribution.changeDueDate",
            Self::ContributionChangeComments => "contribution.changeComments",
            Self::ContributionChangeJudgement => "contribution.changeJudgement",
            Self::ContributionChangeCriteria => "contribution.changeCriteria",
            Self::ContributionGetCriteria => "contribution.getCriteria",
            Self::ContributionSetSubmitted => "contribution.setSubmitted",
            Self::ListFolders => "attachments.listFolders",
            Self::CreateFolder => "attachments.createFolder",
            Self::AddAttachment => "attachments.addAttachment",
        }
    }

    /// The notification setting toggled by this operation, if it is a toggle.
    #[must_use]
    pub const fn notification_setting(&self) -> Option<NotificationSetting> {
        let setting: NotificationSetting = match self {
            Self::PrmEmailNotif => NotificationSetting::PaperReviewManagerTeam,
            Self::RefereeEmailNotif => NotificationSetting::RefereeTeam,
            Self::EditorEmailNotif => NotificationSetting::EditorTeam,
            Self::ReviewerEmailNotif => NotificationSetting::ReviewerTeam,
            Self::RefereeEmailNotifForContribution => NotificationSetting::RefereeForContribution,
            Self::EditorEmailNotifForContribution => NotificationSetting::EditorForContribution,
            Self::ReviewerEmailNotifForContribution => NotificationSetting::ReviewerForContribution,
            Self::RefereeEmailJudgementNotif => NotificationSetting::RefereeJudgement,
            Self::EditorEmailJudgementNotif => NotificationSetting::EditorJudgement,
            Self::ReviewerEmailJudgementNotif => NotificationSetting::ReviewerJudgement,
            Self::AuthorSubmittedMatRefereeNotif => {
                NotificationSetting::AuthorSubmittedMaterialReferee
            }
            Self::AuthorSubmittedMatEditorNotif => {
                NotificationSetting::AuthorSubmittedMaterialEditor
            }
            Self::AuthorSubmittedMatReviewerNotif => {
                NotificationSetting::AuthorSubmittedMaterialReviewer
            }
            _ => return None,
        };
        Some(setting)
    }

    /// The team changed by this operation, if it is a team operation.
    #[must_use]
    pub const fn team_role(&self) -> Option<TeamRole> {
        match self {
            Self::AssignTeamPrm | Self::RemoveTeamPrm => Some(TeamRole::PaperReviewManager),
            Self::AssignTeamReferee | Self::RemoveTeamReferee => Some(TeamRole::Referee),
            Self::AssignTeamEditor | Self::RemoveTeamEditor => Some(TeamRole::Editor),
            Self::AssignTeamReviewer | Self::RemoveTeamReviewer => Some(TeamRole::Reviewer),
            _ => None,
        }
    }
}

impl FromStr for Operation {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ServiceError::unknown_operation(s))
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
