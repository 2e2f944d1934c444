// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of a user (actor or assignee).
///
/// User identifiers are opaque, non-empty strings. Leading and trailing
/// whitespace is stripped on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new user identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidIdentifier {
                kind: "user",
                value: value.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a conference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceId(String);

impl ConferenceId {
    /// Creates a new conference identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidIdentifier {
                kind: "conference",
                value: value.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a contribution within a conference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionId(String);

impl ContributionId {
    /// Creates a new contribution identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidIdentifier {
                kind: "contribution",
                value: value.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContributionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The reviewing mode of a conference.
///
/// The mode decides which per-contribution roles may be assigned. It is
/// exchanged as its numeric choice (1-4) or as its display name.
///
/// | choice | referee | editor | reviewer |
/// |--------|---------|--------|----------|
/// | 1      | no      | no     | no       |
/// | 2      | yes     | no     | yes      |
/// | 3      | no      | yes    | no       |
/// | 4      | yes     | yes    | yes      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReviewingMode {
    /// Paper reviewing is configured but no roles can be assigned.
    #[default]
    NoReviewing,
    /// Referees judge content with the help of content reviewers.
    ContentReviewing,
    /// Editors judge layout; no referee is involved.
    LayoutReviewing,
    /// Referees, reviewers and editors all take part.
    ContentAndLayoutReviewing,
}

impl ReviewingMode {
    /// Builds a mode from its numeric choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the choice is not between 1 and 4.
    pub fn from_choice(choice: i64) -> Result<Self, DomainError> {
        match choice {
            1 => Ok(Self::NoReviewing),
            2 => Ok(Self::ContentReviewing),
            3 => Ok(Self::LayoutReviewing),
            4 => Ok(Self::ContentAndLayoutReviewing),
            other => Err(DomainError::InvalidReviewingMode(other.to_string())),
        }
    }

    /// Returns the numeric choice of this mode.
    #[must_use]
    pub const fn choice(&self) -> u8 {
        match self {
            Self::NoReviewing => 1,
            Self::ContentReviewing => 2,
            Self::LayoutReviewing => 3,
            Self::ContentAndLayoutReviewing => 4,
        }
    }

    /// Returns the display name of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoReviewing => "No reviewing",
            Self::ContentReviewing => "Content reviewing",
            Self::LayoutReviewing => "Layout reviewing",
            Self::ContentAndLayoutReviewing => "Content and layout reviewing",
        }
    }

    /// Returns whether a role may be assigned to contributions in this mode.
    #[must_use]
    pub const fn allows(&self, role: ReviewRole) -> bool {
        match role {
            ReviewRole::Referee | ReviewRole::Reviewer => {
                matches!(self, Self::ContentReviewing | Self::ContentAndLayoutReviewing)
            }
            ReviewRole::Editor => {
                matches!(self, Self::LayoutReviewing | Self::ContentAndLayoutReviewing)
            }
        }
    }

    /// Checks that a role may be assigned in this mode.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RoleNotAllowedInMode`] if the mode excludes the role.
    pub const fn ensure_allows(&self, role: ReviewRole) -> Result<(), DomainError> {
        if self.allows(role) {
            Ok(())
        } else {
            Err(DomainError::RoleNotAllowedInMode { role, mode: *self })
        }
    }

    /// Returns whether a role can only be assigned once the contribution has a referee.
    ///
    /// Reviewers always need a referee. Editors need one unless the
    /// conference only reviews layout.
    #[must_use]
    pub const fn requires_referee(&self, role: ReviewRole) -> bool {
        match role {
            ReviewRole::Referee => false,
            ReviewRole::Reviewer => true,
            ReviewRole::Editor => !matches!(self, Self::LayoutReviewing),
        }
    }
}

impl FromStr for ReviewingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if let Ok(choice) = trimmed.parse::<i64>() {
            return Self::from_choice(choice);
        }
        match trimmed.to_lowercase().as_str() {
            "no reviewing" => Ok(Self::NoReviewing),
            "content reviewing" => Ok(Self::ContentReviewing),
            "layout reviewing" => Ok(Self::LayoutReviewing),
            "content and layout reviewing" => Ok(Self::ContentAndLayoutReviewing),
            _ => Err(DomainError::InvalidReviewingMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReviewingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A per-contribution review role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReviewRole {
    /// Takes the final content decision for a contribution.
    Referee,
    /// Judges the layout of a contribution.
    Editor,
    /// Gives content advice to the referee.
    Reviewer,
}

impl ReviewRole {
    /// Returns the name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Referee => "Referee",
            Self::Editor => "Editor",
            Self::Reviewer => "Reviewer",
        }
    }

    /// Parses the judgement kind used by contribution operations
    /// (`refereeJudgement`, `editorJudgement`, `reviewerJudgement`).
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is not recognized.
    pub fn from_judgement_kind(kind: &str) -> Result<Self, DomainError> {
        match kind {
            "refereeJudgement" => Ok(Self::Referee),
            "editorJudgement" => Ok(Self::Editor),
            "reviewerJudgement" => Ok(Self::Reviewer),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl FromStr for ReviewRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "referee" => Ok(Self::Referee),
            "editor" => Ok(Self::Editor),
            "reviewer" => Ok(Self::Reviewer),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReviewRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A conference-wide reviewing team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamRole {
    /// Paper review managers (PRMs).
    PaperReviewManager,
    /// Referees eligible for assignment to contributions.
    Referee,
    /// Editors eligible for assignment to contributions.
    Editor,
    /// Reviewers eligible for assignment to contributions.
    Reviewer,
}

impl TeamRole {
    /// Returns the name of this team.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PaperReviewManager => "PaperReviewManager",
            Self::Referee => "Referee",
            Self::Editor => "Editor",
            Self::Reviewer => "Reviewer",
        }
    }

    /// Returns the per-contribution role matching this team, if any.
    #[must_use]
    pub const fn review_role(&self) -> Option<ReviewRole> {
        match self {
            Self::PaperReviewManager => None,
            Self::Referee => Some(ReviewRole::Referee),
            Self::Editor => Some(ReviewRole::Editor),
            Self::Reviewer => Some(ReviewRole::Reviewer),
        }
    }
}

impl FromStr for TeamRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prm" | "paperreviewmanager" => Ok(Self::PaperReviewManager),
            "referee" => Ok(Self::Referee),
            "editor" => Ok(Self::Editor),
            "reviewer" => Ok(Self::Reviewer),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

/// Identifies one judgement on the latest review cycle of a contribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JudgementSlot {
    /// The referee judgement.
    Referee,
    /// The editor (layout) judgement.
    Editor,
    /// The judgement of one content reviewer.
    Reviewer(UserId),
}

impl JudgementSlot {
    /// Returns the role owning this judgement.
    #[must_use]
    pub const fn role(&self) -> ReviewRole {
        match self {
            Self::Referee => ReviewRole::Referee,
            Self::Editor => ReviewRole::Editor,
            Self::Reviewer(_) => ReviewRole::Reviewer,
        }
    }
}

/// Contribution attribute used to group contributions for bulk assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Contribution type.
    Type,
    /// Track.
    Track,
    /// Session.
    Session,
}

impl FromStr for AttributeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(Self::Type),
            "track" => Ok(Self::Track),
            "session" => Ok(Self::Session),
            other => Err(DomainError::InvalidAttribute(other.to_string())),
        }
    }
}

/// Reference to a type, track or session a contribution belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRef {
    /// The attribute identifier.
    pub id: String,
    /// The attribute title (or name, for contribution types).
    pub title: String,
}

impl AttributeRef {
    /// Creates a new attribute reference.
    #[must_use]
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

/// Automatic e-mail notification settings of a conference review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NotificationSetting {
    /// Notify users added to or removed from the PRM team.
    PaperReviewManagerTeam,
    /// Notify users added to or removed from the referee team.
    RefereeTeam,
    /// Notify users added to or removed from the editor team.
    EditorTeam,
    /// Notify users added to or removed from the reviewer team.
    ReviewerTeam,
    /// Notify referees assigned to or removed from contributions.
    RefereeForContribution,
    /// Notify editors assigned to or removed from contributions.
    EditorForContribution,
    /// Notify reviewers assigned to or removed from contributions.
    ReviewerForContribution,
    /// Notify authors when a referee judgement is submitted or withdrawn.
    RefereeJudgement,
    /// Notify authors when an editor judgement is submitted or withdrawn.
    EditorJudgement,
    /// Notify authors when a reviewer judgement is submitted or withdrawn.
    ReviewerJudgement,
    /// Notify the referee when an author submits material.
    AuthorSubmittedMaterialReferee,
    /// Notify the editor when an author submits material.
    AuthorSubmittedMaterialEditor,
    /// Notify reviewers when an author submits material.
    AuthorSubmittedMaterialReviewer,
}

impl NotificationSetting {
    /// Setting governing team membership notifications for a team.
    #[must_use]
    pub const fn for_team(role: TeamRole) -> Self {
        match role {
            TeamRole::PaperReviewManager => Self::PaperReviewManagerTeam,
            TeamRole::Referee => Self::RefereeTeam,
            TeamRole::Editor => Self::EditorTeam,
            TeamRole::Reviewer => Self::ReviewerTeam,
        }
    }

    /// Setting governing assignment notifications for a contribution role.
    #[must_use]
    pub const fn for_assignment(role: ReviewRole) -> Self {
        match role {
            ReviewRole::Referee => Self::RefereeForContribution,
            ReviewRole::Editor => Self::EditorForContribution,
            ReviewRole::Reviewer => Self::ReviewerForContribution,
        }
    }

    /// Setting governing author notifications for a judgement role.
    #[must_use]
    pub const fn for_judgement(role: ReviewRole) -> Self {
        match role {
            ReviewRole::Referee => Self::RefereeJudgement,
            ReviewRole::Editor => Self::EditorJudgement,
            ReviewRole::Reviewer => Self::ReviewerJudgement,
        }
    }
}
