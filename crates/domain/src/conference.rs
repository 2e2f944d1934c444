// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::folders::{Folders, LinkedObject};
use crate::review_manager::ReviewManager;
use crate::types::{
    AttributeKind, AttributeRef, ContributionId, ConferenceId, NotificationSetting, ReviewRole,
    ReviewingMode, TeamRole, UserId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::PrimitiveDateTime;

/// Verdicts a new conference review accepts.
pub const DEFAULT_STATES: [&str; 3] = ["Accept", "To be corrected", "Reject"];

/// A paper template uploaded for authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub format: String,
}

/// A contribution (paper) submitted to a conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: ContributionId,
    pub title: String,
    #[serde(default)]
    pub contribution_type: Option<AttributeRef>,
    #[serde(default)]
    pub track: Option<AttributeRef>,
    #[serde(default)]
    pub session: Option<AttributeRef>,
    #[serde(default)]
    pub review_manager: ReviewManager,
}

impl Contribution {
    #[must_use]
    pub fn new(id: ContributionId, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            contribution_type: None,
            track: None,
            session: None,
            review_manager: ReviewManager::new(),
        }
    }

    /// Returns the attribute of the given kind, if set.
    #[must_use]
    pub const fn attribute(&self, kind: AttributeKind) -> Option<&AttributeRef> {
        match kind {
            AttributeKind::Type => self.contribution_type.as_ref(),
            AttributeKind::Track => self.track.as_ref(),
            AttributeKind::Session => self.session.as_ref(),
        }
    }
}

/// Paper reviewing configuration of a conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConferenceReview {
    pub mode: ReviewingMode,
    pub states: Vec<String>,
    pub reviewing_questions: Vec<String>,
    pub layout_criteria: Vec<String>,
    pub templates: BTreeMap<String, Template>,
    pub competences: BTreeMap<UserId, Vec<String>>,
    pub default_referee_due_date: Option<PrimitiveDateTime>,
    pub default_editor_due_date: Option<PrimitiveDateTime>,
    pub default_reviewer_due_date: Option<PrimitiveDateTime>,
    pub default_abstract_reviewer_due_date: Option<PrimitiveDateTime>,
    pub notifications: BTreeSet<NotificationSetting>,
    pub paper_review_managers: BTreeSet<UserId>,
    pub referees: BTreeSet<UserId>,
    pub editors: BTreeSet<UserId>,
    pub reviewers: BTreeSet<UserId>,
}

impl Default for ConferenceReview {
    fn default() -> Self {
        Self {
            mode: ReviewingMode::default(),
            states: DEFAULT_STATES.iter().map(ToString::to_string).collect(),
            reviewing_questions: Vec::new(),
            layout_criteria: Vec::new(),
            templates: BTreeMap::new(),
            competences: BTreeMap::new(),
            default_referee_due_date: None,
            default_editor_due_date: None,
            default_reviewer_due_date: None,
            default_abstract_reviewer_due_date: None,
            notifications: BTreeSet::new(),
            paper_review_managers: BTreeSet::new(),
            referees: BTreeSet::new(),
            editors: BTreeSet::new(),
            reviewers: BTreeSet::new(),
        }
    }
}

impl ConferenceReview {
    /// Returns the roster of a team.
    #[must_use]
    pub const fn team(&self, role: TeamRole) -> &BTreeSet<UserId> {
        match role {
            TeamRole::PaperReviewManager => &self.paper_review_managers,
            TeamRole::Referee => &self.referees,
            TeamRole::Editor => &self.editors,
            TeamRole::Reviewer => &self.reviewers,
        }
    }

    pub const fn team_mut(&mut self, role: TeamRole) -> &mut BTreeSet<UserId> {
        match role {
            TeamRole::PaperReviewManager => &mut self.paper_review_managers,
            TeamRole::Referee => &mut self.referees,
            TeamRole::Editor => &mut self.editors,
            TeamRole::Reviewer => &mut self.reviewers,
        }
    }

    #[must_use]
    pub const fn default_due_date(&self, role: ReviewRole) -> Option<PrimitiveDateTime> {
        match role {
            ReviewRole::Referee => self.default_referee_due_date,
            ReviewRole::Editor => self.default_editor_due_date,
            ReviewRole::Reviewer => self.default_reviewer_due_date,
        }
    }

    pub const fn set_default_due_date(&mut self, role: ReviewRole, date: PrimitiveDateTime) {
        match role {
            ReviewRole::Referee => self.default_referee_due_date = Some(date),
            ReviewRole::Editor => self.default_editor_due_date = Some(date),
            ReviewRole::Reviewer => self.default_reviewer_due_date = Some(date),
        }
    }

    #[must_use]
    pub fn is_enabled(&self, setting: NotificationSetting) -> bool {
        self.notifications.contains(&setting)
    }

    /// Enables or disables a notification setting.
    pub fn set_notification(&mut self, setting: NotificationSetting, enabled: bool) {
        if enabled {
            self.notifications.insert(setting);
        } else {
            self.notifications.remove(&setting);
        }
    }

    /// Returns the competences recorded for a user.
    #[must_use]
    pub fn competences_of(&self, user: &UserId) -> &[String] {
        self.competences.get(user).map_or(&[], Vec::as_slice)
    }

    /// The criteria a judgement of the given role answers.
    ///
    /// Editors answer layout criteria; referees and reviewers answer the
    /// reviewing questions.
    #[must_use]
    pub fn criteria_for(&self, role: ReviewRole) -> &[String] {
        match role {
            ReviewRole::Editor => &self.layout_criteria,
            ReviewRole::Referee | ReviewRole::Reviewer => &self.reviewing_questions,
        }
    }

    /// Removes a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist.
    pub fn delete_template(&mut self, id: &str) -> Result<Template, DomainError> {
        self.templates
            .remove(id)
            .ok_or_else(|| DomainError::TemplateNotFound(id.to_string()))
    }
}

/// The conference aggregate: reviewing configuration, contributions and folders.
///
/// Every state change in the service is applied to a whole conference and
/// persisted as one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    pub id: ConferenceId,
    pub title: String,
    #[serde(default)]
    pub paper_reviewing_enabled: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub access_list: BTreeSet<UserId>,
    #[serde(default)]
    pub managers: BTreeSet<UserId>,
    #[serde(default)]
    pub abstract_managers: BTreeSet<UserId>,
    #[serde(default)]
    pub people: BTreeMap<UserId, String>,
    #[serde(default)]
    pub review: ConferenceReview,
    #[serde(default)]
    pub contributions: BTreeMap<ContributionId, Contribution>,
    #[serde(default)]
    pub folders: Folders,
}

impl Conference {
    #[must_use]
    pub fn new(id: ConferenceId, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            paper_reviewing_enabled: true,
            protected: false,
            access_list: BTreeSet::new(),
            managers: BTreeSet::new(),
            abstract_managers: BTreeSet::new(),
            people: BTreeMap::new(),
            review: ConferenceReview::default(),
            contributions: BTreeMap::new(),
            folders: Folders::new(),
        }
    }

    /// Adds or replaces a contribution.
    pub fn add_contribution(&mut self, contribution: Contribution) {
        self.contributions
            .insert(contribution.id.clone(), contribution);
    }

    /// Looks up a contribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the contribution does not exist.
    pub fn contribution(&self, id: &ContributionId) -> Result<&Contribution, DomainError> {
        self.contributions
            .get(id)
            .ok_or_else(|| DomainError::ContributionNotFound(id.to_string()))
    }

    /// Looks up a contribution for editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the contribution does not exist.
    pub fn contribution_mut(
        &mut self,
        id: &ContributionId,
    ) -> Result<&mut Contribution, DomainError> {
        self.contributions
            .get_mut(id)
            .ok_or_else(|| DomainError::ContributionNotFound(id.to_string()))
    }

    /// Holds generic modification rights on the conference.
    #[must_use]
    pub fn is_manager(&self, user: &UserId) -> bool {
        self.managers.contains(user)
    }

    #[must_use]
    pub fn is_abstract_manager(&self, user: &UserId) -> bool {
        self.abstract_managers.contains(user)
    }

    #[must_use]
    pub fn is_paper_review_manager(&self, user: &UserId) -> bool {
        self.review.paper_review_managers.contains(user)
    }

    /// Returns whether the user may access the conference itself.
    #[must_use]
    pub fn can_access(&self, user: Option<&UserId>) -> bool {
        if !self.protected {
            return true;
        }
        user.is_some_and(|u| self.access_list.contains(u) || self.is_manager(u))
    }

    /// Display name of a user, falling back to the identifier.
    #[must_use]
    pub fn display_name<'a>(&'a self, user: &'a UserId) -> &'a str {
        self.people.get(user).map_or(user.as_str(), String::as_str)
    }

    /// Contributions on which the user currently holds a role.
    #[must_use]
    pub fn contributions_held_by(&self, role: ReviewRole, user: &UserId) -> Vec<ContributionId> {
        self.contributions
            .values()
            .filter(|c| c.review_manager.holds(role, user))
            .map(|c| c.id.clone())
            .collect()
    }

    /// Contributions the user referees.
    #[must_use]
    pub fn judged_contributions(&self, user: &UserId) -> Vec<ContributionId> {
        self.contributions_held_by(ReviewRole::Referee, user)
    }

    /// Contributions the user edits.
    #[must_use]
    pub fn edited_contributions(&self, user: &UserId) -> Vec<ContributionId> {
        self.contributions_held_by(ReviewRole::Editor, user)
    }

    /// Contributions the user reviews.
    #[must_use]
    pub fn reviewed_contributions(&self, user: &UserId) -> Vec<ContributionId> {
        self.contributions_held_by(ReviewRole::Reviewer, user)
    }

    /// Distinct attributes of a kind used by the contributions, in
    /// contribution order.
    #[must_use]
    pub fn attributes(&self, kind: AttributeKind) -> Vec<&AttributeRef> {
        let mut found: Vec<&AttributeRef> = Vec::new();
        for contribution in self.contributions.values() {
            if let Some(attribute) = contribution.attribute(kind)
                && !found.iter().any(|a| a.id == attribute.id)
            {
                found.push(attribute);
            }
        }
        found
    }

    /// Contributions whose attribute of `kind` is one of `selected`.
    #[must_use]
    pub fn contributions_with_attribute(
        &self,
        kind: AttributeKind,
        selected: &[String],
    ) -> Vec<ContributionId> {
        self.contributions
            .values()
            .filter(|c| {
                c.attribute(kind)
                    .is_some_and(|a| selected.iter().any(|s| s == &a.id))
            })
            .map(|c| c.id.clone())
            .collect()
    }

    /// Whether the user may view the folders of an object.
    #[must_use]
    pub fn parent_access(&self, link: &LinkedObject, user: Option<&UserId>) -> bool {
        match link {
            LinkedObject::Conference => self.can_access(user),
            LinkedObject::Contribution(id) => {
                self.contributions.contains_key(id) && self.can_access(user)
            }
        }
    }

    /// Checks the invariants that hold for every stored conference.
    ///
    /// # Errors
    ///
    /// Returns the first folder constraint that is violated, or
    /// [`DomainError::ContributionNotFound`] for a folder linked to a
    /// contribution the conference does not have.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.folders.validate()?;
        for folder in self.folders.all() {
            if let LinkedObject::Contribution(id) = &folder.link {
                self.contribution(id)?;
            }
        }
        Ok(())
    }
}
