// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::judgement::Judgement;
use crate::types::{JudgementSlot, ReviewRole, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::PrimitiveDateTime;

/// One review cycle of a contribution.
///
/// A new cycle starts each time authors resubmit material. Only the last
/// cycle is ever edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub version: u32,
    pub referee_due_date: Option<PrimitiveDateTime>,
    pub editor_due_date: Option<PrimitiveDateTime>,
    pub reviewer_due_date: Option<PrimitiveDateTime>,
    pub referee_judgement: Judgement,
    pub editor_judgement: Judgement,
    #[serde(default)]
    pub reviewer_judgements: BTreeMap<UserId, Judgement>,
}

impl Review {
    /// Creates an empty review cycle.
    #[must_use]
    pub const fn new(version: u32) -> Self {
        Self {
            version,
            referee_due_date: None,
            editor_due_date: None,
            reviewer_due_date: None,
            referee_judgement: Judgement::new(ReviewRole::Referee),
            editor_judgement: Judgement::new(ReviewRole::Editor),
            reviewer_judgements: BTreeMap::new(),
        }
    }

    /// Returns the due date stored on this cycle for a role.
    #[must_use]
    pub const fn due_date(&self, role: ReviewRole) -> Option<PrimitiveDateTime> {
        match role {
            ReviewRole::Referee => self.referee_due_date,
            ReviewRole::Editor => self.editor_due_date,
            ReviewRole::Reviewer => self.reviewer_due_date,
        }
    }

    /// Sets the due date for a role on this cycle.
    pub const fn set_due_date(&mut self, role: ReviewRole, date: PrimitiveDateTime) {
        match role {
            ReviewRole::Referee => self.referee_due_date = Some(date),
            ReviewRole::Editor => self.editor_due_date = Some(date),
            ReviewRole::Reviewer => self.reviewer_due_date = Some(date),
        }
    }

    /// Returns a judgement, if it exists.
    ///
    /// Reviewer judgements only exist once they have been touched.
    #[must_use]
    pub fn judgement(&self, slot: &JudgementSlot) -> Option<&Judgement> {
        match slot {
            JudgementSlot::Referee => Some(&self.referee_judgement),
            JudgementSlot::Editor => Some(&self.editor_judgement),
            JudgementSlot::Reviewer(user) => self.reviewer_judgements.get(user),
        }
    }

    /// Returns a judgement for editing, creating a reviewer judgement on first use.
    pub fn judgement_mut(&mut self, slot: &JudgementSlot) -> &mut Judgement {
        match slot {
            JudgementSlot::Referee => &mut self.referee_judgement,
            JudgementSlot::Editor => &mut self.editor_judgement,
            JudgementSlot::Reviewer(user) => self
                .reviewer_judgements
                .entry(user.clone())
                .or_insert_with(|| Judgement::new(ReviewRole::Reviewer)),
        }
    }
}

/// The assignment of reviewing roles on a single contribution.
///
/// At most one referee and one editor; reviewers form a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewManager {
    referee: Option<UserId>,
    editor: Option<UserId>,
    #[serde(default)]
    reviewers: BTreeSet<UserId>,
    reviews: Vec<Review>,
}

impl Default for ReviewManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewManager {
    /// Creates a manager with no assignments and a first review cycle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            referee: None,
            editor: None,
            reviewers: BTreeSet::new(),
            reviews: vec![Review::new(0)],
        }
    }

    #[must_use]
    pub const fn referee(&self) -> Option<&UserId> {
        self.referee.as_ref()
    }

    #[must_use]
    pub const fn editor(&self) -> Option<&UserId> {
        self.editor.as_ref()
    }

    #[must_use]
    pub const fn reviewers(&self) -> &BTreeSet<UserId> {
        &self.reviewers
    }

    #[must_use]
    pub const fn has_referee(&self) -> bool {
        self.referee.is_some()
    }

    #[must_use]
    pub const fn has_editor(&self) -> bool {
        self.editor.is_some()
    }

    #[must_use]
    pub fn is_referee(&self, user: &UserId) -> bool {
        self.referee.as_ref() == Some(user)
    }

    #[must_use]
    pub fn is_editor(&self, user: &UserId) -> bool {
        self.editor.as_ref() == Some(user)
    }

    #[must_use]
    pub fn is_reviewer(&self, user: &UserId) -> bool {
        self.reviewers.contains(user)
    }

    /// Returns whether the user holds a role on this contribution.
    #[must_use]
    pub fn holds(&self, role: ReviewRole, user: &UserId) -> bool {
        match role {
            ReviewRole::Referee => self.is_referee(user),
            ReviewRole::Editor => self.is_editor(user),
            ReviewRole::Reviewer => self.is_reviewer(user),
        }
    }

    /// Assigns the referee.
    ///
    /// # Errors
    ///
    /// Returns an error if a referee is already assigned. Callers displace
    /// the current referee with `remove_referee` first.
    pub fn set_referee(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.referee.is_some() {
            return Err(DomainError::RoleAlreadyAssigned {
                role: ReviewRole::Referee,
            });
        }
        self.referee = Some(user);
        Ok(())
    }

    /// Removes the referee, returning the previous holder.
    pub const fn remove_referee(&mut self) -> Option<UserId> {
        self.referee.take()
    }

    /// Assigns the editor.
    ///
    /// # Errors
    ///
    /// Returns an error if an editor is already assigned.
    pub fn set_editor(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.editor.is_some() {
            return Err(DomainError::RoleAlreadyAssigned {
                role: ReviewRole::Editor,
            });
        }
        self.editor = Some(user);
        Ok(())
    }

    /// Removes the editor, returning the previous holder.
    pub const fn remove_editor(&mut self) -> Option<UserId> {
        self.editor.take()
    }

    /// Adds a reviewer. Returns `false` if the user was already a reviewer.
    pub fn add_reviewer(&mut self, user: UserId) -> bool {
        self.reviewers.insert(user)
    }

    /// Removes a reviewer. Returns `false` if the user was not a reviewer.
    pub fn remove_reviewer(&mut self, user: &UserId) -> bool {
        self.reviewers.remove(user)
    }

    /// Removes every reviewer, returning the removed users.
    pub fn remove_all_reviewers(&mut self) -> BTreeSet<UserId> {
        std::mem::take(&mut self.reviewers)
    }

    /// Strips every role the user holds on this contribution.
    ///
    /// Returns the roles that were removed.
    pub fn remove_user(&mut self, user: &UserId) -> Vec<ReviewRole> {
        let mut removed: Vec<ReviewRole> = Vec::new();
        if self.is_referee(user) {
            self.referee = None;
            removed.push(ReviewRole::Referee);
        }
        if self.is_editor(user) {
            self.editor = None;
            removed.push(ReviewRole::Editor);
        }
        if self.reviewers.remove(user) {
            removed.push(ReviewRole::Reviewer);
        }
        removed
    }

    /// Returns all review cycles, oldest first.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Returns the current review cycle.
    #[must_use]
    pub fn last_review(&self) -> Option<&Review> {
        self.reviews.last()
    }

    /// Returns the current review cycle for editing, starting one if none exists.
    pub fn last_review_mut(&mut self) -> &mut Review {
        if self.reviews.is_empty() {
            self.reviews.push(Review::new(0));
        }
        let last: usize = self.reviews.len() - 1;
        &mut self.reviews[last]
    }

    /// Starts a new review cycle, returning its version.
    pub fn new_review(&mut self) -> u32 {
        let version: u32 = self
            .reviews
            .last()
            .map_or(0, |r| r.version.saturating_add(1));
        self.reviews.push(Review::new(version));
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unwrap_used)]
    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_new_manager_has_one_review_cycle() {
        let manager: ReviewManager = ReviewManager::new();
        assert_eq!(manager.reviews().len(), 1);
        assert_eq!(manager.last_review().map(|r| r.version), Some(0));
    }

    #[test]
    fn test_new_review_increments_version() {
        let mut manager: ReviewManager = ReviewManager::new();
        assert_eq!(manager.new_review(), 1);
        assert_eq!(manager.new_review(), 2);
        assert_eq!(manager.reviews().len(), 3);
    }

    #[test]
    fn test_reviewer_judgement_created_on_first_access() {
        let mut review: Review = Review::new(0);
        let slot: JudgementSlot = JudgementSlot::Reviewer(user("rev"));
        assert!(review.judgement(&slot).is_none());

        let judgement: &mut Judgement = review.judgement_mut(&slot);
        assert_eq!(judgement.role(), ReviewRole::Reviewer);
        assert!(review.judgement(&slot).is_some());
    }

    #[test]
    fn test_remove_user_strips_all_roles() {
        let mut manager: ReviewManager = ReviewManager::new();
        let u: UserId = user("alice");
        manager.set_referee(u.clone()).unwrap_or_default();
        manager.set_editor(u.clone()).unwrap_or_default();
        manager.add_reviewer(u.clone());

        let removed: Vec<ReviewRole> = manager.remove_user(&u);
        assert_eq!(
            removed,
            vec![ReviewRole::Referee, ReviewRole::Editor, ReviewRole::Reviewer]
        );
        assert!(!manager.has_referee());
        assert!(!manager.has_editor());
        assert!(manager.reviewers().is_empty());
    }
}
