// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Permission predicates.
//!
//! Every guarded operation names a [`Permission`]: a set of predicates and
//! a combinator. When no predicate grants access, evaluation falls back to
//! the conference manager check. Decisions are computed per request from
//! the loaded conference and never cached.

use confreview_domain::{Conference, ContributionId, ReviewRole, UserId};
use tracing::{debug, warn};

use crate::error::ServiceError;

/// A named access predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// The actor is a paper review manager.
    PaperReviewManager,
    /// The actor is an abstract manager.
    AbstractManager,
    /// The actor is on the conference referee team.
    ConferenceReferee,
    /// The actor referees every contribution the request targets.
    RefereeOfAllContributions,
    /// The actor referees the targeted contribution.
    ContributionReferee,
    /// The actor edits the targeted contribution.
    ContributionEditor,
    /// The actor reviews the targeted contribution.
    ContributionReviewer,
    /// The actor holds the role owning the requested judgement kind, as
    /// checked by the matching contribution predicate.
    JudgementOwner,
}

impl Predicate {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PaperReviewManager => "PaperReviewManager",
            Self::AbstractManager => "AbstractManager",
            Self::ConferenceReferee => "ConferenceReferee",
            Self::RefereeOfAllContributions => "RefereeOfAllContributions",
            Self::ContributionReferee => "ContributionReferee",
            Self::ContributionEditor => "ContributionEditor",
            Self::ContributionReviewer => "ContributionReviewer",
            Self::JudgementOwner => "JudgementOwner",
        }
    }

    /// The contribution predicate for a judgement role.
    #[must_use]
    pub const fn holding(role: ReviewRole) -> Self {
        match role {
            ReviewRole::Referee => Self::ContributionReferee,
            ReviewRole::Editor => Self::ContributionEditor,
            ReviewRole::Reviewer => Self::ContributionReviewer,
        }
    }

    /// Evaluates the predicate.
    #[must_use]
    pub fn holds(&self, ctx: &PermissionContext<'_>) -> bool {
        let conference: &Conference = ctx.conference;
        let actor: &UserId = ctx.actor;
        match self {
            Self::PaperReviewManager => conference.is_paper_review_manager(actor),
            Self::AbstractManager => conference.is_abstract_manager(actor),
            Self::ConferenceReferee => conference.review.referees.contains(actor),
            Self::RefereeOfAllContributions => {
                !ctx.contributions.is_empty()
                    && ctx.contributions.iter().all(|id| {
                        conference
                            .contributions
                            .get(id)
                            .is_some_and(|c| c.review_manager.is_referee(actor))
                    })
            }
            Self::ContributionReferee => ctx.holds_on_contribution(ReviewRole::Referee),
            Self::ContributionEditor => ctx.holds_on_contribution(ReviewRole::Editor),
            Self::ContributionReviewer => ctx.holds_on_contribution(ReviewRole::Reviewer),
            Self::JudgementOwner => ctx
                .judgement
                .is_some_and(|role| Self::holding(role).holds(ctx)),
        }
    }
}

/// How the predicates of a [`Permission`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// At least one predicate holds.
    Any,
    /// Every predicate holds. An empty list never grants.
    All,
}

/// The access rule of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    pub predicates: &'static [Predicate],
    pub combinator: Combinator,
}

impl Permission {
    #[must_use]
    pub const fn any(predicates: &'static [Predicate]) -> Self {
        Self {
            predicates,
            combinator: Combinator::Any,
        }
    }

    #[must_use]
    pub const fn all(predicates: &'static [Predicate]) -> Self {
        Self {
            predicates,
            combinator: Combinator::All,
        }
    }

    /// No predicates; only the manager fallback grants.
    #[must_use]
    pub const fn managers_only() -> Self {
        Self::any(&[])
    }

    /// Whether the predicates alone grant access.
    #[must_use]
    pub fn grants(&self, ctx: &PermissionContext<'_>) -> bool {
        match self.combinator {
            Combinator::Any => self.predicates.iter().any(|p| p.holds(ctx)),
            Combinator::All => {
                !self.predicates.is_empty() && self.predicates.iter().all(|p| p.holds(ctx))
            }
        }
    }

    /// Checks access, falling back to the conference manager check.
    ///
    /// If the context carries a `reviewing_disabled_code` and paper reviewing
    /// is off, the fallback fails with that code instead.
    ///
    /// # Errors
    ///
    /// Returns an authorization error (`ERR-P4`) when access is denied.
    pub fn check(&self, ctx: &PermissionContext<'_>) -> Result<(), ServiceError> {
        if self.grants(ctx) {
            debug!(
                actor = %ctx.actor,
                predicates = ?self.predicates,
                "Permission granted by predicate"
            );
            return Ok(());
        }

        if let Some(code) = ctx.reviewing_disabled_code
            && !ctx.conference.paper_reviewing_enabled
        {
            warn!(
                actor = %ctx.actor,
                conference = %ctx.conference.id,
                code,
                "Paper reviewing is not active"
            );
            return Err(ServiceError::conflict(
                code,
                "Paper Reviewing is not active for this conference",
            ));
        }

        if ctx.conference.is_manager(ctx.actor) {
            debug!(actor = %ctx.actor, "Permission granted to conference manager");
            return Ok(());
        }

        warn!(
            actor = %ctx.actor,
            conference = %ctx.conference.id,
            predicates = ?self.predicates,
            "Permission denied"
        );
        Err(ServiceError::authorization(
            "ERR-P4",
            format!(
                "User '{}' is not allowed to perform this operation",
                ctx.actor
            ),
        ))
    }
}

/// What a permission is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct PermissionContext<'a> {
    pub conference: &'a Conference,
    pub actor: &'a UserId,
    /// The contribution set of assignment operations.
    pub contributions: &'a [ContributionId],
    /// The target of contribution operations.
    pub contribution: Option<&'a ContributionId>,
    /// The judgement kind named by contribution operations.
    pub judgement: Option<ReviewRole>,
    /// Error code raised by the fallback when paper reviewing is off.
    pub reviewing_disabled_code: Option<&'static str>,
}

impl<'a> PermissionContext<'a> {
    /// A context with no contribution scope.
    #[must_use]
    pub const fn new(conference: &'a Conference, actor: &'a UserId) -> Self {
        Self {
            conference,
            actor,
            contributions: &[],
            contribution: None,
            judgement: None,
            reviewing_disabled_code: None,
        }
    }

    fn holds_on_contribution(&self, role: ReviewRole) -> bool {
        self.contribution
            .and_then(|id| self.conference.contributions.get(id))
            .is_some_and(|c| c.review_manager.holds(role, self.actor))
    }
}
