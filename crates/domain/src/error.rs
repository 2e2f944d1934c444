// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ReviewRole, ReviewingMode};

/// The part of a judgement an edit targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgementField {
    /// The verdict (accept, reject, ...).
    Verdict,
    /// The free-text comments.
    Comments,
    /// The per-criterion answers.
    Answers,
}

impl std::fmt::Display for JudgementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verdict => write!(f, "verdict"),
            Self::Comments => write!(f, "comments"),
            Self::Answers => write!(f, "answers"),
        }
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was empty or malformed.
    InvalidIdentifier {
        /// The kind of identifier ("user", "conference", ...).
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The reviewing mode is not one of the known choices.
    InvalidReviewingMode(String),
    /// A role name could not be parsed.
    InvalidRole(String),
    /// A contribution attribute name could not be parsed.
    InvalidAttribute(String),
    /// The contribution does not exist in the conference.
    ContributionNotFound(String),
    /// The template does not exist in the conference review.
    TemplateNotFound(String),
    /// The reviewing mode does not allow assigning this role.
    RoleNotAllowedInMode {
        /// The role that was being assigned.
        role: ReviewRole,
        /// The current reviewing mode.
        mode: ReviewingMode,
    },
    /// The role can only be assigned once the contribution has a referee.
    RefereeRequired {
        /// The role that was being assigned.
        role: ReviewRole,
        /// The contribution lacking a referee.
        contribution: String,
    },
    /// The single-holder role slot is already occupied.
    RoleAlreadyAssigned {
        /// The occupied role.
        role: ReviewRole,
    },
    /// The judgement is submitted and cannot be edited.
    JudgementSubmitted {
        /// The field the edit targeted.
        field: JudgementField,
    },
    /// The judgement cannot be submitted without a verdict.
    JudgementIncomplete {
        /// The role owning the judgement.
        role: ReviewRole,
    },
    /// The verdict is not one of the conference's states.
    InvalidVerdict(String),
    /// The criterion is not one of the conference's questions or criteria.
    UnknownQuestion(String),
    /// The criterion answer is outside the answer scale.
    InvalidAnswer {
        /// The criterion.
        question: String,
        /// The rejected value.
        value: i64,
    },
    /// An attachment folder constraint was violated.
    FolderConstraint(&'static str),
    /// The attachment folder does not exist.
    FolderNotFound(u64),
    /// A folder or attachment title was empty.
    InvalidTitle(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "Invalid {kind} identifier: '{value}'")
            }
            Self::InvalidReviewingMode(value) => write!(f, "Invalid reviewing mode: '{value}'"),
            Self::InvalidRole(value) => write!(f, "Invalid role: '{value}'"),
            Self::InvalidAttribute(value) => write!(f, "Invalid attribute: '{value}'"),
            Self::ContributionNotFound(id) => write!(f, "Contribution '{id}' not found"),
            Self::TemplateNotFound(id) => write!(f, "Template '{id}' not found"),
            Self::RoleNotAllowedInMode { role, mode } => {
                write!(f, "{role} cannot be assigned in mode '{mode}'")
            }
            Self::RefereeRequired { role, contribution } => write!(
                f,
                "Contribution '{contribution}' has no Referee yet; cannot assign {role}"
            ),
            Self::RoleAlreadyAssigned { role } => {
                write!(f, "{role} is already assigned to this contribution")
            }
            Self::JudgementSubmitted { field } => write!(
                f,
                "Cannot modify the {field} of a judgement marked as submitted"
            ),
            Self::JudgementIncomplete { role } => {
                write!(f, "{role} judgement cannot be submitted without a verdict")
            }
            Self::InvalidVerdict(value) => write!(f, "Invalid verdict: '{value}'"),
            Self::UnknownQuestion(value) => write!(f, "Unknown criterion: '{value}'"),
            Self::InvalidAnswer { question, value } => {
                write!(f, "Invalid answer {value} for criterion '{question}'")
            }
            Self::FolderConstraint(name) => {
                write!(f, "Attachment folder constraint violated: {name}")
            }
            Self::FolderNotFound(id) => write!(f, "Attachment folder {id} not found"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
