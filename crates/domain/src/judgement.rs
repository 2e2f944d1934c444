// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, JudgementField};
use crate::types::{ReviewRole, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Labels of the answer scale used for reviewing questions and layout criteria.
///
/// A criterion answer is an index into this slice.
pub const REVIEWING_QUESTION_ANSWERS: [&str; 6] =
    ["None", "Very bad", "Bad", "Acceptable", "Very good", "Excellent"];

/// The verdict one role records on one contribution's latest review cycle.
///
/// Content (verdict, comments, answers) is write-locked while the judgement
/// is submitted. Only `toggle_submitted` can lift the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    role: ReviewRole,
    verdict: Option<String>,
    comments: String,
    answers: BTreeMap<String, u8>,
    submitted: bool,
    author: Option<UserId>,
}

impl Judgement {
    /// Creates an empty, unsubmitted judgement for a role.
    #[must_use]
    pub const fn new(role: ReviewRole) -> Self {
        Self {
            role,
            verdict: None,
            comments: String::new(),
            answers: BTreeMap::new(),
            submitted: false,
            author: None,
        }
    }

    #[must_use]
    pub const fn role(&self) -> ReviewRole {
        self.role
    }

    #[must_use]
    pub fn verdict(&self) -> Option<&str> {
        self.verdict.as_deref()
    }

    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub const fn author(&self) -> Option<&UserId> {
        self.author.as_ref()
    }

    /// Returns the recorded answer index for a criterion.
    #[must_use]
    pub fn answer(&self, question: &str) -> Option<u8> {
        self.answers.get(question).copied()
    }

    const fn ensure_editable(&self, field: JudgementField) -> Result<(), DomainError> {
        if self.submitted {
            return Err(DomainError::JudgementSubmitted { field });
        }
        Ok(())
    }

    /// Records the verdict.
    ///
    /// # Arguments
    ///
    /// * `verdict` - The verdict to record
    /// * `states` - The verdicts the conference accepts
    ///
    /// # Errors
    ///
    /// Returns an error if the judgement is submitted or the verdict is not
    /// one of `states`.
    pub fn set_verdict(&mut self, verdict: &str, states: &[String]) -> Result<(), DomainError> {
        self.ensure_editable(JudgementField::Verdict)?;
        if !states.iter().any(|s| s == verdict) {
            return Err(DomainError::InvalidVerdict(verdict.to_string()));
        }
        self.verdict = Some(verdict.to_string());
        Ok(())
    }

    /// Replaces the comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the judgement is submitted.
    pub fn set_comments(&mut self, comments: String) -> Result<(), DomainError> {
        self.ensure_editable(JudgementField::Comments)?;
        self.comments = comments;
        Ok(())
    }

    /// Records the answer to one criterion.
    ///
    /// # Arguments
    ///
    /// * `question` - The criterion being answered
    /// * `value` - Index into [`REVIEWING_QUESTION_ANSWERS`]
    /// * `questions` - The criteria this judgement may answer
    ///
    /// # Errors
    ///
    /// Returns an error if the judgement is submitted, the criterion is
    /// unknown, or the value is outside the answer scale.
    pub fn set_answer(
        &mut self,
        question: &str,
        value: i64,
        questions: &[String],
    ) -> Result<(), DomainError> {
        self.ensure_editable(JudgementField::Answers)?;
        if !questions.iter().any(|q| q == question) {
            return Err(DomainError::UnknownQuestion(question.to_string()));
        }
        let index: u8 = u8::try_from(value)
            .ok()
            .filter(|v| usize::from(*v) < REVIEWING_QUESTION_ANSWERS.len())
            .ok_or_else(|| DomainError::InvalidAnswer {
                question: question.to_string(),
                value,
            })?;
        self.answers.insert(question.to_string(), index);
        Ok(())
    }

    /// Flips the submitted flag and stamps the author.
    ///
    /// Returns the new submitted flag.
    ///
    /// # Errors
    ///
    /// Returns an error when submitting a judgement that has no verdict.
    /// Withdrawing never fails.
    pub fn toggle_submitted(&mut self, author: UserId) -> Result<bool, DomainError> {
        if !self.submitted && self.verdict.is_none() {
            return Err(DomainError::JudgementIncomplete { role: self.role });
        }
        self.submitted = !self.submitted;
        self.author = Some(author);
        Ok(self.submitted)
    }

    /// Renders the answers as `"<criterion> : <label>"`, in criterion order.
    ///
    /// Unanswered criteria are skipped.
    #[must_use]
    pub fn criteria_display(&self, questions: &[String]) -> Vec<String> {
        questions
            .iter()
            .filter_map(|q| {
                self.answers.get(q).map(|a| {
                    let label: &str = REVIEWING_QUESTION_ANSWERS
                        .get(usize::from(*a))
                        .copied()
                        .unwrap_or("None");
                    format!("{q} : {label}")
                })
            })
            .collect()
    }
}
