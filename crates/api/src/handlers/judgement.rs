// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Judgements on the current review cycle of one contribution.
//!
//! The judgement is selected by the `current` parameter. A reviewer always
//! works on their own judgement; reading one that was never touched answers
//! as if it were empty.

use confreview::Command;
use confreview_domain::{
    Conference, ContributionId, Judgement, JudgementSlot, Review, ReviewRole, UserId,
};
use serde_json::{Value, json};
use time::PrimitiveDateTime;

use super::{VALUE, datetime_value, due_date_role};
use crate::dispatch::HandlerContext;
use crate::error::{ServiceError, translate_domain_error};

fn last_review<'c>(
    conference: &'c Conference,
    contribution: &ContributionId,
) -> Result<Option<&'c Review>, ServiceError> {
    Ok(conference
        .contribution(contribution)
        .map_err(translate_domain_error)?
        .review_manager
        .last_review())
}

fn current_judgement<'c>(
    conference: &'c Conference,
    contribution: &ContributionId,
    slot: &JudgementSlot,
) -> Result<Option<&'c Judgement>, ServiceError> {
    Ok(last_review(conference, contribution)?.and_then(|review| review.judgement(slot)))
}

/// Reads or sets the due date of the role named by `dueDateToChange`.
///
/// A cycle without its own due date answers with the conference default.
///
/// # Errors
///
/// Returns `ERR-REV3c` (set) or `ERR-REV3d` (read) for a missing or unknown
/// role.
pub fn change_due_date(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contribution: ContributionId = ctx.contribution_id()?.clone();
    if ctx.params.has(VALUE) {
        let role: ReviewRole = due_date_role(ctx, "ERR-REV3c")?;
        let due: PrimitiveDateTime = ctx.params.datetime(VALUE)?;
        ctx.apply(Command::SetDueDate {
            contribution: contribution.clone(),
            role,
            due,
        })?;
    }
    let role: ReviewRole = due_date_role(ctx, "ERR-REV3d")?;
    let conference: &Conference = ctx.current();
    let due: Option<PrimitiveDateTime> = last_review(conference, &contribution)?
        .and_then(|review| review.due_date(role))
        .or_else(|| conference.review.default_due_date(role));
    Ok(datetime_value(due))
}

/// Reads or sets the verdict. An unset verdict reads as `"None"`.
///
/// # Errors
///
/// Returns `ERR-REV7` without a judgement kind, `ERR-REV8a` if the
/// judgement is submitted and `ERR-REV13` for an unknown verdict.
pub fn change_judgement(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contribution: ContributionId = ctx.contribution_id()?.clone();
    let slot: JudgementSlot = ctx.judgement_slot()?;
    if ctx.params.has(VALUE) {
        let verdict: String = ctx.params.required_str(VALUE)?.to_string();
        ctx.apply(Command::SetVerdict {
            contribution: contribution.clone(),
            slot: slot.clone(),
            verdict,
        })?;
    }
    let verdict: Option<&str> =
        current_judgement(ctx.current(), &contribution, &slot)?.and_then(Judgement::verdict);
    Ok(json!(verdict.unwrap_or("None")))
}

/// Reads or replaces the comments.
///
/// # Errors
///
/// Returns `ERR-REV7` without a judgement kind and `ERR-REV8b` if the
/// judgement is submitted.
pub fn change_comments(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contribution: ContributionId = ctx.contribution_id()?.clone();
    let slot: JudgementSlot = ctx.judgement_slot()?;
    if ctx.params.has(VALUE) {
        let comments: String = ctx.params.required_str(VALUE)?.to_string();
        ctx.apply(Command::SetComments {
            contribution: contribution.clone(),
            slot: slot.clone(),
            comments,
        })?;
    }
    let comments: &str = current_judgement(ctx.current(), &contribution, &slot)?
        .map_or("", Judgement::comments);
    Ok(json!(comments))
}

/// Reads or sets the answer to `criterion`.
///
/// # Errors
///
/// Returns `ERR-REV7` without a judgement kind, `ERR-REV8c` if the
/// judgement is submitted, `ERR-REV14` for an unknown criterion and
/// `ERR-REV15` for an answer outside the scale.
pub fn change_criteria(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contribution: ContributionId = ctx.contribution_id()?.clone();
    let slot: JudgementSlot = ctx.judgement_slot()?;
    let question: String = ctx.params.required_scalar("criterion")?;
    if ctx.params.has(VALUE) {
        let value: i64 = ctx.params.required_i64(VALUE)?;
        ctx.apply(Command::SetAnswer {
            contribution: contribution.clone(),
            slot: slot.clone(),
            question: question.clone(),
            value,
        })?;
    }
    let answer: Option<u8> =
        current_judgement(ctx.current(), &contribution, &slot)?.and_then(|j| j.answer(&question));
    Ok(json!(answer))
}

/// Renders every answered criterion as `"<criterion> : <label>"`.
///
/// # Errors
///
/// Returns `ERR-REV7` without a judgement kind.
pub fn get_criteria(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contribution: ContributionId = ctx.contribution_id()?.clone();
    let slot: JudgementSlot = ctx.judgement_slot()?;
    let conference: &Conference = ctx.current();
    let questions: &[String] = conference.review.criteria_for(slot.role());
    let lines: Vec<String> = current_judgement(conference, &contribution, &slot)?
        .map(|j| j.criteria_display(questions))
        .unwrap_or_default();
    Ok(json!(lines))
}

/// Submits or withdraws the judgement when `value` is present, and answers
/// with the submitted flag.
///
/// # Errors
///
/// Returns `ERR-REV7` without a judgement kind and `ERR-REV9` when
/// submitting a judgement without a verdict.
pub fn set_submitted(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contribution: ContributionId = ctx.contribution_id()?.clone();
    let slot: JudgementSlot = ctx.judgement_slot()?;
    if ctx.params.has(VALUE) {
        let author: UserId = ctx.actor.id.clone();
        ctx.apply(Command::ToggleSubmitted {
            contribution: contribution.clone(),
            slot: slot.clone(),
            author,
        })?;
    }
    let submitted: bool = current_judgement(ctx.current(), &contribution, &slot)?
        .is_some_and(Judgement::is_submitted);
    Ok(Value::Bool(submitted))
}
