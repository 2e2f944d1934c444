// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-contribution role assignment over a `contributions` list.
//!
//! The reviewing mode is checked before the target user, so a conference
//! that excludes a role reports that even when no user was given.

use confreview::Command;
use confreview_domain::{ContributionId, ReviewRole, UserId};
use serde_json::Value;

use crate::dispatch::HandlerContext;
use crate::error::{ServiceError, translate_domain_error};

fn ensure_mode_allows(ctx: &HandlerContext<'_>, role: ReviewRole) -> Result<(), ServiceError> {
    ctx.current()
        .review
        .mode
        .ensure_allows(role)
        .map_err(translate_domain_error)
}

fn target_user(ctx: &HandlerContext<'_>, code: &'static str) -> Result<UserId, ServiceError> {
    ctx.params
        .required_user("user")
        .map_err(|e| e.with_code(code))
}

/// Makes `user` the referee of every listed contribution.
///
/// # Errors
///
/// Returns `ERR-REV6aa` if the mode has no referees and `ERR-REV6a` if no
/// user is given.
pub fn assign_referee(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    ensure_mode_allows(ctx, ReviewRole::Referee)?;
    let user: UserId = target_user(ctx, "ERR-REV6a")?;
    let contributions: Vec<ContributionId> = ctx.contributions.clone();
    ctx.apply(Command::AssignReferee {
        contributions,
        user,
    })?;
    Ok(Value::Bool(true))
}

/// Removes the referee of every listed contribution.
///
/// # Errors
///
/// Returns an error if the transition cannot be applied.
pub fn remove_referee(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contributions: Vec<ContributionId> = ctx.contributions.clone();
    ctx.apply(Command::RemoveReferee {
        contributions,
    })?;
    Ok(Value::Bool(true))
}

/// Makes `user` the editor of every listed contribution.
///
/// # Errors
///
/// Returns `ERR-REV6bb` if the mode has no editors, `ERR-REV6b` if no user
/// is given and `ERR-REV9a` if a contribution still needs a referee.
pub fn assign_editor(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    ensure_mode_allows(ctx, ReviewRole::Editor)?;
    let user: UserId = target_user(ctx, "ERR-REV6b")?;
    let contributions: Vec<ContributionId> = ctx.contributions.clone();
    ctx.apply(Command::AssignEditor {
        contributions,
        user,
    })?;
    Ok(Value::Bool(true))
}

/// Removes the editor of every listed contribution.
///
/// # Errors
///
/// Returns an error if the transition cannot be applied.
pub fn remove_editor(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contributions: Vec<ContributionId> = ctx.contributions.clone();
    ctx.apply(Command::RemoveEditor {
        contributions,
    })?;
    Ok(Value::Bool(true))
}

/// Adds `user` to the reviewers of every listed contribution.
///
/// # Errors
///
/// Returns `ERR-REV6cc` if the mode has no reviewers, `ERR-REV6c` if no user
/// is given and `ERR-REV9b` if a contribution has no referee.
pub fn add_reviewer(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    ensure_mode_allows(ctx, ReviewRole::Reviewer)?;
    let user: UserId = target_user(ctx, "ERR-REV6c")?;
    let contributions: Vec<ContributionId> = ctx.contributions.clone();
    ctx.apply(Command::AddReviewer {
        contributions,
        user,
    })?;
    Ok(Value::Bool(true))
}

/// Removes `user` from the reviewers of every listed contribution.
///
/// # Errors
///
/// Returns `ERR-REV6d` if no user is given.
pub fn remove_reviewer(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let user: UserId = target_user(ctx, "ERR-REV6d")?;
    let contributions: Vec<ContributionId> = ctx.contributions.clone();
    ctx.apply(Command::RemoveReviewer {
        contributions,
        user,
    })?;
    Ok(Value::Bool(true))
}

/// Removes every reviewer of the listed contributions.
///
/// # Errors
///
/// Returns an error if the transition cannot be applied.
pub fn remove_all_reviewers(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let contributions: Vec<ContributionId> = ctx.contributions.clone();
    ctx.apply(Command::RemoveAllReviewers {
        contributions,
    })?;
    Ok(Value::Bool(true))
}
