// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conference review setup: mode, verdicts, criteria, templates,
//! competences, default due dates and notification toggles.

use confreview::Command;
use confreview_domain::{
    AttributeKind, AttributeRef, Conference, ContributionId, NotificationSetting, ReviewRole,
    ReviewingMode, TeamRole, UserId,
};
use serde_json::{Value, json};
use time::PrimitiveDateTime;

use super::{VALUE, datetime_value, due_date_role};
use crate::dispatch::HandlerContext;
use crate::error::{ServiceError, translate_domain_error};
use crate::params::missing_as;

/// Reads or sets the reviewing mode.
///
/// The new mode may be given as its choice (1-4) or its name; the answer is
/// the mode name.
///
/// # Errors
///
/// Returns `ERR-REV10` for an unknown mode.
pub fn change_reviewing_mode(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    if ctx.params.has(VALUE) {
        let mode: ReviewingMode = ctx.params.parse(VALUE)?;
        ctx.apply(Command::SetReviewingMode { mode })?;
    }
    Ok(json!(ctx.current().review.mode.as_str()))
}

/// Reads or replaces the verdicts.
///
/// # Errors
///
/// Returns a parameter error if `value` is not a list.
pub fn change_states(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    if ctx.params.has(VALUE) {
        let states: Vec<String> = ctx.params.required_list(VALUE, true)?;
        ctx.apply(Command::SetStates { states })?;
    }
    Ok(json!(ctx.current().review.states))
}

/// Reads or replaces the content reviewing questions.
///
/// # Errors
///
/// Returns a parameter error if `value` is not a list.
pub fn change_questions(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    if ctx.params.has(VALUE) {
        let questions: Vec<String> = ctx.params.required_list(VALUE, true)?;
        ctx.apply(Command::SetReviewingQuestions { questions })?;
    }
    Ok(json!(ctx.current().review.reviewing_questions))
}

/// Reads or replaces the layout criteria.
///
/// # Errors
///
/// Returns a parameter error if `value` is not a list.
pub fn change_criteria(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    if ctx.params.has(VALUE) {
        let criteria: Vec<String> = ctx.params.required_list(VALUE, true)?;
        ctx.apply(Command::SetLayoutCriteria { criteria })?;
    }
    Ok(json!(ctx.current().review.layout_criteria))
}

/// Deletes a paper template.
///
/// # Errors
///
/// Returns `ERR-NF2` if the template does not exist.
pub fn delete_template(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let template_id: String = ctx.params.required_scalar("templateId")?;
    ctx.apply(Command::DeleteTemplate { template_id })?;
    Ok(Value::Bool(true))
}

/// Reads or replaces the competences of `user`.
///
/// # Errors
///
/// Returns `ERR-REV4` if no user is given.
pub fn change_competences(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let user: UserId = ctx
        .params
        .required_user("user")
        .map_err(|e| e.with_code("ERR-REV4"))?;
    if ctx.params.has(VALUE) {
        let competences: Vec<String> = ctx.params.required_list(VALUE, true)?;
        ctx.apply(Command::SetCompetences {
            user: user.clone(),
            competences,
        })?;
    }
    Ok(json!(ctx.current().review.competences_of(&user)))
}

/// Reads or sets the conference default due date of the role named by
/// `dueDateToChange`.
///
/// # Errors
///
/// Returns `ERR-REV3a` (set) or `ERR-REV3b` (read) for a missing or unknown
/// role, or `ERR-P1` for a malformed date.
pub fn change_default_due_date(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    if ctx.params.has(VALUE) {
        let role: ReviewRole = due_date_role(ctx, "ERR-REV3a")?;
        let due: PrimitiveDateTime = ctx.params.datetime(VALUE)?;
        ctx.apply(Command::SetDefaultDueDate { role, due })?;
    }
    let role: ReviewRole = due_date_role(ctx, "ERR-REV3b")?;
    Ok(datetime_value(ctx.current().review.default_due_date(role)))
}

/// Reads or sets the default due date of abstract reviewers.
///
/// # Errors
///
/// Returns `ERR-P1` for a malformed date.
pub fn change_abstract_reviewer_default_due_date(
    ctx: &mut HandlerContext<'_>,
) -> Result<Value, ServiceError> {
    if ctx.params.has(VALUE) {
        let due: PrimitiveDateTime = ctx.params.datetime(VALUE)?;
        ctx.apply(Command::SetAbstractReviewerDefaultDueDate { due })?;
    }
    Ok(datetime_value(
        ctx.current().review.default_abstract_reviewer_due_date,
    ))
}

/// Reads or sets the notification setting matching the operation.
///
/// # Errors
///
/// Returns `ERR-P1` if `value` is not a boolean.
pub fn toggle_notification(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let setting: NotificationSetting = ctx.operation.notification_setting().ok_or_else(|| {
        ServiceError::internal(
            "ERR-R1",
            format!("{} is not a notification toggle", ctx.operation),
        )
    })?;
    if ctx.params.has(VALUE) {
        let enabled: bool = ctx.params.required_bool(VALUE)?;
        ctx.apply(Command::SetNotification { setting, enabled })?;
    }
    Ok(Value::Bool(ctx.current().review.is_enabled(setting)))
}

fn attribute_kind(ctx: &HandlerContext<'_>) -> Result<AttributeKind, ServiceError> {
    let raw: &str = ctx
        .params
        .required_str("attribute")
        .map_err(|e| e.with_code("ERR-REV5"))?;
    raw.parse::<AttributeKind>().map_err(translate_domain_error)
}

/// Lists the distinct types, tracks or sessions used by contributions.
///
/// # Errors
///
/// Returns `ERR-REV5` for a missing or unknown attribute.
pub fn attribute_list(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let kind: AttributeKind = attribute_kind(ctx)?;
    let attributes: Vec<Value> = ctx
        .current()
        .attributes(kind)
        .into_iter()
        .map(|a: &AttributeRef| json!({ "id": a.id, "title": a.title }))
        .collect();
    Ok(Value::Array(attributes))
}

/// Lists the contributions whose attribute is one of `selectedAttributes`.
///
/// # Errors
///
/// Returns `ERR-REV5` if the attribute or the selection is missing.
pub fn contributions_per_selected_attribute(
    ctx: &mut HandlerContext<'_>,
) -> Result<Value, ServiceError> {
    let kind: AttributeKind = attribute_kind(ctx)?;
    let selected: Vec<String> = ctx
        .params
        .required_list("selectedAttributes", true)
        .map_err(missing_as("ERR-REV5"))?;
    let ids: Vec<String> = ctx
        .current()
        .contributions_with_attribute(kind, &selected)
        .iter()
        .map(|id: &ContributionId| id.to_string())
        .collect();
    Ok(json!(ids))
}

/// Lists a team with each member's name and competences.
///
/// # Errors
///
/// Returns `ERR-REV5` for a missing or unknown role.
pub fn user_competences_list(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let raw: &str = ctx
        .params
        .required_str("role")
        .map_err(|e| e.with_code("ERR-REV5"))?;
    let role: TeamRole = raw.parse().map_err(translate_domain_error)?;
    let conference: &Conference = ctx.current();
    let members: Vec<Value> = conference
        .review
        .team(role)
        .iter()
        .map(|user| {
            json!({
                "id": user.as_str(),
                "name": conference.display_name(user),
                "competences": conference.review.competences_of(user),
            })
        })
        .collect();
    Ok(Value::Array(members))
}
