// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confreview::Command;
use confreview_domain::{TeamRole, UserId};
use serde_json::Value;

use crate::dispatch::HandlerContext;
use crate::error::ServiceError;

fn team_role(ctx: &HandlerContext<'_>) -> Result<TeamRole, ServiceError> {
    ctx.operation.team_role().ok_or_else(|| {
        ServiceError::internal(
            "ERR-R1",
            format!("{} is not a team operation", ctx.operation),
        )
    })
}

/// Adds every user of `userList` to the operation's team.
///
/// # Errors
///
/// Returns a parameter error if `userList` is missing, empty or malformed.
pub fn assign_team(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let role: TeamRole = team_role(ctx)?;
    let users: Vec<UserId> = ctx.params.user_list("userList")?;
    ctx.apply(Command::AddTeamMembers { role, users })?;
    Ok(Value::Bool(true))
}

/// Removes `user` from the operation's team.
///
/// The user first loses the matching role on every contribution.
///
/// # Errors
///
/// Returns a parameter error if `user` is missing (`ERR-REV6d` for the
/// reviewer team).
pub fn remove_team(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let role: TeamRole = team_role(ctx)?;
    let user: UserId = match role {
        TeamRole::Reviewer => ctx
            .params
            .required_user("user")
            .map_err(|e| e.with_code("ERR-REV6d"))?,
        TeamRole::PaperReviewManager | TeamRole::Referee | TeamRole::Editor => {
            ctx.params.required_user("user")?
        }
    };
    ctx.apply(Command::RemoveTeamMember { role, user })?;
    Ok(Value::Bool(true))
}
