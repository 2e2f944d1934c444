// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::notification::Notification;
use crate::state::{State, TransitionResult};
use confreview_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use confreview_domain::{
    Conference, ConferenceId, ContributionId, DomainError, JudgementSlot, LinkedObject,
    NotificationSetting, Review, ReviewManager, ReviewRole, ReviewingMode, TeamRole, Template,
    UserId,
};
use std::collections::BTreeMap;

/// Applies a command to the current state, producing a new state and audit event.
///
/// The command runs against a copy of the conference. If any step fails the
/// copy is discarded, so a command touching several contributions either
/// changes all of them or none.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, audit event and
///   notifications to deliver
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates a domain rule or names a
/// contribution, template or folder that does not exist.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let mut conference: Conference = state.conference.clone();
    let mut notifications: Vec<Notification> = Vec::new();
    let name: &'static str = command.name();

    let details: String = match command {
        Command::SetReviewingMode { mode } => {
            conference.review.mode = mode;
            format!("mode set to '{mode}'")
        }
        Command::SetStates { states } => {
            let details: String = format!("states set to {states:?}");
            conference.review.states = states;
            details
        }
        Command::SetReviewingQuestions { questions } => {
            let details: String = format!("reviewing questions set to {questions:?}");
            conference.review.reviewing_questions = questions;
            details
        }
        Command::SetLayoutCriteria { criteria } => {
            let details: String = format!("layout criteria set to {criteria:?}");
            conference.review.layout_criteria = criteria;
            details
        }
        Command::DeleteTemplate { template_id } => {
            let removed: Template = conference.review.delete_template(&template_id)?;
            format!("deleted template '{}' ({})", removed.id, removed.name)
        }
        Command::SetCompetences { user, competences } => {
            let details: String = format!("competences of {user} set to {competences:?}");
            conference.review.competences.insert(user, competences);
            details
        }
        Command::SetDefaultDueDate { role, due } => {
            conference.review.set_default_due_date(role, due);
            format!("default {role} due date set to {due}")
        }
        Command::SetAbstractReviewerDefaultDueDate { due } => {
            conference.review.default_abstract_reviewer_due_date = Some(due);
            format!("default abstract reviewer due date set to {due}")
        }
        Command::SetNotification { setting, enabled } => {
            conference.review.set_notification(setting, enabled);
            format!("notification {setting:?} enabled={enabled}")
        }
        Command::AssignReferee {
            contributions,
            user,
        } => assign_single(
            &mut conference,
            ReviewRole::Referee,
            &contributions,
            &user,
            &mut notifications,
        )?,
        Command::AssignEditor {
            contributions,
            user,
        } => assign_single(
            &mut conference,
            ReviewRole::Editor,
            &contributions,
            &user,
            &mut notifications,
        )?,
        Command::RemoveReferee { contributions } => remove_single(
            &mut conference,
            ReviewRole::Referee,
            &contributions,
            &mut notifications,
        )?,
        Command::RemoveEditor { contributions } => remove_single(
            &mut conference,
            ReviewRole::Editor,
            &contributions,
            &mut notifications,
        )?,
        Command::AddReviewer {
            contributions,
            user,
        } => add_reviewer(&mut conference, &contributions, &user, &mut notifications)?,
        Command::RemoveReviewer {
            contributions,
            user,
        } => remove_reviewer(&mut conference, &contributions, &user, &mut notifications)?,
        Command::RemoveAllReviewers { contributions } => {
            remove_all_reviewers(&mut conference, &contributions, &mut notifications)?
        }
        Command::AddTeamMembers { role, users } => {
            add_team_members(&mut conference, role, users, &mut notifications)
        }
        Command::RemoveTeamMember { role, user } => {
            remove_team_member(&mut conference, role, &user, &mut notifications)
        }
        Command::SetDueDate {
            contribution,
            role,
            due,
        } => {
            conference
                .contribution_mut(&contribution)?
                .review_manager
                .last_review_mut()
                .set_due_date(role, due);
            format!("{role} due date of contribution {contribution} set to {due}")
        }
        Command::SetVerdict {
            contribution,
            slot,
            verdict,
        } => {
            let states: Vec<String> = conference.review.states.clone();
            last_review_of(&mut conference, &contribution)?
                .judgement_mut(&slot)
                .set_verdict(&verdict, &states)?;
            format!("{} verdict on contribution {contribution} set to '{verdict}'", slot.role())
        }
        Command::SetComments {
            contribution,
            slot,
            comments,
        } => {
            last_review_of(&mut conference, &contribution)?
                .judgement_mut(&slot)
                .set_comments(comments)?;
            format!("{} comments on contribution {contribution} updated", slot.role())
        }
        Command::SetAnswer {
            contribution,
            slot,
            question,
            value,
        } => {
            let questions: Vec<String> = conference.review.criteria_for(slot.role()).to_vec();
            last_review_of(&mut conference, &contribution)?
                .judgement_mut(&slot)
                .set_answer(&question, value, &questions)?;
            format!(
                "{} answer '{question}' on contribution {contribution} set to {value}",
                slot.role()
            )
        }
        Command::ToggleSubmitted {
            contribution,
            slot,
            author,
        } => toggle_submitted(
            &mut conference,
            &contribution,
            &slot,
            author,
            &mut notifications,
        )?,
        Command::CreateFolder {
            link,
            title,
            description,
            protection,
            is_always_visible,
        } => {
            ensure_link_exists(&conference, &link)?;
            let id: u64 = conference.folders.create_folder(
                link,
                &title,
                description,
                protection,
                is_always_visible,
            )?;
            format!("created folder {id} '{title}'")
        }
        Command::AddAttachment {
            link,
            folder_id,
            title,
            link_url,
        } => {
            let folder_id: u64 = match folder_id {
                Some(id) => id,
                None => {
                    ensure_link_exists(&conference, &link)?;
                    conference.folders.get_or_create_default(&link).id
                }
            };
            let id: u64 = conference
                .folders
                .add_attachment(folder_id, &title, &link_url)?;
            format!("added attachment {id} '{title}' to folder {folder_id}")
        }
    };

    let before: StateSnapshot = state.to_snapshot();
    let new_state: State = State::new(conference);
    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(
        new_state.conference.id.clone(),
        actor,
        cause,
        Action::new(String::from(name), Some(details)),
        before,
        after,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
        notifications,
    })
}

fn last_review_of<'a>(
    conference: &'a mut Conference,
    contribution: &ContributionId,
) -> Result<&'a mut Review, DomainError> {
    Ok(conference
        .contribution_mut(contribution)?
        .review_manager
        .last_review_mut())
}

fn ensure_link_exists(conference: &Conference, link: &LinkedObject) -> Result<(), DomainError> {
    match link {
        LinkedObject::Conference => Ok(()),
        LinkedObject::Contribution(id) => conference.contribution(id).map(|_| ()),
    }
}

fn format_ids(ids: &[ContributionId]) -> String {
    ids.iter()
        .map(ContributionId::as_str)
        .collect::<Vec<&str>>()
        .join(",")
}

/// Pushes one removal notification per previous holder.
fn notify_removed(
    conference: &ConferenceId,
    role: ReviewRole,
    removed: BTreeMap<UserId, Vec<ContributionId>>,
    notifications: &mut Vec<Notification>,
) {
    for (user, contributions) in removed {
        notifications.push(Notification::Assignment {
            conference: conference.clone(),
            role,
            user,
            contributions,
            removed: true,
        });
    }
}

/// Assigns the referee or editor of several contributions, displacing the
/// current holder where there is one.
fn assign_single(
    conference: &mut Conference,
    role: ReviewRole,
    contributions: &[ContributionId],
    user: &UserId,
    notifications: &mut Vec<Notification>,
) -> Result<String, DomainError> {
    let mode: ReviewingMode = conference.review.mode;
    mode.ensure_allows(role)?;
    let notify: bool = conference
        .review
        .is_enabled(NotificationSetting::for_assignment(role));

    let mut assigned: Vec<ContributionId> = Vec::new();
    let mut displaced: BTreeMap<UserId, Vec<ContributionId>> = BTreeMap::new();
    for id in contributions {
        let manager: &mut ReviewManager = &mut conference.contribution_mut(id)?.review_manager;
        if mode.requires_referee(role) && !manager.has_referee() {
            return Err(DomainError::RefereeRequired {
                role,
                contribution: id.to_string(),
            });
        }
        if manager.holds(role, user) {
            continue;
        }
        let previous: Option<UserId> = match role {
            ReviewRole::Referee => manager.remove_referee(),
            ReviewRole::Editor | ReviewRole::Reviewer => manager.remove_editor(),
        };
        if let Some(previous) = previous {
            displaced.entry(previous).or_default().push(id.clone());
        }
        match role {
            ReviewRole::Referee => manager.set_referee(user.clone())?,
            ReviewRole::Editor | ReviewRole::Reviewer => manager.set_editor(user.clone())?,
        }
        assigned.push(id.clone());
    }

    if notify {
        notify_removed(&conference.id, role, displaced, notifications);
        if !assigned.is_empty() {
            notifications.push(Notification::Assignment {
                conference: conference.id.clone(),
                role,
                user: user.clone(),
                contributions: assigned.clone(),
                removed: false,
            });
        }
    }
    Ok(format!(
        "{user} assigned as {role} to [{}]",
        format_ids(&assigned)
    ))
}

fn remove_single(
    conference: &mut Conference,
    role: ReviewRole,
    contributions: &[ContributionId],
    notifications: &mut Vec<Notification>,
) -> Result<String, DomainError> {
    let notify: bool = conference
        .review
        .is_enabled(NotificationSetting::for_assignment(role));
    let mut removed: BTreeMap<UserId, Vec<ContributionId>> = BTreeMap::new();
    for id in contributions {
        let manager: &mut ReviewManager = &mut conference.contribution_mut(id)?.review_manager;
        let previous: Option<UserId> = match role {
            ReviewRole::Referee => manager.remove_referee(),
            ReviewRole::Editor | ReviewRole::Reviewer => manager.remove_editor(),
        };
        if let Some(previous) = previous {
            removed.entry(previous).or_default().push(id.clone());
        }
    }
    let details: String = format!("{role} removed from [{}]", format_ids(contributions));
    if notify {
        notify_removed(&conference.id, role, removed, notifications);
    }
    Ok(details)
}

fn add_reviewer(
    conference: &mut Conference,
    contributions: &[ContributionId],
    user: &UserId,
    notifications: &mut Vec<Notification>,
) -> Result<String, DomainError> {
    let mode: ReviewingMode = conference.review.mode;
    mode.ensure_allows(ReviewRole::Reviewer)?;
    let notify: bool = conference
        .review
        .is_enabled(NotificationSetting::ReviewerForContribution);

    let mut added: Vec<ContributionId> = Vec::new();
    for id in contributions {
        let manager: &mut ReviewManager = &mut conference.contribution_mut(id)?.review_manager;
        if mode.requires_referee(ReviewRole::Reviewer) && !manager.has_referee() {
            return Err(DomainError::RefereeRequired {
                role: ReviewRole::Reviewer,
                contribution: id.to_string(),
            });
        }
        if manager.add_reviewer(user.clone()) {
            added.push(id.clone());
        }
    }
    if notify && !added.is_empty() {
        notifications.push(Notification::Assignment {
            conference: conference.id.clone(),
            role: ReviewRole::Reviewer,
            user: user.clone(),
            contributions: added.clone(),
            removed: false,
        });
    }
    Ok(format!("{user} added as Reviewer to [{}]", format_ids(&added)))
}

fn remove_reviewer(
    conference: &mut Conference,
    contributions: &[ContributionId],
    user: &UserId,
    notifications: &mut Vec<Notification>,
) -> Result<String, DomainError> {
    let notify: bool = conference
        .review
        .is_enabled(NotificationSetting::ReviewerForContribution);
    let mut removed: Vec<ContributionId> = Vec::new();
    for id in contributions {
        if conference
            .contribution_mut(id)?
            .review_manager
            .remove_reviewer(user)
        {
            removed.push(id.clone());
        }
    }
    if notify && !removed.is_empty() {
        notifications.push(Notification::Assignment {
            conference: conference.id.clone(),
            role: ReviewRole::Reviewer,
            user: user.clone(),
            contributions: removed.clone(),
            removed: true,
        });
    }
    Ok(format!(
        "{user} removed as Reviewer from [{}]",
        format_ids(&removed)
    ))
}

fn remove_all_reviewers(
    conference: &mut Conference,
    contributions: &[ContributionId],
    notifications: &mut Vec<Notification>,
) -> Result<String, DomainError> {
    let notify: bool = conference
        .review
        .is_enabled(NotificationSetting::ReviewerForContribution);
    let mut removed: BTreeMap<UserId, Vec<ContributionId>> = BTreeMap::new();
    for id in contributions {
        for user in conference
            .contribution_mut(id)?
            .review_manager
            .remove_all_reviewers()
        {
            removed.entry(user).or_default().push(id.clone());
        }
    }
    let details: String = format!(
        "{} reviewer(s) removed from [{}]",
        removed.len(),
        format_ids(contributions)
    );
    if notify {
        notify_removed(&conference.id, ReviewRole::Reviewer, removed, notifications);
    }
    Ok(details)
}

fn add_team_members(
    conference: &mut Conference,
    role: TeamRole,
    users: Vec<UserId>,
    notifications: &mut Vec<Notification>,
) -> String {
    let notify: bool = conference
        .review
        .is_enabled(NotificationSetting::for_team(role));
    let mut added: Vec<String> = Vec::new();
    for user in users {
        if conference.review.team_mut(role).insert(user.clone()) {
            added.push(user.to_string());
            if notify {
                notifications.push(Notification::Team {
                    conference: conference.id.clone(),
                    role,
                    user,
                    added: true,
                });
            }
        }
    }
    format!("added [{}] to {} team", added.join(","), role.as_str())
}

/// Removes a user from a team after stripping the matching role from every
/// contribution they hold it on.
fn remove_team_member(
    conference: &mut Conference,
    role: TeamRole,
    user: &UserId,
    notifications: &mut Vec<Notification>,
) -> String {
    let mut stripped: Vec<ContributionId> = Vec::new();
    if let Some(review_role) = role.review_role() {
        stripped = conference.contributions_held_by(review_role, user);
        for id in &stripped {
            if let Some(contribution) = conference.contributions.get_mut(id) {
                let manager: &mut ReviewManager = &mut contribution.review_manager;
                match review_role {
                    ReviewRole::Referee => {
                        manager.remove_referee();
                    }
                    ReviewRole::Editor => {
                        manager.remove_editor();
                    }
                    ReviewRole::Reviewer => {
                        manager.remove_reviewer(user);
                    }
                }
            }
        }
        if !stripped.is_empty()
            && conference
                .review
                .is_enabled(NotificationSetting::for_assignment(review_role))
        {
            notifications.push(Notification::Assignment {
                conference: conference.id.clone(),
                role: review_role,
                user: user.clone(),
                contributions: stripped.clone(),
                removed: true,
            });
        }
    }

    let was_member: bool = conference.review.team_mut(role).remove(user);
    if was_member
        && conference
            .review
            .is_enabled(NotificationSetting::for_team(role))
    {
        notifications.push(Notification::Team {
            conference: conference.id.clone(),
            role,
            user: user.clone(),
            added: false,
        });
    }
    format!(
        "removed {user} from {} team (unassigned from [{}])",
        role.as_str(),
        format_ids(&stripped)
    )
}

fn toggle_submitted(
    conference: &mut Conference,
    contribution: &ContributionId,
    slot: &JudgementSlot,
    author: UserId,
    notifications: &mut Vec<Notification>,
) -> Result<String, DomainError> {
    let role: ReviewRole = slot.role();
    let notify_authors: bool = conference
        .review
        .is_enabled(NotificationSetting::for_judgement(role));
    let submitted: bool = last_review_of(conference, contribution)?
        .judgement_mut(slot)
        .toggle_submitted(author.clone())?;
    notifications.push(Notification::Judgement {
        conference: conference.id.clone(),
        contribution: contribution.clone(),
        role,
        author,
        withdrawn: !submitted,
        notify_authors,
    });
    Ok(if submitted {
        format!("{role} judgement on contribution {contribution} submitted")
    } else {
        format!("{role} judgement on contribution {contribution} withdrawn")
    })
}
