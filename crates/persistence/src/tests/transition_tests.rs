// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_conference, transition, user};
use crate::{Persistence, PersistenceError};
use confreview::{Command, TransitionResult};
use confreview_audit::AuditEvent;
use confreview_domain::{Conference, ReviewingMode, TeamRole};

#[test]
fn test_persist_transition_stores_snapshot_and_event() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let conference: Conference = create_test_conference("conf-1");
    persistence.save_conference(&conference).unwrap();

    let result: TransitionResult = transition(
        conference.clone(),
        Command::SetReviewingMode {
            mode: ReviewingMode::ContentReviewing,
        },
    );
    let event_id: i64 = persistence.persist_transition(&result).unwrap();

    let loaded: Conference = persistence.load_conference(&conference.id).unwrap();
    assert_eq!(loaded.review.mode, ReviewingMode::ContentReviewing);

    let event: AuditEvent = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(event.event_id, Some(event_id));
    assert_eq!(event.conference, conference.id);
    assert_eq!(event.action.name, "SetReviewingMode");
    assert_eq!(event.actor, result.audit_event.actor);
    assert_eq!(event.before, result.audit_event.before);
    assert_eq!(event.after, result.audit_event.after);
}

#[test]
fn test_persist_transition_creates_missing_snapshot() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let conference: Conference = create_test_conference("conf-1");

    let result: TransitionResult = transition(
        conference.clone(),
        Command::AddTeamMembers {
            role: TeamRole::Referee,
            users: vec![user("ref-1")],
        },
    );
    persistence.persist_transition(&result).unwrap();

    let loaded: Conference = persistence.load_conference(&conference.id).unwrap();
    assert!(loaded.review.referees.contains(&user("ref-1")));
}

#[test]
fn test_audit_timeline_is_scoped_and_ordered() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: Conference = create_test_conference("conf-1");
    let other: Conference = create_test_conference("conf-2");

    let step_one: TransitionResult = transition(
        first.clone(),
        Command::SetReviewingMode {
            mode: ReviewingMode::LayoutReviewing,
        },
    );
    persistence.persist_transition(&step_one).unwrap();
    let step_two: TransitionResult = transition(
        step_one.new_state.conference.clone(),
        Command::SetStates {
            states: vec![String::from("Accept")],
        },
    );
    persistence.persist_transition(&step_two).unwrap();
    let unrelated: TransitionResult = transition(
        other,
        Command::SetReviewingMode {
            mode: ReviewingMode::ContentReviewing,
        },
    );
    persistence.persist_transition(&unrelated).unwrap();

    let timeline: Vec<AuditEvent> = persistence.get_audit_timeline(&first.id).unwrap();
    let names: Vec<&str> = timeline.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(names, vec!["SetReviewingMode", "SetStates"]);
    assert!(timeline[0].event_id < timeline[1].event_id);
}

#[test]
fn test_get_missing_event_fails() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<AuditEvent, PersistenceError> = persistence.get_audit_event(42);

    assert_eq!(result, Err(PersistenceError::EventNotFound(42)));
}
