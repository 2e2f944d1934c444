// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confreview_audit::AuditEvent;
use confreview_domain::{Conference, NotificationSetting, ReviewingMode};
use serde_json::{Value, json};

use crate::tests::helpers::{
    AM, MANAGER, OUTSIDER, PRM, REFEREE, create_test_conference, setup, setup_with, user,
};
use crate::{ErrorKind, ServiceError};

#[test]
fn test_reading_mode_returns_its_name() {
    let mut env = setup();
    let answer: Value = env.ok(PRM, "conference.changeReviewingMode", &json!({}));
    assert_eq!(answer, json!("Content and layout reviewing"));
    assert!(env.timeline().is_empty());
}

#[test]
fn test_setting_mode_by_choice_or_name() {
    let mut env = setup();
    let answer: Value = env.ok(PRM, "conference.changeReviewingMode", &json!({ "value": 2 }));
    assert_eq!(answer, json!("Content reviewing"));
    assert_eq!(env.conference().review.mode, ReviewingMode::ContentReviewing);

    let answer: Value = env.ok(
        PRM,
        "conference.changeReviewingMode",
        &json!({ "value": "Layout reviewing" }),
    );
    assert_eq!(answer, json!("Layout reviewing"));
}

#[test]
fn test_unknown_mode_rejected() {
    let mut env = setup();
    let err: ServiceError = env.err(PRM, "conference.changeReviewingMode", &json!({ "value": 7 }));
    assert_eq!(err.code, "ERR-REV10");
    assert_eq!(env.conference().review.mode, ReviewingMode::ContentAndLayoutReviewing);
}

#[test]
fn test_change_states_replaces_verdicts() {
    let mut env = setup();
    let answer: Value = env.ok(
        PRM,
        "conference.changeStates",
        &json!({ "value": ["Accept", "Reject"] }),
    );
    assert_eq!(answer, json!(["Accept", "Reject"]));
    assert_eq!(env.conference().review.states, vec!["Accept", "Reject"]);
}

#[test]
fn test_questions_and_criteria_are_separate_lists() {
    let mut env = setup();
    env.ok(
        PRM,
        "conference.changeQuestions",
        &json!({ "value": ["Originality", "Relevance"] }),
    );
    let criteria: Value = env.ok(PRM, "conference.changeCriteria", &json!({}));
    assert_eq!(criteria, json!(["Formatting"]));
    assert_eq!(
        env.conference().review.reviewing_questions,
        vec!["Originality", "Relevance"]
    );
}

#[test]
fn test_outsider_cannot_change_setup() {
    let mut env = setup();
    let err: ServiceError = env.err(OUTSIDER, "conference.changeStates", &json!({ "value": [] }));
    assert_eq!(err.code, "ERR-P4");
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[test]
fn test_conference_manager_passes_fallback() {
    let mut env = setup();
    env.ok(MANAGER, "conference.changeStates", &json!({ "value": ["Accept"] }));
    assert_eq!(env.conference().review.states, vec!["Accept"]);
}

#[test]
fn test_change_records_audit_event() {
    let mut env = setup();
    env.ok(PRM, "conference.changeReviewingMode", &json!({ "value": 3 }));
    let timeline: Vec<AuditEvent> = env.timeline();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].action.name, "SetReviewingMode");
    assert_eq!(timeline[0].actor.id, PRM);
    assert!(timeline[0].cause.id.starts_with("rpc-"));
}

#[test]
fn test_delete_template() {
    let mut env = setup();
    let answer: Value = env.ok(PRM, "conference.deleteTemplate", &json!({ "templateId": "tpl-1" }));
    assert_eq!(answer, json!(true));
    assert!(env.conference().review.templates.is_empty());

    let err: ServiceError = env.err(
        PRM,
        "conference.deleteTemplate",
        &json!({ "templateId": "tpl-1" }),
    );
    assert_eq!(err.code, "ERR-NF2");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[test]
fn test_competences_need_a_user() {
    let mut env = setup();
    let err: ServiceError = env.err(PRM, "conference.changeCompetences", &json!({ "value": [] }));
    assert_eq!(err.code, "ERR-REV4");
}

#[test]
fn test_abstract_manager_sets_competences() {
    let mut env = setup();
    let answer: Value = env.ok(
        AM,
        "conference.changeCompetences",
        &json!({ "user": REFEREE, "value": ["physics", "optics"] }),
    );
    assert_eq!(answer, json!(["physics", "optics"]));
    assert_eq!(
        env.conference().review.competences_of(&user(REFEREE)),
        ["physics", "optics"]
    );
}

#[test]
fn test_default_due_date_round_trip() {
    let mut env = setup();
    let answer: Value = env.ok(
        PRM,
        "conference.changeDefaultDueDate",
        &json!({ "dueDateToChange": "referee", "value": "01/06/2026 12:00" }),
    );
    assert_eq!(answer, json!("01/06/2026 12:00"));

    let editor: Value = env.ok(
        PRM,
        "conference.changeDefaultDueDate",
        &json!({ "dueDateToChange": "editor" }),
    );
    assert_eq!(editor, Value::Null);
}

#[test]
fn test_default_due_date_needs_a_role() {
    let mut env = setup();
    let set: ServiceError = env.err(
        PRM,
        "conference.changeDefaultDueDate",
        &json!({ "value": "01/06/2026 12:00" }),
    );
    assert_eq!(set.code, "ERR-REV3a");

    let read: ServiceError = env.err(
        PRM,
        "conference.changeDefaultDueDate",
        &json!({ "dueDateToChange": "author" }),
    );
    assert_eq!(read.code, "ERR-REV3b");
}

#[test]
fn test_malformed_due_date_rejected() {
    let mut env = setup();
    let err: ServiceError = env.err(
        PRM,
        "conference.changeDefaultDueDate",
        &json!({ "dueDateToChange": "referee", "value": "2026-06-01" }),
    );
    assert_eq!(err.code, "ERR-P1");
    assert!(env.timeline().is_empty());
}

#[test]
fn test_abstract_reviewer_due_date_is_for_abstract_managers() {
    let mut env = setup();
    let err: ServiceError = env.err(
        PRM,
        "conference.changeAbstractReviewerDefaultDueDate",
        &json!({ "value": "15/05/2026 09:30" }),
    );
    assert_eq!(err.code, "ERR-P4");

    let answer: Value = env.ok(
        AM,
        "conference.changeAbstractReviewerDefaultDueDate",
        &json!({ "value": "15/05/2026 09:30" }),
    );
    assert_eq!(answer, json!("15/05/2026 09:30"));
}

#[test]
fn test_notification_toggles() {
    let mut env = setup();
    let before: Value = env.ok(PRM, "conference.RefereeEmailNotif", &json!({}));
    assert_eq!(before, json!(false));

    let after: Value = env.ok(PRM, "conference.RefereeEmailNotif", &json!({ "value": "true" }));
    assert_eq!(after, json!(true));

    let review = env.conference().review;
    assert!(review.is_enabled(NotificationSetting::RefereeTeam));
    assert!(!review.is_enabled(NotificationSetting::EditorTeam));
}

#[test]
fn test_attribute_list_is_distinct() {
    let mut env = setup();
    let tracks: Value = env.ok(
        REFEREE,
        "conference.attributeList",
        &json!({ "attribute": "track" }),
    );
    assert_eq!(
        tracks,
        json!([
            { "id": "t1", "title": "Track One" },
            { "id": "t2", "title": "Track Two" },
        ])
    );

    let types: Value = env.ok(PRM, "conference.attributeList", &json!({ "attribute": "type" }));
    assert_eq!(types, json!([]));
}

#[test]
fn test_attribute_list_needs_known_attribute() {
    let mut env = setup();
    let missing: ServiceError = env.err(PRM, "conference.attributeList", &json!({}));
    assert_eq!(missing.code, "ERR-REV5");
    let unknown: ServiceError = env.err(
        PRM,
        "conference.attributeList",
        &json!({ "attribute": "room" }),
    );
    assert_eq!(unknown.code, "ERR-REV5");
}

#[test]
fn test_contributions_per_selected_attribute() {
    let mut env = setup();
    let ids: Value = env.ok(
        PRM,
        "conference.contributionsIdPerSelectedAttribute",
        &json!({ "attribute": "track", "selectedAttributes": ["t1"] }),
    );
    assert_eq!(ids, json!(["1", "2"]));

    let err: ServiceError = env.err(
        PRM,
        "conference.contributionsIdPerSelectedAttribute",
        &json!({ "attribute": "session" }),
    );
    assert_eq!(err.code, "ERR-REV5");
}

#[test]
fn test_user_competences_list() {
    let mut conference: Conference = create_test_conference();
    conference
        .review
        .competences
        .insert(user(REFEREE), vec![String::from("optics")]);
    let mut env = setup_with(&conference);

    let team: Value = env.ok(PRM, "conference.userCompetencesList", &json!({ "role": "referee" }));
    assert_eq!(
        team,
        json!([{ "id": REFEREE, "name": "Rita Referee", "competences": ["optics"] }])
    );
}

#[test]
fn test_disabled_reviewing_blocks_non_managers_of_reviewing() {
    let mut conference: Conference = create_test_conference();
    conference.paper_reviewing_enabled = false;
    let mut env = setup_with(&conference);

    let err: ServiceError = env.err(MANAGER, "conference.changeStates", &json!({}));
    assert_eq!(err.code, "ERR-REV1a");
    assert_eq!(err.kind, ErrorKind::Conflict);

    env.ok(PRM, "conference.changeStates", &json!({}));
}

#[test]
fn test_unknown_conference() {
    let mut env = setup();
    let err: ServiceError = env.err(
        PRM,
        "conference.changeStates",
        &json!({ "conference": "nope" }),
    );
    assert_eq!(err.code, "ERR-NF0");
    assert_eq!(err.kind, ErrorKind::NotFound);
}
