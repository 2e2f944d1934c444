// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confreview::Notification;
use confreview_domain::{Conference, ReviewManager, ReviewRole, ReviewingMode};
use serde_json::{Value, json};

use crate::tests::helpers::{
    OUTSIDER, PRM, TestEnv, contribution_id, create_test_conference, setup, setup_with, user,
};
use crate::{ErrorKind, ServiceError};

fn manager(conference: &Conference, id: &str) -> ReviewManager {
    conference
        .contribution(&contribution_id(id))
        .unwrap()
        .review_manager
        .clone()
}

fn assign_referee(env: &mut TestEnv, contributions: &[&str], referee: &str) {
    env.ok(
        PRM,
        "conference.assignReferee",
        &json!({ "contributions": contributions, "user": referee }),
    );
}

#[test]
fn test_assign_referee_to_several_contributions() {
    let mut env = setup();
    let answer: Value = env.ok(
        PRM,
        "conference.assignReferee",
        &json!({ "contributions": ["1", "2"], "user": { "id": "alice" } }),
    );
    assert_eq!(answer, json!(true));

    let conference: Conference = env.conference();
    assert_eq!(manager(&conference, "1").referee(), Some(&user("alice")));
    assert_eq!(manager(&conference, "2").referee(), Some(&user("alice")));
    assert!(manager(&conference, "3").referee().is_none());
}

#[test]
fn test_contribution_keeps_exactly_one_referee() {
    let mut env = setup();
    assign_referee(&mut env, &["1"], "alice");
    assign_referee(&mut env, &["1"], "bob");
    let conference: Conference = env.conference();
    assert_eq!(manager(&conference, "1").referee(), Some(&user("bob")));
}

#[test]
fn test_numeric_contribution_ids_are_accepted() {
    let mut env = setup();
    env.ok(
        PRM,
        "conference.assignReferee",
        &json!({ "contributions": [1, 3], "user": "alice" }),
    );
    let conference: Conference = env.conference();
    assert!(manager(&conference, "3").is_referee(&user("alice")));
}

#[test]
fn test_mode_is_checked_before_user() {
    let mut conference: Conference = create_test_conference();
    conference.review.mode = ReviewingMode::NoReviewing;
    let mut env = setup_with(&conference);

    let err: ServiceError = env.err(
        PRM,
        "conference.assignReferee",
        &json!({ "contributions": ["1"] }),
    );
    assert_eq!(err.code, "ERR-REV6aa");
}

#[test]
fn test_mode_excludes_roles() {
    let mut conference: Conference = create_test_conference();
    conference.review.mode = ReviewingMode::ContentReviewing;
    let mut env = setup_with(&conference);
    let err: ServiceError = env.err(
        PRM,
        "conference.assignEditor",
        &json!({ "contributions": ["1"], "user": "bob" }),
    );
    assert_eq!(err.code, "ERR-REV6bb");

    conference.review.mode = ReviewingMode::LayoutReviewing;
    env.store(&conference);
    let err: ServiceError = env.err(
        PRM,
        "conference.addReviewer",
        &json!({ "contributions": ["1"], "user": "carol" }),
    );
    assert_eq!(err.code, "ERR-REV6cc");
}

#[test]
fn test_missing_user_codes() {
    let mut env = setup();
    let cases: [(&str, &str); 4] = [
        ("conference.assignReferee", "ERR-REV6a"),
        ("conference.assignEditor", "ERR-REV6b"),
        ("conference.addReviewer", "ERR-REV6c"),
        ("conference.removeReviewer", "ERR-REV6d"),
    ];
    for (method, code) in cases {
        let err: ServiceError = env.err(PRM, method, &json!({ "contributions": ["1"] }));
        assert_eq!(err.code, code, "{method}");
    }
}

#[test]
fn test_contribution_list_is_validated() {
    let mut env = setup();
    let missing: ServiceError = env.err(PRM, "conference.removeReferee", &json!({}));
    assert_eq!(missing.code, "ERR-REV2");

    let empty: ServiceError = env.err(
        PRM,
        "conference.removeReferee",
        &json!({ "contributions": [] }),
    );
    assert_eq!(empty.code, "ERR-P2");

    let unknown: ServiceError = env.err(
        PRM,
        "conference.removeReferee",
        &json!({ "contributions": ["1", "99"] }),
    );
    assert_eq!(unknown.code, "ERR-NF1");
    assert_eq!(unknown.kind, ErrorKind::NotFound);
}

#[test]
fn test_editor_needs_a_referee() {
    let mut env = setup();
    let err: ServiceError = env.err(
        PRM,
        "conference.assignEditor",
        &json!({ "contributions": ["1"], "user": "bob" }),
    );
    assert_eq!(err.code, "ERR-REV9a");

    let err: ServiceError = env.err(
        PRM,
        "conference.addReviewer",
        &json!({ "contributions": ["1"], "user": "carol" }),
    );
    assert_eq!(err.code, "ERR-REV9b");
}

#[test]
fn test_layout_only_editor_needs_no_referee() {
    let mut conference: Conference = create_test_conference();
    conference.review.mode = ReviewingMode::LayoutReviewing;
    let mut env = setup_with(&conference);
    env.ok(
        PRM,
        "conference.assignEditor",
        &json!({ "contributions": ["1"], "user": "bob" }),
    );
    assert!(manager(&env.conference(), "1").is_editor(&user("bob")));
}

#[test]
fn test_failed_assignment_changes_nothing() {
    let mut env = setup();
    assign_referee(&mut env, &["1"], "alice");
    let before: Conference = env.conference();
    let events: usize = env.timeline().len();

    let err: ServiceError = env.err(
        PRM,
        "conference.assignEditor",
        &json!({ "contributions": ["1", "3"], "user": "bob" }),
    );
    assert_eq!(err.code, "ERR-REV9a");
    assert_eq!(env.conference(), before);
    assert_eq!(env.timeline().len(), events);
}

#[test]
fn test_referee_of_every_contribution_may_assign_editor() {
    let mut env = setup();
    assign_referee(&mut env, &["1", "2"], "alice");

    env.ok(
        "alice",
        "conference.assignEditor",
        &json!({ "contributions": ["1", "2"], "user": "bob" }),
    );
    let conference: Conference = env.conference();
    assert!(manager(&conference, "2").is_editor(&user("bob")));
}

#[test]
fn test_referee_of_some_contributions_is_denied() {
    let mut env = setup();
    assign_referee(&mut env, &["1"], "alice");
    assign_referee(&mut env, &["3"], "dave");

    let err: ServiceError = env.err(
        "alice",
        "conference.addReviewer",
        &json!({ "contributions": ["1", "3"], "user": "carol" }),
    );
    assert_eq!(err.code, "ERR-P4");
}

#[test]
fn test_referee_cannot_assign_referees() {
    let mut env = setup();
    assign_referee(&mut env, &["1"], "alice");
    let err: ServiceError = env.err(
        "alice",
        "conference.assignReferee",
        &json!({ "contributions": ["1"], "user": "bob" }),
    );
    assert_eq!(err.code, "ERR-P4");
}

#[test]
fn test_reviewers_added_and_removed() {
    let mut env = setup();
    assign_referee(&mut env, &["1", "2"], "alice");
    for reviewer in ["carol", "erin"] {
        env.ok(
            PRM,
            "conference.addReviewer",
            &json!({ "contributions": ["1", "2"], "user": reviewer }),
        );
    }
    env.ok(
        PRM,
        "conference.removeReviewer",
        &json!({ "contributions": ["1"], "user": "carol" }),
    );
    let conference: Conference = env.conference();
    assert!(!manager(&conference, "1").is_reviewer(&user("carol")));
    assert!(manager(&conference, "2").is_reviewer(&user("carol")));

    env.ok(
        PRM,
        "conference.removeAllReviewers",
        &json!({ "contributions": ["1", "2"] }),
    );
    let conference: Conference = env.conference();
    assert!(!manager(&conference, "2").is_reviewer(&user("carol")));
    assert!(!manager(&conference, "2").is_reviewer(&user("erin")));
}

#[test]
fn test_remove_referee_and_editor() {
    let mut env = setup();
    assign_referee(&mut env, &["1"], "alice");
    env.ok(
        PRM,
        "conference.assignEditor",
        &json!({ "contributions": ["1"], "user": "bob" }),
    );
    env.ok(PRM, "conference.removeEditor", &json!({ "contributions": ["1"] }));
    env.ok(PRM, "conference.removeReferee", &json!({ "contributions": ["1"] }));

    let conference: Conference = env.conference();
    assert!(manager(&conference, "1").referee().is_none());
    assert!(!manager(&conference, "1").is_editor(&user("bob")));
}

#[test]
fn test_assignment_notifications_follow_setting() {
    let mut env = setup();
    assign_referee(&mut env, &["1"], "alice");
    assert!(env.notifier.sent().is_empty());

    env.ok(
        PRM,
        "conference.RefereeEmailNotifForContribution",
        &json!({ "value": true }),
    );
    assign_referee(&mut env, &["1", "2"], "bob");

    let sent: Vec<Notification> = env.notifier.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().any(|n| matches!(
        n,
        Notification::Assignment { role: ReviewRole::Referee, user, removed: true, .. }
            if user.as_str() == "alice"
    )));
    assert!(sent.iter().any(|n| matches!(
        n,
        Notification::Assignment { user, contributions, removed: false, .. }
            if user.as_str() == "bob" && contributions.len() == 2
    )));
}

#[test]
fn test_outsider_cannot_assign() {
    let mut env = setup();
    let err: ServiceError = env.err(
        OUTSIDER,
        "conference.assignReferee",
        &json!({ "contributions": ["1"], "user": "alice" }),
    );
    assert_eq!(err.code, "ERR-P4");
    assert!(env.timeline().is_empty());
}
