// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confreview::Notification;
use confreview_domain::{Conference, ReviewRole, TeamRole};
use serde_json::{Value, json};

use crate::tests::helpers::{AM, OUTSIDER, PRM, REFEREE, contribution_id, setup, user};
use crate::ServiceError;

#[test]
fn test_assign_team_adds_every_user() {
    let mut env = setup();
    let answer: Value = env.ok(
        PRM,
        "conference.assignTeamEditor",
        &json!({ "userList": ["bob", { "id": "erin", "name": "Erin" }] }),
    );
    assert_eq!(answer, json!(true));
    let conference: Conference = env.conference();
    assert!(conference.review.editors.contains(&user("bob")));
    assert!(conference.review.editors.contains(&user("erin")));
}

#[test]
fn test_abstract_manager_manages_teams() {
    let mut env = setup();
    env.ok(AM, "conference.assignTeamPRM", &json!({ "userList": ["frank"] }));
    assert!(env.conference().is_paper_review_manager(&user("frank")));
}

#[test]
fn test_outsider_cannot_manage_teams() {
    let mut env = setup();
    let err: ServiceError = env.err(
        OUTSIDER,
        "conference.assignTeamReferee",
        &json!({ "userList": ["frank"] }),
    );
    assert_eq!(err.code, "ERR-P4");
}

#[test]
fn test_assign_team_needs_users() {
    let mut env = setup();
    let missing: ServiceError = env.err(PRM, "conference.assignTeamReviewer", &json!({}));
    assert_eq!(missing.code, "ERR-P0");
    let empty: ServiceError = env.err(
        PRM,
        "conference.assignTeamReviewer",
        &json!({ "userList": [] }),
    );
    assert_eq!(empty.code, "ERR-P2");
}

#[test]
fn test_remove_team_member_unassigns_contributions() {
    let mut env = setup();
    env.ok(
        PRM,
        "conference.assignReferee",
        &json!({ "contributions": ["1", "3"], "user": REFEREE }),
    );
    env.ok(PRM, "conference.removeTeamReferee", &json!({ "user": REFEREE }));

    let conference: Conference = env.conference();
    assert!(!conference.review.referees.contains(&user(REFEREE)));
    for id in ["1", "3"] {
        let contribution = conference.contribution(&contribution_id(id)).unwrap();
        assert!(contribution.review_manager.referee().is_none());
    }
}

#[test]
fn test_remove_reviewer_from_team_needs_user() {
    let mut env = setup();
    let err: ServiceError = env.err(PRM, "conference.removeTeamReviewer", &json!({}));
    assert_eq!(err.code, "ERR-REV6d");

    let err: ServiceError = env.err(PRM, "conference.removeTeamEditor", &json!({}));
    assert_eq!(err.code, "ERR-P0");
}

#[test]
fn test_team_notifications_follow_setting() {
    let mut env = setup();
    env.ok(PRM, "conference.assignTeamEditor", &json!({ "userList": ["bob"] }));
    assert!(env.notifier.sent().is_empty());

    env.ok(PRM, "conference.EditorEmailNotif", &json!({ "value": true }));
    env.ok(
        PRM,
        "conference.assignTeamEditor",
        &json!({ "userList": ["bob", "erin"] }),
    );
    env.ok(PRM, "conference.removeTeamEditor", &json!({ "user": "bob" }));

    let sent: Vec<Notification> = env.notifier.sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(
        &sent[0],
        Notification::Team { role: TeamRole::Editor, added: true, user, .. }
            if user.as_str() == "erin"
    ));
    assert!(matches!(
        &sent[1],
        Notification::Team { added: false, user, .. } if user.as_str() == "bob"
    ));
}

#[test]
fn test_team_removal_notifies_about_lost_assignments() {
    let mut env = setup();
    env.ok(
        PRM,
        "conference.assignReferee",
        &json!({ "contributions": ["2"], "user": REFEREE }),
    );
    env.ok(
        PRM,
        "conference.RefereeEmailNotifForContribution",
        &json!({ "value": true }),
    );
    env.ok(PRM, "conference.removeTeamReferee", &json!({ "user": REFEREE }));

    let sent: Vec<Notification> = env.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        Notification::Assignment { role: ReviewRole::Referee, removed: true, .. }
    ));
}
