// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod transition_tests;

use confreview::{Command, State, TransitionResult, apply};
use confreview_audit::{Actor, Cause};
use confreview_domain::{Conference, ConferenceId, Contribution, ContributionId, UserId};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("prm-1"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test operation"))
}

pub fn conference_id(id: &str) -> ConferenceId {
    ConferenceId::new(id).expect("valid conference id")
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub fn create_test_conference(id: &str) -> Conference {
    let mut conference: Conference = Conference::new(conference_id(id), "Test Conference");
    for number in ["1", "2"] {
        let contribution_id: ContributionId =
            ContributionId::new(number).expect("valid contribution id");
        conference.add_contribution(Contribution::new(
            contribution_id,
            &format!("Paper {number}"),
        ));
    }
    conference
}

/// Applies a command to a conference and returns the transition.
pub fn transition(conference: Conference, command: Command) -> TransitionResult {
    apply(
        &State::new(conference),
        command,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("command should apply")
}
