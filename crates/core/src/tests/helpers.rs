// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, State, TransitionResult, apply};
use confreview_audit::{Actor, Cause};
use confreview_domain::{
    Conference, ConferenceId, Contribution, ContributionId, ReviewingMode, UserId,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("prm-1"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("rpc-1"), String::from("test request"))
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn contribution_id(id: &str) -> ContributionId {
    ContributionId::new(id).unwrap()
}

pub fn ids(values: &[&str]) -> Vec<ContributionId> {
    values.iter().map(|v| contribution_id(v)).collect()
}

/// A conference in content and layout mode with contributions "1".."3".
pub fn create_test_state() -> State {
    let mut conference: Conference =
        Conference::new(ConferenceId::new("conf-1").unwrap(), "Test Conference");
    conference.review.mode = ReviewingMode::ContentAndLayoutReviewing;
    for id in ["1", "2", "3"] {
        conference.add_contribution(Contribution::new(contribution_id(id), "Paper"));
    }
    State::new(conference)
}

/// Applies a command that is expected to succeed.
pub fn apply_ok(state: &State, command: Command) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause()).unwrap()
}
