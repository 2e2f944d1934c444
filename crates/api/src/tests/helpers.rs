// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confreview_audit::AuditEvent;
use confreview_domain::{
    AttributeRef, Conference, ConferenceId, Contribution, ContributionId, ReviewingMode, Template,
    UserId,
};
use confreview_persistence::Persistence;
use serde_json::{Map, Value};

use crate::{
    AuthenticatedActor, Dispatcher, OperationRequest, RecordingNotifier, ServiceError,
};

pub const CONFERENCE: &str = "conf-1";

/// Conference manager; passes every fallback check.
pub const MANAGER: &str = "manager";
/// Paper review manager.
pub const PRM: &str = "prm";
/// Abstract manager.
pub const AM: &str = "am";
/// Member of the referee team.
pub const REFEREE: &str = "referee";
/// Holds no role at all.
pub const OUTSIDER: &str = "outsider";

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn contribution_id(id: &str) -> ContributionId {
    ContributionId::new(id).unwrap()
}

pub fn conference_id() -> ConferenceId {
    ConferenceId::new(CONFERENCE).unwrap()
}

/// A conference in content and layout mode with contributions "1".."3".
///
/// Contribution "1" and "2" are in track "t1"; "3" is in track "t2" and
/// session "s1".
pub fn create_test_conference() -> Conference {
    let mut conference: Conference = Conference::new(conference_id(), "Test Conference");
    conference.review.mode = ReviewingMode::ContentAndLayoutReviewing;
    conference.managers.insert(user(MANAGER));
    conference.abstract_managers.insert(user(AM));
    conference.review.paper_review_managers.insert(user(PRM));
    conference.review.referees.insert(user(REFEREE));
    conference.review.reviewing_questions = vec![String::from("Originality")];
    conference.review.layout_criteria = vec![String::from("Formatting")];
    conference
        .people
        .insert(user(REFEREE), String::from("Rita Referee"));
    conference.review.templates.insert(
        String::from("tpl-1"),
        Template {
            id: String::from("tpl-1"),
            name: String::from("LaTeX"),
            description: String::new(),
            format: String::from("tex"),
        },
    );

    for id in ["1", "2", "3"] {
        let mut contribution: Contribution =
            Contribution::new(contribution_id(id), &format!("Paper {id}"));
        if id == "3" {
            contribution.track = Some(AttributeRef::new("t2", "Track Two"));
            contribution.session = Some(AttributeRef::new("s1", "Session One"));
        } else {
            contribution.track = Some(AttributeRef::new("t1", "Track One"));
        }
        conference.add_contribution(contribution);
    }
    conference
}

pub struct TestEnv {
    pub persistence: Persistence,
    pub dispatcher: Dispatcher,
    pub notifier: RecordingNotifier,
}

impl TestEnv {
    /// Calls an operation on the test conference.
    ///
    /// `params` must be a JSON object; `conference` is filled in unless given.
    pub fn call(
        &mut self,
        actor: &str,
        method: &str,
        params: &Value,
    ) -> Result<Value, ServiceError> {
        let mut params: Map<String, Value> = params.as_object().cloned().unwrap_or_default();
        params
            .entry("conference")
            .or_insert_with(|| Value::String(String::from(CONFERENCE)));
        let request: OperationRequest = OperationRequest {
            method: String::from(method),
            actor: AuthenticatedActor::new(user(actor)),
            params,
        };
        self.dispatcher.dispatch(&mut self.persistence, &request)
    }

    /// Calls an operation that is expected to succeed.
    pub fn ok(&mut self, actor: &str, method: &str, params: &Value) -> Value {
        match self.call(actor, method, params) {
            Ok(value) => value,
            Err(err) => panic!("{method} failed: {err}"),
        }
    }

    /// Calls an operation that is expected to fail.
    pub fn err(&mut self, actor: &str, method: &str, params: &Value) -> ServiceError {
        match self.call(actor, method, params) {
            Ok(value) => panic!("{method} unexpectedly returned {value}"),
            Err(err) => err,
        }
    }

    /// The stored test conference.
    pub fn conference(&mut self) -> Conference {
        self.persistence.load_conference(&conference_id()).unwrap()
    }

    /// The stored audit timeline of the test conference.
    pub fn timeline(&mut self) -> Vec<AuditEvent> {
        self.persistence
            .get_audit_timeline(&conference_id())
            .unwrap()
    }

    /// Replaces the stored test conference.
    pub fn store(&mut self, conference: &Conference) {
        self.persistence.save_conference(conference).unwrap();
    }
}

pub fn setup_with(conference: &Conference) -> TestEnv {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.save_conference(conference).unwrap();
    let notifier: RecordingNotifier = RecordingNotifier::new();
    let dispatcher: Dispatcher = Dispatcher::new(Box::new(notifier.clone())).unwrap();
    TestEnv {
        persistence,
        dispatcher,
        notifier,
    }
}

pub fn setup() -> TestEnv {
    setup_with(&create_test_conference())
}
