// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and services.
//!
//! Actors are asserted by the caller. Real identity providers and session
//! handling are outside this service; [`AuthenticationService`] only checks
//! that the asserted identity is well formed.

use confreview_audit::Actor;
use confreview_domain::UserId;

use crate::error::AuthError;

/// An authenticated actor.
///
/// Conference roles (manager, PRM, referee, ...) are not carried here. They
/// are looked up on the target conference for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user the request acts as.
    pub id: UserId,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self { id }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.to_string(), String::from("user"))
    }
}

/// Stub authentication service.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates an asserted actor identifier.
    ///
    /// # Arguments
    ///
    /// * `actor_id` - The identifier supplied by the caller
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is missing or blank.
    pub fn authenticate(actor_id: Option<&str>) -> Result<AuthenticatedActor, AuthError> {
        let actor_id: &str = actor_id.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("No actor supplied"),
        })?;
        let id: UserId = UserId::new(actor_id).map_err(|e| AuthError::AuthenticationFailed {
            reason: e.to_string(),
        })?;
        Ok(AuthenticatedActor::new(id))
    }
}
