// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! RPC operation layer of the paper reviewing service.
//!
//! A request names an operation, an actor and a JSON parameter object.
//! The [`Dispatcher`] resolves the operation, loads the conference,
//! extracts the operation's parameters, checks the caller's permission and
//! runs the handler. Mutations go through the core `apply` function and are
//! persisted with their audit event before any notification is delivered.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod dispatch;
mod error;
mod handlers;
mod notify;
mod operation;
mod params;
mod permissions;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService};
pub use dispatch::{
    Dispatcher, Gate, HandlerContext, HandlerSpec, OperationRequest, Registry, Scope,
};
pub use error::{AuthError, ErrorKind, ServiceError, translate_core_error, translate_domain_error};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use operation::Operation;
pub use params::{DATETIME_FORMAT, ParamError, ParameterManager, format_datetime};
pub use permissions::{Combinator, Permission, PermissionContext, Predicate};
