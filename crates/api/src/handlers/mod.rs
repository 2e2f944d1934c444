// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation handlers, grouped by what they act on.
//!
//! Modification handlers share one convention: a `value` parameter means
//! "set", and the answer is always the value after the optional set.

pub mod assignment;
pub mod attachments;
pub mod judgement;
pub mod setup;
pub mod team;

use confreview_domain::ReviewRole;
use serde_json::Value;
use time::PrimitiveDateTime;

use crate::dispatch::HandlerContext;
use crate::error::ServiceError;
use crate::params::format_datetime;

/// Name of the parameter carrying the new value of a modification.
pub const VALUE: &str = "value";

fn datetime_value(value: Option<PrimitiveDateTime>) -> Value {
    value.map_or(Value::Null, |d| Value::String(format_datetime(d)))
}

/// The role named by `dueDateToChange`, failing with `code`.
fn due_date_role(ctx: &HandlerContext<'_>, code: &'static str) -> Result<ReviewRole, ServiceError> {
    let raw: &str = ctx
        .params
        .required_str("dueDateToChange")
        .map_err(|e| e.with_code(code))?;
    raw.parse::<ReviewRole>()
        .map_err(|_| ServiceError::validation(code, "Kind of deadline to change not set"))
}
