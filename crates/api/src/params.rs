// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed extraction of operation parameters.
//!
//! Parameters arrive as a JSON object. Every failure names the offending
//! field and carries a generic code (`ERR-P0`, `ERR-P1`, `ERR-P2`) that
//! handlers may replace with an operation-specific one.

use std::str::FromStr;

use confreview_domain::{DomainError, UserId};
use serde_json::{Map, Value};
use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{ServiceError, translate_domain_error};

/// Date and time format accepted and returned by operations (`dd/mm/YYYY HH:MM`).
pub const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

/// A parameter extraction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Missing parameter '{field}'")]
    Missing { field: String },
    #[error("Parameter '{field}' must be {expected}")]
    WrongShape {
        field: String,
        expected: &'static str,
    },
    #[error("Parameter '{field}' must not be empty")]
    EmptyList { field: String },
}

impl ParamError {
    /// The name of the field that failed.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::WrongShape { field, .. }
            | Self::EmptyList { field } => field,
        }
    }

    /// The generic error code for this failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "ERR-P0",
            Self::WrongShape { .. } => "ERR-P1",
            Self::EmptyList { .. } => "ERR-P2",
        }
    }

    /// Converts the failure into a validation error with a specific code.
    #[must_use]
    pub fn with_code(self, code: &'static str) -> ServiceError {
        ServiceError::validation(code, self.to_string())
    }

    const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

impl From<ParamError> for ServiceError {
    fn from(err: ParamError) -> Self {
        let code: &'static str = err.code();
        err.with_code(code)
    }
}

/// Re-codes only a missing-field failure, leaving shape errors generic.
pub fn missing_as(code: &'static str) -> impl FnOnce(ParamError) -> ServiceError {
    move |err| {
        if err.is_missing() {
            err.with_code(code)
        } else {
            err.into()
        }
    }
}

/// Formats a date and time the way operations return them.
#[must_use]
pub fn format_datetime(value: PrimitiveDateTime) -> String {
    value
        .format(DATETIME_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}

/// Read-only accessor over the parameters of one request.
#[derive(Debug, Clone, Copy)]
pub struct ParameterManager<'a> {
    params: &'a Map<String, Value>,
}

impl<'a> ParameterManager<'a> {
    #[must_use]
    pub const fn new(params: &'a Map<String, Value>) -> Self {
        Self { params }
    }

    /// Whether the parameter is present and not `null`.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.value(field).is_some()
    }

    /// The raw value of a parameter; `null` counts as absent.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&'a Value> {
        self.params.get(field).filter(|v| !v.is_null())
    }

    fn required(&self, field: &str) -> Result<&'a Value, ParamError> {
        self.value(field).ok_or_else(|| ParamError::Missing {
            field: field.to_string(),
        })
    }

    /// A required string parameter.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent or not a string.
    pub fn required_str(&self, field: &str) -> Result<&'a str, ParamError> {
        self.required(field)?
            .as_str()
            .ok_or_else(|| ParamError::WrongShape {
                field: field.to_string(),
                expected: "a string",
            })
    }

    /// An optional string parameter.
    ///
    /// # Errors
    ///
    /// Fails if the field is present but not a string.
    pub fn optional_str(&self, field: &str) -> Result<Option<&'a str>, ParamError> {
        if self.has(field) {
            self.required_str(field).map(Some)
        } else {
            Ok(None)
        }
    }

    /// A required identifier-like parameter given as a string or a number.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent or neither a string nor a number.
    pub fn required_scalar(&self, field: &str) -> Result<String, ParamError> {
        scalar(self.required(field)?).ok_or_else(|| ParamError::WrongShape {
            field: field.to_string(),
            expected: "a string or a number",
        })
    }

    /// A required list of identifiers; numbers are accepted and stringified.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent, not a list of scalars, or empty while
    /// `allow_empty` is false.
    pub fn required_list(&self, field: &str, allow_empty: bool) -> Result<Vec<String>, ParamError> {
        let items: &Vec<Value> =
            self.required(field)?
                .as_array()
                .ok_or_else(|| ParamError::WrongShape {
                    field: field.to_string(),
                    expected: "a list",
                })?;
        if items.is_empty() && !allow_empty {
            return Err(ParamError::EmptyList {
                field: field.to_string(),
            });
        }
        items
            .iter()
            .map(|item| {
                scalar(item).ok_or_else(|| ParamError::WrongShape {
                    field: field.to_string(),
                    expected: "a list of strings or numbers",
                })
            })
            .collect()
    }

    /// A required user, given as an identifier or as an object with an `id`.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent or does not name a user.
    pub fn required_user(&self, field: &str) -> Result<UserId, ParamError> {
        user_from(self.required(field)?).ok_or_else(|| ParamError::WrongShape {
            field: field.to_string(),
            expected: "a user",
        })
    }

    /// An optional user.
    ///
    /// # Errors
    ///
    /// Fails if the field is present but does not name a user.
    pub fn optional_user(&self, field: &str) -> Result<Option<UserId>, ParamError> {
        if self.has(field) {
            self.required_user(field).map(Some)
        } else {
            Ok(None)
        }
    }

    /// A required, non-empty list of users.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent, empty, or holds anything but users.
    pub fn user_list(&self, field: &str) -> Result<Vec<UserId>, ParamError> {
        let items: &Vec<Value> =
            self.required(field)?
                .as_array()
                .ok_or_else(|| ParamError::WrongShape {
                    field: field.to_string(),
                    expected: "a list of users",
                })?;
        if items.is_empty() {
            return Err(ParamError::EmptyList {
                field: field.to_string(),
            });
        }
        items
            .iter()
            .map(|item| {
                user_from(item).ok_or_else(|| ParamError::WrongShape {
                    field: field.to_string(),
                    expected: "a list of users",
                })
            })
            .collect()
    }

    /// A required boolean; `"true"` and `"false"` strings are accepted.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent or not a boolean.
    pub fn required_bool(&self, field: &str) -> Result<bool, ParamError> {
        match self.required(field)? {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(ParamError::WrongShape {
                field: field.to_string(),
                expected: "a boolean",
            }),
        }
    }

    /// A required integer; numeric strings are cast.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent or not an integer.
    pub fn required_i64(&self, field: &str) -> Result<i64, ParamError> {
        let value: &Value = self.required(field)?;
        let parsed: Option<i64> = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| ParamError::WrongShape {
            field: field.to_string(),
            expected: "an integer",
        })
    }

    /// A required date and time in `dd/mm/YYYY HH:MM` form.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent or not in the expected format.
    pub fn datetime(&self, field: &str) -> Result<PrimitiveDateTime, ParamError> {
        let raw: &str = self.required_str(field)?;
        PrimitiveDateTime::parse(raw.trim(), DATETIME_FORMAT).map_err(|_| {
            ParamError::WrongShape {
                field: field.to_string(),
                expected: "a date formatted dd/mm/YYYY HH:MM",
            }
        })
    }

    /// A required parameter parsed through a domain `FromStr` implementation.
    ///
    /// # Errors
    ///
    /// Fails with a parameter error if the field is missing, or with the
    /// translated domain error if parsing fails.
    pub fn parse<T>(&self, field: &str) -> Result<T, ServiceError>
    where
        T: FromStr<Err = DomainError>,
    {
        let raw: String = self.required_scalar(field)?;
        raw.parse::<T>().map_err(translate_domain_error)
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn user_from(value: &Value) -> Option<UserId> {
    let raw: String = match value {
        Value::Object(fields) => fields.get("id").and_then(scalar)?,
        other => scalar(other)?,
    };
    UserId::new(&raw).ok()
}
