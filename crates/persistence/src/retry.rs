// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Retrying operations that lose a write conflict.

use tracing::warn;

use crate::error::PersistenceError;

/// Number of attempts made before a conflict is reported to the caller.
pub const MAX_CONFLICT_ATTEMPTS: u32 = 10;

/// Runs `op`, re-running it immediately while it fails with
/// [`PersistenceError::Conflict`].
///
/// At most `max_attempts` runs are made; the conflict from the last run is
/// returned unchanged. Any other error is returned on first occurrence.
/// A `max_attempts` of zero behaves like one.
///
/// # Errors
///
/// Returns the error of the final attempt.
pub fn with_conflict_retry<T, F>(max_attempts: u32, mut op: F) -> Result<T, PersistenceError>
where
    F: FnMut() -> Result<T, PersistenceError>,
{
    let mut attempt: u32 = 1;
    loop {
        match op() {
            Err(PersistenceError::Conflict(message)) if attempt < max_attempts => {
                warn!(attempt, max_attempts, %message, "Write conflict, retrying");
                attempt += 1;
            }
            result => return result,
        }
    }
}
