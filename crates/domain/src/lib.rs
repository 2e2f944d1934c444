// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod conference;
mod error;
mod folders;
mod judgement;
mod review_manager;
mod types;

#[cfg(test)]
mod tests;

pub use conference::{Conference, ConferenceReview, Contribution, DEFAULT_STATES, Template};
pub use error::{DomainError, JudgementField};
pub use folders::{
    Attachment, AttachmentFolder, AttachmentsView, Folders, LinkedObject, ProtectionMode,
};
pub use judgement::{Judgement, REVIEWING_QUESTION_ANSWERS};
pub use review_manager::{Review, ReviewManager};
pub use types::{
    AttributeKind, AttributeRef, ConferenceId, ContributionId, JudgementSlot, NotificationSetting,
    ReviewRole, ReviewingMode, TeamRole, UserId,
};
