// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, JudgementField, ReviewRole, ReviewingMode};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidIdentifier {
        kind: "user",
        value: String::from(" "),
    };
    assert_eq!(format!("{err}"), "Invalid user identifier: ' '");

    let err: DomainError = DomainError::InvalidReviewingMode(String::from("7"));
    assert_eq!(format!("{err}"), "Invalid reviewing mode: '7'");

    let err: DomainError = DomainError::ContributionNotFound(String::from("12"));
    assert_eq!(format!("{err}"), "Contribution '12' not found");

    let err: DomainError = DomainError::RoleNotAllowedInMode {
        role: ReviewRole::Editor,
        mode: ReviewingMode::ContentReviewing,
    };
    assert_eq!(
        format!("{err}"),
        "Editor cannot be assigned in mode 'Content reviewing'"
    );

    let err: DomainError = DomainError::RefereeRequired {
        role: ReviewRole::Reviewer,
        contribution: String::from("3"),
    };
    assert_eq!(
        format!("{err}"),
        "Contribution '3' has no Referee yet; cannot assign Reviewer"
    );

    let err: DomainError = DomainError::JudgementSubmitted {
        field: JudgementField::Comments,
    };
    assert_eq!(
        format!("{err}"),
        "Cannot modify the comments of a judgement marked as submitted"
    );

    let err: DomainError = DomainError::FolderConstraint("default_or_title");
    assert_eq!(
        format!("{err}"),
        "Attachment folder constraint violated: default_or_title"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::FolderNotFound(4));
    assert_eq!(err.to_string(), "Attachment folder 4 not found");
}
