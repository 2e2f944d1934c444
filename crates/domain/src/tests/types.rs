// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AttributeKind, ContributionId, DomainError, NotificationSetting, ReviewRole, ReviewingMode,
    TeamRole, UserId,
};
use std::str::FromStr;

#[test]
fn test_user_id_is_trimmed() {
    let user: UserId = UserId::new("  alice ").unwrap();
    assert_eq!(user.as_str(), "alice");
    assert_eq!(user.to_string(), "alice");
}

#[test]
fn test_empty_identifiers_are_rejected() {
    assert!(matches!(
        UserId::new("   "),
        Err(DomainError::InvalidIdentifier { kind: "user", .. })
    ));
    assert!(matches!(
        ContributionId::new(""),
        Err(DomainError::InvalidIdentifier {
            kind: "contribution",
            ..
        })
    ));
}

#[test]
fn test_user_id_serializes_transparently() {
    let user: UserId = UserId::new("bob").unwrap();
    assert_eq!(serde_json::to_string(&user).unwrap(), "\"bob\"");
}

#[test]
fn test_reviewing_mode_choices_round_trip() {
    for choice in 1..=4 {
        let mode: ReviewingMode = ReviewingMode::from_choice(choice).unwrap();
        assert_eq!(i64::from(mode.choice()), choice);
    }
    assert!(ReviewingMode::from_choice(0).is_err());
    assert!(ReviewingMode::from_choice(5).is_err());
}

#[test]
fn test_reviewing_mode_parses_names_and_digits() {
    assert_eq!(
        ReviewingMode::from_str("Layout reviewing").unwrap(),
        ReviewingMode::LayoutReviewing
    );
    assert_eq!(
        ReviewingMode::from_str("content and layout reviewing").unwrap(),
        ReviewingMode::ContentAndLayoutReviewing
    );
    assert_eq!(
        ReviewingMode::from_str("2").unwrap(),
        ReviewingMode::ContentReviewing
    );
    assert!(ReviewingMode::from_str("peer review").is_err());
}

#[test]
fn test_reviewing_mode_role_table() {
    use ReviewRole::{Editor, Referee, Reviewer};

    let no: ReviewingMode = ReviewingMode::NoReviewing;
    assert!(!no.allows(Referee) && !no.allows(Editor) && !no.allows(Reviewer));

    let content: ReviewingMode = ReviewingMode::ContentReviewing;
    assert!(content.allows(Referee) && content.allows(Reviewer));
    assert!(!content.allows(Editor));

    let layout: ReviewingMode = ReviewingMode::LayoutReviewing;
    assert!(layout.allows(Editor));
    assert!(!layout.allows(Referee) && !layout.allows(Reviewer));
    assert!(!layout.requires_referee(Editor));

    let both: ReviewingMode = ReviewingMode::ContentAndLayoutReviewing;
    assert!(both.allows(Referee) && both.allows(Editor) && both.allows(Reviewer));
    assert!(both.requires_referee(Editor));
    assert!(both.requires_referee(Reviewer));
}

#[test]
fn test_judgement_kind_parsing() {
    assert_eq!(
        ReviewRole::from_judgement_kind("refereeJudgement").unwrap(),
        ReviewRole::Referee
    );
    assert_eq!(
        ReviewRole::from_judgement_kind("reviewerJudgement").unwrap(),
        ReviewRole::Reviewer
    );
    assert!(ReviewRole::from_judgement_kind("Referee").is_err());
}

#[test]
fn test_team_role_parsing() {
    assert_eq!(TeamRole::from_str("PRM").unwrap(), TeamRole::PaperReviewManager);
    assert_eq!(TeamRole::from_str("editor").unwrap(), TeamRole::Editor);
    assert_eq!(TeamRole::Referee.review_role(), Some(ReviewRole::Referee));
    assert_eq!(TeamRole::PaperReviewManager.review_role(), None);
}

#[test]
fn test_attribute_kind_parsing() {
    assert_eq!(AttributeKind::from_str("track").unwrap(), AttributeKind::Track);
    assert!(matches!(
        AttributeKind::from_str("room"),
        Err(DomainError::InvalidAttribute(_))
    ));
}

#[test]
fn test_notification_setting_lookup() {
    assert_eq!(
        NotificationSetting::for_team(TeamRole::Reviewer),
        NotificationSetting::ReviewerTeam
    );
    assert_eq!(
        NotificationSetting::for_assignment(ReviewRole::Editor),
        NotificationSetting::EditorForContribution
    );
    assert_eq!(
        NotificationSetting::for_judgement(ReviewRole::Referee),
        NotificationSetting::RefereeJudgement
    );
}
