// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AttachmentFolder, ContributionId, DomainError, Folders, LinkedObject, ProtectionMode, UserId,
};

fn contribution_link(id: &str) -> LinkedObject {
    LinkedObject::Contribution(ContributionId::new(id).unwrap())
}

#[test]
fn test_default_folder_passes_validation() {
    let folder: AttachmentFolder = AttachmentFolder::default_for(1, LinkedObject::Conference);
    assert!(folder.validate().is_ok());
    assert_eq!(folder.display_title(), "Default folder");
}

#[test]
fn test_default_folder_must_inherit_protection() {
    let mut folder: AttachmentFolder = AttachmentFolder::default_for(1, LinkedObject::Conference);
    folder.protection = ProtectionMode::Protected;
    assert_eq!(
        folder.validate(),
        Err(DomainError::FolderConstraint("default_inheriting"))
    );
}

#[test]
fn test_default_flag_must_match_missing_title() {
    let mut folder: AttachmentFolder = AttachmentFolder::default_for(1, LinkedObject::Conference);
    folder.title = Some(String::from("Slides"));
    assert_eq!(
        folder.validate(),
        Err(DomainError::FolderConstraint("default_or_title"))
    );

    let mut titled: AttachmentFolder =
        AttachmentFolder::titled(2, LinkedObject::Conference, "Slides").unwrap();
    titled.title = None;
    assert_eq!(
        titled.validate(),
        Err(DomainError::FolderConstraint("default_or_title"))
    );
}

#[test]
fn test_default_folder_cannot_be_deleted() {
    let mut folder: AttachmentFolder = AttachmentFolder::default_for(1, LinkedObject::Conference);
    folder.is_deleted = true;
    assert_eq!(
        folder.validate(),
        Err(DomainError::FolderConstraint("default_not_deleted"))
    );
}

#[test]
fn test_blank_folder_title_is_rejected() {
    assert!(matches!(
        AttachmentFolder::titled(1, LinkedObject::Conference, "   "),
        Err(DomainError::InvalidTitle(_))
    ));
}

#[test]
fn test_attachments_view_hides_deleted_and_sorts_case_insensitively() {
    let mut folders: Folders = Folders::new();
    let id: u64 = folders
        .create_folder(
            LinkedObject::Conference,
            "Papers",
            String::new(),
            ProtectionMode::Inheriting,
            true,
        )
        .unwrap();
    folders.add_attachment(id, "beta", "https://x/b").unwrap();
    folders.add_attachment(id, "Alpha", "https://x/a").unwrap();
    folders.add_attachment(id, "gamma", "https://x/g").unwrap();

    let mut papers: AttachmentFolder = folders.get(id).unwrap().clone();
    let titles: Vec<&str> = papers
        .attachments()
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Alpha", "beta", "gamma"]);

    if let Some(beta) = papers
        .all_attachments_mut()
        .iter_mut()
        .find(|a| a.title == "beta")
    {
        beta.is_deleted = true;
    }
    let view = papers.attachments();
    assert_eq!(view.len(), 2);
    let titles: Vec<&str> = (&view).into_iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "gamma"]);
}

#[test]
fn test_add_attachment_to_missing_folder_fails() {
    let mut folders: Folders = Folders::new();
    assert_eq!(
        folders.add_attachment(42, "x", "https://x"),
        Err(DomainError::FolderNotFound(42))
    );
}

#[test]
fn test_get_or_create_default_is_idempotent() {
    let mut folders: Folders = Folders::new();
    let link: LinkedObject = contribution_link("7");
    let first: u64 = folders.get_or_create_default(&link).id;
    let second: u64 = folders.get_or_create_default(&link).id;
    assert_eq!(first, second);
    assert_eq!(folders.len(), 1);

    let other: u64 = folders
        .get_or_create_default(&LinkedObject::Conference)
        .id;
    assert_ne!(first, other);
}

#[test]
fn test_folders_for_orders_default_first_then_title() {
    let mut folders: Folders = Folders::new();
    let link: LinkedObject = LinkedObject::Conference;
    folders
        .create_folder(
            link.clone(),
            "zeta",
            String::new(),
            ProtectionMode::Public,
            true,
        )
        .unwrap();
    folders
        .create_folder(
            link.clone(),
            "Beta",
            String::new(),
            ProtectionMode::Public,
            true,
        )
        .unwrap();
    folders
        .create_folder(
            contribution_link("1"),
            "Other object",
            String::new(),
            ProtectionMode::Public,
            true,
        )
        .unwrap();
    folders.get_or_create_default(&link);

    let listed: Vec<&str> = folders
        .folders_for(&link)
        .iter()
        .map(|f| f.display_title())
        .collect();
    assert_eq!(listed, vec!["Default folder", "Beta", "zeta"]);
}

#[test]
fn test_folder_visibility() {
    let alice: UserId = UserId::new("alice").unwrap();
    let bob: UserId = UserId::new("bob").unwrap();

    let mut folder: AttachmentFolder =
        AttachmentFolder::titled(1, LinkedObject::Conference, "Private").unwrap();
    folder.protection = ProtectionMode::Protected;
    folder.is_always_visible = false;
    folder.acl.insert(alice.clone());

    assert!(folder.can_view(Some(&alice), false));
    assert!(!folder.can_view(Some(&bob), true));
    assert!(!folder.can_view(None, true));

    folder.is_always_visible = true;
    assert!(folder.can_view(Some(&bob), false));
    assert!(!folder.can_access(Some(&bob), true));

    folder.protection = ProtectionMode::Inheriting;
    assert!(folder.can_access(Some(&bob), true));
    assert!(!folder.can_access(Some(&bob), false));
}

#[test]
fn test_deserialized_folder_defaults_to_always_visible() {
    let folder: AttachmentFolder = serde_json::from_value(serde_json::json!({
        "id": 1,
        "title": "Slides",
        "link": "Conference",
        "protection": "Protected",
    }))
    .unwrap();
    assert!(folder.is_always_visible);
    assert!(!folder.is_default);
    assert!(folder.can_view(None, false));
    assert!(!folder.can_access(None, false));
}

#[test]
fn test_folders_validate_every_folder() {
    let folders: Folders = serde_json::from_value(serde_json::json!({
        "next_folder_id": 2,
        "items": [
            { "id": 1, "title": "Slides", "link": "Conference" },
            {
                "id": 2,
                "title": null,
                "is_default": true,
                "is_deleted": true,
                "link": "Conference",
            },
        ],
    }))
    .unwrap();
    assert_eq!(
        folders.validate(),
        Err(DomainError::FolderConstraint("default_not_deleted"))
    );
}

#[test]
fn test_folders_allow_one_default_per_object() {
    let mut folders: Folders = Folders::new();
    folders.get_or_create_default(&LinkedObject::Conference);
    folders.get_or_create_default(&contribution_link("1"));
    assert!(folders.validate().is_ok());

    let duplicated: Folders = serde_json::from_value(serde_json::json!({
        "items": [
            { "id": 1, "title": null, "is_default": true, "link": "Conference" },
            { "id": 2, "title": null, "is_default": true, "link": "Conference" },
        ],
    }))
    .unwrap();
    assert_eq!(
        duplicated.validate(),
        Err(DomainError::FolderConstraint("single_default"))
    );
}
