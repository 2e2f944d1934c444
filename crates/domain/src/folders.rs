// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attachment folders.
//!
//! Each conference or contribution can own any number of named folders
//! plus one untitled default folder. Attachments are soft-deleted and
//! reads go through [`AttachmentsView`], which exposes no way to modify
//! the underlying collection.

use crate::error::DomainError;
use crate::types::{ContributionId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Protection mode of a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProtectionMode {
    /// Access follows the object the folder is linked to.
    #[default]
    Inheriting,
    /// Anyone may access.
    Public,
    /// Only users on the folder ACL may access.
    Protected,
}

/// The object a folder belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkedObject {
    Conference,
    Contribution(ContributionId),
}

/// A single attached link or file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub link_url: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// A read-only, ordered view over the live attachments of a folder.
///
/// Deleted attachments are filtered out and the rest are ordered by
/// lower-cased title.
#[derive(Debug, Clone)]
pub struct AttachmentsView<'a> {
    items: Vec<&'a Attachment>,
}

impl<'a> AttachmentsView<'a> {
    fn new(all: &'a [Attachment]) -> Self {
        let mut items: Vec<&'a Attachment> = all.iter().filter(|a| !a.is_deleted).collect();
        items.sort_by_key(|a| a.title.to_lowercase());
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Attachment> + '_ {
        self.items.iter().copied()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'s, 'a> IntoIterator for &'s AttachmentsView<'a> {
    type Item = &'a Attachment;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a Attachment>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}

const fn default_true() -> bool {
    true
}

/// A folder of attachments linked to a conference or contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentFolder {
    pub id: u64,
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_always_visible: bool,
    #[serde(default)]
    pub protection: ProtectionMode,
    #[serde(default)]
    pub acl: BTreeSet<UserId>,
    pub link: LinkedObject,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

impl AttachmentFolder {
    /// Creates the untitled default folder for an object.
    #[must_use]
    pub const fn default_for(id: u64, link: LinkedObject) -> Self {
        Self {
            id,
            title: None,
            description: String::new(),
            is_deleted: false,
            is_default: true,
            is_always_visible: true,
            protection: ProtectionMode::Inheriting,
            acl: BTreeSet::new(),
            link,
            attachments: Vec::new(),
        }
    }

    /// Creates a titled folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank.
    pub fn titled(id: u64, link: LinkedObject, title: &str) -> Result<Self, DomainError> {
        let title: &str = title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidTitle(String::from(
                "folder title must not be empty",
            )));
        }
        Ok(Self {
            id,
            title: Some(title.to_string()),
            description: String::new(),
            is_deleted: false,
            is_default: false,
            is_always_visible: true,
            protection: ProtectionMode::Inheriting,
            acl: BTreeSet::new(),
            link,
            attachments: Vec::new(),
        })
    }

    /// Checks the folder's structural constraints.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FolderConstraint`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_default && self.protection != ProtectionMode::Inheriting {
            return Err(DomainError::FolderConstraint("default_inheriting"));
        }
        if self.is_default != self.title.is_none() {
            return Err(DomainError::FolderConstraint("default_or_title"));
        }
        if self.is_default && self.is_deleted {
            return Err(DomainError::FolderConstraint("default_not_deleted"));
        }
        Ok(())
    }

    /// Title used for display; the default folder has none.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Default folder")
    }

    /// Returns the live attachments, ordered by lower-cased title.
    #[must_use]
    pub fn attachments(&self) -> AttachmentsView<'_> {
        AttachmentsView::new(&self.attachments)
    }

    /// Returns every attachment, deleted ones included, for editing.
    pub const fn all_attachments_mut(&mut self) -> &mut Vec<Attachment> {
        &mut self.attachments
    }

    /// Returns whether the user may access the folder's content.
    ///
    /// # Arguments
    ///
    /// * `user` - The user, or `None` for an anonymous caller
    /// * `parent_access` - Whether the user may access the linked object
    #[must_use]
    pub fn can_access(&self, user: Option<&UserId>, parent_access: bool) -> bool {
        match self.protection {
            ProtectionMode::Inheriting => parent_access,
            ProtectionMode::Public => true,
            ProtectionMode::Protected => user.is_some_and(|u| self.acl.contains(u)),
        }
    }

    /// Returns whether the folder is listed for the user.
    #[must_use]
    pub fn can_view(&self, user: Option<&UserId>, parent_access: bool) -> bool {
        self.is_always_visible || self.can_access(user, parent_access)
    }
}

/// All attachment folders of a conference, with id allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Folders {
    #[serde(default)]
    next_folder_id: u64,
    #[serde(default)]
    next_attachment_id: u64,
    #[serde(default)]
    items: Vec<AttachmentFolder>,
}

impl Folders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_folder_id(&mut self) -> u64 {
        self.next_folder_id += 1;
        self.next_folder_id
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&AttachmentFolder> {
        self.items.iter().find(|f| f.id == id)
    }

    /// Every folder, deleted ones included, in creation order.
    #[must_use]
    pub fn all(&self) -> &[AttachmentFolder] {
        &self.items
    }

    /// Returns the non-deleted folders of an object, default folder first,
    /// then by lower-cased title.
    #[must_use]
    pub fn folders_for(&self, link: &LinkedObject) -> Vec<&AttachmentFolder> {
        let mut found: Vec<&AttachmentFolder> = self
            .items
            .iter()
            .filter(|f| !f.is_deleted && &f.link == link)
            .collect();
        found.sort_by_key(|f| {
            (
                !f.is_default,
                f.title.as_deref().unwrap_or_default().to_lowercase(),
            )
        });
        found
    }

    /// Returns the default folder of an object, creating it if needed.
    pub fn get_or_create_default(&mut self, link: &LinkedObject) -> &mut AttachmentFolder {
        let existing: Option<usize> = self
            .items
            .iter()
            .position(|f| f.is_default && &f.link == link);
        let index: usize = match existing {
            Some(index) => index,
            None => {
                let id: u64 = self.allocate_folder_id();
                self.items
                    .push(AttachmentFolder::default_for(id, link.clone()));
                self.items.len() - 1
            }
        };
        &mut self.items[index]
    }

    /// Adds a new titled folder and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank or the folder fails validation.
    pub fn create_folder(
        &mut self,
        link: LinkedObject,
        title: &str,
        description: String,
        protection: ProtectionMode,
        is_always_visible: bool,
    ) -> Result<u64, DomainError> {
        let id: u64 = self.next_folder_id + 1;
        let mut folder: AttachmentFolder = AttachmentFolder::titled(id, link, title)?;
        folder.description = description;
        folder.protection = protection;
        folder.is_always_visible = is_always_visible;
        folder.validate()?;
        self.next_folder_id = id;
        self.items.push(folder);
        Ok(id)
    }

    /// Adds an attachment to a folder and returns the attachment id.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder does not exist or is deleted, or if
    /// the title is blank.
    pub fn add_attachment(
        &mut self,
        folder_id: u64,
        title: &str,
        link_url: &str,
    ) -> Result<u64, DomainError> {
        let title: &str = title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidTitle(String::from(
                "attachment title must not be empty",
            )));
        }
        let id: u64 = self.next_attachment_id + 1;
        let folder: &mut AttachmentFolder = self
            .items
            .iter_mut()
            .find(|f| f.id == folder_id && !f.is_deleted)
            .ok_or(DomainError::FolderNotFound(folder_id))?;
        folder.all_attachments_mut().push(Attachment {
            id,
            title: title.to_string(),
            description: String::new(),
            link_url: link_url.to_string(),
            is_deleted: false,
        });
        self.next_attachment_id = id;
        Ok(id)
    }

    /// Identifier of the most recently created folder.
    #[must_use]
    pub const fn last_folder_id(&self) -> Option<u64> {
        if self.next_folder_id == 0 {
            None
        } else {
            Some(self.next_folder_id)
        }
    }

    /// Identifier of the most recently added attachment.
    #[must_use]
    pub const fn last_attachment_id(&self) -> Option<u64> {
        if self.next_attachment_id == 0 {
            None
        } else {
            Some(self.next_attachment_id)
        }
    }

    /// Checks the constraints of every folder, deleted ones included, and
    /// that each object has at most one default folder.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FolderConstraint`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), DomainError> {
        for folder in &self.items {
            folder.validate()?;
            let defaults: usize = self
                .items
                .iter()
                .filter(|f| f.is_default && f.link == folder.link)
                .count();
            if defaults > 1 {
                return Err(DomainError::FolderConstraint("single_default"));
            }
        }
        Ok(())
    }

    /// Number of folders, deleted ones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
