// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attachment folders of a conference or one of its contributions.
//!
//! Folders are listed when visible to the caller; their attachments are
//! only included when the caller may also access the folder.

use confreview::Command;
use confreview_domain::{
    Attachment, AttachmentFolder, Conference, LinkedObject, ProtectionMode, UserId,
};
use serde_json::{Value, json};

use crate::dispatch::HandlerContext;
use crate::error::ServiceError;
use crate::params::ParamError;

fn linked_object(ctx: &HandlerContext<'_>) -> LinkedObject {
    ctx.contribution
        .clone()
        .map_or(LinkedObject::Conference, LinkedObject::Contribution)
}

const fn protection_name(protection: ProtectionMode) -> &'static str {
    match protection {
        ProtectionMode::Inheriting => "inheriting",
        ProtectionMode::Public => "public",
        ProtectionMode::Protected => "protected",
    }
}

fn parse_protection(ctx: &HandlerContext<'_>) -> Result<ProtectionMode, ServiceError> {
    let Some(raw) = ctx.params.optional_str("protection")? else {
        return Ok(ProtectionMode::Inheriting);
    };
    match raw.trim().to_lowercase().as_str() {
        "inheriting" => Ok(ProtectionMode::Inheriting),
        "public" => Ok(ProtectionMode::Public),
        "protected" => Ok(ProtectionMode::Protected),
        _ => Err(ParamError::WrongShape {
            field: String::from("protection"),
            expected: "one of inheriting, public or protected",
        }
        .into()),
    }
}

fn attachment_json(attachment: &Attachment) -> Value {
    json!({
        "id": attachment.id,
        "title": attachment.title,
        "description": attachment.description,
        "link": attachment.link_url,
    })
}

fn folder_json(folder: &AttachmentFolder, with_attachments: bool) -> Value {
    let attachments: Vec<Value> = if with_attachments {
        folder.attachments().iter().map(attachment_json).collect()
    } else {
        Vec::new()
    };
    json!({
        "id": folder.id,
        "title": folder.display_title(),
        "description": folder.description,
        "isDefault": folder.is_default,
        "protection": protection_name(folder.protection),
        "attachments": attachments,
    })
}

/// Lists the folders of the conference, or of `contribution` if given, that
/// the caller may see.
///
/// # Errors
///
/// Does not fail once the request has been resolved.
pub fn list_folders(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let link: LinkedObject = linked_object(ctx);
    let user: Option<&UserId> = Some(&ctx.actor.id);
    let conference: &Conference = ctx.current();
    let parent_access: bool = conference.parent_access(&link, user);

    let folders: Vec<Value> = conference
        .folders
        .folders_for(&link)
        .into_iter()
        .filter(|f| f.can_view(user, parent_access))
        .map(|f| folder_json(f, f.can_access(user, parent_access)))
        .collect();
    Ok(Value::Array(folders))
}

/// Creates a titled folder and answers with its id.
///
/// # Errors
///
/// Returns `ERR-ATT3` for a blank title and `ERR-ATT1` if the folder
/// violates a folder constraint.
pub fn create_folder(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let link: LinkedObject = linked_object(ctx);
    let title: String = ctx.params.required_str("title")?.to_string();
    let description: String = ctx
        .params
        .optional_str("description")?
        .unwrap_or_default()
        .to_string();
    let protection: ProtectionMode = parse_protection(ctx)?;
    let is_always_visible: bool = if ctx.params.has("alwaysVisible") {
        ctx.params.required_bool("alwaysVisible")?
    } else {
        true
    };

    let conference: &Conference = ctx.apply(Command::CreateFolder {
        link,
        title,
        description,
        protection,
        is_always_visible,
    })?;
    Ok(json!({ "id": conference.folders.last_folder_id() }))
}

/// Adds a link attachment to `folder` and answers with its id.
///
/// Without a `folder` the attachment goes to the default folder of the
/// conference or contribution, which is created on first use.
///
/// # Errors
///
/// Returns `ERR-ATT2` if the folder does not exist and `ERR-ATT3` for a
/// blank title.
pub fn add_attachment(ctx: &mut HandlerContext<'_>) -> Result<Value, ServiceError> {
    let link: LinkedObject = linked_object(ctx);
    let folder_id: Option<u64> = if ctx.params.has("folder") {
        let raw_folder: i64 = ctx.params.required_i64("folder")?;
        let id: u64 = u64::try_from(raw_folder).map_err(|_| ParamError::WrongShape {
            field: String::from("folder"),
            expected: "a folder id",
        })?;
        Some(id)
    } else {
        None
    };
    let title: String = ctx.params.required_str("title")?.to_string();
    let link_url: String = ctx.params.required_str("link")?.to_string();

    let conference: &Conference = ctx.apply(Command::AddAttachment {
        link,
        folder_id,
        title,
        link_url,
    })?;
    Ok(json!({ "id": conference.folders.last_attachment_id() }))
}
