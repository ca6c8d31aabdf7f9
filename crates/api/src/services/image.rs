//! Image uploads for characters and quests.
//!
//! An upload always replaces the owner's whole image set. Files are written
//! first, then the rows are swapped in one transaction, then the previous
//! files are removed. Any failure before the swap commits leaves the old set
//! in place and removes whatever this batch already wrote.

use std::time::{SystemTime, UNIX_EPOCH};

use dungeon_core::error::CoreError;
use dungeon_core::lifecycle::{guard_mutable, ItemStatus};
use dungeon_core::naming::stored_image_name;
use dungeon_core::ownership::{OwnedRecord, Privacy};
use dungeon_core::storage::FileStore;
use dungeon_core::types::DbId;
use dungeon_core::validation::validate_image_count;
use dungeon_db::models::image::ImageTarget;
use dungeon_db::store::Store;

use super::remove_files_best_effort;
use crate::error::AppResult;

/// One file from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// The parts of a character or quest the upload flow cares about.
struct ImageOwner {
    user_id: DbId,
    privacy: Privacy,
    status: ItemStatus,
    stored_paths: Vec<String>,
}

impl OwnedRecord for ImageOwner {
    fn owner_id(&self) -> DbId {
        self.user_id
    }
    fn privacy(&self) -> Privacy {
        self.privacy
    }
    fn status(&self) -> ItemStatus {
        self.status
    }
}

async fn load_owner(store: &dyn Store, target: ImageTarget, id: DbId) -> AppResult<ImageOwner> {
    let owner = match target {
        ImageTarget::Character => store.find_character(id).await?.map(|c| ImageOwner {
            user_id: c.user_id,
            privacy: c.privacy,
            status: c.status,
            stored_paths: c.stored_image_paths(),
        }),
        ImageTarget::Quest => store.find_quest(id).await?.map(|q| ImageOwner {
            user_id: q.user_id,
            privacy: q.privacy,
            status: q.status,
            stored_paths: q.stored_image_paths(),
        }),
    };
    Ok(owner.ok_or(CoreError::NotFound {
        entity: target.entity(),
        id,
    })?)
}

fn archived_upload(target: ImageTarget) -> CoreError {
    CoreError::BadRequest(format!(
        "Cannot upload images for an archived {}",
        target.entity()
    ))
}

fn upload_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

/// Replace the image set of a character or quest owned by `actor`.
///
/// Returns the public URLs of the new images, in upload order.
pub async fn upload(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: DbId,
    target: ImageTarget,
    id: DbId,
    images: &[UploadedImage],
) -> AppResult<Vec<String>> {
    let owner = load_owner(store, target, id).await?;
    if owner.owner_id() != actor {
        return Err(CoreError::Unauthorized(format!(
            "Only the owner can upload images for this {}",
            target.entity()
        ))
        .into());
    }
    guard_mutable(&owner).map_err(|_| archived_upload(target))?;
    validate_image_count(images.len())?;

    let nanos = upload_nanos();
    let mut saved: Vec<String> = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let name = stored_image_name(nanos, index, &image.file_name);
        match files.save(&name, &image.data).await {
            Ok(path) => saved.push(path),
            Err(e) => {
                tracing::error!(error = %e, file = %name, "Image save failed, aborting upload");
                remove_files_best_effort(files, &saved).await;
                return Err(e.into());
            }
        }
    }

    let replaced = match store.replace_images(target, id, &saved).await {
        Ok(Some(replaced)) => replaced,
        Ok(None) => {
            // Archived or deleted since it was loaded; nothing was written.
            remove_files_best_effort(files, &saved).await;
            return Err(match load_owner(store, target, id).await {
                Ok(_) => archived_upload(target).into(),
                Err(e) => e,
            });
        }
        Err(e) => {
            remove_files_best_effort(files, &saved).await;
            return Err(e.into());
        }
    };

    let mut stale: Vec<String> = replaced;
    for path in owner.stored_paths {
        if !stale.contains(&path) {
            stale.push(path);
        }
    }
    stale.retain(|p| !saved.contains(p));
    remove_files_best_effort(files, &stale).await;

    tracing::info!(
        entity = target.entity(),
        owner_id = %id,
        user_id = %actor,
        count = saved.len(),
        "Images replaced"
    );
    Ok(saved.iter().map(|p| files.public_url(p)).collect())
}
