//! Media services - Upload multipart dei file di un evento

use crate::core::{AppError, AppState, AuthenticatedUser};
use crate::dtos::{CreateMediaItemDTO, MediaItemDTO};
use crate::entities::MediaType;
use crate::repositories::{Create, Read};
use axum::{
    Extension,
    extract::{Json, Multipart, State},
};
use axum_macros::debug_handler;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Dimensione massima del body di un upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

fn media_type_for(content_type: Option<&str>) -> MediaType {
    match content_type {
        Some(ct) if ct.starts_with("video/") => MediaType::Video,
        _ => MediaType::Image,
    }
}

#[debug_handler]
#[instrument(skip(state, current_user, multipart), fields(user_id = %current_user.user_id))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> Result<Json<MediaItemDTO>, AppError> {
    debug!("Uploading media");
    // 1. Leggere i campi `file`, `inviteId` e `caption` (opzionale)
    // 2. L'invito deve esistere
    // 3. Salvare i byte nello store e registrare il MediaItem con l'URL restituito
    let mut invite_id: Option<String> = None;
    let mut caption: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("inviteId") => invite_id = Some(field.text().await?),
            Some("caption") => caption = Some(field.text().await?).filter(|c| !c.is_empty()),
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let invite_id = invite_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        warn!("Upload without inviteId");
        AppError::bad_request("inviteId is required")
    })?;
    let file = file.filter(|f| !f.bytes.is_empty()).ok_or_else(|| {
        warn!("Upload without file");
        AppError::bad_request("File is required")
    })?;

    if state.invite.read(&invite_id).await?.is_none() {
        warn!("Invite not found");
        return Err(AppError::not_found("Invite not found"));
    }

    let url = state
        .media_store
        .save(&invite_id, &current_user.user_id, file.bytes, &file.file_name)
        .await
        .map_err(|e| {
            error!("Media store failure: {:#}", e);
            AppError::internal_server_error("Failed to store file").with_details(e.to_string())
        })?;

    let item = state
        .media
        .create(&CreateMediaItemDTO {
            invite_id,
            user_id: current_user.user_id.clone(),
            url,
            media_type: media_type_for(file.content_type.as_deref()),
            caption,
        })
        .await?;

    info!("Media item {} uploaded", item.id);
    Ok(Json(MediaItemDTO::from(item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_defaults_to_image() {
        assert_eq!(media_type_for(None), MediaType::Image);
        assert_eq!(media_type_for(Some("image/png")), MediaType::Image);
        assert_eq!(media_type_for(Some("application/octet-stream")), MediaType::Image);
        assert_eq!(media_type_for(Some("video/mp4")), MediaType::Video);
    }
}
