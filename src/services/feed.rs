//! Feed services - Post testuali nel feed di un evento

use crate::core::{AppError, AppJson, AppState, AuthenticatedUser};
use crate::dtos::{CreateFeedItemDTO, CreatePostRequestDTO, FeedItemDTO, UserSummaryDTO};
use crate::repositories::{Create, FeedItemWithUser, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

impl From<FeedItemWithUser> for FeedItemDTO {
    fn from(value: FeedItemWithUser) -> Self {
        let user = UserSummaryDTO {
            id: value.item.user_id.clone(),
            name: value.user_name,
            image: value.user_image,
        };
        let mut dto = FeedItemDTO::from(value.item);
        dto.user = Some(user);
        dto
    }
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, invite_id = %body.invite_id))]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CreatePostRequestDTO>,
) -> Result<Json<FeedItemDTO>, AppError> {
    debug!("Creating feed post");
    // 1. Contenuto non vuoto
    // 2. L'invito deve esistere
    // 3. Tipo di default: UPDATE
    body.validate()?;
    let content = body.content.trim();
    if content.is_empty() {
        warn!("Empty feed post");
        return Err(AppError::bad_request("Content is required"));
    }

    if state.invite.read(&body.invite_id).await?.is_none() {
        warn!("Invite not found");
        return Err(AppError::not_found("Invite not found"));
    }

    let item = state
        .feed
        .create(&CreateFeedItemDTO {
            invite_id: body.invite_id.clone(),
            user_id: current_user.user_id.clone(),
            content: content.to_string(),
            item_type: body.item_type.unwrap_or_default(),
        })
        .await?;

    info!("Feed post {} created", item.id);
    Ok(Json(FeedItemDTO::from(item)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, invite_id = %invite_id))]
pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    Path(invite_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<FeedItemDTO>>, AppError> {
    debug!("Getting invite feed");
    let items: Vec<FeedItemDTO> = state
        .feed
        .list_with_users(&invite_id)
        .await?
        .into_iter()
        .map(FeedItemDTO::from)
        .collect();

    info!("Retrieved {} feed items", items.len());
    Ok(Json(items))
}
