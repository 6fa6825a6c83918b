//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTO usati per comunicare con il client
//! (serializzati in camelCase) e per passare dati ai repository.

pub mod circle;
pub mod feed;
pub mod invite;
pub mod invite_link;
pub mod media;
pub mod user;

// Re-exports per facilitare l'import
pub use circle::{
    CircleDTO, CircleDetailsDTO, CircleMemberDTO, CirclePreviewDTO, CircleSummaryDTO,
    CreateCircleDTO, CreateCircleMemberDTO, CreateCircleRequestDTO, InviteCodeDTO,
    JoinCircleResponseDTO, UpdateCircleSettingsDTO,
};
pub use feed::{CreateFeedItemDTO, CreatePostRequestDTO, FeedItemDTO};
pub use invite::{
    CircleRefDTO, CreateInviteDTO, CreateInviteRequestDTO, InviteCircleDTO, InviteDTO,
    InviteDetailsDTO, InviteListItemDTO, InviteSummaryDTO, RsvpDTO, RsvpRequestDTO, UpsertRsvpDTO,
};
pub use invite_link::{CreateInviteLinkDTO, CreateInviteLinkRequestDTO, InviteLinkDTO};
pub use media::{CreateMediaItemDTO, MediaItemDTO};
pub use user::{
    SuccessDTO, SyncUserRequestDTO, UpdateProfileDTO, UpsertUserDTO, UserDTO, UserProfileDTO,
    UserStatsDTO, UserSummaryDTO,
};
