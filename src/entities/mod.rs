//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod circle;
pub mod circle_invite_link;
pub mod circle_member;
pub mod enums;
pub mod feed_item;
pub mod invite;
pub mod media_item;
pub mod rsvp;
pub mod user;

// Re-exports per facilitare l'import
pub use circle::Circle;
pub use circle_invite_link::CircleInviteLink;
pub use circle_member::CircleMember;
pub use enums::{FeedItemType, MediaType, MemberRole, MemberStatus, ProfileVisibility, RsvpStatus};
pub use feed_item::EventFeedItem;
pub use invite::Invite;
pub use media_item::MediaItem;
pub use rsvp::Rsvp;
pub use user::User;
