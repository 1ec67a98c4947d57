//! Wire types for the Noroff Social API.

pub mod account;
pub mod post;
pub mod profile;

use serde::{Deserialize, Serialize};

pub use account::{ApiKeyData, LoginData, RegisterRequest};
pub use post::{Author, Post, PostCount, PostPayload};
pub use profile::{FollowEntry, Profile, ProfileCount};

/// An image reference with alt text, used for avatars, banners, and post
/// media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}
