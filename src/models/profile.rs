use serde::{Deserialize, Serialize};

use super::Media;

/// A social profile, with follower/following lists when requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    #[serde(rename = "_count", default)]
    pub count: ProfileCount,
    #[serde(default)]
    pub followers: Vec<FollowEntry>,
    #[serde(default)]
    pub following: Vec<FollowEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileCount {
    #[serde(default)]
    pub posts: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowEntry {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<Media>,
}

impl Profile {
    /// Whether `name` appears in this profile's follower list. Only
    /// meaningful when the profile was fetched with `_followers`.
    pub fn is_followed_by(&self, name: &str) -> bool {
        self.followers.iter().any(|f| f.name == name)
    }
}
