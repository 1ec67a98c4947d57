use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Media;

/// A post as returned by the API, with author and counts when the listing
/// flags were requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(rename = "_count", default)]
    pub count: PostCount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCount {
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub reactions: u32,
}

impl Post {
    pub fn author_name(&self) -> &str {
        self.author.as_ref().map(|a| a.name.as_str()).unwrap_or("unknown")
    }
}

/// Request body for creating or updating a post. Optional fields are
/// omitted from the payload entirely rather than sent as null.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}
