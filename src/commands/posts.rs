use anyhow::Result;

use crate::api::{ApiClient, PostQuery};
use crate::models::{Post, PostPayload};
use crate::utils::format::{format_date, truncate_string};

use super::media_from;

/// Maximum body length shown per post in feed listings
const FEED_BODY_WIDTH: usize = 80;

/// Handle the feed command. At most one scope flag is set (clap enforces
/// it); with none, the whole feed is fetched.
pub async fn feed(
    client: &ApiClient,
    tag: Option<String>,
    search: Option<String>,
    author: Option<String>,
    id: Option<i64>,
    json: bool,
) -> Result<()> {
    let query = if let Some(id) = id {
        PostQuery::Id(id)
    } else if let Some(tag) = scrub(tag) {
        PostQuery::Tag(tag)
    } else if let Some(q) = scrub(search) {
        PostQuery::Search(q)
    } else if let Some(name) = scrub(author) {
        PostQuery::Author(name)
    } else {
        PostQuery::All
    };

    let posts = client.fetch_posts(&query).await?;
    print_listing(&posts, json)?;
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    title: String,
    body: Option<String>,
    tags: Vec<String>,
    image_url: Option<String>,
    image_alt: Option<String>,
    json: bool,
) -> Result<()> {
    let title = title.trim().to_string();
    if title.is_empty() {
        anyhow::bail!("Title is required");
    }

    let tags = clean_tags(tags);
    let payload = PostPayload {
        title,
        body: scrub(body),
        tags: if tags.is_empty() { None } else { Some(tags) },
        media: media_from(image_url, image_alt, "Image")?,
    };

    let post = client.create_post(&payload).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!("Created post {} \"{}\"", post.id, post.title);
    }
    Ok(())
}

pub async fn show(client: &ApiClient, id: i64, json: bool) -> Result<()> {
    let post = client.get_post(id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!("#{} {}", post.id, post.title);
    println!("by {} on {}", post.author_name(), format_date(&post.created));
    if !post.tags.is_empty() {
        println!("tags: {}", post.tags.join(", "));
    }
    if let Some(ref media) = post.media {
        println!("image: {}", media.url);
    }
    if let Some(ref body) = post.body {
        println!("\n{}", body);
    }
    println!(
        "\n{} comments, {} reactions",
        post.count.comments, post.count.reactions
    );
    Ok(())
}

/// Update a post. The current post is fetched first so omitted fields keep
/// their stored value rather than being blanked.
#[allow(clippy::too_many_arguments)]
pub async fn edit(
    client: &ApiClient,
    id: i64,
    title: Option<String>,
    body: Option<String>,
    tags: Option<Vec<String>>,
    image_url: Option<String>,
    image_alt: Option<String>,
    json: bool,
) -> Result<()> {
    let current = client.get_post(id).await?;

    let media = match image_url {
        Some(url) => media_from(Some(url), image_alt, "Image")?,
        None => current.media,
    };
    let tags = match tags {
        Some(tags) => {
            let tags = clean_tags(tags);
            if tags.is_empty() { None } else { Some(tags) }
        }
        None if current.tags.is_empty() => None,
        None => Some(current.tags),
    };

    let payload = PostPayload {
        title: scrub(title).unwrap_or(current.title),
        body: scrub(body).or(current.body),
        tags,
        media,
    };

    let post = client.update_post(id, &payload).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!("Updated post {} \"{}\"", post.id, post.title);
    }
    Ok(())
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client.delete_post(id).await?;
    println!("Deleted post {}", id);
    Ok(())
}

/// Render a feed listing, shared with `profile posts`.
pub fn print_listing(posts: &[Post], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    for post in posts {
        println!(
            "#{} {} - {} ({})",
            post.id,
            post.title,
            post.author_name(),
            format_date(&post.created)
        );
        if let Some(ref body) = post.body {
            if !body.is_empty() {
                println!("    {}", truncate_string(body, FEED_BODY_WIDTH));
            }
        }
        println!(
            "    {} comments, {} reactions",
            post.count.comments, post.count.reactions
        );
    }
    println!(
        "\nShowing {} post{}",
        posts.len(),
        if posts.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

fn scrub(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub() {
        assert_eq!(scrub(Some("  hi  ".to_string())).as_deref(), Some("hi"));
        assert_eq!(scrub(Some("   ".to_string())), None);
        assert_eq!(scrub(None), None);
    }

    #[test]
    fn test_clean_tags() {
        let tags = clean_tags(vec![
            " outdoors ".to_string(),
            "".to_string(),
            "camp".to_string(),
        ]);
        assert_eq!(tags, vec!["outdoors".to_string(), "camp".to_string()]);
    }
}
