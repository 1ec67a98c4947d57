use anyhow::Result;

use crate::api::{ApiClient, PostQuery};
use crate::auth::CredentialStore;
use crate::utils::format::format_optional;

use super::posts::print_listing;

/// Show a profile with follower counts. With no name argument, falls back
/// to the logged-in user.
pub async fn show(
    client: &ApiClient,
    store: &CredentialStore,
    name: Option<String>,
    json: bool,
) -> Result<()> {
    let name = match name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => store
            .user_name()
            .ok_or_else(|| anyhow::anyhow!("No profile name given and no user is logged in"))?,
    };

    let profile = client.fetch_profile(&name).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{}", profile.name);
    println!("email: {}", format_optional(&profile.email, "not available"));
    println!("bio: {}", format_optional(&profile.bio, "no bio"));
    println!(
        "{} posts, {} followers, following {}",
        profile.count.posts, profile.count.followers, profile.count.following
    );
    if let Some(me) = store.user_name() {
        if me != profile.name && profile.is_followed_by(&me) {
            println!("You follow this profile.");
        }
    }
    Ok(())
}

pub async fn posts(client: &ApiClient, name: String, json: bool) -> Result<()> {
    let listing = client.fetch_posts(&PostQuery::Author(name.trim().to_string())).await?;
    print_listing(&listing, json)
}

/// Follow a profile, then refetch it so the printed counts reflect the new
/// state.
pub async fn follow(client: &ApiClient, name: String) -> Result<()> {
    let name = name.trim().to_string();
    client.follow(&name).await?;
    let profile = client.fetch_profile(&name).await?;
    println!(
        "Now following {} ({} followers)",
        profile.name, profile.count.followers
    );
    Ok(())
}

pub async fn unfollow(client: &ApiClient, name: String) -> Result<()> {
    let name = name.trim().to_string();
    client.unfollow(&name).await?;
    let profile = client.fetch_profile(&name).await?;
    println!(
        "Unfollowed {} ({} followers)",
        profile.name, profile.count.followers
    );
    Ok(())
}
