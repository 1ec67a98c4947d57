//! Command handlers: thin glue between CLI arguments and the API client.
//!
//! Each submodule maps to one page of the web client this tool replaces:
//! auth (login/register pages), posts (feed and post editor), profile
//! (profile page with follow controls). Handlers trim and validate input,
//! call the client, and print results; they never talk to the network
//! directly.

pub mod auth;
pub mod posts;
pub mod profile;

use std::io::Write;

use anyhow::{Context, Result};

use crate::models::Media;

/// Read one trimmed line from stdin after printing a label.
fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn is_valid_url(value: &str) -> bool {
    matches!(
        reqwest::Url::parse(value).map(|u| u.scheme().to_string()),
        Ok(scheme) if scheme == "http" || scheme == "https"
    )
}

/// Turn an optional URL argument into a media attachment, rejecting
/// anything that is not a public http(s) URL.
fn media_from(url: Option<String>, alt: Option<String>, default_alt: &str) -> Result<Option<Media>> {
    let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if !is_valid_url(&url) {
        anyhow::bail!("Invalid image URL: {}", url);
    }
    let alt = alt
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| default_alt.to_string());
    Ok(Some(Media { url, alt: Some(alt) }))
}
