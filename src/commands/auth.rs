use anyhow::{Context, Result};
use tracing::debug;

use crate::api::ApiClient;
use crate::auth::{CredentialStore, API_KEY_KEY, TOKEN_KEY, USER_KEY};
use crate::models::RegisterRequest;

use super::{media_from, prompt};

/// Minimum password length accepted by the API
const MIN_PASSWORD_LEN: usize = 8;

/// Registration is restricted to student addresses
const EMAIL_DOMAIN: &str = "@stud.noroff.no";

/// Handle the login command: authenticate, persist the token and user name,
/// then mint and persist an API key. All three are required before any
/// social endpoint works.
pub async fn login(client: &ApiClient, store: &CredentialStore, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email.trim().to_string(),
        None => prompt("Email: ")?,
    };
    if email.is_empty() {
        anyhow::bail!("Email must not be empty");
    }

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let data = client.login(&email, &password).await?;
    store.save(TOKEN_KEY, &data.access_token)?;
    store.save(USER_KEY, &data.name)?;
    debug!(user = %data.name, "Token stored, requesting API key");

    let api_key = client.create_api_key(&data.access_token).await?;
    store.save(API_KEY_KEY, &api_key.key)?;

    println!("Logged in as {}", data.name);
    Ok(())
}

/// Handle the register command. Validation mirrors the signup form: a
/// student email, a password of at least eight characters, and http(s)
/// image URLs. Nothing is sent until the input passes.
pub async fn register(
    client: &ApiClient,
    name: String,
    email: String,
    bio: Option<String>,
    avatar_url: Option<String>,
    banner_url: Option<String>,
) -> Result<()> {
    let name = name.trim().to_string();
    let email = email.trim().to_string();

    if name.is_empty() {
        anyhow::bail!("Name must not be empty");
    }
    if !is_valid_noroff_email(&email) {
        anyhow::bail!("Email must be a valid {} address", EMAIL_DOMAIN.trim_start_matches('@'));
    }

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    if password.len() < MIN_PASSWORD_LEN {
        anyhow::bail!("Password must be at least {} characters long", MIN_PASSWORD_LEN);
    }
    let confirm =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    let request = RegisterRequest {
        name,
        email,
        password,
        bio: bio.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
        avatar: media_from(avatar_url, None, "User avatar")?,
        banner: media_from(banner_url, None, "User banner")?,
    };

    let profile = client.register(&request).await?;
    println!("Registered {}. You can now log in with `yapper login`.", profile.name);
    Ok(())
}

/// Remove all stored credentials.
pub fn logout(store: &CredentialStore) -> Result<()> {
    store.clear()?;
    println!("Logged out. Stored credentials removed.");
    Ok(())
}

pub fn whoami(store: &CredentialStore) -> Result<()> {
    match store.user_name() {
        Some(name) if store.is_authenticated() => println!("{}", name),
        _ => println!("Not logged in. Run `yapper login` first."),
    }
    Ok(())
}

fn is_valid_noroff_email(email: &str) -> bool {
    let Some(local) = email.strip_suffix(EMAIL_DOMAIN) else {
        return false;
    };
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
}
