//! Yapper - a terminal client for the Noroff social network.
//!
//! Log in once, then browse the feed, manage posts, and follow profiles
//! from the command line. Credentials persist between runs; everything else
//! lives on the server.

mod api;
mod auth;
mod cli;
mod commands;
mod config;
mod models;
mod utils;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::{ApiClient, ApiError};
use auth::CredentialStore;
use cli::{Cli, Commands, PostCommands, ProfileCommands};
use config::Config;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        // Unauthenticated failures all funnel into the same prompt; the
        // web client this replaces redirected to the login page here.
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Unauthenticated) => {
                eprintln!("Not logged in. Run `yapper login` first.");
            }
            _ => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let endpoints = config.endpoints()?;
    let store = CredentialStore::new(config.credentials_dir()?)?;
    let client = ApiClient::new(endpoints, store.clone())?;
    debug!("Client ready");

    match cli.command {
        Commands::Login { email } => commands::auth::login(&client, &store, email).await,
        Commands::Register {
            name,
            email,
            bio,
            avatar_url,
            banner_url,
        } => commands::auth::register(&client, name, email, bio, avatar_url, banner_url).await,
        Commands::Logout => commands::auth::logout(&store),
        Commands::Whoami => commands::auth::whoami(&store),
        Commands::Feed {
            tag,
            search,
            author,
            id,
        } => commands::posts::feed(&client, tag, search, author, id, cli.json).await,
        Commands::Post(command) => match command {
            PostCommands::Create {
                title,
                body,
                tags,
                image_url,
                image_alt,
            } => {
                commands::posts::create(&client, title, body, tags, image_url, image_alt, cli.json)
                    .await
            }
            PostCommands::Show { id } => commands::posts::show(&client, id, cli.json).await,
            PostCommands::Edit {
                id,
                title,
                body,
                tags,
                image_url,
                image_alt,
            } => {
                commands::posts::edit(
                    &client, id, title, body, tags, image_url, image_alt, cli.json,
                )
                .await
            }
            PostCommands::Delete { id } => commands::posts::delete(&client, id).await,
        },
        Commands::Profile(command) => match command {
            ProfileCommands::Show { name } => {
                commands::profile::show(&client, &store, name, cli.json).await
            }
            ProfileCommands::Posts { name } => {
                commands::profile::posts(&client, name, cli.json).await
            }
            ProfileCommands::Follow { name } => commands::profile::follow(&client, name).await,
            ProfileCommands::Unfollow { name } => commands::profile::unfollow(&client, name).await,
        },
    }
}
