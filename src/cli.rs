//! CLI type definitions
//!
//! This module contains the clap command structures that define the CLI
//! interface. Handlers live in the `commands` module.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "yapper")]
#[command(about = "A terminal client for the Noroff social network", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output raw JSON instead of formatted text
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store credentials for later commands
    Login {
        /// Email address (prompted for when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Register a new account
    Register {
        /// Profile name
        #[arg(short, long)]
        name: String,

        /// Email address (must be a stud.noroff.no address)
        #[arg(short, long)]
        email: String,

        /// Profile bio
        #[arg(short, long)]
        bio: Option<String>,

        /// Avatar image URL
        #[arg(long)]
        avatar_url: Option<String>,

        /// Banner image URL
        #[arg(long)]
        banner_url: Option<String>,
    },

    /// Remove stored credentials
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Browse the feed
    Feed {
        /// Only posts carrying this tag
        #[arg(short, long, conflicts_with_all = ["search", "author", "id"])]
        tag: Option<String>,

        /// Full-text search over titles and bodies
        #[arg(short, long, conflicts_with_all = ["author", "id"])]
        search: Option<String>,

        /// Only posts by this profile
        #[arg(short, long, conflicts_with = "id")]
        author: Option<String>,

        /// A single post by id
        #[arg(long)]
        id: Option<i64>,
    },

    /// Post management commands
    #[command(subcommand)]
    Post(PostCommands),

    /// Profile and follow commands
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// Create a new post
    Create {
        /// Post title
        #[arg(short, long)]
        title: String,

        /// Post body text
        #[arg(short, long)]
        body: Option<String>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Image URL to attach
        #[arg(long)]
        image_url: Option<String>,

        /// Alt text for the attached image
        #[arg(long)]
        image_alt: Option<String>,
    },

    /// Show a single post with comments and reactions counts
    Show {
        /// Post id
        id: i64,
    },

    /// Update an existing post; omitted fields keep their current value
    Edit {
        /// Post id
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        body: Option<String>,

        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        image_alt: Option<String>,
    },

    /// Delete a post
    Delete {
        /// Post id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show a profile with follower counts (defaults to the logged-in user)
    Show {
        /// Profile name
        name: Option<String>,
    },

    /// List a profile's posts
    Posts {
        /// Profile name
        name: String,
    },

    /// Follow a profile
    Follow {
        /// Profile name
        name: String,
    },

    /// Unfollow a profile
    Unfollow {
        /// Profile name
        name: String,
    },
}
