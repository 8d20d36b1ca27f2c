//! Command definitions and dispatch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use snapfeed_client::dto::{Credentials, NewPost, NewUser};
use snapfeed_client::{Client, QueryClient};
use snapfeed_core::domain::{FileUpload, User};
use snapfeed_infra::{AppwriteConfig, HttpBackend, InMemoryCache};

use crate::session;

#[derive(Debug, Parser)]
#[command(name = "snapfeed", version, about = "Social feed client over a hosted backend")]
pub struct Cli {
    /// File persisting the session secret between invocations.
    #[arg(long, global = true, default_value = ".snapfeed-session")]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and its user profile
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        username: Option<String>,
    },
    /// Sign in with email and password
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Delete the current session
    Signout,
    /// Show the signed-in user
    Whoami,
    /// Show the most recent posts
    Feed,
    /// Publish a post with an image
    Post {
        #[arg(long)]
        caption: String,
        /// Path of the image file to upload.
        #[arg(long)]
        image: PathBuf,
        #[arg(long, default_value = "")]
        location: String,
        /// Comma-separated tags, e.g. "art, travel".
        #[arg(long)]
        tags: Option<String>,
    },
    /// Toggle your like on a post from the recent feed
    Like { post_id: String },
    /// Bookmark a post
    Save { post_id: String },
    /// Remove a bookmark by its saved-post id
    Unsave { saved_post_id: String },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppwriteConfig::from_env();
    let stored_session = session::load(&cli.session_file)?;
    let backend = Arc::new(HttpBackend::with_session(config, stored_session));
    let queries = QueryClient::new(
        Client::from_backend(backend.clone()),
        Arc::new(InMemoryCache::new()),
    );

    match cli.command {
        Command::Signup {
            name,
            email,
            password,
            username,
        } => {
            let user = queries
                .create_user_account(NewUser {
                    name,
                    email,
                    password,
                    username,
                })
                .await?;
            println!("created user {} ({})", user.id, user.email);
        }

        Command::Signin { email, password } => {
            queries.sign_in(Credentials { email, password }).await?;
            if let Some(secret) = backend.session_secret() {
                session::store(&cli.session_file, &secret)?;
            }
            println!("signed in");
        }

        Command::Signout => {
            queries.sign_out().await?;
            session::clear(&cli.session_file)?;
            println!("signed out");
        }

        Command::Whoami => match queries.current_user().await? {
            Some(user) => {
                let username = user.username.as_deref().unwrap_or("-");
                println!("{} <{}> (username: {})", user.name, user.email, username);
            }
            None => println!("not signed in"),
        },

        Command::Feed => {
            let posts = queries.recent_posts().await?;
            if posts.is_empty() {
                println!("no posts yet");
            }
            for post in posts {
                println!(
                    "{}  {}  [{} likes]  {}",
                    post.id,
                    post.caption,
                    post.likes.len(),
                    post.tags.join(","),
                );
            }
        }

        Command::Post {
            caption,
            image,
            location,
            tags,
        } => {
            let user = signed_in_user(&queries).await?;
            let post = queries
                .create_post(NewPost {
                    creator_id: user.id,
                    caption,
                    image: read_image(&image)?,
                    location,
                    tags,
                })
                .await?;
            println!("created post {}", post.id);
        }

        Command::Like { post_id } => {
            let user = signed_in_user(&queries).await?;
            let posts = queries.recent_posts().await?;
            let post = posts
                .into_iter()
                .find(|p| p.id == post_id)
                .with_context(|| format!("post {post_id} not in the recent feed"))?;

            let mut likes = post.likes;
            if likes.iter().any(|id| id == &user.id) {
                likes.retain(|id| id != &user.id);
            } else {
                likes.push(user.id);
            }

            let updated = queries.like_post(&post_id, likes).await?;
            println!("post {} now has {} likes", updated.id, updated.likes.len());
        }

        Command::Save { post_id } => {
            let user = signed_in_user(&queries).await?;
            let saved = queries.save_post(&post_id, &user.id).await?;
            println!("saved post as {}", saved.id);
        }

        Command::Unsave { saved_post_id } => {
            queries.delete_saved_post(&saved_post_id).await?;
            println!("removed bookmark {saved_post_id}");
        }
    }

    Ok(())
}

async fn signed_in_user(queries: &QueryClient) -> anyhow::Result<User> {
    match queries.current_user().await? {
        Some(user) => Ok(user),
        None => bail!("not signed in - run `snapfeed signin` first"),
    }
}

fn read_image(path: &Path) -> anyhow::Result<FileUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(FileUpload {
        name,
        content_type,
        bytes,
    })
}
