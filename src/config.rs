//! Configuration management for AudioAlign.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files and bundling them into a single [`Config`]
//! struct that is built once at startup and injected into the server state
//! and the API clients. Nothing else in the crate reads the environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory

use std::{env, path::PathBuf};

use dotenv;

/// Process-wide configuration, resolved once at startup.
///
/// Holds the Spotify application credentials, the endpoint URLs for the
/// Spotify Web API and the generative-text service, and the local server
/// address. Handlers and clients receive a shared reference instead of
/// reading environment variables at call sites.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address and port the local HTTP server binds to, e.g. `127.0.0.1:8080`.
    pub server_addr: String,
    /// Spotify application client ID.
    pub client_id: String,
    /// Spotify application client secret. Keep out of logs.
    pub client_secret: String,
    /// OAuth redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    /// OAuth scopes requested during authorization.
    pub scope: String,
    /// Spotify authorization endpoint, e.g. `https://accounts.spotify.com/authorize`.
    pub auth_url: String,
    /// Spotify token exchange endpoint, e.g. `https://accounts.spotify.com/api/token`.
    pub token_url: String,
    /// Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Generative-text endpoint URL (model `generateContent` URL, without key).
    pub gemini_url: String,
    /// API key for the generative-text endpoint.
    pub gemini_api_key: String,
}

impl Config {
    /// Builds a [`Config`] from the process environment.
    ///
    /// Call [`load_env`] first so values from a `.env` file are visible.
    /// Returns an error naming the first missing variable.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            server_addr: require("SERVER_ADDRESS")?,
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: require("SPOTIFY_REDIRECT_URI")?,
            scope: require("SPOTIFY_AUTH_SCOPE")?,
            auth_url: require("SPOTIFY_AUTH_URL")?,
            token_url: require("SPOTIFY_TOKEN_URL")?,
            api_url: require("SPOTIFY_API_URL")?,
            gemini_url: require("GEMINI_API_URL")?,
            gemini_api_key: require("GEMINI_API_KEY")?,
        })
    }
}

fn require(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} must be set", name))
}

/// Loads environment variables from a `.env` file.
///
/// Looks for the file in the platform-specific local data directory under
/// `audioalign/.env`, creating the directory structure if needed. When no
/// file exists there, falls back to a `.env` in the working directory so
/// that variables set directly in the environment keep working.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/audioalign/.env`
/// - macOS: `~/Library/Application Support/audioalign/.env`
/// - Windows: `%LOCALAPPDATA%/audioalign/.env`
///
/// # Errors
///
/// Returns an error string if the parent directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("audioalign/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    } else {
        // Not an error: variables may come from the process environment.
        dotenv::dotenv().ok();
    }
    Ok(())
}
