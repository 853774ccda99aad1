use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AuthState, Token},
    utils, warning,
};

/// Runs the complete OAuth 2.0 authorization-code flow against Spotify.
///
/// This function orchestrates the entire authentication process:
/// 1. Generating a random `state` token to bind the callback to this run
/// 2. Starting a local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback to exchange the code for a token
/// 5. Persisting the obtained token for future use
///
/// # Arguments
///
/// * `config` - Resolved application configuration
/// * `shared_state` - Thread-safe shared state for handing the `state`
///   token to the callback handler and receiving the exchanged token back
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Token persistence failures terminate the program with an error
/// - Authentication timeouts or failures terminate with an error message
pub async fn auth(config: Arc<Config>, shared_state: Arc<Mutex<Option<AuthState>>>) {
    let state_token = utils::generate_state_token();

    // start callback server
    let server_config = Arc::clone(&config);
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_config, server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&state={state}&scope={scope}",
        auth_url = &config.auth_url,
        client_id = &config.client_id,
        redirect_uri = &config.redirect_uri,
        state = state_token,
        scope = &config.scope
    );

    // Store the state token in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthState {
            state_token: state_token.clone(),
            token: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t.clone());
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Waits for the OAuth callback to complete and return a token.
///
/// Polls the shared state for a completed token with a 60-second timeout.
/// This function runs concurrently with the callback handler that populates
/// the token after successful exchange.
async fn wait_for_token(shared_state: Arc<Mutex<Option<AuthState>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(auth_state) = lock.as_ref() {
            if let Some(token) = &auth_state.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token.
///
/// Completes the authorization-code flow by POSTing the code and redirect
/// URI to the token endpoint with the client credentials carried in a
/// Basic authorization header.
///
/// # Arguments
///
/// * `config` - Application configuration with client credentials and URLs
/// * `code` - Authorization code received from the OAuth callback
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Complete token with access token, refresh token, and metadata
/// - `Err(String)` - The upstream `error_description` when present, or a
///   transport/parse error message
///
/// # Security Note
///
/// The authorization code is single-use and expires quickly (typically
/// 10 minutes). The exchange should happen immediately after receiving
/// the code.
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token, String> {
    let basic = STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret));

    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .header(AUTHORIZATION, format!("Basic {}", basic))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    if !status.is_success() {
        return Err(json["error_description"]
            .as_str()
            .unwrap_or("Token exchange failed")
            .to_string());
    }

    Ok(token_from_json(&json, None))
}

/// Refreshes an expired access token using a refresh token.
///
/// Exchanges a refresh token for a new access token so the application can
/// keep authenticated access without the user re-authorizing. The refresh
/// token may rotate; when the response omits it, the previous one is kept.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Result<Token, String> {
    let basic = STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret));

    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .header(AUTHORIZATION, format!("Basic {}", basic))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    if !status.is_success() {
        return Err(json["error_description"]
            .as_str()
            .unwrap_or("Token refresh failed")
            .to_string());
    }

    Ok(token_from_json(&json, Some(refresh_token)))
}

fn token_from_json(json: &Value, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .or(previous_refresh)
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
