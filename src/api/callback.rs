use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{config::Config, spotify, types::AuthState, warning};

/// GET `/callback` - OAuth redirect target for the CLI auth flow.
///
/// Verifies the `state` parameter against the value generated when the
/// flow started, exchanges the code for a token and stores it in the
/// shared state the waiting auth command polls.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthState>>>>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(ref mut auth_state) = state.as_mut() else {
        return Html("<h4>No authentication in progress.</h4>");
    };

    if params.get("state") != Some(&auth_state.state_token) {
        return Html("<h4>State mismatch, rejecting callback.</h4>");
    }

    match spotify::auth::exchange_code(&config, code).await {
        Ok(token) => {
            auth_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
