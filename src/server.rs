use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::sync::Mutex;

use crate::{api, config::Config, error, types::AuthState};

/// Permissive CORS for the frontend: OPTIONS preflights are answered
/// directly with the allow headers, every other response gets the
/// allow-origin header stamped on.
async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return (
            StatusCode::OK,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            ],
        )
            .into_response();
    }

    let mut response = next.run(req).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

pub async fn start_api_server(config: Arc<Config>, auth_state: Arc<Mutex<Option<AuthState>>>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route("/api/spotify-auth", post(api::spotify_auth))
        .route("/api/fetch-music", post(api::fetch_music))
        .route("/api/analyze-music", post(api::analyze_music))
        .route("/api/get-recommendations", post(api::get_recommendations))
        .layer(middleware::from_fn(cors))
        .layer(Extension(Arc::clone(&config)))
        .layer(Extension(auth_state));

    let addr = match SocketAddr::from_str(&config.server_addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
