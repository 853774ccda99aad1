//! # Spotify Integration Module
//!
//! This module is the integration layer between AudioAlign and the Spotify
//! Web API. It handles the OAuth token lifecycle, library reads, and the
//! recommendation endpoint, abstracting HTTP communication behind a small
//! set of async functions.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, HTTP API)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization-code flow, token refresh)
//!     ├── Library Reads (liked songs, playlists, audio features, top artists)
//!     └── Recommendations (seed derivation, catalog request)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow: browser-based user
//!   authorization against a local callback server, code-for-token exchange
//!   with client credentials in a Basic authorization header, and token
//!   refresh.
//! - [`library`] - Library aggregation: fetches liked songs and the tracks
//!   of the user's first playlists (in parallel, failures degraded
//!   per-playlist), merges and deduplicates them, and fetches audio
//!   features and top artists for the merged set.
//! - [`recommend`] - Seed derivation from top artists and audio features,
//!   and the recommendations request itself.
//!
//! ## Error Handling
//!
//! Fetches that are fatal to an operation return `Result<_, String>` with a
//! stage-specific message; the per-playlist track fetch is deliberately
//! best-effort and yields an empty list on any failure so one bad playlist
//! cannot abort the whole aggregation.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and token refresh
//! - `GET /me/tracks` - liked songs (first page, limit 50)
//! - `GET /me/playlists` - user playlists (first 5)
//! - `GET <playlist tracks href>` - per-playlist track listing (first page)
//! - `GET /audio-features` - batch audio features by comma-joined ids
//! - `GET /me/top/artists` - top artists (limit 10, medium term)
//! - `GET /recommendations` - seeded track recommendations

pub mod auth;
pub mod library;
pub mod recommend;
