//! # CLI Module
//!
//! The command-line interface layer for AudioAlign. It implements the
//! user-facing commands and coordinates between the Spotify integration,
//! the summarizer client and the local cache management.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates the Spotify OAuth authorization-code flow with a
//!   local callback server
//!
//! ### Profile Operations
//!
//! - [`profile`] - Runs the full flow: aggregates the library, asks the
//!   summarizer for a taste description, requests recommendations, caches
//!   the profile for 24 hours and renders it
//! - [`reset`] - Drops the cached profile unconditionally
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Token/Profile Cache)
//!     ↓
//! Integration Layer (Spotify, Gemini)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each command delegates to the integration and management modules while
//! handling user interaction, progress feedback and error presentation.

mod auth;
mod profile;

pub use auth::auth;
pub use profile::profile;
pub use profile::reset;
