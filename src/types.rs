use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Shared state between the CLI auth flow and the OAuth callback handler.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub state_token: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A catalog track. Identity is the catalog `id`: two records with the same
/// id are the same track regardless of which source they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<AlbumRef>,
}

/// The common nested shape both liked songs and playlist tracks are
/// normalized to before merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrack {
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<SavedTrack>,
}

/// Playlist track entries may carry a null track (removed or local files).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistTrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksLink {
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: TracksLink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsResponse {
    pub items: Vec<Playlist>,
}

/// Per-track numeric attributes keyed by the same catalog id as the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub tempo: f64,
}

/// Batch response: the API returns null for ids it has no features for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

/// The aggregator's output: a deduplicated ordered track sequence plus the
/// derived metadata fetched for it.
///
/// Invariant: every track id appears at most once, in first-occurrence
/// order (liked songs before playlist tracks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    pub tracks: Vec<SavedTrack>,
    pub audio_features: Vec<Option<AudioFeatures>>,
    pub top_artists: Vec<Artist>,
}

impl LibrarySnapshot {
    pub fn empty() -> Self {
        LibrarySnapshot {
            tracks: Vec::new(),
            audio_features: Vec::new(),
            top_artists: Vec::new(),
        }
    }
}

/// One completed run: the summarizer text, the recommendation list (possibly
/// empty) and the unix timestamp it was captured at. Replaced wholesale on
/// the next successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub analysis: String,
    pub recommendations: Vec<Track>,
    pub timestamp: u64,
}

impl Profile {
    /// Read-time TTL check: a profile is fresh while younger than 24 hours.
    pub fn is_fresh(&self, now: u64) -> bool {
        now.saturating_sub(self.timestamp) < 24 * 60 * 60
    }
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub name: String,
    pub artist: String,
}

// Request/response bodies for the frontend-facing endpoints. Field names
// follow the original wire format (camelCase). Required fields are Options
// so that missing parameters produce a 400 instead of a body rejection.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMusicRequest {
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub tracks: Vec<SavedTrack>,
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub access_token: Option<String>,
    pub top_artists: Option<Vec<Artist>>,
    pub audio_features: Option<Vec<Option<AudioFeatures>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsBody {
    pub recommendations: Vec<Track>,
}
