use reqwest::Client;

use crate::{
    config::Config,
    types::{
        Artist, AudioFeatures, AudioFeaturesResponse, LibrarySnapshot, Playlist,
        PlaylistTracksResponse, PlaylistsResponse, SavedTrack, SavedTracksResponse,
        TopArtistsResponse, Track,
    },
    utils, warning,
};

/// Audio-features batch requests are capped upstream; ids are chunked so a
/// large library does not exceed the limit.
const AUDIO_FEATURES_BATCH: usize = 100;

/// How many liked songs to pull (first page only).
const LIKED_TRACKS_LIMIT: u32 = 50;

/// How many playlists to aggregate.
const PLAYLISTS_LIMIT: u32 = 5;

/// Fetches the first page of a playlist's track listing, best-effort.
///
/// Any failure - transport error, non-2xx status, malformed body - yields
/// an empty list instead of an error, so one bad playlist never aborts the
/// whole aggregation. Null track entries (removed or local tracks) are
/// filtered out. Does not paginate past the first page the API returns.
pub async fn get_playlist_tracks(url: &str, token: &str) -> Vec<Track> {
    let client = Client::new();
    let response = match client.get(url).bearer_auth(token).send().await {
        Ok(resp) => resp,
        Err(_) => return Vec::new(),
    };

    if !response.status().is_success() {
        return Vec::new();
    }

    match response.json::<PlaylistTracksResponse>().await {
        Ok(body) => body.items.into_iter().filter_map(|item| item.track).collect(),
        Err(_) => Vec::new(),
    }
}

/// Fetches the first page of the user's liked songs.
pub async fn get_liked_tracks(config: &Config, token: &str) -> Result<Vec<SavedTrack>, String> {
    let api_url = format!(
        "{uri}/me/tracks?limit={limit}",
        uri = &config.api_url,
        limit = LIKED_TRACKS_LIMIT
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|_| "Failed to fetch liked songs".to_string())?;

    let body = response
        .json::<SavedTracksResponse>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(body.items)
}

/// Fetches the user's first playlists.
pub async fn get_playlists(config: &Config, token: &str) -> Result<Vec<Playlist>, String> {
    let api_url = format!(
        "{uri}/me/playlists?limit={limit}",
        uri = &config.api_url,
        limit = PLAYLISTS_LIMIT
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|_| "Failed to fetch playlists".to_string())?;

    let body = response
        .json::<PlaylistsResponse>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(body.items)
}

/// Fetches audio features for a set of track ids.
///
/// Ids are joined comma-separated per request and chunked at the batch cap;
/// chunk results are concatenated in order, so the output stays parallel to
/// the input ids (null entries for tracks without features).
pub async fn get_audio_features(
    config: &Config,
    token: &str,
    track_ids: &[String],
) -> Result<Vec<Option<AudioFeatures>>, String> {
    let client = Client::new();
    let mut features = Vec::with_capacity(track_ids.len());

    for chunk in track_ids.chunks(AUDIO_FEATURES_BATCH) {
        let api_url = format!(
            "{uri}/audio-features?ids={ids}",
            uri = &config.api_url,
            ids = chunk.join(",")
        );

        let response = client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|_| "Failed to fetch audio features".to_string())?;

        let body = response
            .json::<AudioFeaturesResponse>()
            .await
            .map_err(|e| e.to_string())?;
        features.extend(body.audio_features);
    }

    Ok(features)
}

/// Fetches the user's top artists (medium-term window, capped at 10).
pub async fn get_top_artists(config: &Config, token: &str) -> Result<Vec<Artist>, String> {
    let api_url = format!(
        "{uri}/me/top/artists?limit=10&time_range=medium_term",
        uri = &config.api_url
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|_| "Failed to fetch top artists".to_string())?;

    let body = response
        .json::<TopArtistsResponse>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(body.items)
}

/// Aggregates the user's library into one deduplicated snapshot.
///
/// Liked songs are mandatory: a failure there fails the aggregation. The
/// playlist stage degrades gracefully - if the playlist listing cannot be
/// fetched, aggregation proceeds with liked songs only; individual playlist
/// track fetches run concurrently and each degrades to an empty list on
/// failure. The merged set is deduplicated by track id (first-seen order,
/// last entry wins per id). An empty merged set short-circuits to an empty
/// snapshot without issuing the audio-features or top-artists calls, both
/// of which are otherwise mandatory.
pub async fn aggregate(config: &Config, token: &str) -> Result<LibrarySnapshot, String> {
    let liked = get_liked_tracks(config, token).await?;

    let playlist_tracks = match get_playlists(config, token).await {
        Ok(playlists) => {
            let mut handles = Vec::new();
            for playlist in playlists {
                let url = playlist.tracks.href.clone();
                let token = token.to_string();
                handles.push(tokio::spawn(async move {
                    get_playlist_tracks(&url, &token).await
                }));
            }

            let mut gathered = Vec::new();
            for handle in handles {
                match handle.await {
                    Ok(tracks) => gathered.push(tracks),
                    Err(e) => {
                        warning!("Task join error: {}", e);
                        gathered.push(Vec::new());
                    }
                }
            }
            gathered
        }
        Err(e) => {
            warning!("{}; continuing with liked songs only", e);
            Vec::new()
        }
    };

    let unique = utils::dedup_tracks(utils::merge_track_sources(liked, playlist_tracks));

    if unique.is_empty() {
        return Ok(LibrarySnapshot::empty());
    }

    let track_ids: Vec<String> = unique.iter().map(|item| item.track.id.clone()).collect();

    let audio_features = get_audio_features(config, token, &track_ids).await?;
    let top_artists = get_top_artists(config, token).await?;

    Ok(LibrarySnapshot {
        tracks: unique,
        audio_features,
        top_artists,
    })
}
