use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error, gemini, info,
    management::{ProfileCache, TokenManager},
    spotify, success,
    types::{Profile, RecommendationTableRow},
    utils, warning,
};

/// Runs the full profile flow from the terminal.
///
/// Serves the cached profile when one younger than 24 hours exists (unless
/// `force`), otherwise aggregates the library, asks the summarizer for a
/// taste description, requests recommendations (non-fatal on failure) and
/// caches the result. With `use_targets` the recommendations request
/// carries averaged feature targets instead of seed track ids.
pub async fn profile(config: &Config, force: bool, use_targets: bool) {
    let cache = ProfileCache::new();

    if !force {
        match cache.load().await {
            Ok(Some(cached)) => {
                info!("Using cached profile (less than 24 hours old)");
                display(&cached);
                return;
            }
            Ok(None) => {}
            Err(e) => warning!("Failed to read profile cache: {:?}", e),
        }
    }

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run audioalign auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token(config).await;

    let pb = spinner("Fetching your music data...");
    let snapshot = match spotify::library::aggregate(config, &token).await {
        Ok(snapshot) => {
            pb.finish_and_clear();
            snapshot
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch music data from Spotify: {}", e);
        }
    };

    if snapshot.tracks.is_empty() {
        error!(
            "We couldn't find any liked songs in your Spotify library. Please like some songs and try again!"
        );
    }
    success!("Aggregated {} unique tracks", snapshot.tracks.len());
    info!(
        "Tracks include: {}",
        utils::preview_track_names(&snapshot.tracks, 5)
    );

    let pb = spinner("Analyzing your musical taste with AI...");
    let analysis = match gemini::summarize(config, &snapshot.tracks, &snapshot.audio_features).await
    {
        Ok(text) => {
            pb.finish_and_clear();
            text
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("AI analysis failed: {}", e);
        }
    };

    let pb = spinner("Getting personalized recommendations...");
    let features: Vec<_> = snapshot.audio_features.iter().flatten().cloned().collect();
    let recommendations = match spotify::recommend::get_recommendations(
        config,
        &token,
        &snapshot.top_artists,
        &features,
        use_targets,
    )
    .await
    {
        Ok(tracks) => {
            pb.finish_and_clear();
            tracks
        }
        Err(e) => {
            pb.finish_and_clear();
            warning!("Recommendations unavailable: {}", e);
            Vec::new()
        }
    };

    let profile = Profile {
        analysis,
        recommendations,
        timestamp: Utc::now().timestamp() as u64,
    };

    if let Err(e) = cache.store(&profile).await {
        warning!("Failed to cache profile: {:?}", e);
    }

    display(&profile);
}

/// Drops the cached profile unconditionally (explicit user reset).
pub async fn reset() {
    match ProfileCache::new().clear().await {
        Ok(()) => success!("Cached profile removed"),
        Err(e) => warning!("No cached profile to remove: {:?}", e),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn display(profile: &Profile) {
    println!("\nYour Musical DNA\n");
    println!("{}\n", profile.analysis);

    if profile.recommendations.is_empty() {
        info!("No recommendations this time");
        return;
    }

    let rows: Vec<RecommendationTableRow> = profile
        .recommendations
        .iter()
        .map(|track| RecommendationTableRow {
            name: track.name.clone(),
            artist: track
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}
