//! Lyrics lookup: cache first, then the configured remote provider.

use std::sync::Arc;

use super::cache::LyricsCache;
use super::markup;
use super::providers::Provider;
use super::track::{self, Track};
use super::transport::{NetworkGate, Transport};

/// Shown when lyrics are not cached and remote lookups are disabled.
pub const OFFLINE_MESSAGE: &str = "Local lyrics not found. As remote lookups are disabled, \
you can put appropriate lyrics into the lyrics directory (file syntax is \"ARTIST - TITLE.txt\") \
or enable remote lookups in the configuration.";

pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// How a lookup ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from the cache file.
    Cached,
    /// Downloaded and written to the cache.
    Downloaded,
    /// The provider has no lyrics for this song.
    NotFound,
    /// Not cached and no remote lookups configured.
    Offline,
    /// The request itself failed.
    Failed(String),
}

/// Result of a lookup: the text for the pane and how it was obtained.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub track: Track,
    pub text: String,
    pub outcome: FetchOutcome,
}

/// Everything a lookup needs besides the track.
#[derive(Clone)]
pub struct FetchContext {
    pub cache: LyricsCache,
    pub provider: Provider,
    /// `None` when remote lookups are disabled.
    pub transport: Option<Arc<dyn Transport>>,
    pub gate: NetworkGate,
}

/// Look up lyrics for a track.
pub async fn fetch_lyrics(ctx: &FetchContext, track: Track) -> FetchReport {
    let track = Track::new(&track.artist, &track.title);
    let path = ctx.cache.path_for(&track);

    if let Err(e) = ctx.cache.ensure_dir().await {
        tracing::warn!("Failed to create {}: {}", ctx.cache.dir().display(), e);
    }

    if let Some(lines) = ctx.cache.read(&path).await {
        tracing::info!("Lyrics for {} served from cache", track);
        let text = lines
            .iter()
            .map(|line| track::to_display(line))
            .collect::<Vec<_>>()
            .join("\n");
        return report(track, text, FetchOutcome::Cached);
    }

    let Some(transport) = &ctx.transport else {
        return report(track, OFFLINE_MESSAGE.to_string(), FetchOutcome::Offline);
    };

    let url = ctx.provider.query_url(&track.artist, &track.title);
    tracing::info!("Fetching lyrics for {} from {}", track, ctx.provider.name());

    let response = {
        let _guard = ctx.gate.acquire().await;
        transport.get(&url).await
    };

    let body = match response {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to fetch lyrics for {}: {}", track, e);
            let text = format!("Error while fetching lyrics: {}", e);
            return report(track, text, FetchOutcome::Failed(e.to_string()));
        }
    };

    let extracted = match ctx.provider.extract(&body) {
        Some(extracted) if !ctx.provider.is_not_found(extracted) => extracted,
        Some(_) => return not_found(track),
        None => {
            tracing::warn!("Malformed response from {}", ctx.provider.name());
            return not_found(track);
        }
    };

    let lyrics = markup::clean(extracted);
    if let Err(e) = ctx.cache.write(&path, &lyrics).await {
        tracing::warn!("Failed to cache lyrics in {}: {}", path.display(), e);
    }

    report(track, track::to_display(&lyrics), FetchOutcome::Downloaded)
}

fn not_found(track: Track) -> FetchReport {
    tracing::info!("No lyrics found for {}", track);
    report(track, NOT_FOUND_MESSAGE.to_string(), FetchOutcome::NotFound)
}

fn report(track: Track, text: String, outcome: FetchOutcome) -> FetchReport {
    FetchReport {
        track,
        text,
        outcome,
    }
}
