//! Pure DTO-to-entity transforms.
//!
//! Nothing in here touches the network or the database; every function is
//! deterministic over its input, which keeps the whole layer unit-testable
//! without fixtures.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use nextup_model::availability::UNKNOWN_PROVIDER_ID;
use nextup_model::{NewEpisode, NewExternalId, NewTitle, StreamingService, TitleKind};

use crate::error::Result;
use crate::remote::dto::{EpisodeDto, StreamingOptionDto, TitleDto};

/// Country whose streaming options are mirrored locally.
const HOME_COUNTRY: &str = "us";

/// Provider deep links embed the native id as `/title/<digits>` or
/// `/watch/<digits>`.
static PROVIDER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(title|watch)/(\d+)").expect("provider id regex"));

/// Classify the remote's free-text show type. Anything that is not
/// recognizably a series - including a missing or empty value - is a movie.
pub fn title_kind(show_type: Option<&str>) -> TitleKind {
    match show_type.map(str::to_ascii_lowercase).as_deref() {
        Some("series") | Some("tv") | Some("show") => TitleKind::Series,
        _ => TitleKind::Movie,
    }
}

pub fn to_title(dto: &TitleDto) -> Result<NewTitle> {
    let image_set_json = dto
        .image_set
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    Ok(NewTitle {
        mon_id: dto.id.clone(),
        kind: title_kind(dto.show_type.as_deref()),
        name: dto.title.clone(),
        synopsis: dto.overview.clone(),
        year: dto.release_year,
        runtime_min: dto.runtime,
        image_set_json,
    })
}

/// Genre names: trimmed, blanks dropped, deduplicated case-insensitively
/// preserving first-seen order.
pub fn genre_names(dto: &TitleDto) -> Vec<String> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for genre in &dto.genres {
        let name = genre.name.trim();
        if name.is_empty() {
            continue;
        }
        let folded = name.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        out.push(name.to_string());
    }
    out
}

pub fn cast_names(dto: &TitleDto) -> Vec<String> {
    dedup_names(&dto.cast)
}

pub fn director_names(dto: &TitleDto) -> Vec<String> {
    dedup_names(&dto.directors)
}

/// Trim, drop blanks, and deduplicate by exact string within the one
/// title's credit list. Global dedup happens at the store layer by name.
fn dedup_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() || out.iter().any(|existing| existing == name) {
            continue;
        }
        out.push(name.to_string());
    }
    out
}

pub fn us_streaming_options(dto: &TitleDto) -> &[StreamingOptionDto] {
    dto.streaming_options
        .get(HOME_COUNTRY)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Pull the provider-native id out of a deep-link URL, if it matches the
/// known `/title/<digits>` or `/watch/<digits>` shapes.
pub fn extract_provider_id(url: &str) -> Option<String> {
    PROVIDER_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// External ids derived from a title's home-country streaming options.
/// Options for services without a deep-link template are skipped; a
/// failed id extraction falls back to the `"unknown"` sentinel rather
/// than erroring.
pub fn to_external_ids(dto: &TitleDto) -> Vec<NewExternalId> {
    us_streaming_options(dto)
        .iter()
        .filter_map(to_external_id)
        .collect()
}

fn to_external_id(option: &StreamingOptionDto) -> Option<NewExternalId> {
    let Some(service) = StreamingService::parse(&option.service.id) else {
        debug!(service = %option.service.id, "skipping option for unknown streaming service");
        return None;
    };

    let provider_id = option
        .link
        .as_deref()
        .and_then(extract_provider_id)
        .or_else(|| option.video_link.as_deref().and_then(extract_provider_id))
        .unwrap_or_else(|| UNKNOWN_PROVIDER_ID.to_string());

    let price = option
        .price
        .as_ref()
        .and_then(|price| price.amount.as_deref())
        .and_then(|amount| amount.parse::<f64>().ok());

    Some(NewExternalId {
        service,
        provider_id,
        available: true,
        price,
    })
}

/// Episode rows for a series title. Episodes missing either key number
/// cannot satisfy the (title, season, episode) unique key and are skipped.
pub fn to_episodes(dtos: &[EpisodeDto]) -> Result<Vec<NewEpisode>> {
    let mut out = Vec::with_capacity(dtos.len());
    for dto in dtos {
        let (Some(season_number), Some(episode_number)) = (dto.season_number, dto.episode_number)
        else {
            debug!(mon_id = %dto.id, "skipping episode without season/episode numbers");
            continue;
        };

        let image_set_json = dto
            .image_set
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        out.push(NewEpisode {
            mon_id: dto.id.clone(),
            season_number,
            episode_number,
            name: dto.name.clone(),
            synopsis: dto.synopsis.clone(),
            runtime_min: dto.runtime_min,
            air_date: dto.air_date.clone(),
            image_set_json,
            source_updated_at: dto.source_updated_at,
        });
    }
    Ok(out)
}
