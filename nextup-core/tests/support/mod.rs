//! Shared test support: a scriptable catalog source and DTO builders.
#![allow(dead_code)] // not every test binary uses every helper

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use nextup_core::remote::dto::{EpisodeDto, GenreDto, StreamingOptionDto, StreamingServiceDto, TitleDto};
use nextup_core::{CatalogPage, CatalogSource, RemoteError};

/// Catalog source driven by a script instead of HTTP.
///
/// `Finite` mode serves a fixed page sequence; `Infinite` mode fabricates
/// a fresh single-title page with `has_more = true` on every call, for
/// page-cap tests.
pub struct ScriptedCatalog {
    mode: Mutex<Mode>,
    titles: HashMap<String, TitleDto>,
    episodes: HashMap<String, Vec<EpisodeDto>>,
    failing_titles: HashSet<String>,
    pub search_calls: AtomicU32,
    /// Cursor received by each search call, in order.
    pub cursors_seen: Mutex<Vec<Option<String>>>,
}

enum Mode {
    Finite(VecDeque<CatalogPage>),
    Infinite,
}

impl ScriptedCatalog {
    pub fn with_pages(pages: Vec<CatalogPage>) -> Self {
        Self {
            mode: Mutex::new(Mode::Finite(pages.into())),
            titles: HashMap::new(),
            episodes: HashMap::new(),
            failing_titles: HashSet::new(),
            search_calls: AtomicU32::new(0),
            cursors_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn endless() -> Self {
        Self {
            mode: Mutex::new(Mode::Infinite),
            titles: HashMap::new(),
            episodes: HashMap::new(),
            failing_titles: HashSet::new(),
            search_calls: AtomicU32::new(0),
            cursors_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_titles(titles: impl IntoIterator<Item = TitleDto>) -> Self {
        let mut catalog = Self::with_pages(Vec::new());
        for title in titles {
            catalog.titles.insert(title.id.clone(), title);
        }
        catalog
    }

    pub fn add_episodes(&mut self, mon_id: &str, episodes: Vec<EpisodeDto>) {
        self.episodes.insert(mon_id.to_string(), episodes);
    }

    /// Make `get_title` fail for this id with a permanent error.
    pub fn fail_title(&mut self, mon_id: &str) {
        self.failing_titles.insert(mon_id.to_string());
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn search_page(
        &self,
        _catalog: &str,
        cursor: Option<&str>,
    ) -> Result<CatalogPage, RemoteError> {
        let call = self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors_seen
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));

        match &mut *self.mode.lock().unwrap() {
            Mode::Finite(pages) => pages
                .pop_front()
                .ok_or_else(|| RemoteError::Parse("script exhausted".to_string())),
            Mode::Infinite => Ok(CatalogPage {
                titles: vec![title_dto(&format!("endless-{call}"), "Endless Show")],
                next_cursor: Some(format!("cursor-{}", call + 1)),
                has_more: true,
            }),
        }
    }

    async fn get_title(&self, mon_id: &str) -> Result<TitleDto, RemoteError> {
        if self.failing_titles.contains(mon_id) {
            return Err(RemoteError::NotFound);
        }
        self.titles.get(mon_id).cloned().ok_or(RemoteError::NotFound)
    }

    async fn get_episodes(&self, mon_id: &str) -> Result<Vec<EpisodeDto>, RemoteError> {
        Ok(self.episodes.get(mon_id).cloned().unwrap_or_default())
    }
}

pub fn title_dto(mon_id: &str, name: &str) -> TitleDto {
    TitleDto {
        id: mon_id.to_string(),
        show_type: Some("movie".to_string()),
        title: name.to_string(),
        original_title: None,
        overview: Some(format!("{name} overview")),
        release_year: Some(1999),
        rating: Some(80),
        runtime: Some(120),
        genres: Vec::new(),
        directors: Vec::new(),
        cast: Vec::new(),
        image_set: None,
        streaming_options: HashMap::new(),
    }
}

pub fn with_genres(mut dto: TitleDto, names: &[&str]) -> TitleDto {
    dto.genres = names
        .iter()
        .enumerate()
        .map(|(i, name)| GenreDto {
            id: i.to_string(),
            name: name.to_string(),
        })
        .collect();
    dto
}

pub fn with_credits(mut dto: TitleDto, cast: &[&str], directors: &[&str]) -> TitleDto {
    dto.cast = cast.iter().map(|s| s.to_string()).collect();
    dto.directors = directors.iter().map(|s| s.to_string()).collect();
    dto
}

pub fn with_streaming_option(mut dto: TitleDto, service_id: &str, link: &str) -> TitleDto {
    dto.streaming_options
        .entry("us".to_string())
        .or_default()
        .push(StreamingOptionDto {
            service: StreamingServiceDto {
                id: service_id.to_string(),
                name: service_id.to_string(),
                home_page: None,
                theme_color_code: None,
            },
            option_type: Some("subscription".to_string()),
            link: Some(link.to_string()),
            video_link: None,
            quality: None,
            expires_soon: None,
            expires_on: None,
            available_since: None,
            price: None,
            addon: None,
        });
    dto
}

pub fn episode_dto(mon_id: &str, season: i32, episode: i32, name: &str) -> EpisodeDto {
    EpisodeDto {
        id: mon_id.to_string(),
        season_number: Some(season),
        episode_number: Some(episode),
        name: Some(name.to_string()),
        synopsis: None,
        runtime_min: Some(45),
        air_date: None,
        image_set: None,
        source_updated_at: None,
    }
}

pub fn page(titles: Vec<TitleDto>, next_cursor: Option<&str>, has_more: bool) -> CatalogPage {
    CatalogPage {
        titles,
        next_cursor: next_cursor.map(str::to_string),
        has_more,
    }
}
