use serde::Serialize;

use crate::error::SyncError;

/// Counters accumulated over one sync run.
///
/// Entity counters (`titles_upserted`, `genres_upserted`,
/// `people_upserted`) count newly created rows, so a re-run over
/// unchanged input reports zero creations. External-id, episode, and
/// cross-ref counters count processed rows, which re-assert on every
/// run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub pages: u32,
    pub titles_upserted: u32,
    pub episodes_upserted: u32,
    pub external_ids_upserted: u32,
    pub genres_upserted: u32,
    pub people_upserted: u32,
    pub title_genre_links: u32,
    pub title_person_links: u32,
    /// Titles that failed to sync, with the error that stopped them.
    /// Keeps partial-failure isolation observable instead of silent.
    pub failed: Vec<TitleFailure>,
    /// Cursor of the last fetched page, for resuming an interrupted run.
    pub last_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleFailure {
    pub mon_id: String,
    pub error: String,
}

impl SyncReport {
    pub fn record_failure(&mut self, mon_id: &str, error: &SyncError) {
        self.failed.push(TitleFailure {
            mon_id: mon_id.to_string(),
            error: error.to_string(),
        });
    }

    /// Whether every title in the run persisted.
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fold a committed title-tree's counters into the run totals.
    /// Page count, cursor, and failures stay owned by the run loop.
    pub(crate) fn absorb(&mut self, delta: &SyncReport) {
        self.titles_upserted += delta.titles_upserted;
        self.episodes_upserted += delta.episodes_upserted;
        self.external_ids_upserted += delta.external_ids_upserted;
        self.genres_upserted += delta.genres_upserted;
        self.people_upserted += delta.people_upserted;
        self.title_genre_links += delta.title_genre_links;
        self.title_person_links += delta.title_person_links;
    }
}
