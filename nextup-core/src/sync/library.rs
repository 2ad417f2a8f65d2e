use std::sync::Arc;

use tracing::{info, warn};

use nextup_model::{CreditRole, PersonId, RankingKind, StreamingService, TitleId, TitleKind};

use crate::database::repositories::{
    episodes, external_ids, genres, people, popularity, titles,
};
use crate::error::Result;
use crate::mappers;
use crate::remote::dto::{EpisodeDto, TitleDto};
use crate::remote::CatalogSource;
use crate::sync::report::SyncReport;

/// Drives the catalog sync pipeline: fetch a page, map its titles,
/// persist each title-tree in its own transaction, repeat until the
/// server runs out of pages or the page cap is hit.
///
/// The store handle and the catalog source are injected; the service
/// itself is stateless between runs. At most one sync is expected to run
/// against a store at a time.
pub struct LibrarySync {
    source: Arc<dyn CatalogSource>,
    pool: sqlx::SqlitePool,
}

impl std::fmt::Debug for LibrarySync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibrarySync")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

impl LibrarySync {
    pub fn new(source: Arc<dyn CatalogSource>, pool: sqlx::SqlitePool) -> Self {
        Self { source, pool }
    }

    /// Full catalog sync: stream pages from the remote and upsert every
    /// title-tree. A failing title is recorded in the report and skipped;
    /// a failing page fetch (after the client's retries) aborts the run.
    pub async fn sync_all(
        &self,
        catalog: &str,
        start_cursor: Option<String>,
        max_pages: Option<u32>,
    ) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        if max_pages == Some(0) {
            return Ok(report);
        }

        let mut cursor = start_cursor;
        loop {
            let page = self.source.search_page(catalog, cursor.as_deref()).await?;
            report.pages += 1;
            info!(
                catalog,
                page = report.pages,
                titles = page.titles.len(),
                "processing catalog page"
            );

            for dto in &page.titles {
                if let Err(err) = self.persist_title_tree(dto, None, &mut report).await {
                    warn!(mon_id = %dto.id, error = %err, "title sync failed, skipping");
                    report.record_failure(&dto.id, &err);
                }
            }

            report.last_cursor = page.next_cursor.clone();
            if !page.has_more {
                break;
            }
            if let Some(cap) = max_pages {
                if report.pages >= cap {
                    break;
                }
            }
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    // Server claims more pages but gave us nowhere to
                    // resume from; stop instead of refetching page one.
                    warn!(catalog, "hasMore set without a cursor, stopping");
                    break;
                }
            }
        }

        info!(
            catalog,
            pages = report.pages,
            titles = report.titles_upserted,
            failed = report.failed.len(),
            "catalog sync finished"
        );
        Ok(report)
    }

    /// Sync one title by catalog id: fetch it (plus episodes for a
    /// series), persist as a single title-tree transaction. Errors
    /// propagate to the caller.
    pub async fn sync_title(&self, mon_id: &str) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        self.fetch_and_persist(mon_id, &mut report).await?;
        Ok(report)
    }

    /// Sync a service's current top-shows list and reconcile the stored
    /// ranking against it. Titles that fail to sync are recorded and
    /// dropped from the ranking, preserving the order of the survivors.
    pub async fn sync_top_shows(
        &self,
        service: StreamingService,
        mon_ids: &[String],
    ) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        let mut ranked_ids: Vec<TitleId> = Vec::with_capacity(mon_ids.len());

        for mon_id in mon_ids {
            match self.fetch_and_persist(mon_id, &mut report).await {
                Ok(title_id) => ranked_ids.push(title_id),
                Err(err) => {
                    warn!(mon_id = %mon_id, error = %err, "top-shows title failed, dropping from ranking");
                    report.record_failure(mon_id, &err);
                }
            }
        }

        popularity::reconcile(&self.pool, service, RankingKind::TopShows, &ranked_ids).await?;
        info!(
            service = %service,
            ranked = ranked_ids.len(),
            failed = report.failed.len(),
            "top shows reconciled"
        );
        Ok(report)
    }

    async fn fetch_and_persist(&self, mon_id: &str, report: &mut SyncReport) -> Result<TitleId> {
        let dto = self.source.get_title(mon_id).await?;
        let episode_dtos = if mappers::title_kind(dto.show_type.as_deref()) == TitleKind::Series {
            Some(self.source.get_episodes(mon_id).await?)
        } else {
            None
        };
        self.persist_title_tree(&dto, episode_dtos.as_deref(), report)
            .await
    }

    /// Persist one title and everything derived from it - external ids,
    /// genres, credits, episodes - in a single transaction. All of it
    /// lands or none of it does.
    async fn persist_title_tree(
        &self,
        dto: &TitleDto,
        episode_dtos: Option<&[EpisodeDto]>,
        report: &mut SyncReport,
    ) -> Result<TitleId> {
        let title = mappers::to_title(dto)?;
        let external = mappers::to_external_ids(dto);
        let genre_names = mappers::genre_names(dto);
        let cast = mappers::cast_names(dto);
        let directors = mappers::director_names(dto);
        let new_episodes = match episode_dtos {
            Some(dtos) => mappers::to_episodes(dtos)?,
            None => Vec::new(),
        };

        // Counters accumulate into a local delta so a rolled-back
        // transaction leaves the run report untouched.
        let mut delta = SyncReport::default();
        let mut tx = self.pool.begin().await?;

        let upserted = titles::upsert(&mut tx, &title).await?;
        let title_id = upserted.id;
        if upserted.created {
            delta.titles_upserted += 1;
        }

        delta.external_ids_upserted +=
            external_ids::upsert(&mut tx, title_id, &external).await? as u32;

        let genre_rows = genres::upsert_names(&mut tx, &genre_names).await?;
        delta.genres_upserted += genre_rows.iter().filter(|g| g.created).count() as u32;
        let genre_ids: Vec<_> = genre_rows.iter().map(|g| g.id).collect();
        delta.title_genre_links += genres::link(&mut tx, title_id, &genre_ids).await? as u32;

        for (names, role) in [(&cast, CreditRole::Cast), (&directors, CreditRole::Director)] {
            let person_rows = people::upsert_names(&mut tx, names).await?;
            delta.people_upserted += person_rows.iter().filter(|p| p.created).count() as u32;
            let person_ids: Vec<PersonId> = person_rows.iter().map(|p| p.id).collect();
            delta.title_person_links +=
                people::link(&mut tx, title_id, &person_ids, role).await? as u32;
        }

        if !new_episodes.is_empty() {
            delta.episodes_upserted +=
                episodes::upsert(&mut tx, title_id, &new_episodes).await? as u32;
        }

        tx.commit().await?;
        report.absorb(&delta);
        Ok(title_id)
    }
}
