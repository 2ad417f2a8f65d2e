//! Store-level behavior of the sync pipeline: idempotence, natural-key
//! dedup, field refresh, and top-shows reconciliation.

mod support;

use std::sync::Arc;

use sqlx::SqlitePool;

use nextup_core::database::repositories::{external_ids, popularity, titles};
use nextup_core::remote::dto::TitleDto;
use nextup_core::LibrarySync;
use nextup_model::{RankingKind, StreamingService, TitleId};
use support::{
    episode_dto, title_dto, with_credits, with_genres, with_streaming_option, ScriptedCatalog,
};

fn full_title_dto(mon_id: &str) -> TitleDto {
    let dto = title_dto(mon_id, "The Godfather");
    let dto = with_genres(dto, &["Drama", "Crime"]);
    let dto = with_credits(dto, &["Al Pacino", "Marlon Brando"], &["Francis Ford Coppola"]);
    with_streaming_option(dto, "netflix", "https://www.netflix.com/title/60011152")
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn persisting_the_same_title_tree_twice_is_idempotent(pool: SqlitePool) {
    let source = Arc::new(ScriptedCatalog::with_titles([full_title_dto("82")]));
    let sync = LibrarySync::new(source, pool.clone());

    let first = sync.sync_title("82").await.unwrap();
    assert_eq!(first.titles_upserted, 1);
    assert_eq!(first.genres_upserted, 2);
    assert_eq!(first.people_upserted, 3);
    assert_eq!(first.external_ids_upserted, 1);
    assert_eq!(first.title_genre_links, 2);
    assert_eq!(first.title_person_links, 3);

    let id_after_first = titles::find_id_by_mon_id(&pool, "82").await.unwrap();

    let second = sync.sync_title("82").await.unwrap();
    // Entity creation is zero-delta on the second run; cross-ref and
    // external-id counters re-assert the processed rows.
    assert_eq!(second.titles_upserted, 0);
    assert_eq!(second.genres_upserted, 0);
    assert_eq!(second.people_upserted, 0);
    assert_eq!(second.external_ids_upserted, 1);
    assert_eq!(second.title_genre_links, 2);
    assert_eq!(second.title_person_links, 3);

    assert_eq!(titles::find_id_by_mon_id(&pool, "82").await.unwrap(), id_after_first);
    assert_eq!(count(&pool, "titles").await, 1);
    assert_eq!(count(&pool, "genres").await, 2);
    assert_eq!(count(&pool, "people").await, 3);
    assert_eq!(count(&pool, "title_genres").await, 2);
    assert_eq!(count(&pool, "title_credits").await, 3);
    assert_eq!(count(&pool, "external_ids").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn genre_case_variants_share_one_row_across_titles(pool: SqlitePool) {
    let first = with_genres(title_dto("1", "One"), &["Drama"]);
    let second = with_genres(title_dto("2", "Two"), &["DRAMA"]);
    let source = Arc::new(ScriptedCatalog::with_titles([first, second]));
    let sync = LibrarySync::new(source, pool.clone());

    sync.sync_title("1").await.unwrap();
    let report = sync.sync_title("2").await.unwrap();

    assert_eq!(report.genres_upserted, 0);
    assert_eq!(count(&pool, "genres").await, 1);
    // First-seen casing survives.
    let stored: String = sqlx::query_scalar("SELECT name FROM genres")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "Drama");
}

#[sqlx::test(migrations = "./migrations")]
async fn people_dedup_by_exact_name_across_titles(pool: SqlitePool) {
    let first = with_credits(title_dto("1", "One"), &["Al Pacino"], &[]);
    let second = with_credits(title_dto("2", "Two"), &["Al Pacino"], &["Al Pacino"]);
    let source = Arc::new(ScriptedCatalog::with_titles([first, second]));
    let sync = LibrarySync::new(source, pool.clone());

    sync.sync_title("1").await.unwrap();
    sync.sync_title("2").await.unwrap();

    assert_eq!(count(&pool, "people").await, 1);
    // Same person, two roles on title 2, one role on title 1.
    assert_eq!(count(&pool, "title_credits").await, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn title_metadata_is_first_write_wins(pool: SqlitePool) {
    let source = Arc::new(ScriptedCatalog::with_titles([title_dto("82", "Original Name")]));
    let sync = LibrarySync::new(source, pool.clone());
    sync.sync_title("82").await.unwrap();

    let renamed = Arc::new(ScriptedCatalog::with_titles([title_dto("82", "Renamed")]));
    let sync = LibrarySync::new(renamed, pool.clone());
    sync.sync_title("82").await.unwrap();

    let id = titles::find_id_by_mon_id(&pool, "82").await.unwrap().unwrap();
    let stored = titles::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Original Name");
    assert_eq!(count(&pool, "titles").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn external_id_mutable_fields_refresh_on_resync(pool: SqlitePool) {
    let dto = with_streaming_option(
        title_dto("82", "The Godfather"),
        "netflix",
        "https://www.netflix.com/title/111",
    );
    let sync = LibrarySync::new(Arc::new(ScriptedCatalog::with_titles([dto])), pool.clone());
    sync.sync_title("82").await.unwrap();

    let dto = with_streaming_option(
        title_dto("82", "The Godfather"),
        "netflix",
        "https://www.netflix.com/title/222",
    );
    let sync = LibrarySync::new(Arc::new(ScriptedCatalog::with_titles([dto])), pool.clone());
    sync.sync_title("82").await.unwrap();

    let title_id = titles::find_id_by_mon_id(&pool, "82").await.unwrap().unwrap();
    let stored = external_ids::list_for_title(&pool, title_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].service, StreamingService::Netflix);
    assert_eq!(stored[0].provider_id, "222");
}

#[sqlx::test(migrations = "./migrations")]
async fn series_sync_upserts_episodes_by_their_key(pool: SqlitePool) {
    let mut dto = title_dto("s1", "Stranger Things");
    dto.show_type = Some("series".to_string());
    let mut catalog = ScriptedCatalog::with_titles([dto]);
    catalog.add_episodes(
        "s1",
        vec![
            episode_dto("e1", 1, 1, "Chapter One"),
            episode_dto("e2", 1, 2, "Chapter Two"),
        ],
    );
    let sync = LibrarySync::new(Arc::new(catalog), pool.clone());

    let first = sync.sync_title("s1").await.unwrap();
    assert_eq!(first.episodes_upserted, 2);
    assert_eq!(count(&pool, "episodes").await, 2);

    let second = sync.sync_title("s1").await.unwrap();
    assert_eq!(second.episodes_upserted, 2);
    assert_eq!(count(&pool, "episodes").await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn single_title_failure_propagates(pool: SqlitePool) {
    let mut catalog = ScriptedCatalog::with_titles(Vec::<TitleDto>::new());
    catalog.fail_title("missing");
    let sync = LibrarySync::new(Arc::new(catalog), pool);

    assert!(sync.sync_title("missing").await.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn top_shows_reconciliation_is_an_exact_replacement(pool: SqlitePool) {
    let source = Arc::new(ScriptedCatalog::with_titles([
        title_dto("A", "Alpha"),
        title_dto("B", "Beta"),
        title_dto("C", "Gamma"),
        title_dto("D", "Delta"),
    ]));
    let sync = LibrarySync::new(source, pool.clone());
    let service = StreamingService::Netflix;

    sync.sync_top_shows(service, &["A".into(), "B".into(), "C".into()])
        .await
        .unwrap();

    let before = popularity::list(&pool, service, RankingKind::TopShows)
        .await
        .unwrap();
    assert_eq!(before.len(), 3);
    let row_id_of = |rows: &[nextup_model::Popularity], title: TitleId| {
        rows.iter().find(|r| r.title_id == title).map(|r| r.id)
    };
    let title_b = titles::find_id_by_mon_id(&pool, "B").await.unwrap().unwrap();
    let title_c = titles::find_id_by_mon_id(&pool, "C").await.unwrap().unwrap();
    let b_row = row_id_of(&before, title_b).unwrap();
    let c_row = row_id_of(&before, title_c).unwrap();

    sync.sync_top_shows(service, &["B".into(), "C".into(), "D".into()])
        .await
        .unwrap();

    let after = popularity::list(&pool, service, RankingKind::TopShows)
        .await
        .unwrap();
    let title_a = titles::find_id_by_mon_id(&pool, "A").await.unwrap().unwrap();
    let title_d = titles::find_id_by_mon_id(&pool, "D").await.unwrap().unwrap();

    assert_eq!(after.len(), 3);
    assert!(row_id_of(&after, title_a).is_none());
    assert!(row_id_of(&after, title_d).is_some());
    // Preserved members keep their rows.
    assert_eq!(row_id_of(&after, title_b), Some(b_row));
    assert_eq!(row_id_of(&after, title_c), Some(c_row));
}

#[sqlx::test(migrations = "./migrations")]
async fn top_shows_failures_are_recorded_and_dropped_from_ranking(pool: SqlitePool) {
    let mut catalog =
        ScriptedCatalog::with_titles([title_dto("A", "Alpha"), title_dto("B", "Beta")]);
    catalog.fail_title("broken");
    let sync = LibrarySync::new(Arc::new(catalog), pool.clone());
    let service = StreamingService::Hulu;

    let report = sync
        .sync_top_shows(service, &["A".into(), "broken".into(), "B".into()])
        .await
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].mon_id, "broken");
    assert_eq!(report.titles_upserted, 2);

    let ranking = popularity::list(&pool, service, RankingKind::TopShows)
        .await
        .unwrap();
    assert_eq!(ranking.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_top_shows_list_clears_the_ranking(pool: SqlitePool) {
    let source = Arc::new(ScriptedCatalog::with_titles([title_dto("A", "Alpha")]));
    let sync = LibrarySync::new(source, pool.clone());
    let service = StreamingService::Disney;

    sync.sync_top_shows(service, &["A".into()]).await.unwrap();
    assert_eq!(
        popularity::list(&pool, service, RankingKind::TopShows)
            .await
            .unwrap()
            .len(),
        1
    );

    sync.sync_top_shows(service, &[]).await.unwrap();
    assert!(popularity::list(&pool, service, RankingKind::TopShows)
        .await
        .unwrap()
        .is_empty());
}
