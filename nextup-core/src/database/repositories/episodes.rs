use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use nextup_model::{NewEpisode, TitleId};

use crate::error::Result;

/// Upsert a series title's episodes, keyed by (title, season, episode).
/// A re-sync refreshes the metadata columns. Returns the processed-row
/// count.
pub async fn upsert(
    tx: &mut Transaction<'_, Sqlite>,
    title_id: TitleId,
    episodes: &[NewEpisode],
) -> Result<usize> {
    for episode in episodes {
        sqlx::query(
            r#"
            INSERT INTO episodes (
                title_id, mon_id, season_number, episode_number,
                name, synopsis, runtime_min, air_date,
                image_set_json, source_updated_at, local_updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT (title_id, season_number, episode_number) DO UPDATE SET
                mon_id = excluded.mon_id,
                name = excluded.name,
                synopsis = excluded.synopsis,
                runtime_min = excluded.runtime_min,
                air_date = excluded.air_date,
                image_set_json = excluded.image_set_json,
                source_updated_at = excluded.source_updated_at,
                local_updated_at = excluded.local_updated_at
            "#,
        )
        .bind(title_id.as_i64())
        .bind(&episode.mon_id)
        .bind(episode.season_number)
        .bind(episode.episode_number)
        .bind(&episode.name)
        .bind(&episode.synopsis)
        .bind(episode.runtime_min)
        .bind(&episode.air_date)
        .bind(&episode.image_set_json)
        .bind(episode.source_updated_at)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
    }
    Ok(episodes.len())
}

pub async fn count_for_title(pool: &SqlitePool, title_id: TitleId) -> Result<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM episodes WHERE title_id = ?1")
            .bind(title_id.as_i64())
            .fetch_one(pool)
            .await?,
    )
}
