use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use nextup_model::{Popularity, RankingKind, StreamingService, TitleId};

use crate::error::Result;

/// Reconcile the stored ranked set for (service, ranking) against
/// `title_ids`, in one transaction:
///
/// - rows whose title is absent from the new list are deleted (all rows
///   when the list is empty),
/// - every listed title is upserted with a fresh shared timestamp,
///   surviving rows keeping their ids.
///
/// The table ends up an exact materialization of the new list, not an
/// accumulating history.
pub async fn reconcile(
    pool: &SqlitePool,
    service: StreamingService,
    ranking: RankingKind,
    title_ids: &[TitleId],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    if title_ids.is_empty() {
        sqlx::query("DELETE FROM title_popularities WHERE service = ?1 AND ranking = ?2")
            .bind(service.as_str())
            .bind(ranking.as_str())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        return Ok(());
    }

    let placeholders = vec!["?"; title_ids.len()].join(", ");
    let delete_stale = format!(
        "DELETE FROM title_popularities \
         WHERE service = ? AND ranking = ? AND title_id NOT IN ({placeholders})"
    );
    let mut query = sqlx::query(&delete_stale)
        .bind(service.as_str())
        .bind(ranking.as_str());
    for title_id in title_ids {
        query = query.bind(title_id.as_i64());
    }
    query.execute(&mut *tx).await?;

    let now = Utc::now();
    for title_id in title_ids {
        sqlx::query(
            r#"
            INSERT INTO title_popularities (service, ranking, title_id, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (service, ranking, title_id) DO UPDATE SET
                updated_at = excluded.updated_at
            "#,
        )
        .bind(service.as_str())
        .bind(ranking.as_str())
        .bind(title_id.as_i64())
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Current members of a ranked set, ordered by row id (insertion order).
pub async fn list(
    pool: &SqlitePool,
    service: StreamingService,
    ranking: RankingKind,
) -> Result<Vec<Popularity>> {
    let rows = sqlx::query(
        "SELECT * FROM title_popularities WHERE service = ?1 AND ranking = ?2 ORDER BY id",
    )
    .bind(service.as_str())
    .bind(ranking.as_str())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(from_row).collect()
}

fn from_row(row: SqliteRow) -> Result<Popularity> {
    let service: String = row.try_get("service")?;
    let ranking: String = row.try_get("ranking")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(Popularity {
        id: row.try_get("id")?,
        service: StreamingService::from_str(&service)?,
        ranking: RankingKind::from_str(&ranking)?,
        title_id: TitleId(row.try_get("title_id")?),
        updated_at,
    })
}
