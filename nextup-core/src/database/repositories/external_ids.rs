use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use nextup_model::{ExternalId, NewExternalId, StreamingService, TitleId};

use crate::error::Result;

/// Upsert a title's external ids, keyed by (entity, service). A re-sync
/// refreshes the mutable columns (provider id, availability, price) in
/// one statement. Returns the processed-row count.
pub async fn upsert(
    tx: &mut Transaction<'_, Sqlite>,
    entity_id: TitleId,
    items: &[NewExternalId],
) -> Result<usize> {
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO external_ids (entity_id, service, provider_id, available, price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (entity_id, service) DO UPDATE SET
                provider_id = excluded.provider_id,
                available = excluded.available,
                price = excluded.price
            "#,
        )
        .bind(entity_id.as_i64())
        .bind(item.service.as_str())
        .bind(&item.provider_id)
        .bind(item.available)
        .bind(item.price)
        .execute(&mut **tx)
        .await?;
    }
    Ok(items.len())
}

/// All external ids stored for a title, used to build launch URLs.
pub async fn list_for_title(pool: &SqlitePool, title_id: TitleId) -> Result<Vec<ExternalId>> {
    let rows = sqlx::query("SELECT * FROM external_ids WHERE entity_id = ?1 ORDER BY service")
        .bind(title_id.as_i64())
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(from_row).collect()
}

fn from_row(row: SqliteRow) -> Result<ExternalId> {
    let service: String = row.try_get("service")?;
    Ok(ExternalId {
        id: row.try_get("id")?,
        entity_id: TitleId(row.try_get("entity_id")?),
        service: StreamingService::from_str(&service)?,
        provider_id: row.try_get("provider_id")?,
        available: row.try_get("available")?,
        price: row.try_get("price")?,
    })
}
