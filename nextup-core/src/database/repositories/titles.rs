use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use nextup_model::{NewTitle, Title, TitleId, TitleKind};

use crate::error::Result;

use super::Upserted;

/// Insert a title or recover the existing row by its `mon_id` natural
/// key. First-write-wins: a conflicting insert leaves the stored
/// metadata untouched and only reports the existing id.
pub async fn upsert(
    tx: &mut Transaction<'_, Sqlite>,
    title: &NewTitle,
) -> Result<Upserted<TitleId>> {
    let inserted: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO titles (mon_id, kind, name, synopsis, year, runtime_min, image_set_json, local_updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT (mon_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&title.mon_id)
    .bind(title.kind.as_str())
    .bind(&title.name)
    .bind(&title.synopsis)
    .bind(title.year)
    .bind(title.runtime_min)
    .bind(&title.image_set_json)
    .bind(Utc::now())
    .fetch_optional(&mut **tx)
    .await?;

    if let Some(id) = inserted {
        return Ok(Upserted {
            id: TitleId(id),
            created: true,
        });
    }

    let existing: i64 = sqlx::query_scalar("SELECT id FROM titles WHERE mon_id = ?1 LIMIT 1")
        .bind(&title.mon_id)
        .fetch_one(&mut **tx)
        .await?;

    Ok(Upserted {
        id: TitleId(existing),
        created: false,
    })
}

pub async fn find_id_by_mon_id(pool: &SqlitePool, mon_id: &str) -> Result<Option<TitleId>> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM titles WHERE mon_id = ?1 LIMIT 1")
        .bind(mon_id)
        .fetch_optional(pool)
        .await?;
    Ok(id.map(TitleId))
}

pub async fn get(pool: &SqlitePool, id: TitleId) -> Result<Option<Title>> {
    let row = sqlx::query("SELECT * FROM titles WHERE id = ?1")
        .bind(id.as_i64())
        .fetch_optional(pool)
        .await?;

    row.map(from_row).transpose()
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM titles")
        .fetch_one(pool)
        .await?)
}

fn from_row(row: SqliteRow) -> Result<Title> {
    let kind: String = row.try_get("kind")?;
    let local_updated_at: DateTime<Utc> = row.try_get("local_updated_at")?;
    Ok(Title {
        id: TitleId(row.try_get("id")?),
        mon_id: row.try_get("mon_id")?,
        kind: TitleKind::from_str(&kind)?,
        name: row.try_get("name")?,
        synopsis: row.try_get("synopsis")?,
        year: row.try_get("year")?,
        runtime_min: row.try_get("runtime_min")?,
        image_set_json: row.try_get("image_set_json")?,
        local_updated_at,
    })
}
