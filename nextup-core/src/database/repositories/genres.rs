use sqlx::{Sqlite, Transaction};

use nextup_model::{GenreId, TitleId};

use crate::error::Result;

use super::Upserted;

/// Upsert genres by name, returning ids positionally aligned with the
/// input. The `name` column collates NOCASE, so case variants of an
/// existing genre resolve to the stored row (first-seen casing kept).
pub async fn upsert_names(
    tx: &mut Transaction<'_, Sqlite>,
    names: &[String],
) -> Result<Vec<Upserted<GenreId>>> {
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let inserted: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO genres (name) VALUES (?1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        let upserted = match inserted {
            Some(id) => Upserted {
                id: GenreId(id),
                created: true,
            },
            None => {
                let id: i64 = sqlx::query_scalar("SELECT id FROM genres WHERE name = ?1 LIMIT 1")
                    .bind(name)
                    .fetch_one(&mut **tx)
                    .await?;
                Upserted {
                    id: GenreId(id),
                    created: false,
                }
            }
        };
        out.push(upserted);
    }
    Ok(out)
}

/// Cross-reference a title with its genres. Existing pairs are left
/// alone; returns the attempted-row count.
pub async fn link(
    tx: &mut Transaction<'_, Sqlite>,
    title_id: TitleId,
    genre_ids: &[GenreId],
) -> Result<usize> {
    for genre_id in genre_ids {
        sqlx::query(
            r#"
            INSERT INTO title_genres (title_id, genre_id) VALUES (?1, ?2)
            ON CONFLICT (title_id, genre_id) DO NOTHING
            "#,
        )
        .bind(title_id.as_i64())
        .bind(genre_id.as_i64())
        .execute(&mut **tx)
        .await?;
    }
    Ok(genre_ids.len())
}
