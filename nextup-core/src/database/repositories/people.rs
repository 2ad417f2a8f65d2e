use sqlx::{Sqlite, Transaction};

use nextup_model::{CreditRole, PersonId, TitleId};

use crate::error::Result;

use super::Upserted;

/// Upsert people by exact name, returning ids positionally aligned with
/// the input. Name is the only identity the remote catalog provides, so
/// real-world namesakes collapse into one row.
pub async fn upsert_names(
    tx: &mut Transaction<'_, Sqlite>,
    names: &[String],
) -> Result<Vec<Upserted<PersonId>>> {
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let inserted: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO people (name) VALUES (?1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        let upserted = match inserted {
            Some(id) => Upserted {
                id: PersonId(id),
                created: true,
            },
            None => {
                let id: i64 = sqlx::query_scalar("SELECT id FROM people WHERE name = ?1 LIMIT 1")
                    .bind(name)
                    .fetch_one(&mut **tx)
                    .await?;
                Upserted {
                    id: PersonId(id),
                    created: false,
                }
            }
        };
        out.push(upserted);
    }
    Ok(out)
}

/// Cross-reference a title with credited people under a role. Existing
/// triplets are left alone; returns the attempted-row count.
pub async fn link(
    tx: &mut Transaction<'_, Sqlite>,
    title_id: TitleId,
    person_ids: &[PersonId],
    role: CreditRole,
) -> Result<usize> {
    for person_id in person_ids {
        sqlx::query(
            r#"
            INSERT INTO title_credits (title_id, person_id, role) VALUES (?1, ?2, ?3)
            ON CONFLICT (title_id, person_id, role) DO NOTHING
            "#,
        )
        .bind(title_id.as_i64())
        .bind(person_id.as_i64())
        .bind(role.as_str())
        .execute(&mut **tx)
        .await?;
    }
    Ok(person_ids.len())
}
