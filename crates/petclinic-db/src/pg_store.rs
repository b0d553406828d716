//! `PostgreSQL` implementation of the collection traits.
//!
//! Every table stores the whole document in a `doc JSONB` column. The
//! columns the stores filter on (`owners.last_name`, `pets.owner_id`,
//! `visits.pet_id`) are duplicated next to it so they can be indexed.
//! Reads order by the `seq` column, which upserts never touch, so rows come
//! back in first-insertion order.

use petclinic_types::{OwnerId, PetId, Vet, VisitId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::PgPool;

use crate::document::{OwnerDocument, PetDocument, VisitDocument};
use crate::error::DbError;
use crate::postgres::PostgresPool;
use crate::repository::{
    OwnerRepository, PetRepository, StoreFuture, VetRepository, VisitRepository,
};

/// Document collections backed by a `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an open pool.
    pub fn new(pool: &PostgresPool) -> Self {
        Self {
            pool: pool.pool().clone(),
        }
    }

    async fn count_rows(&self, sql: &'static str) -> Result<u64, DbError> {
        let n: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        Ok(u64::try_from(n).unwrap_or(0))
    }
}

fn decode<T: DeserializeOwned>(doc: serde_json::Value) -> Result<T, DbError> {
    Ok(serde_json::from_value(doc)?)
}

fn decode_all<T: DeserializeOwned>(rows: Vec<serde_json::Value>) -> Result<Vec<T>, DbError> {
    rows.into_iter().map(decode).collect()
}

fn encode<T: Serialize>(doc: &T) -> Result<serde_json::Value, DbError> {
    Ok(serde_json::to_value(doc)?)
}

impl OwnerRepository for PgDocumentStore {
    fn find_all(&self) -> StoreFuture<'_, Vec<OwnerDocument>> {
        Box::pin(async move {
            decode_all(
                sqlx::query_scalar("SELECT doc FROM owners ORDER BY seq")
                    .fetch_all(&self.pool)
                    .await?,
            )
        })
    }

    fn find_by_id(&self, id: OwnerId) -> StoreFuture<'_, Option<OwnerDocument>> {
        Box::pin(async move {
            sqlx::query_scalar("SELECT doc FROM owners WHERE id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await?
                .map(decode)
                .transpose()
        })
    }

    fn find_by_last_name_containing<'a>(
        &'a self,
        fragment: &'a str,
    ) -> StoreFuture<'a, Vec<OwnerDocument>> {
        // strpos avoids escaping LIKE wildcards in user input; an empty
        // needle matches at position 1.
        Box::pin(async move {
            decode_all(
                sqlx::query_scalar(
                    r"SELECT doc FROM owners
                      WHERE strpos(lower(last_name), lower($1)) > 0
                      ORDER BY seq",
                )
                .bind(fragment)
                .fetch_all(&self.pool)
                .await?,
            )
        })
    }

    fn save(&self, owner: OwnerDocument) -> StoreFuture<'_, OwnerDocument> {
        Box::pin(async move {
            sqlx::query(
                r"INSERT INTO owners (id, last_name, doc)
                  VALUES ($1, $2, $3)
                  ON CONFLICT (id) DO UPDATE SET
                    last_name = EXCLUDED.last_name,
                    doc = EXCLUDED.doc",
            )
            .bind(owner.id.into_inner())
            .bind(&owner.last_name)
            .bind(encode(&owner)?)
            .execute(&self.pool)
            .await?;

            tracing::debug!(owner_id = %owner.id, "Upserted owner document");
            Ok(owner)
        })
    }
}

impl PetRepository for PgDocumentStore {
    fn find_by_id(&self, id: PetId) -> StoreFuture<'_, Option<PetDocument>> {
        Box::pin(async move {
            sqlx::query_scalar("SELECT doc FROM pets WHERE id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await?
                .map(decode)
                .transpose()
        })
    }

    fn find_by_id_and_owner_id(
        &self,
        id: PetId,
        owner_id: OwnerId,
    ) -> StoreFuture<'_, Option<PetDocument>> {
        Box::pin(async move {
            sqlx::query_scalar("SELECT doc FROM pets WHERE id = $1 AND owner_id = $2")
                .bind(id.into_inner())
                .bind(owner_id.into_inner())
                .fetch_optional(&self.pool)
                .await?
                .map(decode)
                .transpose()
        })
    }

    fn find_by_owner_id(&self, owner_id: OwnerId) -> StoreFuture<'_, Vec<PetDocument>> {
        Box::pin(async move {
            decode_all(
                sqlx::query_scalar("SELECT doc FROM pets WHERE owner_id = $1 ORDER BY seq")
                    .bind(owner_id.into_inner())
                    .fetch_all(&self.pool)
                    .await?,
            )
        })
    }

    fn save(&self, pet: PetDocument) -> StoreFuture<'_, PetDocument> {
        Box::pin(async move {
            sqlx::query(
                r"INSERT INTO pets (id, owner_id, doc)
                  VALUES ($1, $2, $3)
                  ON CONFLICT (id) DO UPDATE SET
                    owner_id = EXCLUDED.owner_id,
                    doc = EXCLUDED.doc",
            )
            .bind(pet.id.into_inner())
            .bind(pet.owner_id.into_inner())
            .bind(encode(&pet)?)
            .execute(&self.pool)
            .await?;

            tracing::debug!(pet_id = %pet.id, owner_id = %pet.owner_id, "Upserted pet document");
            Ok(pet)
        })
    }

    fn delete(&self, id: PetId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM pets WHERE id = $1")
                .bind(id.into_inner())
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        })
    }
}

impl VisitRepository for PgDocumentStore {
    fn find_by_id(&self, id: VisitId) -> StoreFuture<'_, Option<VisitDocument>> {
        Box::pin(async move {
            sqlx::query_scalar("SELECT doc FROM visits WHERE id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await?
                .map(decode)
                .transpose()
        })
    }

    fn find_by_pet_id(&self, pet_id: PetId) -> StoreFuture<'_, Vec<VisitDocument>> {
        Box::pin(async move {
            decode_all(
                sqlx::query_scalar("SELECT doc FROM visits WHERE pet_id = $1 ORDER BY seq")
                    .bind(pet_id.into_inner())
                    .fetch_all(&self.pool)
                    .await?,
            )
        })
    }

    fn save(&self, visit: VisitDocument) -> StoreFuture<'_, VisitDocument> {
        Box::pin(async move {
            sqlx::query(
                r"INSERT INTO visits (id, pet_id, doc)
                  VALUES ($1, $2, $3)
                  ON CONFLICT (id) DO UPDATE SET
                    pet_id = EXCLUDED.pet_id,
                    doc = EXCLUDED.doc",
            )
            .bind(visit.id.into_inner())
            .bind(visit.pet_id.into_inner())
            .bind(encode(&visit)?)
            .execute(&self.pool)
            .await?;

            tracing::debug!(visit_id = %visit.id, pet_id = %visit.pet_id, "Upserted visit document");
            Ok(visit)
        })
    }
}

impl VetRepository for PgDocumentStore {
    fn find_all(&self) -> StoreFuture<'_, Vec<Vet>> {
        Box::pin(async move {
            decode_all(
                sqlx::query_scalar("SELECT doc FROM vets ORDER BY seq")
                    .fetch_all(&self.pool)
                    .await?,
            )
        })
    }

    fn save(&self, vet: Vet) -> StoreFuture<'_, Vet> {
        Box::pin(async move {
            sqlx::query(
                r"INSERT INTO vets (id, doc)
                  VALUES ($1, $2)
                  ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
            )
            .bind(vet.id.into_inner())
            .bind(encode(&vet)?)
            .execute(&self.pool)
            .await?;

            tracing::debug!(vet_id = %vet.id, "Upserted vet document");
            Ok(vet)
        })
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        Box::pin(self.count_rows("SELECT COUNT(*) FROM vets"))
    }
}
