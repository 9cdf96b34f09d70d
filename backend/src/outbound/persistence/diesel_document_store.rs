//! PostgreSQL-backed [`DocumentStore`] adapter.
//!
//! Batches run inside a Diesel transaction. The owner's `place_ids` array is
//! read with `SELECT ... FOR NO KEY UPDATE`, edited in Rust and written back,
//! so concurrent batches against the same user serialise on the row lock.
//! The weaker lock mode is required: inserting a place takes `FOR KEY SHARE`
//! on the owner through the `creator_id` foreign key, which `FOR UPDATE`
//! would conflict with.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{DocumentWrite, Place, PlaceId, UserAccount, UserId, WriteBatch};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, PlaceEditRow, PlaceRow, UserRow};
use super::pool::DbPool;
use super::schema::{places, users};

/// Failure inside a batch transaction: either Diesel itself, or a write
/// whose target turned out to be missing.
#[derive(Debug)]
enum BatchError {
    Diesel(DieselError),
    Store(DocumentStoreError),
}

impl From<DieselError> for BatchError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<BatchError> for DocumentStoreError {
    fn from(error: BatchError) -> Self {
        match error {
            BatchError::Diesel(error) => map_diesel_error(error),
            BatchError::Store(error) => error,
        }
    }
}

/// Diesel-backed document store.
#[derive(Clone)]
pub struct DieselDocumentStore {
    pool: DbPool,
}

impl DieselDocumentStore {
    /// Create a store over the given pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use places_backend::outbound::persistence::{DbPool, DieselDocumentStore, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/places")).await?;
    /// let store = DieselDocumentStore::new(pool);
    /// # let _ = store;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Reorder `rows` to follow `ids`, dropping ids with no row.
fn order_by_ids(ids: &[PlaceId], rows: Vec<PlaceRow>) -> Vec<Place> {
    let mut by_id: HashMap<Uuid, PlaceRow> = rows.into_iter().map(|row| (row.id, row)).collect();
    ids.iter()
        .filter_map(|id| by_id.remove(id.as_uuid()))
        .map(Place::from)
        .collect()
}

async fn lock_place_ids(
    conn: &mut AsyncPgConnection,
    owner: &UserId,
) -> Result<Vec<Uuid>, BatchError> {
    users::table
        .find(owner.as_uuid())
        .select(users::place_ids)
        .for_no_key_update()
        .first::<Vec<Uuid>>(conn)
        .await
        .optional()?
        .ok_or_else(|| BatchError::Store(DocumentStoreError::missing_document(format!("user {owner}"))))
}

async fn write_place_ids(
    conn: &mut AsyncPgConnection,
    owner: &UserId,
    ids: Vec<Uuid>,
) -> Result<(), BatchError> {
    diesel::update(users::table.find(owner.as_uuid()))
        .set(users::place_ids.eq(ids))
        .execute(conn)
        .await?;
    Ok(())
}

async fn apply_write(conn: &mut AsyncPgConnection, write: DocumentWrite) -> Result<(), BatchError> {
    match write {
        DocumentWrite::InsertPlace(place) => {
            diesel::insert_into(places::table)
                .values(PlaceRow::from(&place))
                .execute(conn)
                .await?;
        }
        DocumentWrite::RemovePlace(id) => {
            let removed = diesel::delete(places::table.find(id.as_uuid()))
                .execute(conn)
                .await?;
            if removed == 0 {
                return Err(BatchError::Store(DocumentStoreError::missing_document(
                    format!("place {id}"),
                )));
            }
        }
        DocumentWrite::AttachPlace { owner, place } => {
            let mut ids = lock_place_ids(conn, &owner).await?;
            if !ids.contains(place.as_uuid()) {
                ids.push(*place.as_uuid());
            }
            write_place_ids(conn, &owner, ids).await?;
        }
        DocumentWrite::DetachPlace { owner, place } => {
            let mut ids = lock_place_ids(conn, &owner).await?;
            ids.retain(|id| id != place.as_uuid());
            write_place_ids(conn, &owner, ids).await?;
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for DieselDocumentStore {
    async fn find_place(&self, id: &PlaceId) -> Result<Option<Place>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = places::table
            .find(id.as_uuid())
            .select(PlaceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Place::from))
    }

    async fn find_places(&self, ids: &[PlaceId]) -> Result<Vec<Place>, DocumentStoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = places::table
            .filter(places::id.eq_any(uuids))
            .select(PlaceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(order_by_ids(ids, rows))
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<UserAccount>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(UserAccount::try_from)
            .transpose()
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(UserAccount::try_from)
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(UserAccount::try_from)
            .collect()
    }

    async fn save_place(&self, place: &Place) -> Result<(), DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(places::table.find(place.id.as_uuid()))
            .set(PlaceEditRow {
                title: place.title.as_str(),
                description: place.description.as_str(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(DocumentStoreError::missing_document(format!(
                "place {}",
                place.id
            )));
        }
        Ok(())
    }

    async fn insert_user(&self, user: &UserAccount) -> Result<(), DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, BatchError, _>(|conn| {
            async move {
                for write in batch {
                    apply_write(conn, write).await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(DocumentStoreError::from)
    }
}
