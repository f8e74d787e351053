//! PostgreSQL storage backend using sqlx.
//!
//! Provides [`PostgresDonorStore`], a [`DonorStore`] backed by a
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag (on by default).
//!
//! # Schema
//!
//! Donors live in a single `donors` table created by the migrations under
//! `migrations/`. `generated_id` carries a unique constraint, so colliding
//! inserts surface as `SQLSTATE 23505` and are reported as conflicts.

use crate::config::DatabaseConfig;
use crate::core::donor::{Donor, DonorFields, NewDonor};
use crate::core::error::{StoreError, StoreResult};
use crate::core::store::DonorStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Column list shared by every query returning a full donor row.
const DONOR_COLUMNS: &str =
    "id, full_name, phone, birth_date, gender, address, generated_id, number_of_donations";

#[derive(Debug, sqlx::FromRow)]
struct DonorRow {
    id: i64,
    full_name: String,
    phone: String,
    birth_date: NaiveDate,
    gender: String,
    address: Option<String>,
    generated_id: String,
    number_of_donations: i32,
}

impl From<DonorRow> for Donor {
    fn from(row: DonorRow) -> Self {
        Donor {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            birth_date: row.birth_date,
            gender: row.gender,
            address: row.address,
            generated_id: row.generated_id,
            number_of_donations: row.number_of_donations,
        }
    }
}

/// Donor storage backed by PostgreSQL.
///
/// Every operation checks out one pooled connection for its own duration;
/// the guard returns it to the pool when dropped, including on cancellation.
#[derive(Clone, Debug)]
pub struct PostgresDonorStore {
    pool: PgPool,
}

impl PostgresDonorStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::storage("database.url is not configured"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| StoreError::storage(format!("Failed to create pool: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Apply pending migrations (idempotent).
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::storage(format!("Failed to run migrations: {}", e)))
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn acquire(&self) -> StoreResult<sqlx::pool::PoolConnection<sqlx::Postgres>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| StoreError::storage(format!("Failed to acquire connection: {}", e)))
    }
}

fn map_sqlx_error(context: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::conflict(format!("{}: {}", context, db.message()))
        }
        _ => StoreError::storage(format!("{}: {}", context, err)),
    }
}

#[async_trait]
impl DonorStore for PostgresDonorStore {
    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> StoreResult<Vec<Donor>> {
        let mut conn = self.acquire().await?;

        let sql = format!("SELECT {} FROM donors ORDER BY id", DONOR_COLUMNS);
        let rows = sqlx::query_as::<_, DonorRow>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to list donors", e))?;

        Ok(rows.into_iter().map(Donor::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> StoreResult<Donor> {
        let mut conn = self.acquire().await?;

        let sql = format!("SELECT {} FROM donors WHERE id = $1", DONOR_COLUMNS);
        let row = sqlx::query_as::<_, DonorRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to fetch donor", e))?;

        row.map(Donor::from).ok_or(StoreError::NotFound { id })
    }

    #[tracing::instrument(skip(self, donor), fields(generated_id = %donor.generated_id))]
    async fn insert(&self, donor: NewDonor) -> StoreResult<Donor> {
        let mut conn = self.acquire().await?;
        let NewDonor {
            generated_id,
            fields,
        } = donor;

        let row = sqlx::query_as::<_, DonorRow>(&format!(
            "INSERT INTO donors \
             (full_name, phone, birth_date, gender, address, generated_id, number_of_donations) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            DONOR_COLUMNS
        ))
        .bind(fields.full_name)
        .bind(fields.phone)
        .bind(fields.birth_date)
        .bind(fields.gender)
        .bind(fields.address)
        .bind(generated_id)
        .bind(fields.number_of_donations)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert donor", e))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update(&self, id: i64, fields: DonorFields) -> StoreResult<Donor> {
        let mut conn = self.acquire().await?;

        let row = sqlx::query_as::<_, DonorRow>(&format!(
            "UPDATE donors SET \
             full_name = $2, phone = $3, birth_date = $4, gender = $5, \
             address = $6, number_of_donations = $7 \
             WHERE id = $1 \
             RETURNING {}",
            DONOR_COLUMNS
        ))
        .bind(id)
        .bind(fields.full_name)
        .bind(fields.phone)
        .bind(fields.birth_date)
        .bind(fields.gender)
        .bind(fields.address)
        .bind(fields.number_of_donations)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("Failed to update donor", e))?;

        row.map(Donor::from).ok_or(StoreError::NotFound { id })
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut conn = self.acquire().await?;

        let result = sqlx::query("DELETE FROM donors WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete donor", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.acquire().await?;

        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(|e| StoreError::storage(format!("Database health check failed: {}", e)))?;

        Ok(())
    }
}
