//! The pet provider.
//!
//! Routes URI-addressed requests to the `pets` table:
//! 1.  Collection addresses operate on every row (query, bulk update, delete all)
//!     and are the only place new pets can be inserted.
//! 2.  Item addresses operate on exactly the row with that id.
//!
//! Validation runs before any SQL is issued, so a rejected record never
//! reaches the database.

use crate::app::error::{StoreError, StoreResult};
use crate::domain::{Gender, Pet, PetAddress, PetColumn, PetDraft, PetValues};
use crate::infra::config;
use crate::storage::pets::{RowScope, SqlitePetTable};
use anyhow::Context;
use rand::Rng;
use serde_json::Value as JsonValue;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const SALT_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SALT_LEN: usize = 5;
const DUMMY_WEIGHT: i64 = 11;

/// Result of saving an editor draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Insert mode: a new pet was created at this address.
    Inserted(PetAddress),
    /// Edit mode: number of rows changed (0 means the pet no longer exists).
    Updated(u64),
}

pub struct PetProvider {
    table: SqlitePetTable,
}

impl PetProvider {
    /// Connects using `DATABASE_URL` (see [`config::database_url`]).
    pub async fn new() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::connect(&config::database_url()).await
    }

    /// Connects to `database_url` and creates the `pets` table if it is missing.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url {}", database_url))?
            .create_if_missing(true);

        // Every connection to `:memory:` is a separate database, so keep exactly one alive.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(config::database_max_connections())
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open sqlite database at {}", database_url))?;

        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        let table = SqlitePetTable::new(pool);
        table
            .create_table()
            .await
            .context("failed to create pets table")?;
        info!("pets table ready");
        Ok(Self { table })
    }

    pub fn pool(&self) -> &SqlitePool {
        self.table.pool()
    }

    /// Parses a URI into an address, rejecting anything that is neither shape.
    pub fn resolve(&self, uri: &str) -> StoreResult<PetAddress> {
        PetAddress::from_str(uri).map_err(|e| {
            warn!(uri, "rejected address");
            StoreError::from(e)
        })
    }

    /// Inserts a new pet and returns its item address.
    pub async fn insert(&self, address: PetAddress, values: &PetValues) -> StoreResult<PetAddress> {
        if !address.is_collection() {
            return Err(StoreError::UnsupportedOperation {
                operation: "insert",
                address: address.to_string(),
            });
        }

        let values = values.validate_for_insert().map_err(|e| {
            warn!(error = %e, "insert rejected");
            e
        })?;

        let id = self.table.insert(&values).await.map_err(|e| {
            error!(error = %e, "failed to insert pet");
            e
        })?;
        let new_address = PetAddress::with_appended_id(id);
        info!(id, uri = %new_address, "inserted pet");
        Ok(new_address)
    }

    /// Applies the provided values; returns rows affected.
    pub async fn update(&self, address: PetAddress, values: &PetValues) -> StoreResult<u64> {
        values.validate_for_update().map_err(|e| {
            warn!(error = %e, uri = %address, "update rejected");
            e
        })?;
        if values.is_empty() {
            debug!(uri = %address, "update with no values");
            return Ok(0);
        }

        let rows = self
            .table
            .update(scope_of(address), values)
            .await
            .map_err(|e| {
                error!(error = %e, uri = %address, "failed to update pets");
                e
            })?;
        info!(rows, uri = %address, "updated pets");
        Ok(rows)
    }

    /// Deletes the addressed pet, or every pet for the collection; returns rows affected.
    pub async fn delete(&self, address: PetAddress) -> StoreResult<u64> {
        let rows = self.table.delete(scope_of(address)).await.map_err(|e| {
            error!(error = %e, uri = %address, "failed to delete pets");
            e
        })?;
        info!(rows, uri = %address, "deleted pets");
        Ok(rows)
    }

    /// Returns the addressed rows restricted to `projection` (empty = all columns).
    pub async fn query(
        &self,
        address: PetAddress,
        projection: &[PetColumn],
    ) -> StoreResult<Vec<JsonValue>> {
        let rows = self.table.select(scope_of(address), projection).await?;
        debug!(uri = %address, count = rows.len(), "queried pets");
        Ok(rows)
    }

    /// Like [`PetProvider::query`], but takes column names as strings.
    pub async fn query_columns(
        &self,
        address: PetAddress,
        projection: &[String],
    ) -> StoreResult<Vec<JsonValue>> {
        let columns = projection
            .iter()
            .map(|name| PetColumn::from_str(name.trim()).map_err(StoreError::UnknownColumn))
            .collect::<StoreResult<Vec<_>>>()?;
        self.query(address, &columns).await
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<Pet>> {
        Ok(self.table.fetch(RowScope::Id(id)).await?.into_iter().next())
    }

    pub async fn list(&self) -> StoreResult<Vec<Pet>> {
        Ok(self.table.fetch(RowScope::All).await?)
    }

    /// Saves an editor draft: inserts without an address, updates with one.
    pub async fn save(&self, draft: &PetDraft, address: Option<PetAddress>) -> StoreResult<SaveOutcome> {
        let values = draft.to_values().map_err(|e| {
            warn!(error = %e, "draft rejected");
            e
        })?;

        match address {
            None => Ok(SaveOutcome::Inserted(
                self.insert(PetAddress::Collection, &values).await?,
            )),
            Some(address @ PetAddress::Item(_)) => {
                Ok(SaveOutcome::Updated(self.update(address, &values).await?))
            }
            Some(PetAddress::Collection) => Err(StoreError::UnsupportedOperation {
                operation: "save",
                address: PetAddress::Collection.to_string(),
            }),
        }
    }

    /// Deletes the pet being edited. Only item addresses are accepted.
    pub async fn delete_pet(&self, address: PetAddress) -> StoreResult<u64> {
        if address.is_collection() {
            return Err(StoreError::UnsupportedOperation {
                operation: "delete_pet",
                address: address.to_string(),
            });
        }
        self.delete(address).await
    }

    /// Inserts a placeholder pet with randomised name and breed.
    pub async fn insert_dummy_pet(&self) -> StoreResult<PetAddress> {
        let values = PetValues::new(format!("Cute {}", salt()), Gender::Male)
            .with_breed(format!("Popular {}", salt()))
            .with_weight(DUMMY_WEIGHT);
        self.insert(PetAddress::Collection, &values).await
    }

    pub async fn delete_all_pets(&self) -> StoreResult<u64> {
        self.delete(PetAddress::Collection).await
    }

    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }
}

fn scope_of(address: PetAddress) -> RowScope {
    match address {
        PetAddress::Collection => RowScope::All,
        PetAddress::Item(id) => RowScope::Id(id),
    }
}

fn salt() -> String {
    let mut rng = rand::thread_rng();
    (0..SALT_LEN)
        .map(|_| SALT_CHARS[rng.gen_range(0..SALT_CHARS.len())] as char)
        .collect()
}
