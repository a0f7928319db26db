//! Row-level access to the `pets` table using a SQLite connection pool.

use crate::domain::{Gender, Pet, PetColumn, PetValues};
use crate::storage::pets::schema::{CREATE_PETS_TABLE_SQL, TABLE_NAME};
use serde_json::{Map, Value as JsonValue};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Which rows an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    All,
    Id(i64),
}

/// The `pets` table.
#[derive(Clone)]
pub struct SqlitePetTable {
    pool: SqlitePool,
}

impl SqlitePetTable {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn create_table(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_PETS_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts validated values and returns the generated id.
    ///
    /// A missing weight is left to the column default.
    pub async fn insert(&self, values: &PetValues) -> Result<i64, sqlx::Error> {
        let mut columns: Vec<&str> = Vec::with_capacity(4);
        if values.name.is_some() {
            columns.push(PetColumn::Name.as_str());
        }
        if values.breed.is_some() {
            columns.push(PetColumn::Breed.as_str());
        }
        if values.gender.is_some() {
            columns.push(PetColumn::Gender.as_str());
        }
        if values.weight.is_some() {
            columns.push(PetColumn::Weight.as_str());
        }

        // Binds are pushed in the same order the columns were listed.
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            TABLE_NAME,
            columns.join(", ")
        ));
        {
            let mut sep = qb.separated(", ");
            if let Some(name) = &values.name {
                sep.push_bind(name.clone());
            }
            if let Some(breed) = &values.breed {
                sep.push_bind(breed.clone());
            }
            if let Some(gender) = values.gender {
                sep.push_bind(gender.code());
            }
            if let Some(weight) = values.weight {
                sep.push_bind(weight);
            }
        }
        qb.push(")");

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    /// Applies the provided values to the rows in `scope`; returns rows affected.
    pub async fn update(&self, scope: RowScope, values: &PetValues) -> Result<u64, sqlx::Error> {
        if values.is_empty() {
            return Ok(0);
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!("UPDATE {} SET ", TABLE_NAME));
        {
            let mut sep = qb.separated(", ");
            if let Some(name) = &values.name {
                sep.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(breed) = &values.breed {
                sep.push("breed = ").push_bind_unseparated(breed.clone());
            }
            if let Some(gender) = values.gender {
                sep.push("gender = ").push_bind_unseparated(gender.code());
            }
            if let Some(weight) = values.weight {
                sep.push("weight = ").push_bind_unseparated(weight);
            }
        }
        push_scope(&mut qb, scope);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Deletes the rows in `scope`; returns rows affected.
    pub async fn delete(&self, scope: RowScope) -> Result<u64, sqlx::Error> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!("DELETE FROM {}", TABLE_NAME));
        push_scope(&mut qb, scope);
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Selects the rows in `scope`, restricted to `projection` (empty = all columns).
    /// Rows come back as JSON objects keyed by column name, in storage order.
    pub async fn select(
        &self,
        scope: RowScope,
        projection: &[PetColumn],
    ) -> Result<Vec<JsonValue>, sqlx::Error> {
        let columns: &[PetColumn] = if projection.is_empty() {
            &PetColumn::ALL
        } else {
            projection
        };
        let column_list: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM {}",
            column_list.join(", "),
            TABLE_NAME
        ));
        push_scope(&mut qb, scope);

        let rows = qb.build().fetch_all(&self.pool).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(row_to_json(&row, columns)?);
        }
        Ok(out)
    }

    pub async fn fetch(&self, scope: RowScope) -> Result<Vec<Pet>, sqlx::Error> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT id, name, breed, gender, weight FROM {}",
            TABLE_NAME
        ));
        push_scope(&mut qb, scope);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_pet).collect()
    }
}

fn push_scope(qb: &mut QueryBuilder<'_, Sqlite>, scope: RowScope) {
    if let RowScope::Id(id) = scope {
        qb.push(" WHERE id = ").push_bind(id);
    }
}

fn row_to_pet(row: &SqliteRow) -> Result<Pet, sqlx::Error> {
    let gender_code: i64 = row.try_get("gender")?;
    let gender = Gender::try_from(gender_code).map_err(|e| sqlx::Error::ColumnDecode {
        index: "gender".to_string(),
        source: e.into(),
    })?;
    let name: Option<String> = row.try_get("name")?;
    let name = name.ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "name".to_string(),
        source: "pet row has no name".into(),
    })?;

    Ok(Pet {
        id: row.try_get("id")?,
        name,
        breed: row.try_get("breed")?,
        gender,
        weight: row.try_get("weight")?,
    })
}

fn row_to_json(row: &SqliteRow, columns: &[PetColumn]) -> Result<JsonValue, sqlx::Error> {
    let mut record = Map::new();
    for column in columns {
        let key = column.as_str();
        let value = match column {
            PetColumn::Id | PetColumn::Gender | PetColumn::Weight => {
                JsonValue::from(row.try_get::<i64, _>(key)?)
            }
            PetColumn::Name | PetColumn::Breed => match row.try_get::<Option<String>, _>(key)? {
                Some(s) => JsonValue::from(s),
                None => JsonValue::Null,
            },
        };
        record.insert(key.to_string(), value);
    }
    Ok(JsonValue::Object(record))
}
