//! SQL DDL for the pet store.

pub const DB_NAME: &str = "shelter.db";
pub const TABLE_NAME: &str = "pets";

pub const CREATE_PETS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    breed TEXT,
    gender INTEGER NOT NULL,
    weight INTEGER NOT NULL DEFAULT 0
)";
