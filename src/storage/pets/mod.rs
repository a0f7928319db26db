pub mod schema;
pub mod sqlite;

pub use schema::{CREATE_PETS_TABLE_SQL, DB_NAME, TABLE_NAME};
pub use sqlite::{RowScope, SqlitePetTable};
