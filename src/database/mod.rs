// Copyright 2023 Remi Bernotavicius

use diesel::prelude::Connection as _;
use diesel::RunQueryDsl as _;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::error::Error;
use std::path::Path;

pub mod models;
pub mod schema;
pub mod seed;

pub type Connection = diesel::sqlite::SqliteConnection;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Opens the database at `path` (`":memory:"` works too), brings the schema up to date and makes
/// sure the default catalog is present.
pub fn establish_connection(
    path: impl AsRef<Path>,
) -> Result<Connection, Box<dyn Error + Send + Sync + 'static>> {
    let path = path.as_ref();
    let url = path
        .to_str()
        .ok_or_else(|| format!("database path {path:?} is not valid UTF-8"))?;
    let mut connection = Connection::establish(url)?;

    // SQLite leaves foreign keys unchecked unless asked, per connection.
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut connection)?;

    connection.run_pending_migrations(MIGRATIONS)?;
    seed::populate(&mut connection)?;
    Ok(connection)
}

#[cfg(test)]
pub fn test_connection() -> Connection {
    establish_connection(":memory:").unwrap()
}

#[test]
fn migrations() {
    let mut conn = test_connection();

    let reverted = conn.revert_all_migrations(MIGRATIONS).unwrap();
    assert_eq!(reverted.len(), 2);

    let applied = conn.run_pending_migrations(MIGRATIONS).unwrap();
    assert_eq!(applied.len(), 2);

    seed::populate(&mut conn).unwrap();
}

#[test]
fn foreign_keys_enforced() {
    use diesel::ExpressionMethods as _;
    use models::{IngredientId, RecipeId};
    use schema::recipe_ingredients::dsl::*;

    let mut conn = test_connection();
    let result = diesel::insert_into(recipe_ingredients)
        .values((
            recipe_id.eq(RecipeId(9999)),
            ingredient_id.eq(IngredientId(9999)),
            base_quantity.eq(1.0),
        ))
        .execute(&mut conn);
    assert!(result.is_err());
}
