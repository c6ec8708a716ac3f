use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Uniqueness lives in the schema so a racing insert still fails with a
/// constraint violation after both requests passed the pre-checks.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS employees (
    employee_id TEXT PRIMARY KEY NOT NULL,
    full_name   TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    department  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS attendance (
    id          TEXT PRIMARY KEY NOT NULL,
    employee_id TEXT NOT NULL REFERENCES employees(employee_id),
    date        TEXT NOT NULL,   -- YYYY-MM-DD
    status      TEXT NOT NULL,
    UNIQUE (employee_id, date)
);
";

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // Every connection to an in-memory database opens its own empty copy, so
    // such a pool holds exactly one connection and never recycles it.
    let max_connections = if is_in_memory(database_url) {
        1
    } else {
        max_connections.max(1)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_tables(&pool).await?;
    info!(database_url, "Database ready");

    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://hrms?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://hrms.db"));
    }

    #[actix_web::test]
    async fn in_memory_pool_keeps_tables_with_many_connections_requested() {
        let pool = init_db("sqlite::memory:", 8).await.unwrap();
        assert_eq!(pool.options().get_max_connections(), 1);

        for _ in 0..3 {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count, 0);
        }
    }

    #[actix_web::test]
    async fn schema_is_idempotent() {
        let pool = init_db("sqlite::memory:", 1).await.unwrap();
        create_tables(&pool).await.unwrap();
        create_tables(&pool).await.unwrap();

        // Only the implicit UNIQUE (employee_id, date) index covers attendance.
        let named: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = 'attendance' \
             AND name NOT LIKE 'sqlite_autoindex_%'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(named, 0);
    }
}
