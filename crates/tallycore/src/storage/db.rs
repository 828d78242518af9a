use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::storage::migrations;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Every pooled connection waits on a locked database instead of failing
/// immediately, and the schema is migrated before the pool is handed out.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
///
/// # Example
///
/// ```no_run
/// use tallycore::storage::db;
///
/// let pool = db::create_pool("user.db")?;
/// # Ok::<(), tallycore::AppError>(())
/// ```
pub fn create_pool(database_path: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.busy_timeout(config::database::busy_timeout()));
    let pool = Pool::builder().max_size(config::database::MAX_POOL_SIZE).build(manager)?;

    let mut conn = pool.get()?;
    migrations::run_migrations(&mut conn).map_err(AppError::Migration)?;
    log::info!("Database ready at {}", database_path);

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> AppResult<DbConnection> {
    Ok(pool.get()?)
}
