use diesel::connection::SimpleConnection;
use diesel::define_sql_function;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

define_sql_function! {
    /// Unicode lowercase of `text`. SQLite's own `lower` and `LIKE` fold ASCII only.
    fn fold_case(text: Text) -> Text;
}

/// Applies per-connection SQLite settings when the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqliteSetup;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqliteSetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL; PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
        ))
        .map_err(r2d2::Error::QueryError)?;

        fold_case_utils::register_impl(conn, |text: String| text.to_lowercase())
            .map_err(r2d2::Error::QueryError)
    }
}

/// Open the r2d2 pool for `database_url`.
///
/// Every pooled connection enforces foreign keys, which the cascade and
/// restrict rules of the schema rely on, and knows the `fold_case` function
/// used by the substring filters.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqliteSetup))
        .build(manager)
}
