use diesel::{
	connection::SimpleConnection,
	prelude::*,
	r2d2::{self, ConnectionManager, CustomizeConnection, PoolError, PooledConnection},
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applied to every connection handed out by the pool. SQLite keeps foreign
/// key enforcement off unless each connection asks for it.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
	pub busy_timeout_ms: u32,
}

impl Default for ConnectionOptions {
	fn default() -> Self {
		Self { busy_timeout_ms: 5_000 }
	}
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
	fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
		conn.batch_execute(&format!(
			"PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
			self.busy_timeout_ms
		))
		.map_err(r2d2::Error::QueryError)
	}
}

pub fn get_db_pool(database_url: &str) -> Result<DbPool, PoolError> {
	let manager = ConnectionManager::<SqliteConnection>::new(database_url);
	r2d2::Pool::builder()
		.connection_customizer(Box::new(ConnectionOptions::default()))
		.build(manager)
}

/// Runs any pending embedded migrations.
pub fn init(pool: &DbPool) -> anyhow::Result<()> {
	let mut conn = pool.get()?;
	let applied = conn
		.run_pending_migrations(MIGRATIONS)
		.map_err(|e| anyhow::anyhow!("unable to run migrations: {e}"))?;
	for version in applied {
		log::info!("Applied migration {}", version);
	}

	Ok(())
}
