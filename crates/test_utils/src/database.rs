//! Database Test Utilities
//!
//! Starts PostgreSQL in a testcontainer, applies the crew schema through
//! `infra_db::run_migrations` and hands out a ready pool. Requires a
//! reachable Docker daemon, so tests using it are marked `#[ignore]`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "crew_management_test";

/// Connection settings for a test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A migrated PostgreSQL instance living as long as this value
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a container and applies every migration
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or a migration fails
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = Postgres::default()
            .with_user(POSTGRES_USER)
            .with_password(POSTGRES_PASSWORD)
            .with_db_name(POSTGRES_DB)
            .with_tag(POSTGRES_TAG)
            .start()
            .await?;

        let config = TestDatabaseConfig {
            host: container.get_host().await?.to_string(),
            port: container.get_host_port_ipv4(5432).await?,
            ..TestDatabaseConfig::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        infra_db::run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            config,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Removes every crew member, keeping the seeded reference data
    pub async fn clear_data(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE TABLE crew_members")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

static SHARED_TEST_DB: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// Gets or creates a database shared by every test in the binary
///
/// # Panics
///
/// Panics if the database fails to initialize
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED_TEST_DB
        .get_or_init(|| async {
            Arc::new(
                TestDatabase::new()
                    .await
                    .expect("Failed to create shared test database"),
            )
        })
        .await
        .clone()
}

/// Creates a database for a single test that writes
pub async fn create_isolated_test_database(
) -> Result<TestDatabase, Box<dyn std::error::Error + Send + Sync>> {
    TestDatabase::new().await
}

/// Declares an ignored tokio test running against its own database
///
/// ```rust,ignore
/// db_test!(test_counts_seeded_licenses, |pool| {
///     let licenses = PostgresLicenseAdapter::new(pool.clone());
///     assert_eq!(licenses.count().await.unwrap(), 2);
/// });
/// ```
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$pool:ident| $body:block) => {
        #[tokio::test]
        #[ignore = "requires docker"]
        async fn $name() {
            let db = $crate::database::create_isolated_test_database()
                .await
                .expect("Failed to create test database");
            let $pool = db.pool();
            $body
        }
    };
}
