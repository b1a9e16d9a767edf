//! Data access for the directory: connection settings, the
//! [`EmployeeSource`] seam, and the two sources behind it.

mod rest;
mod seed;
mod sql;

use async_trait::async_trait;
use products_directory::{EmployeeRecord, FetchError, FetchOutcome};
use sea_orm::{Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::{debug, error, instrument};

pub use rest::{RestEmployeeSource, RestSettings};
pub use seed::seed_demo_employees;
pub use sql::{EMPLOYEES_QUERY, SqlEmployeeSource};

/// Shared database handle. sea-orm pools connections internally.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0} not set")]
    MissingUrl(String),
    #[error("failed to connect to database: {0}")]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: default_url_key(),
        }
    }
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    Ok(Database::connect(url).await?)
}

/// Failure of a single employee query, before it is flattened into a
/// [`FetchError`] for display.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Database(#[from] DbErr),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("unexpected response from data service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<SourceError> for FetchError {
    fn from(value: SourceError) -> Self {
        FetchError::new(value.to_string())
    }
}

/// Somewhere the `employees` relation can be read from.
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    /// Short label for logs.
    fn kind(&self) -> &'static str;

    /// Every row of `employees`, ordered by `id` ascending.
    async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, SourceError>;
}

/// Run one directory query. Failures are logged and returned as values.
#[instrument(name = "directory.fetch", skip_all, fields(source = source.kind()))]
pub async fn fetch_directory(source: &dyn EmployeeSource) -> FetchOutcome {
    match source.fetch_employees().await {
        Ok(records) => {
            debug!(count = records.len(), "fetched employees");
            FetchOutcome::records(records)
        }
        Err(err) => {
            error!(error = %err, "error fetching employees");
            FetchOutcome::failed(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Vec<EmployeeRecord>, u16>);

    #[async_trait]
    impl EmployeeSource for Fixed {
        fn kind(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, SourceError> {
            match &self.0 {
                Ok(records) => Ok(records.clone()),
                Err(status) => Err(SourceError::Service {
                    status: *status,
                    message: "connection refused".into(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn successful_fetch_carries_records() {
        let source = Fixed(Ok(vec![EmployeeRecord::with_id(1), EmployeeRecord::with_id(2)]));
        let outcome = fetch_directory(&source).await;
        assert_eq!(outcome.records.map(|records| records.len()), Some(2));
        assert_eq!(outcome.error, None);
    }

    #[tokio::test]
    async fn failed_fetch_is_captured_as_a_value() {
        let outcome = fetch_directory(&Fixed(Err(503))).await;
        assert_eq!(outcome.records, None);
        assert_eq!(
            outcome.error.as_ref().map(FetchError::message),
            Some("connection refused")
        );
    }

    #[test]
    fn missing_url_names_the_variable() {
        let settings = DatabaseSettings::new("DIRECTORY_TEST_UNSET_DATABASE_URL");
        let err = settings.database_url().unwrap_err();
        assert_eq!(err.to_string(), "DIRECTORY_TEST_UNSET_DATABASE_URL not set");
    }
}
