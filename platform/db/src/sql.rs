use async_trait::async_trait;
use products_directory::{EmployeeRecord, RecordKey};
use sea_orm::{ConnectionTrait, QueryResult, Statement};
use uuid::Uuid;

use crate::{DbPool, EmployeeSource, SourceError};

pub const EMPLOYEES_QUERY: &str = "SELECT * FROM employees ORDER BY id ASC";

/// Reads `employees` straight from the service's Postgres database.
#[derive(Clone, Debug)]
pub struct SqlEmployeeSource {
    pool: DbPool,
}

impl SqlEmployeeSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeSource for SqlEmployeeSource {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, SourceError> {
        let statement =
            Statement::from_string(self.pool.get_database_backend(), EMPLOYEES_QUERY.to_string());
        let rows = self.pool.query_all(statement).await?;
        Ok(rows.iter().map(record_from_row).collect())
    }
}

// Columns are looked up by name. A column the relation lacks, or one whose
// type does not decode, reads as absent.
fn record_from_row(row: &QueryResult) -> EmployeeRecord {
    EmployeeRecord {
        id: key_column(row, "id"),
        full_name: text_column(row, "full_name"),
        name: text_column(row, "name"),
        first_name: text_column(row, "first_name"),
        last_name: text_column(row, "last_name"),
        position: text_column(row, "position"),
        title: text_column(row, "title"),
        department: text_column(row, "department"),
        email: text_column(row, "email"),
    }
}

fn text_column(row: &QueryResult, column: &str) -> Option<String> {
    if let Ok(value) = row.try_get::<Option<String>>("", column) {
        return value;
    }
    number_column(row, column)
}

// Numbers are spelled the way `serde_json` spells them, so a value reads the
// same whether it came over REST or SQL.
fn number_column(row: &QueryResult, column: &str) -> Option<String> {
    if let Some(value) = integer_column(row, column) {
        return Some(value.to_string());
    }
    let float = match row.try_get::<Option<f64>>("", column) {
        Ok(value) => value,
        Err(_) => row
            .try_get::<Option<f32>>("", column)
            .ok()
            .flatten()
            .map(f64::from),
    };
    float
        .and_then(serde_json::Number::from_f64)
        .map(|number| number.to_string())
}

fn integer_column(row: &QueryResult, column: &str) -> Option<i64> {
    if let Ok(value) = row.try_get::<Option<i64>>("", column) {
        return value;
    }
    if let Ok(value) = row.try_get::<Option<i32>>("", column) {
        return value.map(i64::from);
    }
    row.try_get::<Option<i16>>("", column)
        .ok()
        .flatten()
        .map(i64::from)
}

fn key_column(row: &QueryResult, column: &str) -> Option<RecordKey> {
    if let Some(value) = integer_column(row, column) {
        return Some(RecordKey::Int(value));
    }
    if let Ok(Some(value)) = row.try_get::<Option<Uuid>>("", column) {
        return Some(RecordKey::Uuid(value));
    }
    row.try_get::<Option<String>>("", column)
        .ok()
        .flatten()
        .map(|text| {
            Uuid::parse_str(&text)
                .map(RecordKey::Uuid)
                .unwrap_or(RecordKey::Text(text))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseBackend};

    use crate::{fetch_directory, seed_demo_employees};

    async fn sqlite() -> DbPool {
        Database::connect("sqlite::memory:").await.unwrap()
    }

    async fn exec(pool: &DbPool, sql: &str) {
        pool.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn reads_rows_in_id_order() {
        let pool = sqlite().await;
        Migrator::up(&pool, None).await.unwrap();
        exec(
            &pool,
            "INSERT INTO employees (id, full_name, position, department, email) VALUES \
             (3, 'Cleo Diaz', 'Designer', 'Product', 'cleo@x.com'), \
             (1, 'Ada Lovelace', 'Analyst', 'R&D', NULL), \
             (2, NULL, NULL, NULL, NULL)",
        )
        .await;

        let records = SqlEmployeeSource::new(pool).fetch_employees().await.unwrap();
        let ids = records
            .iter()
            .map(|record| record.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                Some(RecordKey::Int(1)),
                Some(RecordKey::Int(2)),
                Some(RecordKey::Int(3)),
            ]
        );
        assert_eq!(records[0].full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(records[0].email, None);
        assert_eq!(records[1], EmployeeRecord::with_id(2));
        assert_eq!(records[2].email.as_deref(), Some("cleo@x.com"));
    }

    #[tokio::test]
    async fn tolerates_relations_with_other_columns() {
        let pool = sqlite().await;
        exec(
            &pool,
            "CREATE TABLE employees (id TEXT PRIMARY KEY, name TEXT, title TEXT, badge INTEGER)",
        )
        .await;
        exec(
            &pool,
            "INSERT INTO employees (id, name, title, badge) VALUES \
             ('emp-2', 'Sam Lee', 'Engineer', 7), ('emp-1', 'Jo Park', NULL, 9)",
        )
        .await;

        let records = SqlEmployeeSource::new(pool).fetch_employees().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(RecordKey::Text("emp-1".into())));
        assert_eq!(records[0].name.as_deref(), Some("Jo Park"));
        assert_eq!(records[1].title.as_deref(), Some("Engineer"));
        assert_eq!(records[1].full_name, None);
        assert_eq!(records[1].department, None);
    }

    #[tokio::test]
    async fn numeric_columns_read_like_json_numbers() {
        let pool = sqlite().await;
        exec(
            &pool,
            "CREATE TABLE employees (id INTEGER PRIMARY KEY, department REAL, position INTEGER, title REAL)",
        )
        .await;
        exec(
            &pool,
            "INSERT INTO employees (id, department, position, title) VALUES (1, 4.5, 7, 2.0)",
        )
        .await;

        let records = SqlEmployeeSource::new(pool).fetch_employees().await.unwrap();
        let over_rest: EmployeeRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "department": 4.5,
            "position": 7,
            "title": 2.0
        }))
        .unwrap();
        assert_eq!(records, vec![over_rest]);
        assert_eq!(records[0].department.as_deref(), Some("4.5"));
        assert_eq!(records[0].title.as_deref(), Some("2.0"));
    }

    #[tokio::test]
    async fn missing_relation_surfaces_as_fetch_error() {
        let source = SqlEmployeeSource::new(sqlite().await);
        let outcome = fetch_directory(&source).await;
        assert_eq!(outcome.records, None);
        let message = outcome.error.unwrap().message().to_string();
        assert!(message.contains("employees"), "{message}");
    }

    #[tokio::test]
    async fn seeded_rows_are_readable() {
        let pool = sqlite().await;
        Migrator::up(&pool, None).await.unwrap();
        let inserted = seed_demo_employees(&pool).await.unwrap();
        assert!(inserted > 0);
        assert_eq!(seed_demo_employees(&pool).await.unwrap(), 0);

        let records = SqlEmployeeSource::new(pool).fetch_employees().await.unwrap();
        assert_eq!(records.len(), inserted);
    }
}
