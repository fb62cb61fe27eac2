//! PostgreSQL implementation of ClassSessionRepository.
//!
//! One row per class session. The enrolled list and waitlist are JSONB
//! arrays whose order is the roster order. `update` is a compare-and-swap
//! on the `version` column.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{ClassSessionId, DomainError, ErrorCode, Timestamp};
use crate::domain::roster::{ClassSession, ClassSessionSnapshot, ClassStatus, MemberRef};
use crate::ports::ClassSessionRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, starts_at, capacity, enrolled, waitlist, status,
           version, created_at, updated_at
    FROM class_sessions
"#;

/// PostgreSQL implementation of ClassSessionRepository.
#[derive(Clone)]
pub struct PostgresClassSessionRepository {
    pool: PgPool,
}

impl PostgresClassSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassSessionRepository for PostgresClassSessionRepository {
    async fn create(&self, session: &ClassSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO class_sessions (
                id, title, starts_at, capacity, enrolled, waitlist, status,
                version, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.title())
        .bind(session.starts_at().map(|t| *t.as_datetime()))
        .bind(capacity_column(session)?)
        .bind(Json(session.enrolled()))
        .bind(Json(session.waitlist()))
        .bind(session.status().as_str())
        .bind(session.version() as i64)
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert class session", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch class session", e))?;

        row.map(row_to_session).transpose()
    }

    async fn update(
        &self,
        session: &ClassSession,
        expected_version: u64,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE class_sessions SET
                title = $3,
                starts_at = $4,
                capacity = $5,
                enrolled = $6,
                waitlist = $7,
                status = $8,
                version = $9,
                updated_at = $10
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(expected_version as i64)
        .bind(session.title())
        .bind(session.starts_at().map(|t| *t.as_datetime()))
        .bind(capacity_column(session)?)
        .bind(Json(session.enrolled()))
        .bind(Json(session.waitlist()))
        .bind(session.status().as_str())
        .bind(session.version() as i64)
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update class session", e))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Zero rows: either the session is gone or someone else wrote first.
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM class_sessions WHERE id = $1)")
                .bind(session.id().as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("check class session existence", e))?;

        if exists.0 {
            Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Class session {} changed since version {}",
                    session.id(),
                    expected_version
                ),
            ))
        } else {
            Err(DomainError::new(
                ErrorCode::ClassSessionNotFound,
                format!("Class session not found: {}", session.id()),
            ))
        }
    }

    async fn delete(&self, id: &ClassSessionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM class_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete class session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClassSessionNotFound,
                format!("Class session not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ClassSession>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY starts_at ASC NULLS LAST, created_at ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list class sessions", e))?;

        rows.into_iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", action, e),
    )
}

fn capacity_column(session: &ClassSession) -> Result<i32, DomainError> {
    i32::try_from(session.capacity()).map_err(|_| {
        DomainError::validation(
            "capacity",
            format!("Capacity {} does not fit the capacity column", session.capacity()),
        )
    })
}

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<ClassSession, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let starts_at: Option<chrono::DateTime<chrono::Utc>> = column(&row, "starts_at")?;
    let capacity: i32 = column(&row, "capacity")?;
    let Json(enrolled): Json<Vec<MemberRef>> = column(&row, "enrolled")?;
    let Json(waitlist): Json<Vec<MemberRef>> = column(&row, "waitlist")?;
    let status: String = column(&row, "status")?;
    let version: i64 = column(&row, "version")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    let status = ClassStatus::parse(&status).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid class status: {}", status),
        )
    })?;

    let snapshot = ClassSessionSnapshot {
        id: ClassSessionId::from_uuid(id),
        title: column(&row, "title")?,
        starts_at: starts_at.map(Timestamp::from_datetime),
        capacity: u32::try_from(capacity).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid capacity: {}", capacity),
            )
        })?,
        enrolled,
        waitlist,
        canceled: status == ClassStatus::Canceled,
        version: version.max(0) as u64,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    };

    ClassSession::restore(snapshot).map_err(DomainError::from)
}
