use crate::error::{MailError, MailResult};
use crate::models::{EmailRecord, NewEmail};
use crate::repositories::traits::EmailRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_EMAILS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS emails (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        from_email  TEXT NOT NULL,
        to_email    TEXT NOT NULL,
        subject     TEXT NOT NULL,
        body        TEXT NOT NULL,
        timestamp   TEXT,
        seq         INTEGER NOT NULL DEFAULT 0
    )
"#;

const CREATE_SEQ_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_emails_seq ON emails (seq)";

/// Email repository backed by a SQLite database through `sqlx`.
#[derive(Debug, Clone)]
pub struct SqliteEmailRepository {
    pool: SqlitePool,
}

impl SqliteEmailRepository {
    /// Connect to the database at `url`, creating the file and the
    /// `emails` table if they do not exist.
    ///
    /// `sqlite::memory:` opens a private in-memory database held by a
    /// single pooled connection.
    pub async fn connect(url: &str) -> MailResult<Self> {
        info!("Opening email store at {}", url);

        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = if url.contains(":memory:") {
            // Every connection to :memory: is a separate database, so keep exactly one alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    /// Open a fresh in-memory database.
    pub async fn in_memory() -> MailResult<Self> {
        Self::connect("sqlite::memory:").await
    }

    async fn migrate(&self) -> MailResult<()> {
        debug!("Ensuring emails table exists");
        sqlx::query(CREATE_EMAILS_TABLE).execute(&self.pool).await?;

        // Tables created before `seq` existed keep their id order.
        let has_seq: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('emails') WHERE name = 'seq'",
        )
        .fetch_one(&self.pool)
        .await?;
        if has_seq == 0 {
            info!("Adding insertion sequence to emails table");
            sqlx::query("ALTER TABLE emails ADD COLUMN seq INTEGER NOT NULL DEFAULT 0")
                .execute(&self.pool)
                .await?;
            sqlx::query("UPDATE emails SET seq = id")
                .execute(&self.pool)
                .await?;
        }

        sqlx::query(CREATE_SEQ_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl EmailRepository for SqliteEmailRepository {
    async fn save(&self, id: Option<i64>, email: &NewEmail) -> MailResult<EmailRecord> {
        // A NULL id makes SQLite allocate the next AUTOINCREMENT value.
        // `seq` is only set on insert, so a replaced row keeps its list position.
        let row: EmailRow = sqlx::query_as(
            "INSERT INTO emails (id, from_email, to_email, subject, body, timestamp, seq)
             VALUES (?, ?, ?, ?, ?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM emails))
             ON CONFLICT(id) DO UPDATE SET
                from_email = excluded.from_email,
                to_email = excluded.to_email,
                subject = excluded.subject,
                body = excluded.body,
                timestamp = excluded.timestamp
             RETURNING id, from_email, to_email, subject, body, timestamp",
        )
        .bind(id)
        .bind(&email.from_email)
        .bind(&email.to_email)
        .bind(&email.subject)
        .bind(&email.body)
        .bind(email.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn find_all(&self) -> MailResult<Vec<EmailRecord>> {
        let rows: Vec<EmailRow> = sqlx::query_as(
            "SELECT id, from_email, to_email, subject, body, timestamp
             FROM emails ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EmailRow::into_record).collect())
    }

    async fn delete_by_id(&self, id: i64) -> MailResult<()> {
        let result = sqlx::query("DELETE FROM emails WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(MailError::NotFound(format!("email {}", id)));
        }
        Ok(())
    }

    async fn update_if_exists(&self, id: i64, email: &NewEmail) -> MailResult<EmailRecord> {
        let row: Option<EmailRow> = sqlx::query_as(
            "UPDATE emails
             SET from_email = ?, to_email = ?, subject = ?, body = ?, timestamp = ?
             WHERE id = ?
             RETURNING id, from_email, to_email, subject, body, timestamp",
        )
        .bind(&email.from_email)
        .bind(&email.to_email)
        .bind(&email.subject)
        .bind(&email.body)
        .bind(email.timestamp)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EmailRow::into_record)
            .ok_or_else(|| MailError::NotFound(format!("email {}", id)))
    }
}

/// Internal struct for mapping database rows to EmailRecord.
#[derive(sqlx::FromRow)]
struct EmailRow {
    id: i64,
    from_email: String,
    to_email: String,
    subject: String,
    body: String,
    timestamp: Option<DateTime<Utc>>,
}

impl EmailRow {
    fn into_record(self) -> EmailRecord {
        EmailRecord {
            id: self.id,
            from_email: self.from_email,
            to_email: self.to_email,
            subject: self.subject,
            body: self.body,
            timestamp: self.timestamp,
        }
    }
}
