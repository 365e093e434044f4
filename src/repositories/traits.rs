use crate::error::MailResult;
use crate::models::{EmailRecord, NewEmail};
use async_trait::async_trait;

/// Repository for stored email records.
///
/// Provides abstraction over record storage, enabling different
/// implementations (SQLite, in-memory, mock).
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// Insert or replace a record.
    ///
    /// With `id == None` a fresh id is assigned. With `Some(id)` the record
    /// with that id is replaced, or inserted under that id if absent.
    async fn save(&self, id: Option<i64>, email: &NewEmail) -> MailResult<EmailRecord>;

    /// Retrieve every stored record in insertion order.
    async fn find_all(&self) -> MailResult<Vec<EmailRecord>>;

    /// Delete a record. Fails with `NotFound` if the id is unknown.
    async fn delete_by_id(&self, id: i64) -> MailResult<()>;

    /// Replace the content of an existing record in one step.
    /// Fails with `NotFound` if the id is unknown; never inserts.
    async fn update_if_exists(&self, id: i64, email: &NewEmail) -> MailResult<EmailRecord>;
}
