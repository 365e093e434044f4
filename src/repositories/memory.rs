use crate::error::{MailError, MailResult};
use crate::models::{EmailRecord, NewEmail};
use crate::repositories::traits::EmailRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    records: Vec<EmailRecord>,
    last_id: i64,
}

impl Inner {
    fn position(&self, id: i64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

/// Email repository held entirely in process memory.
///
/// Records keep their insertion order. Ids start at 1 and are never reused,
/// including after deletes.
#[derive(Debug, Default)]
pub struct InMemoryEmailRepository {
    inner: RwLock<Inner>,
}

impl InMemoryEmailRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmailRepository for InMemoryEmailRepository {
    async fn save(&self, id: Option<i64>, email: &NewEmail) -> MailResult<EmailRecord> {
        let mut inner = self.inner.write().await;

        let id = match id {
            Some(id) => id,
            None => inner
                .last_id
                .checked_add(1)
                .ok_or_else(|| MailError::Storage("email id space exhausted".to_string()))?,
        };
        inner.last_id = inner.last_id.max(id);

        let record = EmailRecord::from_new(id, email);
        match inner.position(id) {
            Some(pos) => inner.records[pos] = record.clone(),
            None => inner.records.push(record.clone()),
        }

        Ok(record)
    }

    async fn find_all(&self) -> MailResult<Vec<EmailRecord>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn delete_by_id(&self, id: i64) -> MailResult<()> {
        let mut inner = self.inner.write().await;

        let pos = inner
            .position(id)
            .ok_or_else(|| MailError::NotFound(format!("email {}", id)))?;
        inner.records.remove(pos);
        Ok(())
    }

    async fn update_if_exists(&self, id: i64, email: &NewEmail) -> MailResult<EmailRecord> {
        let mut inner = self.inner.write().await;

        let pos = inner
            .position(id)
            .ok_or_else(|| MailError::NotFound(format!("email {}", id)))?;
        let record = EmailRecord::from_new(id, email);
        inner.records[pos] = record.clone();
        Ok(record)
    }
}
