use async_trait::async_trait;
use mailserver::error::{MailError, MailResult};
use mailserver::models::{EmailRecord, NewEmail};
use mailserver::repositories::EmailRepository;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Mock email repository for testing.
///
/// Provides an in-memory implementation of EmailRepository that can be
/// seeded with records, made to fail, and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockEmailRepository {
    records: Arc<Mutex<BTreeMap<i64, EmailRecord>>>,
    next_id: Arc<Mutex<i64>>,
    failing: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockEmailRepository {
    /// Create a new empty MockEmailRepository.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            failing: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a record to the mock repository as-is.
    pub fn add_record(&self, record: EmailRecord) {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(record.id + 1);
        self.records.lock().unwrap().insert(record.id, record);
    }

    /// Snapshot of the stored records, ordered by id.
    pub fn records(&self) -> Vec<EmailRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    /// Make every subsequent call fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) -> MailResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.failing.lock().unwrap() {
            return Err(MailError::Storage("database is locked".to_string()));
        }
        Ok(())
    }
}

impl Default for MockEmailRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailRepository for MockEmailRepository {
    async fn save(&self, id: Option<i64>, email: &NewEmail) -> MailResult<EmailRecord> {
        self.track_call("save")?;

        let id = match id {
            Some(id) => id,
            None => {
                let mut next_id = self.next_id.lock().unwrap();
                let id = *next_id;
                *next_id += 1;
                id
            }
        };

        let record = EmailRecord::from_new(id, email);
        self.records.lock().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> MailResult<Vec<EmailRecord>> {
        self.track_call("find_all")?;
        Ok(self.records())
    }

    async fn delete_by_id(&self, id: i64) -> MailResult<()> {
        self.track_call("delete_by_id")?;

        self.records
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| MailError::NotFound(format!("email {}", id)))
    }

    async fn update_if_exists(&self, id: i64, email: &NewEmail) -> MailResult<EmailRecord> {
        self.track_call("update_if_exists")?;

        let mut records = self.records.lock().unwrap();
        if !records.contains_key(&id) {
            return Err(MailError::NotFound(format!("email {}", id)));
        }

        let record = EmailRecord::from_new(id, email);
        records.insert(id, record.clone());
        Ok(record)
    }
}
