//! In-memory fakes and a mock generator for worker tests.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::time::Duration;
use studium_core::{
    Chapter, CourseLayout, MaterialSpec, NewStudyMaterial, NewUserAccount, RequestStatus,
    StudyRequest, UserAccount,
};
use studium_error::{BackendError, StudiumResult};
use studium_interface::{
    AccountStore, CompletedGeneration, GeneratedMaterial, MaterialGenerator, MaterialStore,
    ProvisionOutcome, RequestStore,
};
use studium_worker::Clock;
use uuid::Uuid;

/// A study request with sensible defaults for tests.
pub fn make_request(status: RequestStatus) -> StudyRequest {
    StudyRequest {
        id: Uuid::new_v4(),
        user_id: 7,
        topic: "Rust Ownership".to_string(),
        purpose: "practice".to_string(),
        difficulty: "Hard".to_string(),
        status,
        model: None,
        prompt: None,
        output: None,
        error: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A small but schema-complete layout for mock successes.
pub fn sample_layout() -> CourseLayout {
    CourseLayout {
        title: "Rust Ownership".to_string(),
        summary: "Moves, borrows, lifetimes.".to_string(),
        chapters: vec![Chapter {
            title: "Moves".to_string(),
            estimated_time: "30 minutes".to_string(),
            description: "Values move on assignment.\n\nExample: let b = a;".to_string(),
            bullets: vec![
                "One owner per value".to_string(),
                "Assignment moves".to_string(),
                "Copy types are the exception".to_string(),
                "Drop runs at scope end".to_string(),
            ],
        }],
    }
}

//
// ─── REQUEST STORE ──────────────────────────────────────────────────────────────
//

/// In-memory [`RequestStore`] with the same conditional-write semantics as
/// the Postgres implementation.
#[derive(Default)]
pub struct InMemoryRequestStore {
    records: Mutex<HashMap<Uuid, StudyRequest>>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, as the external enqueue path would.
    pub fn seed(&self, record: StudyRequest) {
        self.records.lock().unwrap().insert(record.id, record);
    }

    /// Read a record back for assertions.
    pub fn get(&self, id: Uuid) -> Option<StudyRequest> {
        self.records.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn load(&self, id: Uuid) -> StudiumResult<Option<StudyRequest>> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn mark_processing(&self, id: Uuid) -> StudiumResult<bool> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&id) {
            Some(record)
                if matches!(
                    record.status,
                    RequestStatus::Queued | RequestStatus::Processing
                ) =>
            {
                record.status = RequestStatus::Processing;
                record.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn complete(&self, id: Uuid, generation: &CompletedGeneration) -> StudiumResult<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(&id) {
            record.status = RequestStatus::Completed;
            record.model = Some(generation.model.clone());
            record.prompt = Some(generation.prompt.clone());
            record.output = Some(generation.output.clone());
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn fail(&self, id: Uuid, error: &str) -> StudiumResult<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(&id) {
            record.status = RequestStatus::Failed;
            record.error = Some(error.to_string());
            record.updated_at = Utc::now();
        }
        Ok(())
    }
}

//
// ─── MATERIAL STORE ─────────────────────────────────────────────────────────────
//

/// A stored material with its assigned identifier.
pub struct StoredMaterial {
    pub id: i32,
    pub material: NewStudyMaterial,
}

/// In-memory [`MaterialStore`] enforcing the unique-per-request rule the
/// way the database's unique index does.
#[derive(Default)]
pub struct InMemoryMaterialStore {
    materials: Mutex<Vec<StoredMaterial>>,
    next_id: AtomicI32,
}

impl InMemoryMaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored materials.
    pub fn count(&self) -> usize {
        self.materials.lock().unwrap().len()
    }

    /// Clone the material linked to a request, for assertions.
    pub fn material_for_request(&self, request_id: Uuid) -> Option<NewStudyMaterial> {
        self.materials
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.material.request_id == Some(request_id))
            .map(|m| m.material.clone())
    }
}

#[async_trait]
impl MaterialStore for InMemoryMaterialStore {
    async fn find_for_request(&self, request_id: Uuid) -> StudiumResult<Option<i32>> {
        Ok(self
            .materials
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.material.request_id == Some(request_id))
            .map(|m| m.id))
    }

    async fn insert(&self, material: &NewStudyMaterial) -> StudiumResult<Option<i32>> {
        let mut materials = self.materials.lock().unwrap();

        if let Some(request_id) = material.request_id {
            if materials
                .iter()
                .any(|m| m.material.request_id == Some(request_id))
            {
                return Ok(None);
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        materials.push(StoredMaterial {
            id,
            material: material.clone(),
        });
        Ok(Some(id))
    }
}

//
// ─── ACCOUNT STORE ──────────────────────────────────────────────────────────────
//

/// A recorded ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub user_id: i32,
    pub delta: i32,
    pub reason: String,
}

/// In-memory [`AccountStore`] with unique-identity semantics.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<Vec<UserAccount>>,
    ledger: Mutex<Vec<LedgerEntry>>,
    next_id: AtomicI32,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn account(&self, user_id: i32) -> Option<UserAccount> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == user_id)
            .cloned()
    }

    pub fn ledger_entries(&self) -> Vec<LedgerEntry> {
        self.ledger.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_external_id(&self, external_id: &str) -> StudiumResult<Option<UserAccount>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.external_id == external_id)
            .cloned())
    }

    async fn create(&self, account: &NewUserAccount) -> StudiumResult<ProvisionOutcome> {
        let mut accounts = self.accounts.lock().unwrap();

        if let Some(existing) = accounts
            .iter()
            .find(|a| a.external_id == account.external_id)
        {
            return Ok(ProvisionOutcome::AlreadyExists(existing.id));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        accounts.push(UserAccount {
            id,
            external_id: account.external_id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            credits: account.credits,
            used_credits: 0,
            created_at: Utc::now(),
        });
        Ok(ProvisionOutcome::Created(id))
    }

    async fn record_credit(&self, user_id: i32, delta: i32, reason: &str) -> StudiumResult<()> {
        self.ledger.lock().unwrap().push(LedgerEntry {
            user_id,
            delta,
            reason: reason.to_string(),
        });
        Ok(())
    }
}

//
// ─── MOCK GENERATOR ─────────────────────────────────────────────────────────────
//

/// Behavior configuration for mock generations.
pub enum MockBehavior {
    /// Always succeed with the given layout
    Success(CourseLayout),
    /// Always fail with the given error message
    Error(String),
    /// Fail N times with the message, then succeed with the layout
    FailThenSucceed {
        fail_count: usize,
        error: String,
        layout: CourseLayout,
    },
}

/// Mock [`MaterialGenerator`] for exercising the retry loop without a
/// backend.
pub struct MockGenerator {
    behavior: MockBehavior,
    calls: AtomicUsize,
    model_name: String,
}

impl MockGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            model_name: "mock-gemini".to_string(),
        }
    }

    /// How many times `generate` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MaterialGenerator for MockGenerator {
    async fn generate(&self, spec: &MaterialSpec) -> StudiumResult<GeneratedMaterial> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        let success = |layout: &CourseLayout| GeneratedMaterial {
            model: self.model_name.clone(),
            prompt: spec.clone(),
            layout: layout.clone(),
        };

        match &self.behavior {
            MockBehavior::Success(layout) => Ok(success(layout)),
            MockBehavior::Error(message) => Err(BackendError::new(message.clone()).into()),
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                layout,
            } => {
                if call < *fail_count {
                    Err(BackendError::new(error.clone()).into())
                } else {
                    Ok(success(layout))
                }
            }
        }
    }
}

//
// ─── FAKE CLOCK ─────────────────────────────────────────────────────────────────
//

/// Clock that records requested delays and returns immediately.
#[derive(Default)]
pub struct FakeClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The delays requested so far, in order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
