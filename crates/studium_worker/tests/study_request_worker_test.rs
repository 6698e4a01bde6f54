//! Tests for the study request worker's retry loop and idempotency
//! guarantees.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use studium_core::{LayoutDocument, RequestStatus};
use studium_worker::{JobReport, StudyRequestWorker};
use test_utils::{
    FakeClock, InMemoryMaterialStore, InMemoryRequestStore, MockBehavior, MockGenerator,
    make_request, sample_layout,
};
use uuid::Uuid;

struct Harness {
    requests: Arc<InMemoryRequestStore>,
    materials: Arc<InMemoryMaterialStore>,
    generator: Arc<MockGenerator>,
    clock: Arc<FakeClock>,
    worker: StudyRequestWorker,
}

fn harness(behavior: MockBehavior) -> Harness {
    let requests = Arc::new(InMemoryRequestStore::new());
    let materials = Arc::new(InMemoryMaterialStore::new());
    let generator = Arc::new(MockGenerator::new(behavior));
    let clock = Arc::new(FakeClock::new());

    let worker = StudyRequestWorker::new(
        requests.clone(),
        materials.clone(),
        generator.clone(),
        clock.clone(),
    );

    Harness {
        requests,
        materials,
        generator,
        clock,
        worker,
    }
}

#[tokio::test]
async fn completes_on_first_attempt() {
    let h = harness(MockBehavior::Success(sample_layout()));
    let record = make_request(RequestStatus::Queued);
    let id = record.id;
    h.requests.seed(record);

    let report = h.worker.run(id).await.unwrap();
    assert_eq!(
        report,
        JobReport::Completed {
            request_id: id,
            attempts: 1,
        }
    );

    let stored = h.requests.get(id).unwrap();
    assert_eq!(stored.status, RequestStatus::Completed);
    assert_eq!(stored.model.as_deref(), Some("mock-gemini"));
    assert!(stored.prompt.as_deref().unwrap().contains("Rust Ownership"));
    assert!(stored.output.as_deref().unwrap().contains("chapters"));
    assert!(stored.error.is_none());

    let material = h.materials.material_for_request(id).unwrap();
    assert_eq!(material.course_id, format!("REQ-{}", id));
    assert_eq!(material.status, "ready");
    assert_eq!(material.created_by, "7");
    assert!(matches!(material.layout, LayoutDocument::Structured(_)));
}

#[tokio::test]
async fn repeat_invocation_after_completion_changes_nothing() {
    let h = harness(MockBehavior::Success(sample_layout()));
    let record = make_request(RequestStatus::Queued);
    let id = record.id;
    h.requests.seed(record);

    h.worker.run(id).await.unwrap();
    let first = h.requests.get(id).unwrap();

    let report = h.worker.run(id).await.unwrap();
    assert_eq!(
        report,
        JobReport::AlreadyTerminal {
            request_id: id,
            status: RequestStatus::Completed,
        }
    );

    // Exactly one artifact, untouched snapshots, no second generation.
    assert_eq!(h.materials.count(), 1);
    let second = h.requests.get(id).unwrap();
    assert_eq!(second.model, first.model);
    assert_eq!(second.output, first.output);
    assert_eq!(h.generator.call_count(), 1);
}

#[tokio::test]
async fn resumes_a_request_stuck_in_processing() {
    // Simulates a crash after the processing transition but before any
    // terminal state was recorded.
    let h = harness(MockBehavior::Success(sample_layout()));
    let record = make_request(RequestStatus::Processing);
    let id = record.id;
    h.requests.seed(record);

    let report = h.worker.run(id).await.unwrap();
    assert!(matches!(report, JobReport::Completed { .. }));

    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::Completed);
    assert_eq!(h.materials.count(), 1);
}

#[tokio::test]
async fn resume_does_not_duplicate_an_existing_artifact() {
    // Simulates a crash after the artifact insert but before the request
    // was marked completed: the material exists, the record still says
    // processing.
    let h = harness(MockBehavior::Success(sample_layout()));
    let record = make_request(RequestStatus::Processing);
    let id = record.id;
    h.requests.seed(record.clone());

    let seeded = studium_core::NewStudyMaterial {
        course_id: format!("REQ-{}", id),
        topic: record.topic.clone(),
        difficulty_level: record.difficulty.clone(),
        status: "ready".to_string(),
        layout: LayoutDocument::Structured(sample_layout()),
        created_by: record.user_id.to_string(),
        request_id: Some(id),
    };
    use studium_interface::MaterialStore;
    h.materials.insert(&seeded).await.unwrap();

    let report = h.worker.run(id).await.unwrap();
    assert!(matches!(report, JobReport::Completed { .. }));

    assert_eq!(h.materials.count(), 1);
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::Completed);
}

#[tokio::test]
async fn transient_errors_exhaust_after_three_attempts() {
    let h = harness(MockBehavior::Error(
        "HTTP 503 error: service unavailable".to_string(),
    ));
    let record = make_request(RequestStatus::Queued);
    let id = record.id;
    h.requests.seed(record);

    let report = h.worker.run(id).await.unwrap();
    match report {
        JobReport::Failed {
            attempts, error, ..
        } => {
            assert_eq!(attempts, 3);
            assert!(error.contains("503"));
        }
        other => panic!("expected failure, got {:?}", other),
    }

    assert_eq!(h.generator.call_count(), 3);

    let stored = h.requests.get(id).unwrap();
    assert_eq!(stored.status, RequestStatus::Failed);
    assert!(stored.error.unwrap().contains("503"));

    // Exponential backoff between the three attempts: 5s then 10s.
    assert_eq!(
        h.clock.recorded(),
        vec![Duration::from_secs(5), Duration::from_secs(10)]
    );

    assert_eq!(h.materials.count(), 0);
}

#[tokio::test]
async fn permanent_error_fails_without_retrying() {
    let h = harness(MockBehavior::Error("invalid schema".to_string()));
    let record = make_request(RequestStatus::Queued);
    let id = record.id;
    h.requests.seed(record);

    let report = h.worker.run(id).await.unwrap();
    match report {
        JobReport::Failed { attempts, .. } => assert_eq!(attempts, 1),
        other => panic!("expected failure, got {:?}", other),
    }

    assert_eq!(h.generator.call_count(), 1);
    assert!(h.clock.recorded().is_empty());
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::Failed);
}

#[tokio::test]
async fn recovers_from_a_transient_error_on_retry() {
    let h = harness(MockBehavior::FailThenSucceed {
        fail_count: 1,
        error: "HTTP 429 error: rate limited".to_string(),
        layout: sample_layout(),
    });
    let record = make_request(RequestStatus::Queued);
    let id = record.id;
    h.requests.seed(record);

    let report = h.worker.run(id).await.unwrap();
    assert_eq!(
        report,
        JobReport::Completed {
            request_id: id,
            attempts: 2,
        }
    );

    assert_eq!(h.clock.recorded(), vec![Duration::from_secs(5)]);
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::Completed);
}

#[tokio::test]
async fn unknown_request_fails_without_store_mutation() {
    let h = harness(MockBehavior::Success(sample_layout()));

    let err = h.worker.run(Uuid::new_v4()).await.unwrap_err();
    assert!(err.to_string().contains("not found"));

    assert_eq!(h.generator.call_count(), 0);
    assert_eq!(h.materials.count(), 0);
}
