//! The study request worker: load, retry, persist.

use crate::backoff;
use crate::clock::Clock;
use crate::state::{Phase, Signal};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studium_core::{LayoutDocument, MaterialSpec, NewStudyMaterial, RequestStatus, StudyRequest};
use studium_error::{JsonError, StudiumResult, WorkerError, WorkerErrorKind};
use studium_interface::{
    CompletedGeneration, GeneratedMaterial, MaterialGenerator, MaterialStore, RequestStore,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Outcome of one worker invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum JobReport {
    /// The request reached `completed` during this invocation
    Completed {
        /// Request identifier
        request_id: Uuid,
        /// Attempts consumed, including the successful one
        attempts: u32,
    },
    /// The request reached `failed` during this invocation
    Failed {
        /// Request identifier
        request_id: Uuid,
        /// Attempts consumed
        attempts: u32,
        /// Last observed error
        error: String,
    },
    /// The request was already terminal; nothing was touched
    AlreadyTerminal {
        /// Request identifier
        request_id: Uuid,
        /// The terminal status observed
        status: RequestStatus,
    },
}

/// Drives a study request through the retry state machine to a terminal
/// state.
///
/// All collaborators are injected capabilities. The worker never caches
/// request state between invocations: each run re-reads the record, so
/// duplicate or concurrent event delivery resolves through the store's
/// conditional writes, not in-process coordination.
pub struct StudyRequestWorker {
    requests: Arc<dyn RequestStore>,
    materials: Arc<dyn MaterialStore>,
    generator: Arc<dyn MaterialGenerator>,
    clock: Arc<dyn Clock>,
}

impl StudyRequestWorker {
    /// Create a worker from its capabilities.
    pub fn new(
        requests: Arc<dyn RequestStore>,
        materials: Arc<dyn MaterialStore>,
        generator: Arc<dyn MaterialGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            materials,
            generator,
            clock,
        }
    }

    /// Drive the request with the given identifier to a terminal state.
    ///
    /// # Errors
    ///
    /// Returns a non-retryable worker error if the record does not exist,
    /// and propagates store failures from the terminal status writes.
    #[instrument(skip(self), fields(request_id = %request_id))]
    pub async fn run(&self, request_id: Uuid) -> StudiumResult<JobReport> {
        let record = self.requests.load(request_id).await?.ok_or_else(|| {
            WorkerError::new(WorkerErrorKind::RequestNotFound(request_id.to_string()))
        })?;

        // The record, not the event, is authoritative. A terminal record
        // means some earlier invocation finished the job; repeating it
        // must not touch the artifact or the snapshots.
        if record.status.is_terminal() {
            debug!(status = %record.status, "Request already terminal");
            return Ok(JobReport::AlreadyTerminal {
                request_id,
                status: record.status,
            });
        }

        // Idempotent: re-entering while already `processing` is the crash
        // recovery path.
        self.requests.mark_processing(request_id).await?;

        let spec = MaterialSpec {
            purpose: record.purpose.clone(),
            topic: record.topic.clone(),
            difficulty: record.difficulty.clone(),
        };

        let mut phase = Phase::start();
        let mut last_error: Option<String> = None;

        loop {
            match phase {
                Phase::Attempting { attempt } => {
                    let outcome = self.attempt(&record, &spec).await;
                    phase = match outcome {
                        Ok(()) => {
                            info!(attempt, "Generation attempt succeeded");
                            phase.advance(Signal::AttemptSucceeded)
                        }
                        Err(e) => {
                            let message = e.to_string();
                            let transient = backoff::is_transient(&message);
                            warn!(attempt, transient, error = %message, "Generation attempt failed");
                            last_error = Some(message);
                            phase.advance(Signal::AttemptFailed { transient })
                        }
                    };
                }
                Phase::Waiting { next_attempt, delay } => {
                    debug!(next_attempt, delay_secs = delay.as_secs(), "Backing off");
                    self.clock.sleep(delay).await;
                    phase = phase.advance(Signal::BackoffElapsed);
                }
                Phase::Completed { attempts } => {
                    return Ok(JobReport::Completed {
                        request_id,
                        attempts,
                    });
                }
                Phase::Failed { attempts } => {
                    let error = last_error
                        .take()
                        .unwrap_or_else(|| "Unknown error".to_string());
                    self.requests.fail(request_id, &error).await?;
                    return Ok(JobReport::Failed {
                        request_id,
                        attempts,
                        error,
                    });
                }
            }
        }
    }

    /// One attempt: generate, persist the artifact, record completion.
    ///
    /// Store failures surface here and go through the same classification
    /// as generator failures; the duplicate-artifact guard (existence
    /// check plus the store's conflict suppression) is what makes
    /// repeating this after a partial write safe.
    async fn attempt(&self, record: &StudyRequest, spec: &MaterialSpec) -> StudiumResult<()> {
        let material = self.generator.generate(spec).await?;
        self.persist_success(record, &material).await
    }

    async fn persist_success(
        &self,
        record: &StudyRequest,
        material: &GeneratedMaterial,
    ) -> StudiumResult<()> {
        let existing = self.materials.find_for_request(record.id).await?;
        if existing.is_none() {
            let new_material = NewStudyMaterial {
                course_id: format!("REQ-{}", record.id),
                topic: record.topic.clone(),
                difficulty_level: record.difficulty.clone(),
                status: "ready".to_string(),
                layout: LayoutDocument::Structured(material.layout.clone()),
                created_by: record.user_id.to_string(),
                request_id: Some(record.id),
            };
            self.materials.insert(&new_material).await?;
        } else {
            debug!(request_id = %record.id, "Material already exists, skipping insert");
        }

        let generation = CompletedGeneration {
            model: material.model.clone(),
            prompt: serde_json::to_string(&material.prompt)
                .map_err(|e| JsonError::new(e.to_string()))?,
            output: serde_json::to_string(&material.layout)
                .map_err(|e| JsonError::new(e.to_string()))?,
        };
        self.requests.complete(record.id, &generation).await
    }
}
