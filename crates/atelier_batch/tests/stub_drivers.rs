//! Scriptable stub drivers for orchestrator tests.
//!
//! Provides a driver whose outcomes are pre-loaded per call, a driver
//! source that fails acquisition, and fixture assembly over the in-memory
//! backend.

use async_trait::async_trait;
use atelier_batch::{BatchOrchestrator, StaticDriverSource};
use atelier_core::{ArtifactPayload, GenerationRequest, MediaKind, MediaSource};
use atelier_error::{AtelierResult, ProviderError, ProviderErrorKind};
use atelier_interface::{ArtifactValidator, DriverSource, GenerationDriver};
use atelier_store::{ArtifactStore, MemoryBackend};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn payload(url: &str) -> ArtifactPayload {
    ArtifactPayload {
        kind: MediaKind::Image,
        source: MediaSource::Url(url.to_string()),
        mime_type: "image/png".to_string(),
        width: Some(1024),
        height: Some(1024),
        duration_seconds: None,
    }
}

pub fn request(prompt: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .prompt(prompt.to_string())
        .build()
        .unwrap()
}

/// One scripted provider outcome: a payload or a failure message.
pub type ScriptedOutcome = Result<ArtifactPayload, String>;

/// Driver that resolves each call from a pre-loaded script of outcomes.
///
/// Calls beyond the script succeed with a generic payload. Every request
/// the driver sees is recorded for assertions.
pub struct ScriptedDriver {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    delay: Option<Duration>,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedDriver {
    pub fn new(script: Vec<ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delay: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Delay every call, so latencies overlap observably.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests the driver has served, in call order.
    pub fn seen(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationDriver for ScriptedDriver {
    async fn generate(&self, request: &GenerationRequest) -> AtelierResult<ArtifactPayload> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.seen.lock().unwrap().push(request.clone());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(payload)) => Ok(payload),
            Some(Err(message)) => {
                Err(ProviderError::new(ProviderErrorKind::Generation(message)).into())
            }
            None => Ok(payload("https://cdn.test/unscripted.png")),
        }
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-1"
    }
}

/// Driver source that always fails acquisition, modeling a provider that
/// cannot be constructed.
pub struct NoCredentialSource;

impl DriverSource for NoCredentialSource {
    fn acquire(&self) -> AtelierResult<Arc<dyn GenerationDriver>> {
        Err(ProviderError::new(ProviderErrorKind::MissingCredential(
            "ATELIER_API_KEY".to_string(),
        ))
        .into())
    }
}

/// Validator rejecting payloads narrower than a minimum width.
pub struct MinWidthValidator {
    pub min_width: u32,
}

#[async_trait]
impl ArtifactValidator for MinWidthValidator {
    async fn validate(
        &self,
        _request: &GenerationRequest,
        payload: &ArtifactPayload,
    ) -> AtelierResult<()> {
        if payload.width.unwrap_or(0) < self.min_width {
            return Err(ProviderError::new(ProviderErrorKind::Validation(format!(
                "width below minimum {}",
                self.min_width
            )))
            .into());
        }
        Ok(())
    }
}

/// Orchestrator + store over an in-memory backend and the given driver.
pub fn fixture(driver: Arc<ScriptedDriver>) -> (BatchOrchestrator, Arc<ArtifactStore>) {
    let store = Arc::new(ArtifactStore::new(Arc::new(MemoryBackend::new())));
    let orchestrator = BatchOrchestrator::new(
        Arc::new(StaticDriverSource::new(driver)),
        Arc::clone(&store),
    );
    (orchestrator, store)
}
