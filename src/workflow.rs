//! The landing → studio → results state machine.
//!
//! [`WorkflowController`] owns the only mutable state in the crate. Every
//! stage carries just the data valid in it: a [`Stage::Results`] cannot
//! exist without a [`GeneratedImage`], and a [`Stage::Studio`] always holds
//! the uploaded garment.
//!
//! Transforms run in two phases so an event loop can keep the controller
//! while the remote call is outstanding:
//!
//! 1. [`WorkflowController::begin_transform`] marks the attempt in flight and
//!    hands back a [`PendingTransform`], or `None` when guarded.
//! 2. [`WorkflowController::complete_transform`] applies the outcome. Outcomes
//!    for attempts whose studio was left in the meantime are dropped.
//!
//! The outstanding attempt is tracked on the controller, not on the stage:
//! leaving the studio does not end the remote call, so no new attempt can
//! start until the outstanding one has been completed.
//!
//! [`WorkflowController::confirm_transform`] runs both phases against a
//! [`TransformService`].

use crate::client::TransformService;
use crate::config::RethreadConfig;
use crate::error::{IngestError, TransformError, TRANSFORM_FAILED_MESSAGE};
use crate::guide::{tailoring_guide, TailoringStep};
use crate::ingest::UploadedGarment;
use crate::prompt::TransformRequest;
use crate::types::{GeneratedImage, StageKind, StyleOption};
use std::path::Path;

/// Identifier of one transform attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(u64);

/// A transform attempt that has been started but not yet completed.
#[derive(Debug, Clone)]
pub struct PendingTransform {
    pub attempt: AttemptId,
    pub request: TransformRequest,
}

/// Data held while choosing a style.
#[derive(Debug, Clone)]
pub struct StudioState {
    pub garment: UploadedGarment,
    pub style: &'static StyleOption,
    in_flight: Option<AttemptId>,
    pub error: Option<String>,
}

impl StudioState {
    fn new(garment: UploadedGarment, style: &'static StyleOption) -> Self {
        Self {
            garment,
            style,
            in_flight: None,
            error: None,
        }
    }

    /// Whether this studio is waiting on a remote call.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

/// Data held once a redesign has been generated.
#[derive(Debug, Clone)]
pub struct ResultsState {
    pub garment: UploadedGarment,
    pub style: &'static StyleOption,
    pub generated: GeneratedImage,
}

/// Current workflow stage.
#[derive(Debug, Clone)]
pub enum Stage {
    /// Initial screen. `error` holds the last rejected upload, if any.
    Landing { error: Option<String> },
    Studio(StudioState),
    Results(ResultsState),
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Landing { .. } => StageKind::Landing,
            Stage::Studio(_) => StageKind::Studio,
            Stage::Results(_) => StageKind::Results,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Landing { error: None }
    }
}

/// Single owner of the workflow state.
#[derive(Debug)]
pub struct WorkflowController {
    stage: Stage,
    outstanding: Option<AttemptId>,
    next_attempt: u64,
    max_upload_bytes: usize,
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new(&RethreadConfig::default())
    }
}

impl WorkflowController {
    /// Start on the landing stage, bounding uploads by `config.max_upload_bytes`.
    pub fn new(config: &RethreadConfig) -> Self {
        Self {
            stage: Stage::default(),
            outstanding: None,
            next_attempt: 0,
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    // ── Read access ─────────────────────────────────────────────────

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn kind(&self) -> StageKind {
        self.stage.kind()
    }

    /// Whether a remote call is outstanding, whatever the current stage.
    pub fn is_in_flight(&self) -> bool {
        self.outstanding.is_some()
    }

    /// User-facing error message for the current stage, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.stage {
            Stage::Landing { error } => error.as_deref(),
            Stage::Studio(s) => s.error.as_deref(),
            Stage::Results(_) => None,
        }
    }

    /// The active garment. `None` only on the landing stage.
    pub fn garment(&self) -> Option<&UploadedGarment> {
        match &self.stage {
            Stage::Landing { .. } => None,
            Stage::Studio(s) => Some(&s.garment),
            Stage::Results(r) => Some(&r.garment),
        }
    }

    pub fn selected_style(&self) -> Option<&'static StyleOption> {
        match &self.stage {
            Stage::Landing { .. } => None,
            Stage::Studio(s) => Some(s.style),
            Stage::Results(r) => Some(r.style),
        }
    }

    pub fn generated_image(&self) -> Option<&GeneratedImage> {
        match &self.stage {
            Stage::Results(r) => Some(&r.generated),
            _ => None,
        }
    }

    /// Tailoring guide for the finished redesign. Only available on results.
    pub fn tailoring_guide(&self) -> Option<Vec<TailoringStep>> {
        match &self.stage {
            Stage::Results(r) => Some(tailoring_guide(r.style)),
            _ => None,
        }
    }

    // ── Upload ──────────────────────────────────────────────────────

    /// Install an ingested garment.
    ///
    /// From landing this moves to the studio with the default style. From
    /// the studio it replaces the garment and keeps the style. Returns
    /// `false` (and changes nothing) on results or while a call is in flight.
    pub fn upload(&mut self, garment: UploadedGarment) -> bool {
        match &mut self.stage {
            Stage::Landing { .. } => {
                self.transition(Stage::Studio(StudioState::new(
                    garment,
                    StyleOption::default_style(),
                )));
                true
            }
            Stage::Studio(s) if !s.is_in_flight() => {
                tracing::debug!("garment replaced in studio");
                s.garment = garment;
                s.error = None;
                true
            }
            _ => {
                tracing::debug!(stage = ?self.kind(), "upload ignored");
                false
            }
        }
    }

    /// Ingest raw bytes and install them as the garment.
    ///
    /// A rejected upload is recorded as the stage's error and returned.
    pub fn upload_bytes(&mut self, bytes: Vec<u8>) -> Result<bool, IngestError> {
        let ingested = UploadedGarment::from_bytes(bytes, self.max_upload_bytes);
        self.accept_ingest(ingested)
    }

    /// Read a file and install it as the garment.
    pub fn upload_path(&mut self, path: &Path) -> Result<bool, IngestError> {
        let ingested = UploadedGarment::from_path(path, self.max_upload_bytes);
        self.accept_ingest(ingested)
    }

    fn accept_ingest(
        &mut self,
        ingested: Result<UploadedGarment, IngestError>,
    ) -> Result<bool, IngestError> {
        match ingested {
            Ok(garment) => Ok(self.upload(garment)),
            Err(e) => {
                match &mut self.stage {
                    Stage::Landing { error } => *error = Some(e.to_string()),
                    Stage::Studio(s) if !s.is_in_flight() => s.error = Some(e.to_string()),
                    _ => {}
                }
                Err(e)
            }
        }
    }

    // ── Studio ──────────────────────────────────────────────────────

    /// Select a catalog style by id. Ignored for unknown ids, outside the
    /// studio, or while a call is in flight.
    pub fn select_style(&mut self, id: &str) -> bool {
        let Some(style) = StyleOption::find(id) else {
            tracing::debug!(id, "unknown style ignored");
            return false;
        };
        match &mut self.stage {
            Stage::Studio(s) if !s.is_in_flight() => {
                s.style = style;
                true
            }
            _ => false,
        }
    }

    /// Start a transform attempt.
    ///
    /// Returns `None` without side effects unless the controller is in the
    /// studio with no call outstanding. A call started from a studio that was
    /// since left still counts as outstanding.
    pub fn begin_transform(&mut self) -> Option<PendingTransform> {
        if let Some(outstanding) = self.outstanding {
            tracing::debug!(attempt = outstanding.0, "transform ignored, attempt already in flight");
            return None;
        }
        let Stage::Studio(s) = &mut self.stage else {
            tracing::debug!(stage = ?self.stage.kind(), "transform ignored outside studio");
            return None;
        };
        let attempt = AttemptId(self.next_attempt);
        self.next_attempt += 1;
        self.outstanding = Some(attempt);
        s.in_flight = Some(attempt);
        s.error = None;

        tracing::debug!(attempt = attempt.0, style = s.style.id, "transform started");
        Some(PendingTransform {
            attempt,
            request: TransformRequest::build(&s.garment, s.style),
        })
    }

    /// Apply the outcome of an attempt started by [`begin_transform`](Self::begin_transform).
    ///
    /// Success moves to results; failure stays in the studio with
    /// [`TRANSFORM_FAILED_MESSAGE`] recorded. Completing the outstanding
    /// attempt always frees the controller for a new one, but the outcome is
    /// dropped (and `false` returned) when the studio that started it was left.
    /// Unknown attempts are ignored.
    pub fn complete_transform(
        &mut self,
        attempt: AttemptId,
        outcome: Result<GeneratedImage, TransformError>,
    ) -> bool {
        if self.outstanding != Some(attempt) {
            tracing::debug!(attempt = attempt.0, "unknown transform outcome ignored");
            return false;
        }
        self.outstanding = None;

        let s = match &mut self.stage {
            Stage::Studio(s) if s.in_flight == Some(attempt) => s,
            _ => {
                tracing::debug!(attempt = attempt.0, "stale transform outcome dropped");
                return false;
            }
        };
        s.in_flight = None;

        match outcome {
            Ok(generated) => self.transition_with(|stage| match stage {
                Stage::Studio(s) => Stage::Results(ResultsState {
                    garment: s.garment,
                    style: s.style,
                    generated,
                }),
                other => other,
            }),
            Err(e) => {
                tracing::warn!(attempt = attempt.0, error = %e, "transform attempt failed");
                s.error = Some(TRANSFORM_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Run one transform attempt against `service`.
    ///
    /// Returns `false` if the attempt was guarded (see
    /// [`begin_transform`](Self::begin_transform)).
    pub async fn confirm_transform<S>(&mut self, service: &S) -> bool
    where
        S: TransformService,
    {
        let Some(pending) = self.begin_transform() else {
            return false;
        };
        let outcome = service.transform(&pending.request).await;
        self.complete_transform(pending.attempt, outcome)
    }

    /// Leave the studio, discarding the garment. An outstanding call keeps
    /// running and blocks new attempts until it is completed.
    pub fn cancel(&mut self) -> bool {
        if !matches!(self.stage, Stage::Studio(_)) {
            return false;
        }
        self.transition(Stage::default());
        true
    }

    // ── Results ─────────────────────────────────────────────────────

    /// Back to the studio with the same garment and style, dropping the
    /// generated image.
    pub fn try_another_style(&mut self) -> bool {
        if !matches!(self.stage, Stage::Results(_)) {
            return false;
        }
        self.transition_with(|stage| match stage {
            Stage::Results(r) => Stage::Studio(StudioState::new(r.garment, r.style)),
            other => other,
        });
        true
    }

    /// Global navigation: back to landing from anywhere, discarding everything.
    pub fn go_home(&mut self) {
        self.transition(Stage::default());
    }

    fn transition(&mut self, next: Stage) {
        self.transition_with(|_| next);
    }

    fn transition_with<F>(&mut self, f: F)
    where
        F: FnOnce(Stage) -> Stage,
    {
        let from = self.stage.kind();
        let next = f(std::mem::take(&mut self.stage));
        tracing::info!(?from, to = ?next.kind(), "stage transition");
        self.stage = next;
    }
}
