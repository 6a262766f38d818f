//! WizardEngine — coordinates the sequencer, form state, validation, draft
//! persistence, and the remote collaborators.
//!
//! The engine is the only place navigation gating, submission, and analysis
//! come together. Collaborators arrive as trait objects so embedders and
//! tests choose their own backends. Async work runs on an inner task joined
//! by a supervisor task holding a `Weak` handle back to the engine: the
//! supervisor contains and logs panics, and a result that settles after the
//! engine is gone, or after a reset discarded the session it started under,
//! is dropped instead of mutating state it no longer owns.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::analyzer::{SiteAnalysis, SiteAnalyzer};
use crate::config::WizardConfig;
use crate::error::{AnalyzeError, SubmitError};
use crate::store::DraftStore;
use crate::submit::{BrandSubmitter, CreatedBrand};

use super::draft::DraftPersistence;
use super::form::FormStateStore;
use super::record::{BrandRecord, Field, RecordPatch, SocialPlatform};
use super::step::{StepSequencer, WizardStep};
use super::validate::{ValidationErrors, ValidationScope, Validator};

/// Serializable snapshot of the whole wizard for an embedding surface.
#[derive(Debug, Clone, Serialize)]
pub struct WizardStatus {
    pub step: WizardStep,
    pub record: BrandRecord,
    pub errors: ValidationErrors,
    pub submit_in_flight: bool,
    pub analysis_in_flight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<CreatedBrand>,
}

/// Headless brand onboarding wizard.
pub struct WizardEngine {
    validator: Validator,
    sequencer: RwLock<StepSequencer>,
    form: RwLock<FormStateStore>,
    drafts: DraftPersistence,
    submitter: Arc<dyn BrandSubmitter>,
    analyzer: Arc<dyn SiteAnalyzer>,
    config: WizardConfig,
    submit_in_flight: AtomicBool,
    analysis_in_flight: AtomicBool,
    // Bumped on reset; settling background work compares it to spot a
    // discarded session.
    session: AtomicU64,
    submit_error: RwLock<Option<String>>,
    created: RwLock<Option<CreatedBrand>>,
    analysis_task: Mutex<Option<AbortHandle>>,
}

impl WizardEngine {
    pub fn new(
        store: Arc<dyn DraftStore>,
        submitter: Arc<dyn BrandSubmitter>,
        analyzer: Arc<dyn SiteAnalyzer>,
        config: WizardConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            validator: Validator::new(),
            sequencer: RwLock::new(StepSequencer::new()),
            form: RwLock::new(FormStateStore::new()),
            drafts: DraftPersistence::new(store),
            submitter,
            analyzer,
            config,
            submit_in_flight: AtomicBool::new(false),
            analysis_in_flight: AtomicBool::new(false),
            session: AtomicU64::new(0),
            submit_error: RwLock::new(None),
            created: RwLock::new(None),
            analysis_task: Mutex::new(None),
        })
    }

    // ── State access ────────────────────────────────────────────────

    pub async fn current_step(&self) -> WizardStep {
        self.sequencer.read().await.current()
    }

    pub async fn record(&self) -> BrandRecord {
        self.form.read().await.record().clone()
    }

    pub async fn errors(&self) -> ValidationErrors {
        self.form.read().await.errors().clone()
    }

    pub async fn created_brand(&self) -> Option<CreatedBrand> {
        self.created.read().await.clone()
    }

    pub async fn submit_error(&self) -> Option<String> {
        self.submit_error.read().await.clone()
    }

    /// Snapshot of step, record, errors, and in-flight state.
    pub async fn status(&self) -> WizardStatus {
        let sequencer = self.sequencer.read().await;
        let form = self.form.read().await;
        WizardStatus {
            step: sequencer.current(),
            record: form.record().clone(),
            errors: form.errors().clone(),
            submit_in_flight: self.submit_in_flight.load(Ordering::SeqCst),
            analysis_in_flight: self.analysis_in_flight.load(Ordering::SeqCst),
            submit_error: self.submit_error.read().await.clone(),
            created: self.created.read().await.clone(),
        }
    }

    // ── Form edits ──────────────────────────────────────────────────

    /// Merge a partial update into the record. Returns the touched fields.
    pub async fn update(&self, patch: RecordPatch) -> Vec<Field> {
        self.form.write().await.apply(patch)
    }

    /// Add an account row for the next unused platform.
    pub async fn add_social_account(&self) -> Option<SocialPlatform> {
        self.form.write().await.add_social_account()
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Advance one step if the current step's rules pass.
    ///
    /// A failing validation records the messages on the form and leaves the
    /// step where it is. Returns whether the wizard moved.
    pub async fn advance(&self) -> bool {
        let mut sequencer = self.sequencer.write().await;
        let step = sequencer.current();

        if let Some(scope) = step.scope() {
            let mut form = self.form.write().await;
            let errors = self.validator.validate(form.record(), scope);
            if !errors.is_empty() {
                debug!(step = %step, errors = errors.len(), "advance blocked by validation");
                form.set_errors(errors);
                return false;
            }
            form.set_errors(errors);
        }

        sequencer.advance() != step
    }

    /// Go back one step. No validation applies on the way back.
    pub async fn retreat(&self) -> bool {
        let mut sequencer = self.sequencer.write().await;
        let step = sequencer.current();
        sequencer.retreat() != step
    }

    /// Jump to a previously visited step.
    pub async fn jump_to(&self, target: WizardStep) -> bool {
        self.sequencer.write().await.jump_to(target)
    }

    /// Discard everything and return to the first step, clearing any stored
    /// draft. Used to start over or abandon a failed draft.
    ///
    /// A pending analysis is aborted and both in-flight gates reopen. Work
    /// already settling keeps the session number it started under, so its
    /// result is dropped when it lands.
    pub async fn reset(&self) {
        self.session.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self
            .analysis_task
            .lock()
            .expect("analysis task mutex poisoned")
            .take()
        {
            handle.abort();
        }
        self.submit_in_flight.store(false, Ordering::SeqCst);
        self.analysis_in_flight.store(false, Ordering::SeqCst);
        self.form.write().await.reset();
        *self.sequencer.write().await = StepSequencer::new();
        *self.submit_error.write().await = None;
        *self.created.write().await = None;
        self.drafts.clear().await;
        info!("wizard reset");
    }

    // ── Draft recovery ──────────────────────────────────────────────

    /// Restore a failed draft, if one exists, and jump to the first
    /// data-entry step. Returns whether a draft was restored.
    ///
    /// The failed flag stays set until a submission succeeds, so a second
    /// interruption still finds the draft.
    pub async fn restore_draft(&self) -> bool {
        let Some(record) = self.drafts.try_restore().await else {
            return false;
        };
        self.form.write().await.replace(record);
        let mut sequencer = self.sequencer.write().await;
        sequencer.recovery_jump(WizardStep::FIRST_DATA_ENTRY);
        info!(step = %sequencer.current(), "restored failed draft");
        true
    }

    // ── Website analysis ────────────────────────────────────────────

    /// Kick off website analysis in the background.
    ///
    /// Requires a website on the record; duplicate triggers while one run is
    /// in flight are no-ops. The configured delay runs first, then the
    /// analyzer; suggestions land through the normal patch path. Returns
    /// whether a run started.
    pub async fn start_analysis(self: &Arc<Self>) -> bool {
        let (website, industry) = {
            let form = self.form.read().await;
            (
                form.record().website.clone(),
                form.record().industry.clone(),
            )
        };
        if website.is_empty() {
            debug!("analysis skipped, no website on record");
            return false;
        }
        if self
            .analysis_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("analysis already in flight");
            return false;
        }

        let delay = self.config.analysis_delay;
        let analyzer = self.analyzer.clone();
        let session = self.session.load(Ordering::SeqCst);
        let weak = Arc::downgrade(self);
        let work = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            analyzer.analyze(&website, &industry).await
        });
        *self
            .analysis_task
            .lock()
            .expect("analysis task mutex poisoned") = Some(work.abort_handle());
        tokio::spawn(async move {
            let outcome = work.await;
            let Some(engine) = weak.upgrade() else {
                debug!("analysis settled after engine drop, discarding");
                return;
            };
            match outcome {
                Ok(result) => engine.finish_analysis(session, result).await,
                Err(e) => {
                    if e.is_panic() {
                        warn!(error = %e, "site analyzer panicked");
                    }
                    if engine.session.load(Ordering::SeqCst) == session {
                        engine.analysis_in_flight.store(false, Ordering::SeqCst);
                    }
                }
            }
        });
        true
    }

    async fn finish_analysis(&self, session: u64, result: Result<SiteAnalysis, AnalyzeError>) {
        if self.session.load(Ordering::SeqCst) != session {
            debug!("analysis settled for a discarded session, dropping suggestions");
            return;
        }
        match result {
            Ok(analysis) => {
                let patch = RecordPatch {
                    content_tone: Some(analysis.content_tone),
                    target_audience: Some(analysis.target_audience),
                    suggested_topics: Some(analysis.suggested_topics),
                    hashtags: Some(analysis.hashtags),
                    ..Default::default()
                };
                self.form.write().await.apply(patch);
                info!("website analysis suggestions applied");
            }
            Err(e) => {
                warn!(error = %e, "website analysis failed");
            }
        }
        self.analysis_in_flight.store(false, Ordering::SeqCst);
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Submit the finished record from the review step.
    ///
    /// Validates at full scope first; messages land on the form and nothing
    /// is sent if any rule fails. At most one submission is in flight at a
    /// time. The draft is saved before the network call so an interrupted
    /// attempt can still be recovered. Returns whether a submission started.
    pub async fn submit(self: &Arc<Self>) -> bool {
        {
            let sequencer = self.sequencer.read().await;
            if sequencer.current() != WizardStep::Review {
                debug!(step = %sequencer.current(), "submit ignored outside review");
                return false;
            }
        }

        let record = {
            let mut form = self.form.write().await;
            let errors = self
                .validator
                .validate(form.record(), ValidationScope::FinalSubmit);
            if !errors.is_empty() {
                warn!(errors = errors.len(), "submit blocked by validation");
                form.set_errors(errors);
                return false;
            }
            form.set_errors(errors);
            form.record().clone()
        };

        if self
            .submit_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("submit already in flight");
            return false;
        }

        self.drafts.save(&record).await;
        *self.submit_error.write().await = None;

        let submitter = self.submitter.clone();
        let session = self.session.load(Ordering::SeqCst);
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            let call = tokio::spawn(async move { submitter.submit(&record).await });
            let outcome = call.await;
            let Some(engine) = weak.upgrade() else {
                debug!("submit settled after engine drop, discarding result");
                return;
            };
            match outcome {
                Ok(result) => engine.finish_submit(session, result).await,
                Err(e) => {
                    if e.is_panic() {
                        warn!(error = %e, "brand submitter panicked");
                    }
                    if engine.session.load(Ordering::SeqCst) == session {
                        engine.submit_in_flight.store(false, Ordering::SeqCst);
                    }
                }
            }
        });
        true
    }

    async fn finish_submit(&self, session: u64, result: Result<CreatedBrand, SubmitError>) {
        if self.session.load(Ordering::SeqCst) != session {
            debug!("submit settled for a discarded session, dropping result");
            return;
        }
        match result {
            Ok(created) => {
                info!(brand_id = %created.id, "brand submitted");
                self.drafts.clear().await;
                *self.created.write().await = Some(created);
                let mut sequencer = self.sequencer.write().await;
                if !sequencer.complete() {
                    warn!(step = %sequencer.current(), "submission succeeded off the review step");
                }
            }
            Err(e) => {
                warn!(error = %e, "brand submission failed");
                {
                    let form = self.form.read().await;
                    self.drafts.save(form.record()).await;
                }
                self.drafts.mark_failed().await;
                *self.submit_error.write().await = Some(e.to_string());
            }
        }
        self.submit_in_flight.store(false, Ordering::SeqCst);
    }

    /// Drop the submission error banner message.
    pub async fn dismiss_submit_error(&self) {
        *self.submit_error.write().await = None;
    }
}

impl Drop for WizardEngine {
    fn drop(&mut self) {
        // A pending cosmetic delay has no business outliving the wizard.
        // In-flight submits are left to settle; their results discard on the
        // failed Weak upgrade.
        if let Ok(mut guard) = self.analysis_task.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}
