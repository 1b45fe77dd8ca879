//! Analysis orchestrator: owns the session lifecycle
//! (`Pending -> Extracting -> Analyzing -> Complete | Failed`), fans the
//! analyzers out onto tasks once text is available, joins them before
//! aggregation, and enforces per-stage timeouts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, SemaphorePermit};
use tokio::task::AbortHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analyzers::{default_analyzers, Analyzer};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::extract::{ExtractedText, TextExtractor};
use crate::models::{AnalysisResult, AnalysisState, AnalyzerFinding, ResumeDocument};
use crate::{recommend, rewrite, scoring};

struct Session {
    state: AnalysisState,
    result: Option<AnalysisResult>,
    abort: Option<AbortHandle>,
}

/// Session registry plus the pipeline driver. One instance per process; all
/// per-analysis state lives in the session entries, so concurrent runs never
/// share mutable state.
pub struct Orchestrator {
    config: Config,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Admit a validated upload and start its analysis in the background.
    /// The admission permit, when present, is held until the run finishes so
    /// the concurrency cap counts running analyses rather than open requests.
    pub async fn submit(
        self: &Arc<Self>,
        document: ResumeDocument,
        job_description: Option<String>,
        permit: Option<SemaphorePermit<'static>>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(
            id,
            Session {
                state: AnalysisState::Pending,
                result: None,
                abort: None,
            },
        );

        info!(analysis_id = %id, file_name = %document.name, "Analysis accepted");

        let orchestrator = Arc::clone(self);
        let handle = tokio::spawn(async move {
            orchestrator.run(id, document, job_description).await;
            drop(permit);
        });
        if let Some(session) = self.sessions.write().await.get_mut(&id) {
            session.abort = Some(handle.abort_handle());
        }
        id
    }

    /// Current state and, once complete, the result.
    pub async fn status(&self, id: Uuid) -> Option<(AnalysisState, Option<AnalysisResult>)> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|s| (s.state.clone(), s.result.clone()))
    }

    /// Cancel an in-flight analysis (or drop a finished one). Partial state
    /// is discarded; the session disappears entirely.
    pub async fn cancel(&self, id: Uuid) -> bool {
        match self.sessions.write().await.remove(&id) {
            Some(session) => {
                if let Some(abort) = session.abort {
                    abort.abort();
                }
                info!(analysis_id = %id, "Analysis cancelled");
                true
            }
            None => false,
        }
    }

    async fn run(&self, id: Uuid, document: ResumeDocument, job_description: Option<String>) {
        self.set_state(id, AnalysisState::Extracting).await;
        let extracted = match extract_stage(&self.config, document).await {
            Ok(text) => text,
            Err(e) => {
                self.fail(id, e).await;
                return;
            }
        };

        self.set_state(id, AnalysisState::Analyzing).await;
        match analyze_stage(&self.config, Arc::new(extracted), job_description).await {
            Ok(result) => self.complete(id, result).await,
            Err(e) => self.fail(id, e).await,
        }
    }

    async fn set_state(&self, id: Uuid, state: AnalysisState) {
        if let Some(session) = self.sessions.write().await.get_mut(&id) {
            if !session.state.is_terminal() {
                info!(analysis_id = %id, state = ?state, "Analysis state changed");
                session.state = state;
            }
        }
    }

    /// Populate the result atomically with the transition to Complete.
    async fn complete(&self, id: Uuid, result: AnalysisResult) {
        if let Some(session) = self.sessions.write().await.get_mut(&id) {
            if !session.state.is_terminal() {
                info!(
                    analysis_id = %id,
                    overall_score = result.overall_score,
                    improvement_areas = result.improvement_areas.len(),
                    mistakes = result.mistakes.len(),
                    "Analysis complete"
                );
                session.result = Some(result);
                session.state = AnalysisState::Complete;
            }
        }
    }

    /// The underlying cause goes to the logs; users see one generic message.
    async fn fail(&self, id: Uuid, cause: AppError) {
        error!(
            analysis_id = %id,
            error_code = cause.error_code(),
            error = %cause,
            "Analysis failed"
        );
        if let Some(session) = self.sessions.write().await.get_mut(&id) {
            if !session.state.is_terminal() {
                session.result = None;
                session.state = AnalysisState::Failed {
                    code: cause.error_code().to_string(),
                    message: cause.user_message(),
                };
            }
        }
    }
}

/// Extraction under the stage timeout, off the async runtime.
pub async fn extract_stage(config: &Config, document: ResumeDocument) -> AppResult<ExtractedText> {
    let extractor = TextExtractor::new(config.max_file_size_bytes());
    let timeout = Duration::from_secs(config.stage_timeout_seconds);

    let joined = tokio::time::timeout(
        timeout,
        tokio::task::spawn_blocking(move || extractor.extract(&document)),
    )
    .await
    .map_err(|_| AppError::AnalysisTimeout {
        stage: "extraction",
    })?;

    joined.map_err(|e| AppError::internal(format!("extraction task failed: {}", e)))?
}

/// Run the standard analyzer set plus the rewrite suggester concurrently and
/// consolidate the outputs.
pub async fn analyze_stage(
    config: &Config,
    text: Arc<ExtractedText>,
    job_description: Option<String>,
) -> AppResult<AnalysisResult> {
    analyze_with(config, text, default_analyzers(job_description)).await
}

/// Same as [`analyze_stage`] but with an explicit analyzer set; the seam the
/// failure-policy tests use.
pub async fn analyze_with(
    config: &Config,
    text: Arc<ExtractedText>,
    analyzers: Vec<Box<dyn Analyzer>>,
) -> AppResult<AnalysisResult> {
    let timeout = Duration::from_secs(config.stage_timeout_seconds);

    let mut tasks = Vec::with_capacity(analyzers.len());
    let mut labels = Vec::with_capacity(analyzers.len());
    let mut aborts = Vec::with_capacity(analyzers.len());
    for analyzer in analyzers {
        labels.push((analyzer.name(), analyzer.category()));
        let text = Arc::clone(&text);
        let task = tokio::spawn(async move { analyzer.analyze(&text) });
        aborts.push(task.abort_handle());
        tasks.push(task);
    }

    // The rewrite suggester has no dependency on the analyzers and runs
    // alongside them.
    let rewrite_text = Arc::clone(&text);
    let max_mistakes = config.max_mistakes;
    let rewrite_task = tokio::spawn(async move { rewrite::suggest(&rewrite_text, max_mistakes) });
    let rewrite_abort = rewrite_task.abort_handle();

    // On any early exit, nothing spawned here may keep running detached.
    let abort_all = || {
        for abort in &aborts {
            abort.abort();
        }
        rewrite_abort.abort();
    };

    let joined = match tokio::time::timeout(timeout, futures::future::join_all(tasks)).await {
        Ok(joined) => joined,
        Err(_) => {
            abort_all();
            return Err(AppError::AnalysisTimeout { stage: "analysis" });
        }
    };

    let mut findings: Vec<AnalyzerFinding> = Vec::with_capacity(joined.len());
    for (join_result, (name, category)) in joined.into_iter().zip(labels) {
        match join_result {
            Ok(finding) => findings.push(finding),
            Err(e) => {
                if config.strict_analyzers {
                    abort_all();
                    return Err(AppError::analyzer(name, e.to_string()));
                }
                warn!(
                    analyzer = name,
                    error = %e,
                    "Analyzer failed; substituting neutral sub-score"
                );
                findings.push(AnalyzerFinding::neutral(category));
            }
        }
    }

    let mistakes = match tokio::time::timeout(timeout, rewrite_task).await {
        Ok(joined) => {
            joined.map_err(|e| AppError::internal(format!("rewrite task failed: {}", e)))?
        }
        Err(_) => {
            rewrite_abort.abort();
            return Err(AppError::AnalysisTimeout { stage: "analysis" });
        }
    };

    let (overall_score, breakdown) = scoring::aggregate(&findings, &config.weights);
    let improvement_areas = recommend::generate(&findings, config.improvement_threshold);

    Ok(AnalysisResult {
        overall_score,
        breakdown,
        pass_likelihood: scoring::pass_likelihood(overall_score),
        feedback: scoring::feedback(overall_score).to_string(),
        improvement_areas,
        mistakes,
    })
}

/// Run one full analysis without registering a session. Used by tests and
/// anywhere the caller manages its own lifecycle.
pub async fn run_analysis(
    config: &Config,
    document: ResumeDocument,
    job_description: Option<String>,
) -> AppResult<AnalysisResult> {
    let extracted = extract_stage(config, document).await?;
    analyze_stage(config, Arc::new(extracted), job_description).await
}
