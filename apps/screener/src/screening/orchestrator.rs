//! Screening Orchestrator — runs the stages for one candidate, or for a batch.
//!
//! Flow per candidate: read CV → parse CV → read JD → parse JD → match →
//! insights → red flags. Strictly sequential, one remote call in flight at a
//! time, with `rate_limit_delay` between consecutive remote calls.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::documents::read_document;
use crate::errors::ScreeningError;
use crate::llm_client::ReasoningCapability;
use crate::screening::cv_parser::CvParser;
use crate::screening::insights::InsightGenerator;
use crate::screening::jd_parser::JobDescriptionParser;
use crate::screening::models::CandidateAnalysis;
use crate::screening::red_flags::RedFlagDetector;
use crate::screening::skill_matcher::SkillMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineState {
    ReadCv,
    ParseCv,
    ReadJd,
    ParseJd,
    Match,
    Insights,
    RedFlags,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineState::ReadCv => "reading CV",
            PipelineState::ParseCv => "parsing CV",
            PipelineState::ReadJd => "reading job description",
            PipelineState::ParseJd => "parsing job description",
            PipelineState::Match => "matching skills",
            PipelineState::Insights => "generating insights",
            PipelineState::RedFlags => "detecting red flags",
            PipelineState::Done => "analysis complete",
        };
        f.write_str(label)
    }
}

/// Instant of the most recent remote call made by any run of a [`Screener`].
type CallGate = Arc<Mutex<Option<Instant>>>;

/// Sleeps between remote calls. The first call of a run goes out immediately
/// unless another run on the same screener made a call less than `delay` ago.
struct Pacer {
    delay: Duration,
    primed: bool,
    gate: CallGate,
}

impl Pacer {
    fn new(delay: Duration, gate: CallGate) -> Self {
        Self {
            delay,
            primed: false,
            gate,
        }
    }

    async fn before_remote_call(&mut self) {
        if self.delay.is_zero() {
            return;
        }
        if self.primed {
            tokio::time::sleep(self.delay).await;
        }
        self.primed = true;

        // Held across the wait so concurrent runs take turns.
        let mut last_call = self.gate.lock().await;
        if let Some(last) = *last_call {
            let ready_at = last + self.delay;
            if ready_at > Instant::now() {
                debug!("Waiting for another run's rate-limit window");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}

/// Result of one candidate in an isolated batch.
#[derive(Debug)]
pub struct CandidateOutcome {
    pub cv_path: PathBuf,
    pub result: Result<CandidateAnalysis, ScreeningError>,
}

/// Owns the five stages. Concurrent runs on one instance share its
/// rate-limit window.
#[derive(Clone)]
pub struct Screener {
    cv_parser: CvParser,
    jd_parser: JobDescriptionParser,
    skill_matcher: SkillMatcher,
    insight_generator: InsightGenerator,
    red_flag_detector: RedFlagDetector,
    rate_limit_delay: Duration,
    last_call: CallGate,
}

impl Screener {
    /// Builds every stage on the same reasoning capability.
    pub fn new(llm: Arc<dyn ReasoningCapability>, rate_limit_delay: Duration) -> Self {
        Self {
            cv_parser: CvParser::new(llm.clone()),
            jd_parser: JobDescriptionParser::new(llm.clone()),
            skill_matcher: SkillMatcher::new(llm.clone()),
            insight_generator: InsightGenerator::new(llm.clone()),
            red_flag_detector: RedFlagDetector::new(llm),
            rate_limit_delay,
            last_call: CallGate::default(),
        }
    }

    fn pacer(&self) -> Pacer {
        Pacer::new(self.rate_limit_delay, self.last_call.clone())
    }

    pub fn rate_limit_delay(&self) -> Duration {
        self.rate_limit_delay
    }

    /// Screens one CV against one job description.
    pub async fn run_one(
        &self,
        cv_path: &Path,
        jd_path: &Path,
    ) -> Result<CandidateAnalysis, ScreeningError> {
        let mut pacer = self.pacer();
        self.screen_candidate(cv_path, jd_path, &mut pacer).await
    }

    /// Screens every CV against the same job description, in input order.
    ///
    /// The first failing candidate aborts the batch and its error is returned;
    /// later candidates are not processed.
    pub async fn run_many<P: AsRef<Path>>(
        &self,
        cv_paths: &[P],
        jd_path: &Path,
    ) -> Result<Vec<CandidateAnalysis>, ScreeningError> {
        let mut pacer = self.pacer();
        let mut results = Vec::with_capacity(cv_paths.len());

        for (idx, cv_path) in cv_paths.iter().enumerate() {
            info!("Processing CV {}/{}", idx + 1, cv_paths.len());
            let analysis = self
                .screen_candidate(cv_path.as_ref(), jd_path, &mut pacer)
                .await?;
            results.push(analysis);
        }

        info!("All {} CVs processed", results.len());
        Ok(results)
    }

    /// Like [`Screener::run_many`], but a failing candidate is recorded and
    /// the batch moves on to the next one.
    pub async fn run_many_isolated<P: AsRef<Path>>(
        &self,
        cv_paths: &[P],
        jd_path: &Path,
    ) -> Vec<CandidateOutcome> {
        let mut pacer = self.pacer();
        let mut outcomes = Vec::with_capacity(cv_paths.len());

        for (idx, cv_path) in cv_paths.iter().enumerate() {
            let cv_path = cv_path.as_ref();
            info!("Processing CV {}/{}", idx + 1, cv_paths.len());
            let result = self.screen_candidate(cv_path, jd_path, &mut pacer).await;
            if let Err(e) = &result {
                warn!("Screening failed for {}: {e}", cv_path.display());
            }
            outcomes.push(CandidateOutcome {
                cv_path: cv_path.to_path_buf(),
                result,
            });
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            "All {} CVs processed ({} failed)",
            outcomes.len(),
            failed
        );
        outcomes
    }

    async fn screen_candidate(
        &self,
        cv_path: &Path,
        jd_path: &Path,
        pacer: &mut Pacer,
    ) -> Result<CandidateAnalysis, ScreeningError> {
        let cv_label = cv_path.display();

        info!("[{cv_label}] {}", PipelineState::ReadCv);
        let raw_cv = read_document(cv_path).await?;

        info!("[{cv_label}] {}", PipelineState::ParseCv);
        pacer.before_remote_call().await;
        let cv = self.cv_parser.parse(&raw_cv).await?;

        info!("[{cv_label}] {}", PipelineState::ReadJd);
        let raw_jd = read_document(jd_path).await?;

        info!("[{cv_label}] {}", PipelineState::ParseJd);
        pacer.before_remote_call().await;
        let job_description = self.jd_parser.parse(&raw_jd).await?;

        info!("[{cv_label}] {}", PipelineState::Match);
        pacer.before_remote_call().await;
        let skill_match = self.skill_matcher.score(&cv, &job_description).await?;

        info!("[{cv_label}] {}", PipelineState::Insights);
        pacer.before_remote_call().await;
        let insights = self.insight_generator.derive(&skill_match).await?;

        info!("[{cv_label}] {}", PipelineState::RedFlags);
        pacer.before_remote_call().await;
        let red_flags = self.red_flag_detector.derive(&skill_match).await?;

        info!(
            "[{cv_label}] {} (total score {:.1})",
            PipelineState::Done,
            skill_match.total_score
        );

        Ok(CandidateAnalysis {
            cv,
            job_description,
            skill_match,
            insights,
            red_flags,
        })
    }
}
