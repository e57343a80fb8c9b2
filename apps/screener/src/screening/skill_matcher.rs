//! Skill Matcher — scores a candidate against a job on five dimensions.
//!
//! The weighting behind `total_score` belongs to the reasoning capability.
//! Locally we only enforce that every score lies in `[0, 100]`.

use std::sync::Arc;

use tracing::warn;

use crate::errors::ScreeningError;
use crate::llm_client::ReasoningCapability;
use crate::screening::models::{CandidateProfile, JobRequirement, MatchRequest, MatchResult};
use crate::screening::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SHAPE, MATCH_SYSTEM};
use crate::screening::{request_structured, Stage, StagePrompt};

const PROMPT: StagePrompt = StagePrompt {
    system: MATCH_SYSTEM,
    template: MATCH_PROMPT_TEMPLATE,
    shape: MATCH_SHAPE,
};

#[derive(Clone)]
pub struct SkillMatcher {
    llm: Arc<dyn ReasoningCapability>,
}

impl SkillMatcher {
    pub fn new(llm: Arc<dyn ReasoningCapability>) -> Self {
        Self { llm }
    }

    pub async fn score(
        &self,
        candidate: &CandidateProfile,
        job: &JobRequirement,
    ) -> Result<MatchResult, ScreeningError> {
        let request = MatchRequest { candidate, job };
        let result: MatchResult =
            request_structured(self.llm.as_ref(), Stage::SkillMatcher, &PROMPT, &request).await?;

        if !result.total_within_sub_score_envelope() {
            warn!(
                "total_score {} lies outside the sub-scores {:?}",
                result.total_score,
                result.sub_scores()
            );
        }

        Ok(result)
    }
}
