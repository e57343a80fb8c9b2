//! Insight Generator — strengths, weaknesses and potential from a [`MatchResult`].

use std::sync::Arc;

use crate::errors::ScreeningError;
use crate::llm_client::ReasoningCapability;
use crate::screening::models::{CandidateInsight, MatchResult};
use crate::screening::prompts::{INSIGHT_PROMPT_TEMPLATE, INSIGHT_SHAPE, INSIGHT_SYSTEM};
use crate::screening::{request_structured, Stage, StagePrompt};

const PROMPT: StagePrompt = StagePrompt {
    system: INSIGHT_SYSTEM,
    template: INSIGHT_PROMPT_TEMPLATE,
    shape: INSIGHT_SHAPE,
};

#[derive(Clone)]
pub struct InsightGenerator {
    llm: Arc<dyn ReasoningCapability>,
}

impl InsightGenerator {
    pub fn new(llm: Arc<dyn ReasoningCapability>) -> Self {
        Self { llm }
    }

    pub async fn derive(&self, skill_match: &MatchResult) -> Result<CandidateInsight, ScreeningError> {
        request_structured(
            self.llm.as_ref(),
            Stage::InsightGenerator,
            &PROMPT,
            skill_match,
        )
        .await
    }
}
