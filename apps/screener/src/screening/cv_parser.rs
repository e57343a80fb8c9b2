//! CV Parser — turns raw CV text into a [`CandidateProfile`].

use std::sync::Arc;

use crate::errors::ScreeningError;
use crate::llm_client::ReasoningCapability;
use crate::screening::models::{CandidateProfile, ExtractedDocument};
use crate::screening::prompts::{CV_PARSE_PROMPT_TEMPLATE, CV_PARSE_SYSTEM, CV_SHAPE};
use crate::screening::{request_structured, Stage, StagePrompt};

const PROMPT: StagePrompt = StagePrompt {
    system: CV_PARSE_SYSTEM,
    template: CV_PARSE_PROMPT_TEMPLATE,
    shape: CV_SHAPE,
};

#[derive(Clone)]
pub struct CvParser {
    llm: Arc<dyn ReasoningCapability>,
}

impl CvParser {
    pub fn new(llm: Arc<dyn ReasoningCapability>) -> Self {
        Self { llm }
    }

    pub async fn parse(&self, cv: &ExtractedDocument) -> Result<CandidateProfile, ScreeningError> {
        request_structured(self.llm.as_ref(), Stage::CvParser, &PROMPT, cv).await
    }
}
