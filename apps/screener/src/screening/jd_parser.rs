//! Job-Description Parser — turns raw JD text into a [`JobRequirement`].

use std::sync::Arc;

use crate::errors::ScreeningError;
use crate::llm_client::ReasoningCapability;
use crate::screening::models::{ExtractedDocument, JobRequirement};
use crate::screening::prompts::{JD_PARSE_PROMPT_TEMPLATE, JD_PARSE_SYSTEM, JD_SHAPE};
use crate::screening::{request_structured, Stage, StagePrompt};

const PROMPT: StagePrompt = StagePrompt {
    system: JD_PARSE_SYSTEM,
    template: JD_PARSE_PROMPT_TEMPLATE,
    shape: JD_SHAPE,
};

#[derive(Clone)]
pub struct JobDescriptionParser {
    llm: Arc<dyn ReasoningCapability>,
}

impl JobDescriptionParser {
    pub fn new(llm: Arc<dyn ReasoningCapability>) -> Self {
        Self { llm }
    }

    pub async fn parse(&self, jd: &ExtractedDocument) -> Result<JobRequirement, ScreeningError> {
        request_structured(self.llm.as_ref(), Stage::JobDescriptionParser, &PROMPT, jd).await
    }
}
