// Screening pipeline: five LLM-backed stages and the orchestrator that
// sequences them per candidate.
// All model calls go through llm_client::ReasoningCapability.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::errors::ScreeningError;
use crate::llm_client::prompts::NO_GUESSING_INSTRUCTION;
use crate::llm_client::{ReasoningCapability, StructuredRequest};
use crate::screening::models::Validate;

pub mod cv_parser;
pub mod handlers;
pub mod insights;
pub mod jd_parser;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod red_flags;
pub mod skill_matcher;

#[cfg(test)]
pub mod testing;

/// The remote-call steps of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CvParser,
    JobDescriptionParser,
    SkillMatcher,
    InsightGenerator,
    RedFlagDetector,
}

impl Stage {
    /// Task label sent with every request.
    pub fn task(self) -> &'static str {
        match self {
            Stage::CvParser => "cv_parser",
            Stage::JobDescriptionParser => "jd_parser",
            Stage::SkillMatcher => "skill_matcher",
            Stage::InsightGenerator => "insight_generator",
            Stage::RedFlagDetector => "red_flag_detector",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CvParser => "CV parser",
            Stage::JobDescriptionParser => "job description parser",
            Stage::SkillMatcher => "skill matcher",
            Stage::InsightGenerator => "insight generator",
            Stage::RedFlagDetector => "red flag detector",
        };
        f.write_str(name)
    }
}

/// Prompt pieces for one stage.
pub(crate) struct StagePrompt {
    pub system: &'static str,
    pub template: &'static str,
    pub shape: &'static str,
}

/// Sends `payload` to the capability and validates the reply as `T`.
///
/// This is the whole of a stage's local logic: package the input, then
/// enforce the output shape.
pub(crate) async fn request_structured<T, P>(
    llm: &dyn ReasoningCapability,
    stage: Stage,
    prompt: &StagePrompt,
    payload: &P,
) -> Result<T, ScreeningError>
where
    T: DeserializeOwned + Validate,
    P: Serialize + ?Sized,
{
    let payload_json =
        serde_json::to_string_pretty(payload).map_err(|e| ScreeningError::SchemaValidation {
            stage,
            message: format!("input could not be serialized: {e}"),
        })?;

    let request = StructuredRequest {
        task: stage.task(),
        system: prompt.system,
        prompt: prompt
            .template
            .replace("{no_guessing}", NO_GUESSING_INSTRUCTION)
            .replace("{payload}", &payload_json),
        shape: prompt.shape,
    };

    let reply = llm
        .invoke(request)
        .await
        .map_err(|e| ScreeningError::from_llm(stage, e))?;

    let parsed: T =
        serde_json::from_value(reply).map_err(|e| ScreeningError::SchemaValidation {
            stage,
            message: e.to_string(),
        })?;

    parsed
        .validate()
        .map_err(|message| ScreeningError::SchemaValidation { stage, message })?;

    debug!("{stage} reply validated");
    Ok(parsed)
}
