//! Red-Flag Detector — concerns and an overall severity from a [`MatchResult`].
//!
//! Severity must be exactly `Low`, `Medium` or `High`; anything else fails
//! deserialization of [`SeverityLevel`] and is reported as a schema error.

use std::sync::Arc;

use crate::errors::ScreeningError;
use crate::llm_client::ReasoningCapability;
use crate::screening::models::{MatchResult, RedFlagReport};
use crate::screening::prompts::{RED_FLAG_PROMPT_TEMPLATE, RED_FLAG_SHAPE, RED_FLAG_SYSTEM};
use crate::screening::{request_structured, Stage, StagePrompt};

const PROMPT: StagePrompt = StagePrompt {
    system: RED_FLAG_SYSTEM,
    template: RED_FLAG_PROMPT_TEMPLATE,
    shape: RED_FLAG_SHAPE,
};

#[derive(Clone)]
pub struct RedFlagDetector {
    llm: Arc<dyn ReasoningCapability>,
}

impl RedFlagDetector {
    pub fn new(llm: Arc<dyn ReasoningCapability>) -> Self {
        Self { llm }
    }

    pub async fn derive(&self, skill_match: &MatchResult) -> Result<RedFlagReport, ScreeningError> {
        request_structured(
            self.llm.as_ref(),
            Stage::RedFlagDetector,
            &PROMPT,
            skill_match,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::models::SeverityLevel;
    use crate::screening::testing::{match_json, red_flag_json, ScriptedCapability};

    const LOW_SCORE_THRESHOLD: f64 = 60.0;

    /// Flags a total below the threshold, High when far below it.
    fn threshold_detector() -> ScriptedCapability {
        ScriptedCapability::new().respond_with(Stage::RedFlagDetector, |payload| {
            let total = payload["total_score"].as_f64().unwrap_or_default();
            Ok(if total < LOW_SCORE_THRESHOLD / 2.0 {
                red_flag_json(&["Low total score (<60)"], "High")
            } else if total < LOW_SCORE_THRESHOLD {
                red_flag_json(&["Low total score (<60)"], "Medium")
            } else {
                red_flag_json(&[], "Low")
            })
        })
    }

    #[tokio::test]
    async fn test_low_total_score_is_flagged() {
        let skill_match: MatchResult = serde_json::from_value(match_json(45.0)).unwrap();
        let report = RedFlagDetector::new(Arc::new(threshold_detector()))
            .derive(&skill_match)
            .await
            .unwrap();

        assert!(!report.red_flags.is_empty());
        assert_eq!(report.red_flags[0], "Low total score (<60)");
        assert_eq!(report.severity_level, SeverityLevel::Medium);
    }

    #[tokio::test]
    async fn test_score_above_threshold_not_flagged() {
        let skill_match: MatchResult = serde_json::from_value(match_json(82.0)).unwrap();
        let report = RedFlagDetector::new(Arc::new(threshold_detector()))
            .derive(&skill_match)
            .await
            .unwrap();

        assert!(report.red_flags.is_empty());
        assert_eq!(report.severity_level, SeverityLevel::Low);
    }

    #[tokio::test]
    async fn test_unknown_severity_rejected() {
        for severity in ["Critical", "high", "None"] {
            let llm = Arc::new(ScriptedCapability::new().reply(
                Stage::RedFlagDetector,
                red_flag_json(&["Missing Kafka"], severity),
            ));
            let skill_match: MatchResult = serde_json::from_value(match_json(50.0)).unwrap();

            let err = RedFlagDetector::new(llm)
                .derive(&skill_match)
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    ScreeningError::SchemaValidation {
                        stage: Stage::RedFlagDetector,
                        ..
                    }
                ),
                "{severity} should be rejected"
            );
        }
    }
}
