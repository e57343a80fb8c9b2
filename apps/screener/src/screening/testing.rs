//! Scripted reasoning capability and canned replies for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::Instant;

use crate::llm_client::{LlmError, ReasoningCapability, StructuredRequest};
use crate::screening::Stage;

type Responder = Box<dyn Fn(&Value) -> Result<Value, LlmError> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub task: String,
    pub system: String,
    pub payload: Value,
    pub at: Instant,
}

/// Answers each stage from a script instead of a model.
///
/// Responders receive the JSON payload the stage sent, so replies can depend
/// on the input (e.g. echo the CV text, or flag a low score).
#[derive(Default)]
pub struct ScriptedCapability {
    responders: HashMap<&'static str, Responder>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedCapability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stage answers with its canned happy-path reply.
    pub fn happy_path() -> Self {
        Self::new()
            .reply(Stage::CvParser, candidate_json("Jane Doe", "jane@x.com"))
            .reply(Stage::JobDescriptionParser, job_json())
            .reply(Stage::SkillMatcher, match_json(74.0))
            .reply(Stage::InsightGenerator, insight_json())
            .reply(Stage::RedFlagDetector, red_flag_json(&[], "Low"))
    }

    pub fn reply(self, stage: Stage, value: Value) -> Self {
        self.respond_with(stage, move |_| Ok(value.clone()))
    }

    pub fn respond_with<F>(mut self, stage: Stage, responder: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, LlmError> + Send + Sync + 'static,
    {
        self.responders.insert(stage.task(), Box::new(responder));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tasks(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.task).collect()
    }
}

#[async_trait]
impl ReasoningCapability for ScriptedCapability {
    async fn invoke(&self, request: StructuredRequest<'_>) -> Result<Value, LlmError> {
        let payload = payload_of(&request.prompt);
        self.calls.lock().unwrap().push(RecordedCall {
            task: request.task.to_string(),
            system: request.system.to_string(),
            payload: payload.clone(),
            at: Instant::now(),
        });

        match self.responders.get(request.task) {
            Some(responder) => responder(&payload),
            None => Err(LlmError::Api {
                status: 500,
                message: format!("no scripted reply for {}", request.task),
            }),
        }
    }
}

/// The JSON payload is the last top-level object in the prompt.
fn payload_of(prompt: &str) -> Value {
    prompt
        .rfind("\n{")
        .and_then(|idx| serde_json::from_str(&prompt[idx + 1..]).ok())
        .unwrap_or(Value::Null)
}

/// An outage-class failure, as the HTTP client would report it.
pub fn unavailable() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

pub fn candidate_json(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "role": "Backend Engineer",
        "email": email,
        "phone": null,
        "skills": ["Rust", "PostgreSQL"],
        "education": ["BSc Computer Science"],
        "experience": ["Backend Engineer, Acme Corp, 2019-2024"],
        "certifications": [],
        "summary": null
    })
}

pub fn job_json() -> Value {
    json!({
        "job_title": "Senior Backend Engineer",
        "company": "Acme Corp",
        "location": "Berlin",
        "job_summary": "Own the payments platform.",
        "required_skills": ["Rust", "Kafka"],
        "responsibilities": ["Operate payment services"],
        "qualifications": ["BSc Computer Science"],
        "employment_type": "Full-Time",
        "seniority_level": "Senior",
        "industry": null
    })
}

pub fn match_json(total: f64) -> Value {
    json!({
        "skill_score": total,
        "experience_score": total,
        "education_score": total,
        "qualification_score": total,
        "responsibility_score": total,
        "total_score": total,
        "matched_skills": ["Rust"],
        "missing_skills": ["Kafka"],
        "matched_responsibilities": ["Operate payment services"],
        "missing_responsibilities": [],
        "education_gaps": [],
        "missing_qualifications": [],
        "summary": "Good systems background."
    })
}

pub fn insight_json() -> Value {
    json!({
        "strengths": ["Production Rust"],
        "weaknesses": ["No Kafka"],
        "potential": "Could lead the platform team.",
        "insight_summary": "Strong engineer with a streaming gap."
    })
}

pub fn red_flag_json(flags: &[&str], severity: &str) -> Value {
    json!({
        "red_flags": flags,
        "severity_level": severity,
        "flagged_summary": null
    })
}
