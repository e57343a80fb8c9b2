// Prompt constants for the screening stages.
// Templates carry a `{payload}` placeholder that the stage replaces with the
// JSON of its input record. Reply shapes are appended by the LLM client.

/// System prompt for CV parsing.
pub const CV_PARSE_SYSTEM: &str = "You are a CV parsing expert. \
    You extract structured candidate data from plain-text CVs. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// CV parsing prompt. Replace `{payload}` before sending.
pub const CV_PARSE_PROMPT_TEMPLATE: &str = r#"Parse the CV below and extract:
- the candidate's name, current or target role, email and phone
- skills (as a list)
- education (as a list, one entry per degree or school)
- work experience (as a list, one entry per position)
- certifications (as a list) and a brief professional summary, if available

{no_guessing}

CV (JSON with the file path and its text content):
{payload}"#;

pub const CV_SHAPE: &str = r#"{
  "name": "Jane Doe",
  "role": "Backend Engineer",
  "email": "jane@example.com",
  "phone": "+1 555 0100",
  "skills": ["Rust", "PostgreSQL"],
  "education": ["BSc Computer Science, University of Example, 2016"],
  "experience": ["Backend Engineer, Acme Corp, 2019-2024: built billing services"],
  "certifications": ["AWS Certified Developer"],
  "summary": "Backend engineer with five years of distributed systems work."
}"#;

/// System prompt for job description parsing.
pub const JD_PARSE_SYSTEM: &str = "You are a job description interpretation expert. \
    You extract structured hiring requirements from plain-text job descriptions. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// JD parsing prompt. Replace `{payload}` before sending.
pub const JD_PARSE_PROMPT_TEMPLATE: &str = r#"Parse the job description below and extract:
- job title
- company name (if present)
- location (if mentioned)
- a short summary of the role
- required skills (as a list)
- responsibilities (as a list)
- qualifications: degrees, certifications, etc. (as a list)
- employment type (Full-Time, Part-Time, Contract, ...)
- seniority level (Entry, Mid, Senior, ...)
- industry (if deducible)

{no_guessing}

JOB DESCRIPTION (JSON with the file path and its text content):
{payload}"#;

pub const JD_SHAPE: &str = r#"{
  "job_title": "Senior Backend Engineer",
  "company": "Acme Corp",
  "location": "Berlin, Germany",
  "job_summary": "Own the payments platform end to end.",
  "required_skills": ["Rust", "Kafka"],
  "responsibilities": ["Design and operate payment services"],
  "qualifications": ["BSc in Computer Science or equivalent"],
  "employment_type": "Full-Time",
  "seniority_level": "Senior",
  "industry": "Fintech"
}"#;

/// System prompt for multi-factor matching.
pub const MATCH_SYSTEM: &str = "You are a smart hiring assistant who scores candidates \
    against job requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Matching prompt. Replace `{payload}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate against the job on five dimensions:

1. Skill match: do they know the required tools?
2. Experience match: have they held relevant jobs?
3. Education: do they meet degree requirements?
4. Certifications and qualifications
5. Alignment with the job responsibilities

Give each dimension a sub-score from 0 to 100, then compute a weighted total_score
from 0 to 100. List matched and missing skills, matched and missing
responsibilities, education gaps and missing qualifications, and write a short
summary justifying the score.

CANDIDATE AND JOB (JSON):
{payload}"#;

pub const MATCH_SHAPE: &str = r#"{
  "skill_score": 80,
  "experience_score": 70,
  "education_score": 100,
  "qualification_score": 50,
  "responsibility_score": 65,
  "total_score": 74,
  "matched_skills": ["Rust"],
  "missing_skills": ["Kafka"],
  "matched_responsibilities": ["Design and operate payment services"],
  "missing_responsibilities": [],
  "education_gaps": [],
  "missing_qualifications": [],
  "summary": "Strong Rust background; no streaming experience."
}"#;

/// System prompt for insight generation.
pub const INSIGHT_SYSTEM: &str = "You are a hiring strategist. \
    Be analytical but concise and avoid vague statements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Insight prompt. Replace `{payload}` before sending.
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Given the skill matching result below:
- identify strengths (strong skills, excellent education, relevant experience)
- identify weaknesses or gaps (missing skills, mismatched responsibilities, education gaps)
- describe the candidate's potential (growth, leadership, adaptability)
- summarize the overall impression of the candidate in 1-2 lines

SKILL MATCHING RESULT (JSON):
{payload}"#;

pub const INSIGHT_SHAPE: &str = r#"{
  "strengths": ["Five years of production Rust"],
  "weaknesses": ["No Kafka experience"],
  "potential": "Likely to grow into a tech lead role within a year.",
  "insight_summary": "Strong systems engineer with a learnable gap in streaming."
}"#;

/// System prompt for red-flag detection.
pub const RED_FLAG_SYSTEM: &str = "You are a red flag detection expert in HR screening. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Red-flag prompt. Replace `{payload}` before sending.
pub const RED_FLAG_PROMPT_TEMPLATE: &str = r#"Given the skill matching report below, identify any major issues
that may disqualify the candidate or concern a recruiter. Common red flags:
- missing critical skills
- major responsibility mismatches
- no relevant experience
- poor education alignment
- missing key certifications
- low total score (e.g. < 60)

Return the list of red_flags, classify severity_level as exactly one of
"Low", "Medium" or "High", and summarize the concern.

SKILL MATCHING REPORT (JSON):
{payload}"#;

pub const RED_FLAG_SHAPE: &str = r#"{
  "red_flags": ["Missing critical skill: Kafka"],
  "severity_level": "Medium",
  "flagged_summary": "One core skill is missing; otherwise a solid match."
}"#;
