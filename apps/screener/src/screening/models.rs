//! Data contracts shared by every screening stage.
//!
//! Each record is produced once by exactly one stage and never mutated. Replies
//! from the reasoning capability are deserialized into these types and then
//! checked with [`Validate`] before a stage hands them on.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Raw decoded text of a CV or job description file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub file_path: PathBuf,
    pub file_content: String,
}

/// Structured fields parsed from a CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Structured fields parsed from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_summary: Option<String>,
    pub required_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub qualifications: Vec<String>,
    /// e.g. Full-Time, Part-Time, Contract
    pub employment_type: Option<String>,
    /// e.g. Entry, Mid, Senior
    pub seniority_level: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

/// Payload sent to the skill matcher.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRequest<'a> {
    pub candidate: &'a CandidateProfile,
    pub job: &'a JobRequirement,
}

/// Multi-factor compatibility scoring of one candidate against one job.
///
/// Every score lies in `[0, 100]`. How `total_score` weighs the five
/// sub-scores is decided by the reasoning capability, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub qualification_score: f64,
    pub responsibility_score: f64,
    pub total_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_responsibilities: Vec<String>,
    pub missing_responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub education_gaps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub missing_qualifications: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl MatchResult {
    pub const MIN_SCORE: f64 = 0.0;
    pub const MAX_SCORE: f64 = 100.0;

    /// The five sub-scores in a fixed order: skill, experience, education,
    /// qualification, responsibility.
    pub fn sub_scores(&self) -> [f64; 5] {
        [
            self.skill_score,
            self.experience_score,
            self.education_score,
            self.qualification_score,
            self.responsibility_score,
        ]
    }

    /// Total score rounded for display ("72% match").
    pub fn match_percent(&self) -> u8 {
        self.total_score
            .round()
            .clamp(Self::MIN_SCORE, Self::MAX_SCORE) as u8
    }

    /// Whether `total_score` lies between the smallest and largest sub-score,
    /// which holds for any convex weighting.
    pub fn total_within_sub_score_envelope(&self) -> bool {
        let subs = self.sub_scores();
        let min = subs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = subs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // Replies round scores to whole numbers, allow for that.
        self.total_score >= min - 1.0 && self.total_score <= max + 1.0
    }
}

/// Interpretive analysis derived from a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInsight {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub potential: Option<String>,
    #[serde(default)]
    pub insight_summary: Option<String>,
}

/// Overall severity of a [`RedFlagReport`]. Only these exact spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
}

/// Risk and concern analysis derived from a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlagReport {
    pub red_flags: Vec<String>,
    pub severity_level: SeverityLevel,
    #[serde(default)]
    pub flagged_summary: Option<String>,
}

/// Everything the pipeline produced for one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAnalysis {
    pub cv: CandidateProfile,
    pub job_description: JobRequirement,
    pub skill_match: MatchResult,
    pub insights: CandidateInsight,
    pub red_flags: RedFlagReport,
}

impl CandidateAnalysis {
    /// Name to show for the candidate, falling back to `Candidate {position}`
    /// (1-based) when the CV had no usable name.
    pub fn display_name(&self, position: usize) -> String {
        match self.cv.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Candidate {position}"),
        }
    }
}

/// Post-deserialization checks for stage replies.
pub trait Validate {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Validate for CandidateProfile {}
impl Validate for JobRequirement {}
impl Validate for CandidateInsight {}
impl Validate for RedFlagReport {}

impl Validate for MatchResult {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("skill_score", self.skill_score),
            ("experience_score", self.experience_score),
            ("education_score", self.education_score),
            ("qualification_score", self.qualification_score),
            ("responsibility_score", self.responsibility_score),
            ("total_score", self.total_score),
        ];
        for (field, value) in fields {
            if !value.is_finite() || !(Self::MIN_SCORE..=Self::MAX_SCORE).contains(&value) {
                return Err(format!("{field} must be within [0, 100], got {value}"));
            }
        }
        Ok(())
    }
}

/// Treats an explicit `null` list the same as an absent one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn match_json(total: f64) -> serde_json::Value {
        json!({
            "skill_score": 80.0,
            "experience_score": 70.0,
            "education_score": 60.0,
            "qualification_score": 50.0,
            "responsibility_score": 90.0,
            "total_score": total,
            "matched_skills": ["Rust"],
            "missing_skills": ["Kafka"],
            "matched_responsibilities": [],
            "missing_responsibilities": [],
            "education_gaps": null,
            "summary": "Solid systems background."
        })
    }

    #[test]
    fn test_candidate_profile_null_fields_and_missing_optionals() {
        let json = json!({
            "name": null,
            "role": null,
            "email": "jane@x.com",
            "phone": null,
            "skills": [],
            "education": [],
            "experience": [],
            "certifications": null
        });
        let profile: CandidateProfile = serde_json::from_value(json).unwrap();
        assert!(profile.name.is_none());
        assert_eq!(profile.email.as_deref(), Some("jane@x.com"));
        assert!(profile.certifications.is_empty());
        assert!(profile.summary.is_none());
    }

    #[test]
    fn test_candidate_profile_requires_skill_list() {
        let json = json!({
            "name": "Jane Doe",
            "education": [],
            "experience": []
        });
        assert!(serde_json::from_value::<CandidateProfile>(json).is_err());
    }

    #[test]
    fn test_job_requirement_rejects_string_for_list() {
        let json = json!({
            "job_title": "Backend Engineer",
            "required_skills": "Rust, Go",
            "responsibilities": []
        });
        assert!(serde_json::from_value::<JobRequirement>(json).is_err());
    }

    #[test]
    fn test_match_result_in_range_validates() {
        let result: MatchResult = serde_json::from_value(match_json(72.0)).unwrap();
        assert!(result.validate().is_ok());
        assert!(result.education_gaps.is_empty());
        assert!(result.missing_qualifications.is_empty());
        assert_eq!(result.match_percent(), 72);
    }

    #[test]
    fn test_match_result_out_of_range_rejected() {
        let mut result: MatchResult = serde_json::from_value(match_json(72.0)).unwrap();
        result.total_score = 100.5;
        let err = result.validate().unwrap_err();
        assert!(err.contains("total_score"));

        result.total_score = 50.0;
        result.skill_score = -1.0;
        let err = result.validate().unwrap_err();
        assert!(err.contains("skill_score"));
    }

    #[test]
    fn test_match_result_nan_rejected() {
        let mut result: MatchResult = serde_json::from_value(match_json(72.0)).unwrap();
        result.education_score = f64::NAN;
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_match_result_bounds_are_inclusive() {
        let mut result: MatchResult = serde_json::from_value(match_json(0.0)).unwrap();
        assert!(result.validate().is_ok());
        result.total_score = 100.0;
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_total_score_envelope() {
        let result: MatchResult = serde_json::from_value(match_json(70.0)).unwrap();
        assert!(result.total_within_sub_score_envelope());
        let result: MatchResult = serde_json::from_value(match_json(99.0)).unwrap();
        assert!(!result.total_within_sub_score_envelope());
    }

    #[test]
    fn test_severity_accepts_only_exact_levels() {
        for (raw, expected) in [
            ("\"Low\"", SeverityLevel::Low),
            ("\"Medium\"", SeverityLevel::Medium),
            ("\"High\"", SeverityLevel::High),
        ] {
            let level: SeverityLevel = serde_json::from_str(raw).unwrap();
            assert_eq!(level, expected);
        }
        for raw in ["\"Critical\"", "\"low\"", "\"\"", "3"] {
            assert!(serde_json::from_str::<SeverityLevel>(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_display_name_falls_back_to_position() {
        let analysis = sample_analysis(Some("  "));
        assert_eq!(analysis.display_name(3), "Candidate 3");
        let analysis = sample_analysis(None);
        assert_eq!(analysis.display_name(1), "Candidate 1");
        let analysis = sample_analysis(Some("Jane Doe"));
        assert_eq!(analysis.display_name(1), "Jane Doe");
    }

    fn sample_analysis(name: Option<&str>) -> CandidateAnalysis {
        CandidateAnalysis {
            cv: CandidateProfile {
                name: name.map(String::from),
                role: None,
                email: None,
                phone: None,
                skills: vec![],
                education: vec![],
                experience: vec![],
                certifications: vec![],
                summary: None,
            },
            job_description: JobRequirement {
                job_title: None,
                company: None,
                location: None,
                job_summary: None,
                required_skills: vec![],
                responsibilities: vec![],
                qualifications: vec![],
                employment_type: None,
                seniority_level: None,
                industry: None,
            },
            skill_match: serde_json::from_value(match_json(50.0)).unwrap(),
            insights: CandidateInsight {
                strengths: vec![],
                weaknesses: vec![],
                potential: None,
                insight_summary: None,
            },
            red_flags: RedFlagReport {
                red_flags: vec![],
                severity_level: SeverityLevel::Low,
                flagged_summary: None,
            },
        }
    }
}
