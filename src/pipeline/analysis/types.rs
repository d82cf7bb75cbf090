use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AnalysisError;
use crate::models::AnalysisResult;

/// Where the returned report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Inference,
    Demo(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No usable credential; inference was never attempted.
    NotConfigured,
    /// Inference was attempted and failed.
    InferenceFailed,
}

/// What the analyzer hands back: always a complete report, plus whether it
/// is live or demo data and an optional advisory for display.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
    pub advisory: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisOutcome {
    pub fn inferred(result: AnalysisResult) -> Self {
        Self {
            result,
            source: AnalysisSource::Inference,
            advisory: None,
            generated_at: Utc::now(),
        }
    }

    pub fn demo(result: AnalysisResult, reason: FallbackReason, advisory: Option<String>) -> Self {
        Self {
            result,
            source: AnalysisSource::Demo(reason),
            advisory,
            generated_at: Utc::now(),
        }
    }

    /// True when the report is demo data rather than a live analysis.
    pub fn is_degraded(&self) -> bool {
        matches!(self.source, AnalysisSource::Demo(_))
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self.source {
            AnalysisSource::Demo(reason) => Some(reason),
            AnalysisSource::Inference => None,
        }
    }
}

/// Generative inference backend (allows mocking).
///
/// `schema` is the JSON schema the service must constrain its output to;
/// implementations return the raw text payload without interpreting it.
pub trait LlmClient {
    fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &serde_json::Value,
    ) -> Result<String, AnalysisError>;
}
