use std::sync::Arc;

use super::fallback::{demo_analysis, INFERENCE_FAILED_ADVISORY};
use super::gemini::GeminiClient;
use super::parser::parse_analysis_response;
use super::prompt::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::schema::analysis_response_schema;
use super::types::{AnalysisOutcome, FallbackReason, LlmClient};
use super::validation::validate_inputs;
use super::AnalysisError;
use crate::config::AnalysisConfig;
use crate::models::{AnalysisResult, FamilyMember, PersonalHealth};

/// Single entry point of the risk pipeline:
/// credential check → prompt → LLM → parse/validate → result, with the
/// demo report substituted on any failure.
///
/// Holds no mutable state; one analyzer can serve overlapping calls.
pub struct RiskAnalyzer {
    llm: Option<Box<dyn LlmClient + Send + Sync>>,
}

impl RiskAnalyzer {
    /// Build from configuration. Without a usable credential every call
    /// returns demo data and no client is created.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        if !config.is_configured() {
            tracing::info!("No analysis credential configured; demo data will be used");
            return Ok(Self::demo_only());
        }
        let client = GeminiClient::new(config)?;
        tracing::info!(model = %client.model(), "Risk analyzer ready");
        Ok(Self::with_client(Box::new(client)))
    }

    pub fn with_client(llm: Box<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm: Some(llm) }
    }

    pub fn demo_only() -> Self {
        Self { llm: None }
    }

    pub fn is_live(&self) -> bool {
        self.llm.is_some()
    }

    /// Analyze one snapshot of the inputs. Never fails: inference errors are
    /// logged and replaced by the demo report with an advisory.
    ///
    /// Blocks for up to the configured timeout; async callers should prefer
    /// `analyze_async`.
    pub fn analyze(&self, family: &[FamilyMember], health: &PersonalHealth) -> AnalysisOutcome {
        let _span = tracing::info_span!("analyze", members = family.len()).entered();

        let Some(llm) = self.llm.as_deref() else {
            tracing::info!("Analysis served from demo data (not configured)");
            return AnalysisOutcome::demo(demo_analysis(), FallbackReason::NotConfigured, None);
        };

        match run_inference(llm, family, health) {
            Ok(result) => {
                tracing::info!(
                    cardiovascular = result.risk_scores.cardiovascular,
                    respiratory = result.risk_scores.respiratory,
                    metabolic = result.risk_scores.metabolic,
                    "Analysis completed"
                );
                AnalysisOutcome::inferred(result)
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    error = %e,
                    "Analysis inference failed, falling back to demo data"
                );
                AnalysisOutcome::demo(
                    demo_analysis(),
                    FallbackReason::InferenceFailed,
                    Some(INFERENCE_FAILED_ADVISORY.to_string()),
                )
            }
        }
    }

    /// Async variant: takes an owned snapshot and runs the blocking call on
    /// the blocking pool. Dropping the future discards the result.
    pub async fn analyze_async(
        self: Arc<Self>,
        family: Vec<FamilyMember>,
        health: PersonalHealth,
    ) -> AnalysisOutcome {
        match tokio::task::spawn_blocking(move || self.analyze(&family, &health)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Analysis task aborted, falling back to demo data");
                AnalysisOutcome::demo(
                    demo_analysis(),
                    FallbackReason::InferenceFailed,
                    Some(INFERENCE_FAILED_ADVISORY.to_string()),
                )
            }
        }
    }
}

/// One inference attempt. No retry: a retry is the caller analyzing again.
fn run_inference(
    llm: &(dyn LlmClient + Send + Sync),
    family: &[FamilyMember],
    health: &PersonalHealth,
) -> Result<AnalysisResult, AnalysisError> {
    let report = validate_inputs(family, health);
    if !report.is_clean() {
        tracing::debug!(warnings = ?report.warnings, "Proceeding despite input warnings");
    }

    let prompt = build_analysis_prompt(family, health)?;
    let schema = analysis_response_schema();
    let response = llm.generate(&prompt, ANALYSIS_SYSTEM_PROMPT, &schema)?;
    tracing::debug!(response_len = response.len(), "Analysis response received");

    parse_analysis_response(&response)
}
