pub mod types;
pub mod sanitize;
pub mod prompt;
pub mod schema;
pub mod parser;
pub mod validation;
pub mod gemini;
pub mod fallback;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use prompt::*;
pub use schema::*;
pub use parser::*;
pub use validation::*;
pub use gemini::*;
pub use fallback::*;
pub use orchestrator::*;

use thiserror::Error;

/// Failures of the inference path. None of these reach the caller of
/// `RiskAnalyzer::analyze`; each one routes to the demo fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Analysis service credential is not configured")]
    ConfigurationMissing,

    #[error("Analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Analysis service returned an empty response")]
    EmptyResponse,

    #[error("Analysis response does not match the expected schema: {0}")]
    SchemaViolation(String),
}

impl AnalysisError {
    /// Short machine-readable tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "configuration_missing",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::EmptyResponse => "empty_response",
            Self::SchemaViolation(_) => "schema_violation",
        }
    }
}
