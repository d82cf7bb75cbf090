pub mod config;
pub mod models;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use models::{AnalysisResult, FamilyHistory, FamilyMember, PersonalHealth};
pub use pipeline::analysis::{AnalysisError, AnalysisOutcome, RiskAnalyzer};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Honors `RUST_LOG`, otherwise
/// uses `config::default_log_filter()`. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn end_to_end_without_credential() {
        let config = AnalysisConfig::from_lookup(|_| None).unwrap();
        let analyzer = RiskAnalyzer::from_config(&config).unwrap();

        let mut history = FamilyHistory::new();
        let father = history.add_member();
        let idx = history.add_disease(father).unwrap();
        history
            .update_disease(father, idx, models::DiseaseUpdate::Name("고혈압".into()))
            .unwrap();

        let outcome = analyzer.analyze(history.members(), &PersonalHealth::default());
        assert!(outcome.is_degraded());
        assert_eq!(outcome.result.risk_scores.cardiovascular, 62.0);
    }
}
