// Shape and range checks for analysis results, plus a plausibility report
// for the caller's inputs. Result problems are fatal (schema violation);
// input problems are warnings only.

use super::sanitize::{contains_instruction, sanitize_label};
use super::AnalysisError;
use crate::models::{AnalysisResult, FamilyMember, PersonalHealth, TIMELINE_POINTS};

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;

/// Oldest plausible age for the user or a diagnosis.
const MAX_PLAUSIBLE_AGE: u32 = 130;

/// Reject results that break the shape or range contract.
pub fn validate_analysis_result(result: &AnalysisResult) -> Result<(), AnalysisError> {
    let radar = &result.radar_chart_data;
    if !radar.is_aligned() {
        return Err(AnalysisError::SchemaViolation(format!(
            "radar_chart_data length mismatch: labels={}, user_values={}, age_group_avg={}",
            radar.labels.len(),
            radar.user_values.len(),
            radar.age_group_avg.len()
        )));
    }

    if result.prediction_timeline.len() != TIMELINE_POINTS {
        return Err(AnalysisError::SchemaViolation(format!(
            "prediction_timeline has {} points, expected {TIMELINE_POINTS}",
            result.prediction_timeline.len()
        )));
    }

    for (name, score) in result.risk_scores.iter() {
        check_score(&format!("risk_scores.{name}"), score)?;
    }
    for (i, point) in result.prediction_timeline.iter().enumerate() {
        check_score(&format!("prediction_timeline[{i}].score"), point.score)?;
    }
    for (i, v) in radar.user_values.iter().enumerate() {
        check_score(&format!("radar_chart_data.user_values[{i}]"), *v)?;
    }
    for (i, v) in radar.age_group_avg.iter().enumerate() {
        check_score(&format!("radar_chart_data.age_group_avg[{i}]"), *v)?;
    }

    Ok(())
}

fn check_score(path: &str, score: f64) -> Result<(), AnalysisError> {
    if score.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&score) {
        Ok(())
    } else {
        Err(AnalysisError::SchemaViolation(format!(
            "{path} = {score} outside [{SCORE_MIN}, {SCORE_MAX}]"
        )))
    }
}

/// Input plausibility warnings. Analysis proceeds regardless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputReport {
    pub warnings: Vec<String>,
}

impl InputReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub fn validate_inputs(family: &[FamilyMember], health: &PersonalHealth) -> InputReport {
    let mut warnings = Vec::new();

    for (i, member) in family.iter().enumerate() {
        let unnamed = member.diseases.iter().filter(|d| !d.is_named()).count();
        if unnamed > 0 {
            warnings.push(format!(
                "Member {i} ({}) has {unnamed} unnamed disease(s); they are left out of the analysis",
                member.relationship
            ));
        }

        // Permissive: the flag is kept and sent as entered.
        if member.has_death_conflict() {
            warnings.push(format!(
                "Member {i} ({}) has a cause of death recorded but is not marked deceased",
                member.relationship
            ));
        }

        for d in &member.diseases {
            if d.is_named() && contains_instruction(&d.name) {
                let kept = sanitize_label(&d.name);
                if kept.is_empty() {
                    warnings.push(format!(
                        "Member {i} ({}) has a disease name made only of an instruction marker; it is left out of the analysis",
                        member.relationship
                    ));
                } else {
                    warnings.push(format!(
                        "Member {i} ({}) disease name contains instruction-like text; sent as \"{kept}\"",
                        member.relationship
                    ));
                }
            }
            if d.diagnosis_age > MAX_PLAUSIBLE_AGE {
                warnings.push(format!(
                    "Member {i} ({}) has implausible diagnosis age {}",
                    member.relationship, d.diagnosis_age
                ));
            }
            if let Some(death_age) = d.death_age {
                if death_age < d.diagnosis_age {
                    warnings.push(format!(
                        "Member {i} ({}) death age {death_age} precedes diagnosis age {}",
                        member.relationship, d.diagnosis_age
                    ));
                }
            }
        }
    }

    if health.age == 0 || health.age > MAX_PLAUSIBLE_AGE {
        warnings.push(format!("Implausible age {}", health.age));
    }

    for (name, value) in health.measurements() {
        if !value.is_finite() || value < 0.0 {
            warnings.push(format!("{name} must be a non-negative number"));
        }
    }

    if health.systolic_bp > 0.0 && health.diastolic_bp >= health.systolic_bp {
        warnings.push("diastolicBP is not below systolicBP".to_string());
    }

    if !warnings.is_empty() {
        tracing::warn!(
            warning_count = warnings.len(),
            members = family.len(),
            "Analysis input validation warnings"
        );
    }

    InputReport { warnings }
}
