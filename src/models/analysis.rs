use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// Number of points in a prediction timeline: now, unmanaged, managed.
pub const TIMELINE_POINTS: usize = 3;

/// Complete health-risk report. Produced whole by inference or by the
/// demo fallback, never assembled piecemeal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub risk_scores: RiskScores,
    pub radar_chart_data: RadarChartData,
    pub risk_analysis_text: RiskAnalysisText,
    pub prediction_timeline: Vec<PredictionPoint>,
    pub action_plan: Vec<String>,
    pub comparison_with_family: String,
}

/// Scores on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScores {
    pub cardiovascular: f64,
    pub respiratory: f64,
    pub metabolic: f64,
}

impl RiskScores {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("cardiovascular", self.cardiovascular),
            ("respiratory", self.respiratory),
            ("metabolic", self.metabolic),
        ]
        .into_iter()
    }

    pub fn levels(&self) -> RiskLevels {
        RiskLevels {
            cardiovascular: RiskLevel::from_score(self.cardiovascular),
            respiratory: RiskLevel::from_score(self.respiratory),
            metabolic: RiskLevel::from_score(self.metabolic),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevels {
    pub cardiovascular: RiskLevel,
    pub respiratory: RiskLevel,
    pub metabolic: RiskLevel,
}

/// Parallel arrays for a radar chart; all three have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChartData {
    pub labels: Vec<String>,
    pub user_values: Vec<f64>,
    pub age_group_avg: Vec<f64>,
}

/// One radar axis: the user's value against the age-group average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis<'a> {
    pub label: &'a str,
    pub user_value: f64,
    pub age_group_avg: f64,
}

impl RadarChartData {
    pub fn is_aligned(&self) -> bool {
        self.labels.len() == self.user_values.len()
            && self.labels.len() == self.age_group_avg.len()
    }

    /// Zip the parallel arrays into rows. Stops at the shortest array.
    pub fn axes(&self) -> Vec<RadarAxis<'_>> {
        self.labels
            .iter()
            .zip(&self.user_values)
            .zip(&self.age_group_avg)
            .map(|((label, user), avg)| RadarAxis {
                label,
                user_value: *user,
                age_group_avg: *avg,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysisText {
    pub cardiovascular: String,
    pub respiratory: String,
    pub metabolic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub year: String,
    pub status: String,
    pub score: f64,
}

impl AnalysisResult {
    /// Present state (timeline index 0).
    pub fn current(&self) -> Option<&PredictionPoint> {
        self.prediction_timeline.first()
    }

    /// Five-year projection without intervention (index 1).
    pub fn unmanaged(&self) -> Option<&PredictionPoint> {
        self.prediction_timeline.get(1)
    }

    /// Five-year projection with managed intervention (index 2).
    pub fn managed(&self) -> Option<&PredictionPoint> {
        self.prediction_timeline.get(2)
    }

    /// Categories whose score reaches the specialist-consult band.
    pub fn high_risk_categories(&self) -> Vec<&'static str> {
        self.risk_scores
            .iter()
            .filter(|(_, score)| RiskLevel::from_score(*score).recommends_consultation())
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radar(labels: usize, users: usize, avgs: usize) -> RadarChartData {
        RadarChartData {
            labels: (0..labels).map(|i| format!("axis{i}")).collect(),
            user_values: vec![50.0; users],
            age_group_avg: vec![40.0; avgs],
        }
    }

    #[test]
    fn radar_alignment() {
        assert!(radar(5, 5, 5).is_aligned());
        assert!(!radar(5, 4, 5).is_aligned());
        assert!(!radar(5, 5, 6).is_aligned());
    }

    #[test]
    fn radar_axes_zip_rows() {
        let data = RadarChartData {
            labels: vec!["심혈관".into(), "호흡기".into()],
            user_values: vec![62.0, 45.0],
            age_group_avg: vec![45.0, 30.0],
        };
        let axes = data.axes();
        assert_eq!(axes.len(), 2);
        assert_eq!(axes[1].label, "호흡기");
        assert_eq!(axes[1].user_value, 45.0);
        assert_eq!(axes[1].age_group_avg, 30.0);
    }

    #[test]
    fn score_levels() {
        let scores = RiskScores {
            cardiovascular: 75.0,
            respiratory: 45.0,
            metabolic: 10.0,
        };
        let levels = scores.levels();
        assert_eq!(levels.cardiovascular, RiskLevel::High);
        assert_eq!(levels.respiratory, RiskLevel::Moderate);
        assert_eq!(levels.metabolic, RiskLevel::Low);
    }

    #[test]
    fn deserializes_snake_case_payload() {
        let json = serde_json::json!({
            "summary": "s",
            "risk_scores": {"cardiovascular": 70, "respiratory": 20, "metabolic": 30},
            "radar_chart_data": {"labels": ["a"], "user_values": [1], "age_group_avg": [2]},
            "risk_analysis_text": {"cardiovascular": "c", "respiratory": "r", "metabolic": "m"},
            "prediction_timeline": [
                {"year": "now", "status": "ok", "score": 40},
                {"year": "+5 unmanaged", "status": "worse", "score": 70},
                {"year": "+5 managed", "status": "better", "score": 30}
            ],
            "action_plan": ["walk"],
            "comparison_with_family": "similar"
        });
        let result: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.risk_scores.cardiovascular, 70.0);
        assert_eq!(result.unmanaged().unwrap().score, 70.0);
        assert_eq!(result.managed().unwrap().year, "+5 managed");
        assert_eq!(result.high_risk_categories(), vec!["cardiovascular"]);
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        let json = serde_json::json!({"summary": "only this"});
        assert!(serde_json::from_value::<AnalysisResult>(json).is_err());
    }
}
