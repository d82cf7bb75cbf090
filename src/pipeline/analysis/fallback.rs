use crate::models::{
    AnalysisResult, PredictionPoint, RadarChartData, RiskAnalysisText, RiskScores,
};

/// Advisory shown alongside demo data when a live analysis failed.
pub const INFERENCE_FAILED_ADVISORY: &str =
    "AI 분석 중 오류가 발생했습니다. 데모 데이터를 표시합니다.";

/// Fixed, hand-authored report used whenever live inference is not
/// available. Independent of the caller's inputs; identical on every call.
pub fn demo_analysis() -> AnalysisResult {
    AnalysisResult {
        summary: "현재 데이터 분석 결과, 부친으로부터 이어지는 유전적 심혈관 취약성이 관찰되나 \
                  현재의 철저한 공복혈당 관리가 리스크 증폭을 성공적으로 억제하고 있습니다. \
                  다만, 거주 지역의 환경 요인으로 인해 향후 호흡기 질환 대비가 필요합니다."
            .to_string(),
        risk_scores: RiskScores {
            cardiovascular: 62.0,
            respiratory: 45.0,
            metabolic: 28.0,
        },
        radar_chart_data: RadarChartData {
            labels: ["심혈관", "호흡기", "당뇨/대사", "간 기능", "면역/염증"]
                .into_iter()
                .map(String::from)
                .collect(),
            user_values: vec![62.0, 45.0, 28.0, 35.0, 40.0],
            age_group_avg: vec![45.0, 30.0, 40.0, 38.0, 35.0],
        },
        risk_analysis_text: RiskAnalysisText {
            cardiovascular: "부친의 40대 중반 고혈압 진단 이력이 유전적 베이스라인을 높였으나, \
                             현재 정상 혈압(120/80)을 유지하고 있어 발병 시기를 10년 이상 늦출 수 있는 상태입니다."
                .to_string(),
            respiratory: "서울 지역의 대기질 노출도와 과거 흡연 이력이 결합되어 폐 기능 약화 리스크가 \
                          평균보다 높게 측정되었습니다."
                .to_string(),
            metabolic: "BMI와 당뇨 관련 수치가 매우 우수하여 가족력에 있는 당뇨 리스크를 유의미하게 \
                        상쇄하고 있습니다."
                .to_string(),
        },
        prediction_timeline: vec![
            point("현재", "안정적이나 심혈관 주의", 45.0),
            point("5년 후(관리 안 함)", "고혈압 전단계 진입 가능성", 75.0),
            point("5년 후(관리 함)", "현재의 건강한 탄력성 유지", 38.0),
        ],
        action_plan: vec![
            "주 3회 30분 이상의 중강도 유산소 운동(수영, 조깅) 필수".to_string(),
            "염분 섭취를 하루 2,000mg 이하로 제한하는 DASH 식단 적용".to_string(),
            "미세먼지가 심한 날 외부 활동 시 반드시 보건용 마스크 착용".to_string(),
        ],
        comparison_with_family: "사용자는 아버지의 40대 초반 생체 지표와 85% 유사한 패턴을 보이고 있으나, \
                                 콜레스테롤 수치는 훨씬 양호하여 유전적 운명을 극복 중입니다."
            .to_string(),
    }
}

fn point(year: &str, status: &str, score: f64) -> PredictionPoint {
    PredictionPoint {
        year: year.to_string(),
        status: status.to_string(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TIMELINE_POINTS;

    #[test]
    fn demo_is_constant() {
        let a = serde_json::to_string(&demo_analysis()).unwrap();
        let b = serde_json::to_string(&demo_analysis()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn demo_scores() {
        let demo = demo_analysis();
        assert_eq!(demo.risk_scores.cardiovascular, 62.0);
        assert_eq!(demo.risk_scores.respiratory, 45.0);
        assert_eq!(demo.risk_scores.metabolic, 28.0);
    }

    #[test]
    fn demo_shape() {
        let demo = demo_analysis();
        assert!(demo.radar_chart_data.is_aligned());
        assert_eq!(demo.radar_chart_data.labels.len(), 5);
        assert_eq!(demo.prediction_timeline.len(), TIMELINE_POINTS);
        assert_eq!(demo.action_plan.len(), 3);
    }

    #[test]
    fn demo_timeline_order() {
        let demo = demo_analysis();
        assert_eq!(demo.current().unwrap().year, "현재");
        assert!(demo.unmanaged().unwrap().score > demo.current().unwrap().score);
        assert!(demo.managed().unwrap().score < demo.current().unwrap().score);
    }

    #[test]
    fn advisory_is_not_empty() {
        assert!(!INFERENCE_FAILED_ADVISORY.is_empty());
    }
}
