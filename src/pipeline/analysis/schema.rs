//! Response schema sent with every inference request.
//!
//! Mirrors `AnalysisResult` field-for-field in the OpenAPI subset the
//! Gemini `responseSchema` accepts. The parser still validates the payload
//! independently; the schema only constrains what the service emits.

use serde_json::{json, Value};

use crate::models::TIMELINE_POINTS;

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// Object schema for the three risk categories, all with the same item type.
fn per_category(item: Value) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "cardiovascular": item.clone(),
            "respiratory": item.clone(),
            "metabolic": item,
        },
        "required": ["cardiovascular", "respiratory", "metabolic"],
    })
}

pub fn analysis_response_schema() -> Value {
    let timeline_point = json!({
        "type": "OBJECT",
        "properties": {
            "year": string(),
            "status": string(),
            "score": number(),
        },
        "required": ["year", "status", "score"],
    });

    let mut timeline = array_of(timeline_point);
    timeline["minItems"] = json!(TIMELINE_POINTS);
    timeline["maxItems"] = json!(TIMELINE_POINTS);

    json!({
        "type": "OBJECT",
        "properties": {
            "summary": string(),
            "risk_scores": per_category(number()),
            "radar_chart_data": {
                "type": "OBJECT",
                "properties": {
                    "labels": array_of(string()),
                    "user_values": array_of(number()),
                    "age_group_avg": array_of(number()),
                },
                "required": ["labels", "user_values", "age_group_avg"],
            },
            "risk_analysis_text": per_category(string()),
            "prediction_timeline": timeline,
            "action_plan": array_of(string()),
            "comparison_with_family": string(),
        },
        "required": [
            "summary",
            "risk_scores",
            "radar_chart_data",
            "risk_analysis_text",
            "prediction_timeline",
            "action_plan",
            "comparison_with_family",
        ],
    })
}
