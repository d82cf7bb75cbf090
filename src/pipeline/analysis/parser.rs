use super::validation::validate_analysis_result;
use super::AnalysisError;
use crate::models::AnalysisResult;

/// Parse the service's text payload into a validated `AnalysisResult`.
///
/// The service is asked for bare JSON, but a ```json fenced block is
/// unwrapped if one appears. Any deviation from the result shape is a
/// `SchemaViolation`.
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult, AnalysisError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let json_str = extract_json_block(trimmed);
    if json_str.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let result: AnalysisResult = serde_json::from_str(json_str)
        .map_err(|e| AnalysisError::SchemaViolation(e.to_string()))?;

    validate_analysis_result(&result)?;
    Ok(result)
}

/// Return the contents of a ```json fence when present, else the input.
fn extract_json_block(response: &str) -> &str {
    let Some(start) = response.find("```json") else {
        return response;
    };
    let content_start = start + "```json".len();
    match response[content_start..].find("```") {
        Some(end) => response[content_start..content_start + end].trim(),
        None => response[content_start..].trim(),
    }
}
