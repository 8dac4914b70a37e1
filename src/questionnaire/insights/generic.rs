use super::{owned, AnalysisRoutine, ReportBuilder, RiskLevel};
use crate::questionnaire::answer::ResponseMap;
use serde_json::{json, Map, Value};

/// Fallback for categories without a dedicated routine: summarizes what was answered.
pub struct GenericRoutine;

impl AnalysisRoutine for GenericRoutine {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn analyze(&self, responses: &ResponseMap, report: &mut ReportBuilder) {
        let summary: Map<String, Value> = responses
            .iter()
            .map(|(question_id, answer)| {
                (
                    question_id.to_string(),
                    json!({
                        "response": answer,
                        "type": answer.shape(),
                    }),
                )
            })
            .collect();

        let mut analysis = Map::new();
        if let Some(total) = report.question_count() {
            analysis.insert("total_questions".to_string(), json!(total));
        }
        analysis.insert("completed_questions".to_string(), json!(responses.len()));
        analysis.insert("response_summary".to_string(), Value::Object(summary));
        report.topic("generic_analysis", Value::Object(analysis));
    }

    fn guidance(&self, level: RiskLevel) -> Vec<String> {
        let items: &[&str] = match level {
            RiskLevel::High => &[
                "Immediate action required",
                "Professional consultation recommended",
                "Risk mitigation planning",
            ],
            RiskLevel::Medium => &[
                "Monitor situation closely",
                "Implement improvement plans",
                "Regular assessment needed",
            ],
            RiskLevel::Low => &[
                "Maintain current approach",
                "Continue monitoring",
                "Look for enhancement opportunities",
            ],
        };
        owned(items)
    }
}
