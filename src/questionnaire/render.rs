//! Plain-text rendering of catalogs and analysis results for the console.

use super::insights::InsightReport;
use super::question::SetInfo;
use super::registry::QuestionSetRegistry;
use serde_json::Value;
use std::io::{self, Write};

const WIDTH: usize = 70;

/// `business_insights` -> `Business Insights`
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn inline(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(inline).collect::<Vec<_>>().join(", "),
        Value::Object(entries) => entries
            .iter()
            .map(|(key, nested)| format!("{key}: {}", inline(nested)))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn render_catalog<W: Write>(out: &mut W, registry: &QuestionSetRegistry) -> io::Result<()> {
    writeln!(out, "Analysis categories:")?;
    for info in registry.categories() {
        writeln!(out, "  {} - {}", info.name, info.description)?;
        for set_id in &info.question_sets {
            writeln!(out, "    - {set_id}")?;
        }
    }

    writeln!(out, "\nQuestion sets:")?;
    for set in registry.sets() {
        writeln!(
            out,
            "  {} ({}, {} questions)\n    {}",
            set.id(),
            set.name(),
            set.questions().len(),
            set.description()
        )?;
    }
    Ok(())
}

pub fn render_report<W: Write>(
    out: &mut W,
    info: &SetInfo,
    report: &InsightReport,
) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(WIDTH))?;
    writeln!(out, "           {} - ANALYSIS RESULTS", info.name.to_uppercase())?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;

    for (section, payload) in &report.topics {
        writeln!(out, "\n{}:", title_case(section))?;
        writeln!(out, "{}", "-".repeat(50))?;

        let Value::Object(fields) = payload else {
            writeln!(out, "  {}", inline(payload))?;
            continue;
        };

        for (key, value) in fields {
            match value {
                Value::Array(items) => {
                    writeln!(out, "  {}:", title_case(key))?;
                    for item in items {
                        writeln!(out, "    • {}", inline(item))?;
                    }
                }
                Value::Object(entries) => {
                    writeln!(out, "  {}:", title_case(key))?;
                    for (name, nested) in entries {
                        writeln!(out, "    {name}: {}", inline(nested))?;
                    }
                }
                other => writeln!(out, "  {}: {}", title_case(key), inline(other))?,
            }
        }
    }

    let overall = &report.overall_assessment;
    writeln!(out, "\n{:-^width$}", " Overall Assessment ", width = WIDTH)?;
    writeln!(out, "Risk Level: {}", overall.risk_level)?;
    writeln!(out, "Overall Health: {}", overall.overall_health)?;
    writeln!(out, "Risk Score: {}", overall.risk_score)?;

    if !overall.flagged_conditions.is_empty() {
        writeln!(out, "\nFlagged Conditions:")?;
        for condition in &overall.flagged_conditions {
            writeln!(out, "  • {condition}")?;
        }
    }

    writeln!(out, "\nKey Recommendations:")?;
    for recommendation in overall.recommendations.iter().chain(&overall.guidance) {
        writeln!(out, "  • {recommendation}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::insights::{ReportBuilder, RiskThresholds};
    use crate::questionnaire::question::Category;
    use serde_json::json;

    #[test]
    fn title_case_splits_on_underscores() {
        assert_eq!(title_case("business_insights"), "Business Insights");
        assert_eq!(title_case("nps_category"), "Nps Category");
        assert_eq!(title_case("level"), "Level");
    }

    #[test]
    fn report_lists_sections_and_assessment() {
        let mut builder = ReportBuilder::new();
        builder.topic(
            "growth_analysis",
            json!({"growth_rate": "Negative", "stage": "Decline phase"}),
        );
        builder.topic(
            "challenges_analysis",
            json!({
                "challenges": ["Pricing"],
                "priority_levels": {"Pricing": "Medium"},
            }),
        );
        builder.flag("Negative growth rate", 3, "Develop a turnaround plan");
        let report = builder.finish(RiskThresholds::STANDARD, |_| vec!["Monitor".to_string()]);
        let info = SetInfo {
            name: "Business Analysis".to_string(),
            description: "Business".to_string(),
            category: Category::Business,
        };

        let mut out = Vec::new();
        render_report(&mut out, &info, &report).expect("renders");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("BUSINESS ANALYSIS - ANALYSIS RESULTS"));
        assert!(text.contains("Growth Analysis:"));
        assert!(text.contains("  Growth Rate: Negative"));
        assert!(text.contains("    • Pricing"));
        assert!(text.contains("    Pricing: Medium"));
        assert!(text.contains("Risk Level: Medium"));
        assert!(text.contains("  • Develop a turnaround plan"));
        assert!(text.contains("  • Monitor"));
    }
}
