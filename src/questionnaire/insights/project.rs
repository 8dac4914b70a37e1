use super::lookup::{
    choice, list_or_unknown, lookup_choice, per_selection, selections, substantive_count, Table,
    UNKNOWN, UNKNOWN_LIST,
};
use super::{owned, AnalysisRoutine, ReportBuilder, RiskLevel};
use crate::questionnaire::answer::ResponseMap;
use serde_json::json;

const SIZE_IMPLICATIONS: &Table<&[&str]> = &[
    (
        "Small (1-3 months)",
        &["Simple planning", "Minimal documentation", "Direct communication", "Quick execution"],
    ),
    (
        "Medium (3-12 months)",
        &["Detailed planning", "Regular reviews", "Team coordination", "Risk management"],
    ),
    (
        "Large (1-3 years)",
        &["Complex planning", "Multiple phases", "Stakeholder management", "Change control"],
    ),
    (
        "Enterprise (3+ years)",
        &[
            "Strategic planning",
            "Portfolio management",
            "Governance structure",
            "Continuous monitoring",
        ],
    ),
];

const RISK_STRATEGIES: &Table<&[&str]> = &[
    (
        "New technology",
        &["Proof of concept", "Expert consultation", "Training programs", "Fallback plans"],
    ),
    (
        "Integration challenges",
        &["API documentation", "Testing protocols", "Vendor support", "Gradual rollout"],
    ),
    (
        "Performance requirements",
        &["Load testing", "Performance monitoring", "Optimization", "Scalability planning"],
    ),
    (
        "Security concerns",
        &["Security audits", "Penetration testing", "Compliance review", "Incident response"],
    ),
    (
        "Scalability issues",
        &["Architecture review", "Performance testing", "Capacity planning", "Monitoring tools"],
    ),
    ("None", &["Maintain standard quality practices", "Reassess risks at each milestone"]),
];

const RESOURCE_RECOMMENDATIONS: &Table<&[&str]> = &[
    (
        "Excellent",
        &["Optimize utilization", "Consider expansion", "Skill development", "Innovation focus"],
    ),
    ("Good", &["Maintain efficiency", "Plan for growth", "Cross-training", "Process improvement"]),
    (
        "Fair",
        &[
            "Prioritize critical needs",
            "Resource optimization",
            "External support",
            "Efficiency focus",
        ],
    ),
    (
        "Poor",
        &["Critical path focus", "External resources", "Scope reduction", "Timeline adjustment"],
    ),
];

pub struct ProjectRoutine;

impl AnalysisRoutine for ProjectRoutine {
    fn name(&self) -> &'static str {
        "project_management"
    }

    fn required_responses(&self) -> &'static [&'static str] {
        &["project_size", "timeline_pressure", "resource_availability"]
    }

    fn analyze(&self, responses: &ResponseMap, report: &mut ReportBuilder) {
        let (size, implications) = lookup_choice(SIZE_IMPLICATIONS, responses, "project_size");
        report.topic(
            "complexity_analysis",
            json!({
                "size": size,
                "management_implications": list_or_unknown(implications),
            }),
        );

        let pressure = choice(responses, "timeline_pressure").unwrap_or(UNKNOWN);
        if matches!(pressure, "High pressure" | "Critical deadline") {
            report.flag(
                format!("Timeline pressure ({pressure})"),
                2,
                "Re-baseline the schedule and protect the critical path",
            );
        }

        let risks = selections(responses, "technical_risks");
        let strategies = per_selection(RISK_STRATEGIES, "technical_risks", &risks, UNKNOWN_LIST);
        report.topic(
            "risk_assessment",
            json!({
                "technical_risks": risks,
                "mitigation_strategies": strategies,
            }),
        );

        let risk_count = substantive_count(&risks);
        if risk_count > 2 {
            report.flag(
                format!("{risk_count} open technical risks"),
                2,
                "Run technical risk mitigation ahead of delivery milestones",
            );
        }

        let (availability, recommendations) =
            lookup_choice(RESOURCE_RECOMMENDATIONS, responses, "resource_availability");
        report.topic(
            "resource_analysis",
            json!({
                "availability": availability,
                "recommendations": list_or_unknown(recommendations),
            }),
        );

        if matches!(availability, "Fair" | "Poor") {
            report.flag(
                format!("Constrained resource availability ({availability})"),
                2,
                "Secure additional resources or reduce scope",
            );
        }
    }

    fn guidance(&self, level: RiskLevel) -> Vec<String> {
        let items: &[&str] = match level {
            RiskLevel::High => &[
                "Immediate risk mitigation planning",
                "Consider project scope reduction",
                "Increase stakeholder communication",
            ],
            RiskLevel::Medium => &[
                "Implement risk monitoring processes",
                "Regular status reviews",
                "Prepare contingency plans",
            ],
            RiskLevel::Low => &[
                "Continue current project management approach",
                "Regular risk assessment",
                "Focus on optimization and efficiency",
            ],
        };
        owned(items)
    }
}
