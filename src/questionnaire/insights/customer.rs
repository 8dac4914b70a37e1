use super::lookup::{
    list_or_unknown, lookup_choice, per_selection, selections, substantive_count,
    text_or_unknown, Table, UNKNOWN, UNKNOWN_LIST,
};
use super::{owned, AnalysisRoutine, ReportBuilder, RiskLevel};
use crate::questionnaire::answer::ResponseMap;
use serde_json::json;

const SATISFACTION: &Table<&str> = &[
    ("Very dissatisfied", "Critical issues requiring immediate attention"),
    ("Dissatisfied", "Significant problems need urgent resolution"),
    ("Neutral", "Room for improvement to increase satisfaction"),
    ("Satisfied", "Good performance with opportunities for enhancement"),
    ("Very satisfied", "Excellent performance, focus on maintaining standards"),
];

const PAIN_POINT_PRIORITY: &Table<&str> = &[
    ("Product quality", "High"),
    ("Customer service", "High"),
    ("Pricing", "Medium"),
    ("Ease of use", "Medium"),
    ("Support response time", "High"),
    ("Documentation", "Low"),
    ("None", "Low"),
];

const PAIN_POINT_SOLUTIONS: &Table<&[&str]> = &[
    (
        "Product quality",
        &[
            "Quality assurance processes",
            "Customer feedback loops",
            "Regular testing",
            "Continuous improvement",
        ],
    ),
    (
        "Customer service",
        &["Staff training", "Service standards", "Response time targets", "Customer feedback"],
    ),
    (
        "Pricing",
        &["Competitive analysis", "Value proposition", "Pricing strategy", "Customer segmentation"],
    ),
    (
        "Ease of use",
        &["User experience design", "User testing", "Interface improvements", "Documentation"],
    ),
    (
        "Support response time",
        &[
            "Support team expansion",
            "Automation tools",
            "Response time targets",
            "Escalation procedures",
        ],
    ),
    ("Documentation", &["Content review", "User testing", "Regular updates", "Multiple formats"]),
    ("None", &["Maintain current service quality", "Keep collecting customer feedback"]),
];

const LOYALTY_IMPROVEMENTS: &Table<&[&str]> = &[
    (
        "Not loyal",
        &["Build trust", "Improve product quality", "Enhance customer service", "Loyalty programs"],
    ),
    (
        "Somewhat loyal",
        &[
            "Strengthen relationships",
            "Personalized experiences",
            "Regular communication",
            "Value demonstration",
        ],
    ),
    ("Loyal", &["Maintain standards", "Innovation", "Exclusive benefits", "Community building"]),
    (
        "Very loyal",
        &[
            "Advocacy programs",
            "Referral incentives",
            "Exclusive access",
            "Partnership opportunities",
        ],
    ),
    (
        "Extremely loyal",
        &[
            "Brand ambassadors",
            "Co-creation opportunities",
            "Exclusive experiences",
            "Strategic partnerships",
        ],
    ),
];

pub struct CustomerRoutine;

impl AnalysisRoutine for CustomerRoutine {
    fn name(&self) -> &'static str {
        "customer_satisfaction"
    }

    fn required_responses(&self) -> &'static [&'static str] {
        &["satisfaction_level", "loyalty_level"]
    }

    fn analyze(&self, responses: &ResponseMap, report: &mut ReportBuilder) {
        let (satisfaction, interpretation) =
            lookup_choice(SATISFACTION, responses, "satisfaction_level");
        report.topic(
            "satisfaction_analysis",
            json!({
                "level": satisfaction,
                "interpretation": text_or_unknown(interpretation),
            }),
        );

        if matches!(satisfaction, "Very dissatisfied" | "Dissatisfied") {
            report.flag(
                format!("Customer dissatisfaction ({satisfaction})"),
                3,
                "Address the root causes of customer dissatisfaction immediately",
            );
        }

        let pain_points = selections(responses, "pain_points");
        let priority = per_selection(PAIN_POINT_PRIORITY, "pain_points", &pain_points, UNKNOWN);
        let solutions =
            per_selection(PAIN_POINT_SOLUTIONS, "pain_points", &pain_points, UNKNOWN_LIST);
        report.topic(
            "pain_points_analysis",
            json!({
                "points": pain_points,
                "priority": priority,
                "solutions": solutions,
            }),
        );

        let pain_point_count = substantive_count(&pain_points);
        if pain_point_count > 3 {
            report.flag(
                format!("{pain_point_count} reported pain points"),
                2,
                "Resolve the highest-priority pain points first",
            );
        }

        let (loyalty, improvements) =
            lookup_choice(LOYALTY_IMPROVEMENTS, responses, "loyalty_level");
        report.topic(
            "loyalty_analysis",
            json!({
                "level": loyalty,
                "improvement_areas": list_or_unknown(improvements),
            }),
        );

        if matches!(loyalty, "Not loyal" | "Somewhat loyal") {
            report.flag(
                format!("Weak customer loyalty ({loyalty})"),
                2,
                "Launch retention initiatives to build customer loyalty",
            );
        }
    }

    fn guidance(&self, level: RiskLevel) -> Vec<String> {
        let items: &[&str] = match level {
            RiskLevel::High => &[
                "Immediate customer experience improvements",
                "Address critical pain points",
                "Implement customer feedback systems",
            ],
            RiskLevel::Medium => &[
                "Systematic improvement planning",
                "Regular customer satisfaction monitoring",
                "Focus on high-impact improvements",
            ],
            RiskLevel::Low => &[
                "Maintain current service standards",
                "Continue monitoring customer feedback",
                "Look for enhancement opportunities",
            ],
        };
        owned(items)
    }
}
