use super::lookup::{
    list_or_unknown, lookup_choice, per_selection, selections, substantive_count,
    text_or_unknown, Table, UNKNOWN, UNKNOWN_LIST,
};
use super::{owned, AnalysisRoutine, ReportBuilder, RiskLevel};
use crate::questionnaire::answer::ResponseMap;
use serde_json::json;

const CHARACTERISTICS: &Table<&[&str]> = &[
    ("Technology", &["Innovation-driven", "Fast-paced", "High R&D investment", "Talent-dependent"]),
    ("Finance", &["Regulated", "Risk-averse", "Compliance-focused", "Customer trust critical"]),
    (
        "Healthcare",
        &["Highly regulated", "Quality-focused", "Long sales cycles", "Ethical considerations"],
    ),
    ("Retail", &["Customer-centric", "Seasonal", "Inventory management", "Location-dependent"]),
    (
        "Manufacturing",
        &["Capital-intensive", "Supply chain dependent", "Quality control", "Efficiency-focused"],
    ),
    ("Other", &["Industry-specific factors", "Market dynamics", "Regulatory environment"]),
];

const SIZE_IMPLICATIONS: &Table<&[&str]> = &[
    (
        "1-10 employees",
        &[
            "Agile decision-making",
            "Limited resources",
            "Owner-dependent",
            "Personal relationships",
        ],
    ),
    (
        "11-50 employees",
        &["Growing structure", "Process development", "Team building", "Scaling challenges"],
    ),
    (
        "51-200 employees",
        &[
            "Established processes",
            "Department structure",
            "Management layers",
            "Growth opportunities",
        ],
    ),
    (
        "201-1000 employees",
        &[
            "Corporate structure",
            "Standardized processes",
            "Multiple locations",
            "Professional management",
        ],
    ),
    (
        "1000+ employees",
        &["Enterprise scale", "Complex bureaucracy", "Global presence", "Institutional processes"],
    ),
];

const FINANCIAL_HEALTH: &Table<&str> = &[
    ("Under $100K", "Early stage/Startup - Focus on growth and funding"),
    ("$100K-$1M", "Growth stage - Focus on scaling operations"),
    ("$1M-$5M", "Established - Focus on market expansion"),
    ("$5M-$50M", "Mature - Focus on efficiency and diversification"),
    ("$50M+", "Enterprise - Focus on optimization and innovation"),
];

const GROWTH_STAGE: &Table<&str> = &[
    ("Negative", "Decline phase - Focus on turnaround strategies"),
    ("Stable", "Maturity phase - Focus on efficiency and innovation"),
    ("Growing slowly (1-10%)", "Growth phase - Focus on market penetration"),
    ("Growing moderately (10-25%)", "Expansion phase - Focus on market development"),
    ("Growing rapidly (25%+)", "Hypergrowth phase - Focus on scaling and infrastructure"),
];

const MARKET_IMPLICATIONS: &Table<&[&str]> = &[
    (
        "Market leader",
        &["Defend position", "Innovate continuously", "Expand markets", "Acquire competitors"],
    ),
    (
        "Strong competitor",
        &[
            "Challenge leader",
            "Differentiate offerings",
            "Improve efficiency",
            "Expand capabilities",
        ],
    ),
    (
        "Established player",
        &["Maintain position", "Improve operations", "Explore new markets", "Innovate products"],
    ),
    (
        "Emerging player",
        &["Gain market share", "Build brand", "Develop capabilities", "Secure funding"],
    ),
    (
        "Niche player",
        &["Deepen expertise", "Expand niche", "Build relationships", "Consider diversification"],
    ),
];

const CHALLENGE_PRIORITY: &Table<&str> = &[
    ("Market competition", "High"),
    ("Regulatory compliance", "Medium"),
    ("Technology disruption", "High"),
    ("Talent acquisition", "Medium"),
    ("Financial constraints", "High"),
    ("Supply chain issues", "Medium"),
    ("Customer retention", "High"),
];

const CHALLENGE_MITIGATION: &Table<&[&str]> = &[
    (
        "Market competition",
        &["Differentiate offerings", "Improve customer service", "Innovate products"],
    ),
    (
        "Regulatory compliance",
        &["Hire compliance experts", "Implement compliance systems", "Regular audits"],
    ),
    (
        "Technology disruption",
        &["Invest in R&D", "Partner with tech companies", "Hire tech talent"],
    ),
    (
        "Talent acquisition",
        &["Improve employer brand", "Offer competitive compensation", "Develop internal talent"],
    ),
    ("Financial constraints", &["Optimize operations", "Seek funding", "Improve cash flow"]),
    (
        "Supply chain issues",
        &["Diversify suppliers", "Build relationships", "Implement monitoring"],
    ),
    (
        "Customer retention",
        &["Improve customer experience", "Loyalty programs", "Regular feedback"],
    ),
];

const WEAK_POSITIONS: [&str; 2] = ["Niche player", "Emerging player"];

pub struct BusinessRoutine;

impl AnalysisRoutine for BusinessRoutine {
    fn name(&self) -> &'static str {
        "business"
    }

    fn required_responses(&self) -> &'static [&'static str] {
        &["business_type", "company_size", "annual_revenue", "growth_rate"]
    }

    fn analyze(&self, responses: &ResponseMap, report: &mut ReportBuilder) {
        let (business_type, characteristics) =
            lookup_choice(CHARACTERISTICS, responses, "business_type");
        report.topic(
            "business_insights",
            json!({
                "type": business_type,
                "characteristics": list_or_unknown(characteristics),
            }),
        );

        let (size, implications) = lookup_choice(SIZE_IMPLICATIONS, responses, "company_size");
        report.topic(
            "size_analysis",
            json!({
                "size": size,
                "implications": list_or_unknown(implications),
            }),
        );

        let (revenue, health) = lookup_choice(FINANCIAL_HEALTH, responses, "annual_revenue");
        report.topic(
            "revenue_analysis",
            json!({
                "revenue_range": revenue,
                "financial_health": text_or_unknown(health),
            }),
        );

        let (growth, stage) = lookup_choice(GROWTH_STAGE, responses, "growth_rate");
        report.topic(
            "growth_analysis",
            json!({
                "growth_rate": growth,
                "stage": text_or_unknown(stage),
            }),
        );

        let (position, strategies) =
            lookup_choice(MARKET_IMPLICATIONS, responses, "market_position");
        report.topic(
            "market_analysis",
            json!({
                "position": position,
                "strategic_implications": list_or_unknown(strategies),
            }),
        );

        let challenges = selections(responses, "challenges");
        let priority_levels = per_selection(CHALLENGE_PRIORITY, "challenges", &challenges, UNKNOWN);
        let mitigation_strategies =
            per_selection(CHALLENGE_MITIGATION, "challenges", &challenges, UNKNOWN_LIST);
        report.topic(
            "challenges_analysis",
            json!({
                "challenges": challenges,
                "priority_levels": priority_levels,
                "mitigation_strategies": mitigation_strategies,
            }),
        );

        if growth == "Negative" {
            report.flag(
                "Negative growth rate",
                3,
                "Develop a turnaround plan to reverse negative growth",
            );
        }

        if WEAK_POSITIONS.contains(&position) {
            report.flag(
                format!("Vulnerable market position ({position})"),
                2,
                "Strengthen competitive positioning to secure market share",
            );
        }

        let challenge_count = substantive_count(&challenges);
        if challenge_count > 3 {
            report.flag(
                format!("{challenge_count} concurrent business challenges"),
                2,
                "Prioritize the most critical challenges and address them systematically",
            );
        }
    }

    fn guidance(&self, level: RiskLevel) -> Vec<String> {
        let items: &[&str] = match level {
            RiskLevel::High => &[
                "Immediate action required on key challenges",
                "Consider strategic partnerships or acquisitions",
                "Review and strengthen risk management processes",
            ],
            RiskLevel::Medium => &[
                "Address priority challenges systematically",
                "Monitor market conditions closely",
                "Strengthen competitive positioning",
            ],
            RiskLevel::Low => &[
                "Maintain current strategies",
                "Focus on growth opportunities",
                "Continue monitoring for emerging risks",
            ],
        };
        owned(items)
    }
}
