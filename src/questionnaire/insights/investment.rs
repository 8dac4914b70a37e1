use super::lookup::{list_or_unknown, lookup_choice, Table};
use super::{owned, AnalysisRoutine, ReportBuilder, RiskLevel};
use crate::questionnaire::answer::ResponseMap;
use serde_json::json;

const CHARACTERISTICS: &Table<&[&str]> = &[
    (
        "Stocks",
        &["Equity ownership", "Market volatility", "Dividend potential", "Growth potential"],
    ),
    ("Bonds", &["Fixed income", "Lower risk", "Interest payments", "Maturity dates"]),
    ("Real Estate", &["Tangible asset", "Rental income", "Appreciation potential", "Illiquid"]),
    (
        "Startup/Private Equity",
        &["High risk", "High return potential", "Illiquid", "Long-term horizon"],
    ),
    ("Commodities", &["Inflation hedge", "Volatile", "No income", "Global factors"]),
    (
        "Cryptocurrency",
        &["Digital asset", "Extremely volatile", "24/7 trading", "Regulatory uncertainty"],
    ),
    ("Other", &["Asset-specific risks", "Specialist due diligence", "Variable liquidity"]),
];

const RISK_RECOMMENDATIONS: &Table<&[&str]> = &[
    (
        "Conservative",
        &[
            "Focus on bonds and stable dividend stocks",
            "Maintain high cash reserves",
            "Consider annuities",
        ],
    ),
    (
        "Moderate",
        &[
            "Balanced portfolio of stocks and bonds",
            "Diversify across sectors",
            "Regular rebalancing",
        ],
    ),
    (
        "Aggressive",
        &["Higher allocation to stocks", "Consider alternative investments", "Active management"],
    ),
];

const MARKET_STRATEGIES: &Table<&[&str]> = &[
    (
        "Bear market",
        &["Dollar-cost averaging", "Defensive stocks", "Bond allocation", "Cash reserves"],
    ),
    (
        "Sideways/Volatile",
        &["Diversification", "Regular rebalancing", "Quality companies", "Patience"],
    ),
    ("Bull market", &["Growth stocks", "Sector rotation", "Take profits", "Monitor valuations"]),
    (
        "Uncertain",
        &[
            "Conservative approach",
            "Quality over quantity",
            "Regular monitoring",
            "Professional advice",
        ],
    ),
];

const DIVERSIFICATION: &Table<&[&str]> = &[
    (
        "Not diversified",
        &[
            "Start with index funds",
            "Add different asset classes",
            "Consider ETFs",
            "Professional guidance",
        ],
    ),
    (
        "Somewhat diversified",
        &[
            "Add international exposure",
            "Include bonds",
            "Sector diversification",
            "Regular review",
        ],
    ),
    (
        "Well diversified",
        &[
            "Maintain current strategy",
            "Rebalance regularly",
            "Monitor correlations",
            "Tax optimization",
        ],
    ),
    (
        "Highly diversified",
        &["Consider consolidation", "Focus on quality", "Reduce complexity", "Cost optimization"],
    ),
];

pub struct InvestmentRoutine;

impl AnalysisRoutine for InvestmentRoutine {
    fn name(&self) -> &'static str {
        "investment"
    }

    fn required_responses(&self) -> &'static [&'static str] {
        &[
            "investment_type",
            "risk_tolerance",
            "market_conditions",
            "diversification",
        ]
    }

    fn analyze(&self, responses: &ResponseMap, report: &mut ReportBuilder) {
        let (investment_type, characteristics) =
            lookup_choice(CHARACTERISTICS, responses, "investment_type");
        report.topic(
            "investment_type_analysis",
            json!({
                "type": investment_type,
                "characteristics": list_or_unknown(characteristics),
            }),
        );

        let (tolerance, recommendations) =
            lookup_choice(RISK_RECOMMENDATIONS, responses, "risk_tolerance");
        report.topic(
            "risk_profile",
            json!({
                "tolerance": tolerance,
                "recommendations": list_or_unknown(recommendations),
            }),
        );

        let (conditions, strategies) =
            lookup_choice(MARKET_STRATEGIES, responses, "market_conditions");
        report.topic(
            "market_analysis",
            json!({
                "conditions": conditions,
                "strategies": list_or_unknown(strategies),
            }),
        );

        let (diversification, suggestions) =
            lookup_choice(DIVERSIFICATION, responses, "diversification");
        report.topic(
            "portfolio_analysis",
            json!({
                "diversification": diversification,
                "improvement_suggestions": list_or_unknown(suggestions),
            }),
        );

        if tolerance == "Aggressive" {
            report.flag(
                "Aggressive risk tolerance",
                2,
                "Review risk tolerance against investment goals and time horizon",
            );
        }

        if matches!(conditions, "Bear market" | "Uncertain") {
            report.flag(
                format!("Unfavourable market conditions ({conditions})"),
                2,
                "Adopt defensive positioning until market conditions stabilize",
            );
        }

        if diversification == "Not diversified" {
            report.flag(
                "Undiversified portfolio",
                3,
                "Diversify the portfolio across asset classes and sectors",
            );
        }
    }

    fn guidance(&self, level: RiskLevel) -> Vec<String> {
        let items: &[&str] = match level {
            RiskLevel::High => &[
                "Review risk tolerance and portfolio allocation",
                "Consider professional financial advice",
                "Implement risk management strategies",
            ],
            RiskLevel::Medium => &[
                "Monitor portfolio performance regularly",
                "Consider rebalancing",
                "Stay informed about market conditions",
            ],
            RiskLevel::Low => &[
                "Maintain current investment strategy",
                "Continue regular monitoring",
                "Consider new opportunities within risk parameters",
            ],
        };
        owned(items)
    }
}
