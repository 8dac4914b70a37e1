use super::lookup::{number, per_selection, selections, Table, UNKNOWN, UNKNOWN_LIST};
use super::{owned, AnalysisRoutine, ReportBuilder, RiskLevel, RiskThresholds};
use crate::questionnaire::answer::{format_number, ResponseMap};
use serde_json::{json, Value};

/// Recommendation lists keyed by the minimum percentage of the scale they apply from.
type Bands = &'static [(f64, &'static [&'static str])];

struct Dimension {
    question_id: &'static str,
    topic: &'static str,
    label: &'static str,
    scale: f64,
    bands: Bands,
}

const JOB_SATISFACTION_BANDS: Bands = &[
    (80.0, &["Maintain current practices", "Recognize and reward success", "Share best practices"]),
    (
        60.0,
        &[
            "Identify improvement areas",
            "Gather specific feedback",
            "Implement targeted improvements",
        ],
    ),
    (40.0, &["Conduct detailed surveys", "Address major concerns", "Develop improvement plans"]),
    (
        0.0,
        &[
            "Immediate intervention required",
            "Conduct exit interviews",
            "Develop retention strategies",
        ],
    ),
];

const DIMENSIONS: [Dimension; 7] = [
    Dimension {
        question_id: "job_satisfaction",
        topic: "job_satisfaction_analysis",
        label: "job satisfaction",
        scale: 10.0,
        bands: JOB_SATISFACTION_BANDS,
    },
    Dimension {
        question_id: "work_life_balance",
        topic: "work_life_balance_analysis",
        label: "work-life balance",
        scale: 5.0,
        bands: &[
            (80.0, &["Maintain current policies", "Share best practices", "Monitor workload"]),
            (
                60.0,
                &[
                    "Review workload distribution",
                    "Implement flexible policies",
                    "Promote time management",
                ],
            ),
            (
                0.0,
                &[
                    "Immediate workload review",
                    "Implement flexible work arrangements",
                    "Consider additional resources",
                ],
            ),
        ],
    },
    Dimension {
        question_id: "career_growth",
        topic: "career_growth_analysis",
        label: "career growth",
        scale: 5.0,
        bands: &[
            (
                80.0,
                &["Maintain development programs", "Expand opportunities", "Succession planning"],
            ),
            (60.0, &["Enhance development programs", "Create growth paths", "Mentorship programs"]),
            (
                0.0,
                &[
                    "Develop career framework",
                    "Create growth opportunities",
                    "Regular career discussions",
                ],
            ),
        ],
    },
    Dimension {
        question_id: "compensation",
        topic: "compensation_analysis",
        label: "compensation",
        scale: 5.0,
        bands: &[
            (
                80.0,
                &[
                    "Maintain competitive compensation",
                    "Regular market reviews",
                    "Performance-based rewards",
                ],
            ),
            (
                60.0,
                &["Review compensation structure", "Market benchmarking", "Performance incentives"],
            ),
            (
                0.0,
                &["Comprehensive compensation review", "Market analysis", "Consider adjustments"],
            ),
        ],
    },
    Dimension {
        question_id: "management_support",
        topic: "management_analysis",
        label: "management support",
        scale: 5.0,
        bands: &[
            (
                80.0,
                &[
                    "Maintain management standards",
                    "Share best practices",
                    "Leadership development",
                ],
            ),
            (60.0, &["Management training", "Feedback mechanisms", "Support systems"]),
            (0.0, &["Immediate management review", "Training programs", "Support structures"]),
        ],
    },
    Dimension {
        question_id: "team_collaboration",
        topic: "team_collaboration_analysis",
        label: "team collaboration",
        scale: 5.0,
        bands: &[
            (
                80.0,
                &["Maintain team dynamics", "Cross-team collaboration", "Team building activities"],
            ),
            (60.0, &["Enhance communication", "Team building", "Collaboration tools"]),
            (0.0, &["Team dynamics review", "Communication training", "Collaboration processes"]),
        ],
    },
    Dimension {
        question_id: "company_culture",
        topic: "company_culture_analysis",
        label: "company culture",
        scale: 5.0,
        bands: &[
            (80.0, &["Maintain culture", "Reinforce values", "Culture ambassadors"]),
            (60.0, &["Culture assessment", "Values clarification", "Culture initiatives"]),
            (0.0, &["Culture transformation", "Values definition", "Cultural change management"]),
        ],
    },
];

const RECOMMENDATION_SCALE: f64 = 10.0;
const LOW_SCORE_PERCENT: f64 = 40.0;

const CONCERN_PRIORITY: &Table<&str> = &[
    ("Compensation", "High"),
    ("Career growth", "High"),
    ("Work-life balance", "High"),
    ("Management", "High"),
    ("Company direction", "Medium"),
    ("Job security", "Medium"),
    ("None", "Low"),
];

const CONCERN_ACTIONS: &Table<&[&str]> = &[
    ("Compensation", &["Market benchmarking", "Compensation review", "Performance-based rewards"]),
    ("Career growth", &["Career framework", "Development programs", "Growth opportunities"]),
    ("Work-life balance", &["Flexible policies", "Workload review", "Wellness programs"]),
    ("Management", &["Management training", "Feedback systems", "Support structures"]),
    ("Company direction", &["Communication strategy", "Vision clarity", "Employee involvement"]),
    ("Job security", &["Business transparency", "Growth plans", "Employee development"]),
    ("None", &["Continue regular engagement surveys"]),
];

fn percentage(score: f64, scale: f64) -> f64 {
    score / scale * 100.0
}

fn interpret(percent: f64) -> &'static str {
    if percent >= 80.0 {
        "Excellent - High satisfaction level"
    } else if percent >= 60.0 {
        "Good - Satisfactory level with room for improvement"
    } else if percent >= 40.0 {
        "Fair - Some concerns that need attention"
    } else if percent >= 20.0 {
        "Poor - Significant issues requiring immediate attention"
    } else {
        "Very Poor - Critical issues requiring urgent action"
    }
}

fn band(bands: Bands, percent: f64) -> &'static [&'static str] {
    bands
        .iter()
        .find(|(minimum, _)| percent >= *minimum)
        .map(|(_, recommendations)| *recommendations)
        .unwrap_or(UNKNOWN_LIST)
}

fn nps_category(score: f64) -> &'static str {
    if score >= 9.0 {
        "Promoter"
    } else if score >= 7.0 {
        "Passive"
    } else {
        "Detractor"
    }
}

/// Overall engagement from the average score on a five point scale.
fn engagement(average: f64) -> (&'static str, &'static [&'static str]) {
    if average >= 4.0 {
        (
            "Excellent",
            &[
                "Maintain current practices and policies",
                "Continue monitoring employee satisfaction",
                "Share best practices across the organization",
            ],
        )
    } else if average >= 3.0 {
        (
            "Good",
            &[
                "Address areas with lower scores",
                "Implement targeted improvements",
                "Regular feedback collection and review",
            ],
        )
    } else if average >= 2.0 {
        (
            "Fair",
            &[
                "Immediate attention to low-scoring areas",
                "Develop comprehensive improvement plans",
                "Consider external consultation",
            ],
        )
    } else {
        (
            "Poor",
            &[
                "Critical intervention required",
                "Comprehensive organizational review",
                "Immediate action on all fronts",
            ],
        )
    }
}

fn unknown_score() -> Value {
    json!({
        "score": UNKNOWN,
        "interpretation": UNKNOWN,
        "recommendations": UNKNOWN_LIST,
    })
}

/// Employee satisfaction survey analysis, registered under the `hr` category.
pub struct EmployeeRoutine;

impl AnalysisRoutine for EmployeeRoutine {
    fn name(&self) -> &'static str {
        "employee_satisfaction"
    }

    fn required_responses(&self) -> &'static [&'static str] {
        &["job_satisfaction", "recommendation_likelihood"]
    }

    fn thresholds(&self) -> RiskThresholds {
        RiskThresholds::new(2, 4)
    }

    fn analyze(&self, responses: &ResponseMap, report: &mut ReportBuilder) {
        let mut normalized = Vec::new();

        for dimension in &DIMENSIONS {
            let Some(score) = number(responses, dimension.question_id) else {
                report.topic(dimension.topic, unknown_score());
                continue;
            };

            let percent = percentage(score, dimension.scale);
            report.topic(
                dimension.topic,
                json!({
                    "score": score,
                    "interpretation": interpret(percent),
                    "recommendations": band(dimension.bands, percent),
                }),
            );
            normalized.push(score / dimension.scale * 5.0);

            if percent < LOW_SCORE_PERCENT {
                report.flag(
                    format!(
                        "Low {} score ({}/{})",
                        dimension.label,
                        format_number(score),
                        format_number(dimension.scale)
                    ),
                    1,
                    format!("Investigate the drivers behind low {} ratings", dimension.label),
                );
            }
        }

        let concerns = selections(responses, "concerns");
        report.topic(
            "concerns_analysis",
            json!({
                "concerns": concerns,
                "priority_levels": per_selection(CONCERN_PRIORITY, "concerns", &concerns, UNKNOWN),
                "action_items": per_selection(CONCERN_ACTIONS, "concerns", &concerns, UNKNOWN_LIST),
            }),
        );

        match number(responses, "recommendation_likelihood") {
            Some(score) => {
                let category = nps_category(score);
                report.topic(
                    "recommendation_analysis",
                    json!({
                        "score": score,
                        "interpretation": interpret(percentage(score, RECOMMENDATION_SCALE)),
                        "nps_category": category,
                    }),
                );

                if category == "Detractor" {
                    report.flag(
                        format!(
                            "Detractor recommendation likelihood ({}/{})",
                            format_number(score),
                            format_number(RECOMMENDATION_SCALE)
                        ),
                        2,
                        "Improve employee advocacy by acting on survey feedback",
                    );
                }
            }
            None => report.topic(
                "recommendation_analysis",
                json!({
                    "score": UNKNOWN,
                    "interpretation": UNKNOWN,
                    "nps_category": UNKNOWN,
                }),
            ),
        }

        let summary = if normalized.is_empty() {
            json!({
                "average_score": UNKNOWN,
                "overall_health": UNKNOWN,
                "key_recommendations": UNKNOWN_LIST,
                "response_count": responses.len(),
            })
        } else {
            let average = normalized.iter().sum::<f64>() / normalized.len() as f64;
            let (health, recommendations) = engagement(average);
            json!({
                "average_score": (average * 100.0).round() / 100.0,
                "overall_health": health,
                "key_recommendations": recommendations,
                "response_count": responses.len(),
            })
        };
        report.topic("engagement_summary", summary);
    }

    fn guidance(&self, level: RiskLevel) -> Vec<String> {
        let items: &[&str] = match level {
            RiskLevel::High => &[
                "Critical intervention required",
                "Comprehensive organizational review",
                "Immediate action on all fronts",
            ],
            RiskLevel::Medium => &[
                "Address areas with lower scores",
                "Implement targeted improvements",
                "Regular feedback collection and review",
            ],
            RiskLevel::Low => &[
                "Maintain current practices and policies",
                "Continue monitoring employee satisfaction",
                "Share best practices across the organization",
            ],
        };
        owned(items)
    }
}
