use super::question::{Category, ConfigurationError, Question, QuestionSet};

pub const BUSINESS_ANALYSIS: &str = "business_analysis";
pub const INVESTMENT_ANALYSIS: &str = "investment_analysis";
pub const PROJECT_MANAGEMENT: &str = "project_management";
pub const CUSTOMER_SATISFACTION: &str = "customer_satisfaction";
pub const EMPLOYEE_SATISFACTION: &str = "employee_satisfaction";

/// Category id used by the employee satisfaction survey.
pub const HR_CATEGORY: &str = "hr";

/// Grouping of question sets shown when choosing what to analyze.
#[derive(Debug, Clone)]
pub struct AnalysisCategoryInfo {
    pub category: Category,
    pub name: &'static str,
    pub description: &'static str,
    pub question_sets: Vec<&'static str>,
}

pub fn analysis_categories() -> Vec<AnalysisCategoryInfo> {
    vec![
        AnalysisCategoryInfo {
            category: Category::Business,
            name: "Business Analysis",
            description: "General business and organizational analysis",
            question_sets: vec![BUSINESS_ANALYSIS, PROJECT_MANAGEMENT],
        },
        AnalysisCategoryInfo {
            category: Category::Finance,
            name: "Financial Analysis",
            description: "Investment and financial decision analysis",
            question_sets: vec![INVESTMENT_ANALYSIS],
        },
        AnalysisCategoryInfo {
            category: Category::Management,
            name: "Management Analysis",
            description: "Project and operational management analysis",
            question_sets: vec![PROJECT_MANAGEMENT],
        },
        AnalysisCategoryInfo {
            category: Category::Customer,
            name: "Customer Analysis",
            description: "Customer experience and satisfaction analysis",
            question_sets: vec![CUSTOMER_SATISFACTION],
        },
        AnalysisCategoryInfo {
            category: Category::custom(HR_CATEGORY),
            name: "People Analysis",
            description: "Employee satisfaction and engagement analysis",
            question_sets: vec![EMPLOYEE_SATISFACTION],
        },
    ]
}

pub fn standard_question_sets() -> Result<Vec<QuestionSet>, ConfigurationError> {
    Ok(vec![
        business_analysis()?,
        investment_analysis()?,
        project_management()?,
        customer_satisfaction()?,
        employee_satisfaction()?,
    ])
}

pub fn business_analysis() -> Result<QuestionSet, ConfigurationError> {
    QuestionSet::new(
        BUSINESS_ANALYSIS,
        "Business Analysis",
        "Comprehensive business analysis covering type, size, revenue, growth, and challenges",
        Category::Business,
        vec![
            Question::single_choice(
                "business_type",
                "What type of business are you analyzing?",
                [
                    "Technology",
                    "Finance",
                    "Healthcare",
                    "Retail",
                    "Manufacturing",
                    "Other",
                ],
            ),
            Question::single_choice(
                "company_size",
                "What is the approximate size of the company?",
                [
                    "1-10 employees",
                    "11-50 employees",
                    "51-200 employees",
                    "201-1000 employees",
                    "1000+ employees",
                ],
            ),
            Question::single_choice(
                "annual_revenue",
                "What is the annual revenue range?",
                ["Under $100K", "$100K-$1M", "$1M-$5M", "$5M-$50M", "$50M+"],
            ),
            Question::single_choice(
                "growth_rate",
                "What is the current growth rate?",
                [
                    "Negative",
                    "Stable",
                    "Growing slowly (1-10%)",
                    "Growing moderately (10-25%)",
                    "Growing rapidly (25%+)",
                ],
            ),
            Question::single_choice(
                "market_position",
                "How would you describe the company's market position?",
                [
                    "Market leader",
                    "Strong competitor",
                    "Established player",
                    "Emerging player",
                    "Niche player",
                ],
            ),
            Question::multi_select(
                "challenges",
                "What are the main challenges the company faces? (Select all that apply)",
                [
                    "Market competition",
                    "Regulatory compliance",
                    "Technology disruption",
                    "Talent acquisition",
                    "Financial constraints",
                    "Supply chain issues",
                    "Customer retention",
                ],
            ),
            Question::free_text("opportunities", "What opportunities do you see for the company?")
                .optional(),
            Question::free_text("risk_factors", "What are the main risk factors?").optional(),
            Question::free_text("recommendations", "What recommendations would you make?")
                .optional(),
        ],
    )
}

pub fn investment_analysis() -> Result<QuestionSet, ConfigurationError> {
    QuestionSet::new(
        INVESTMENT_ANALYSIS,
        "Investment Analysis",
        "Investment evaluation covering type, risk tolerance, market conditions, and goals",
        Category::Finance,
        vec![
            Question::single_choice(
                "investment_type",
                "What type of investment are you analyzing?",
                [
                    "Stocks",
                    "Bonds",
                    "Real Estate",
                    "Startup/Private Equity",
                    "Commodities",
                    "Cryptocurrency",
                    "Other",
                ],
            ),
            Question::single_choice(
                "investment_horizon",
                "What is your investment time horizon?",
                [
                    "Short-term (1-3 years)",
                    "Medium-term (3-10 years)",
                    "Long-term (10+ years)",
                ],
            ),
            Question::single_choice(
                "risk_tolerance",
                "What is your risk tolerance level?",
                ["Conservative", "Moderate", "Aggressive"],
            ),
            Question::single_choice(
                "expected_return",
                "What is your expected annual return?",
                ["2-5%", "5-10%", "10-15%", "15-25%", "25%+"],
            ),
            Question::single_choice(
                "market_conditions",
                "How would you describe current market conditions?",
                ["Bear market", "Sideways/Volatile", "Bull market", "Uncertain"],
            ),
            Question::single_choice(
                "diversification",
                "How diversified is your current portfolio?",
                [
                    "Not diversified",
                    "Somewhat diversified",
                    "Well diversified",
                    "Highly diversified",
                ],
            ),
            Question::single_choice(
                "liquidity_needs",
                "What are your liquidity needs?",
                [
                    "High (need cash within 1 year)",
                    "Medium (1-3 years)",
                    "Low (3+ years)",
                ],
            ),
            Question::multi_select(
                "investment_goals",
                "What are your primary investment goals?",
                [
                    "Capital preservation",
                    "Income generation",
                    "Capital appreciation",
                    "Tax efficiency",
                    "Inflation protection",
                ],
            ),
            Question::free_text("concerns", "What are your main investment concerns?").optional(),
        ],
    )
}

pub fn project_management() -> Result<QuestionSet, ConfigurationError> {
    QuestionSet::new(
        PROJECT_MANAGEMENT,
        "Project Management",
        "Project assessment covering scope, resources, risks, and success criteria",
        Category::Management,
        vec![
            Question::single_choice(
                "project_type",
                "What type of project is this?",
                [
                    "Software Development",
                    "Construction",
                    "Marketing Campaign",
                    "Research",
                    "Process Improvement",
                    "Other",
                ],
            ),
            Question::single_choice(
                "project_size",
                "What is the project size/complexity?",
                [
                    "Small (1-3 months)",
                    "Medium (3-12 months)",
                    "Large (1-3 years)",
                    "Enterprise (3+ years)",
                ],
            ),
            Question::single_choice(
                "team_size",
                "What is the team size?",
                ["1-3 people", "4-8 people", "9-20 people", "20+ people"],
            ),
            Question::single_choice(
                "budget_range",
                "What is the budget range?",
                ["Under $10K", "$10K - $100K", "$100K - $1M", "$1M+"],
            ),
            Question::single_choice(
                "timeline_pressure",
                "How much timeline pressure is there?",
                [
                    "No pressure",
                    "Some pressure",
                    "High pressure",
                    "Critical deadline",
                ],
            ),
            Question::single_choice(
                "stakeholder_complexity",
                "How complex are the stakeholder relationships?",
                ["Simple", "Moderate", "Complex", "Very complex"],
            ),
            Question::multi_select(
                "technical_risks",
                "What technical risks exist?",
                [
                    "New technology",
                    "Integration challenges",
                    "Performance requirements",
                    "Security concerns",
                    "Scalability issues",
                    "None",
                ],
            ),
            Question::single_choice(
                "resource_availability",
                "How would you rate resource availability?",
                ["Excellent", "Good", "Fair", "Poor"],
            ),
            Question::free_text("success_criteria", "What are the key success criteria?")
                .optional(),
            Question::free_text("potential_issues", "What potential issues do you foresee?")
                .optional(),
        ],
    )
}

pub fn customer_satisfaction() -> Result<QuestionSet, ConfigurationError> {
    QuestionSet::new(
        CUSTOMER_SATISFACTION,
        "Customer Satisfaction",
        "Customer experience analysis covering satisfaction, loyalty, and pain points",
        Category::Customer,
        vec![
            Question::single_choice(
                "customer_segment",
                "What customer segment are you analyzing?",
                [
                    "B2B Enterprise",
                    "B2B SMB",
                    "B2C Premium",
                    "B2C Mass Market",
                    "Government",
                    "Non-profit",
                ],
            ),
            Question::single_choice(
                "interaction_channel",
                "What is the primary interaction channel?",
                [
                    "In-person",
                    "Phone",
                    "Email",
                    "Website",
                    "Mobile App",
                    "Social Media",
                    "Multiple channels",
                ],
            ),
            Question::single_choice(
                "satisfaction_level",
                "What is the current satisfaction level?",
                [
                    "Very dissatisfied",
                    "Dissatisfied",
                    "Neutral",
                    "Satisfied",
                    "Very satisfied",
                ],
            ),
            Question::single_choice(
                "loyalty_level",
                "How loyal are customers?",
                [
                    "Not loyal",
                    "Somewhat loyal",
                    "Loyal",
                    "Very loyal",
                    "Extremely loyal",
                ],
            ),
            Question::multi_select(
                "pain_points",
                "What are the main customer pain points?",
                [
                    "Product quality",
                    "Customer service",
                    "Pricing",
                    "Ease of use",
                    "Support response time",
                    "Documentation",
                    "None",
                ],
            ),
            Question::free_text("improvement_areas", "What areas need improvement?").optional(),
            Question::free_text("positive_feedback", "What positive feedback do you receive?")
                .optional(),
            Question::single_choice(
                "recommendation_likelihood",
                "How likely are customers to recommend you?",
                [
                    "Very unlikely",
                    "Unlikely",
                    "Neutral",
                    "Likely",
                    "Very likely",
                ],
            ),
        ],
    )
}

/// Employee engagement survey analyzed by the `hr` routine registered on top of
/// the built-in categories.
pub fn employee_satisfaction() -> Result<QuestionSet, ConfigurationError> {
    QuestionSet::new(
        EMPLOYEE_SATISFACTION,
        "Employee Satisfaction Survey",
        "Comprehensive employee satisfaction and engagement analysis",
        Category::custom(HR_CATEGORY),
        vec![
            Question::single_choice(
                "department",
                "What department do you work in?",
                [
                    "Engineering",
                    "Sales",
                    "Marketing",
                    "HR",
                    "Finance",
                    "Operations",
                    "Other",
                ],
            ),
            Question::single_choice(
                "tenure",
                "How long have you been with the company?",
                [
                    "Less than 1 year",
                    "1-3 years",
                    "3-5 years",
                    "5-10 years",
                    "10+ years",
                ],
            ),
            Question::rating(
                "job_satisfaction",
                "How satisfied are you with your current job?",
                10,
            ),
            Question::rating(
                "work_life_balance",
                "How would you rate your work-life balance?",
                5,
            ),
            Question::rating(
                "career_growth",
                "How satisfied are you with career growth opportunities?",
                5,
            ),
            Question::rating(
                "compensation",
                "How satisfied are you with your compensation?",
                5,
            ),
            Question::rating(
                "management_support",
                "How would you rate the support from your manager?",
                5,
            ),
            Question::rating(
                "team_collaboration",
                "How would you rate team collaboration?",
                5,
            ),
            Question::rating(
                "company_culture",
                "How would you rate the company culture?",
                5,
            ),
            Question::multi_select(
                "concerns",
                "What are your main concerns about working here?",
                [
                    "Compensation",
                    "Career growth",
                    "Work-life balance",
                    "Management",
                    "Company direction",
                    "Job security",
                    "None",
                ],
            )
            .optional(),
            Question::free_text(
                "suggestions",
                "What suggestions do you have for improving the workplace?",
            )
            .optional(),
            Question::rating(
                "recommendation_likelihood",
                "How likely are you to recommend this company as a place to work?",
                10,
            ),
        ],
    )
}
