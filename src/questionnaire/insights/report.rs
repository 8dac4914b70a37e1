use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthRating {
    Good,
    Fair,
    Concerning,
}

impl HealthRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Concerning => "Concerning",
        }
    }
}

impl From<RiskLevel> for HealthRating {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Self::Good,
            RiskLevel::Medium => Self::Fair,
            RiskLevel::High => Self::Concerning,
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum risk scores for the Medium and High levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    pub medium: u32,
    pub high: u32,
}

impl RiskThresholds {
    pub const STANDARD: Self = Self { medium: 3, high: 5 };

    pub const fn new(medium: u32, high: u32) -> Self {
        Self { medium, high }
    }

    pub fn classify(&self, score: u32) -> RiskLevel {
        if score >= self.high {
            RiskLevel::High
        } else if score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub overall_health: HealthRating,
    pub flagged_conditions: Vec<String>,
    /// Recommendations of every flagged condition, in evaluation order.
    pub recommendations: Vec<String>,
    /// Canned advice for the category at this risk level.
    pub guidance: Vec<String>,
}

/// Topic name to payload, in evaluation order, followed by the overall assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    #[serde(flatten)]
    pub topics: Map<String, Value>,
    pub overall_assessment: OverallAssessment,
}

impl InsightReport {
    pub fn topic(&self, name: &str) -> Option<&Value> {
        self.topics.get(name)
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.overall_assessment.risk_level
    }
}

/// Accumulates topics and flagged conditions while a routine runs.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    question_count: Option<usize>,
    topics: Map<String, Value>,
    risk_score: u32,
    flagged_conditions: Vec<String>,
    recommendations: Vec<String>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for responses collected against a set of `question_count` questions.
    pub fn for_set(question_count: usize) -> Self {
        Self {
            question_count: Some(question_count),
            ..Self::default()
        }
    }

    /// Size of the answered question set, when the caller knows it.
    pub fn question_count(&self) -> Option<usize> {
        self.question_count
    }

    pub fn topic(&mut self, name: impl Into<String>, payload: Value) {
        self.topics.insert(name.into(), payload);
    }

    /// Record a risk condition worth `points` and its recommendation.
    pub fn flag(
        &mut self,
        condition: impl Into<String>,
        points: u32,
        recommendation: impl Into<String>,
    ) {
        self.risk_score += points;
        self.flagged_conditions.push(condition.into());
        self.recommendations.push(recommendation.into());
    }

    pub fn risk_score(&self) -> u32 {
        self.risk_score
    }

    pub(crate) fn finish<F>(self, thresholds: RiskThresholds, guidance: F) -> InsightReport
    where
        F: FnOnce(RiskLevel) -> Vec<String>,
    {
        let risk_level = thresholds.classify(self.risk_score);
        InsightReport {
            topics: self.topics,
            overall_assessment: OverallAssessment {
                risk_level,
                risk_score: self.risk_score,
                overall_health: HealthRating::from(risk_level),
                flagged_conditions: self.flagged_conditions,
                recommendations: self.recommendations,
                guidance: guidance(risk_level),
            },
        }
    }
}
