use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Analysis category a question set belongs to. Drives insight routine dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Business,
    Finance,
    Management,
    Customer,
    Custom(String),
}

impl Category {
    pub fn custom(id: impl Into<String>) -> Self {
        Self::from(id.into())
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Business => "business",
            Self::Finance => "finance",
            Self::Management => "management",
            Self::Customer => "customer",
            Self::Custom(id) => id,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "business" => Self::Business,
            "finance" => Self::Finance,
            "management" => Self::Management,
            "customer" => Self::Customer,
            _ => Self::Custom(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.id().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultiSelect,
    FreeText,
    Numeric,
    Rating,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultiSelect => "multi_select",
            Self::FreeText => "free_text",
            Self::Numeric => "numeric",
            Self::Rating => "rating",
        }
    }

    pub const fn has_options(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiSelect)
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric | Self::Rating)
    }
}

/// Inclusive bounds for numeric and rating answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

const DEFAULT_RATING_SCALE: NumericRange = NumericRange::new(1.0, 5.0);

/// A single prompt within a question set.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: String,
    prompt: String,
    kind: QuestionKind,
    options: Vec<String>,
    required: bool,
    range: Option<NumericRange>,
}

impl Question {
    fn new(id: impl Into<String>, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind,
            options: Vec::new(),
            required: true,
            range: None,
        }
    }

    pub fn single_choice<I, S>(id: impl Into<String>, prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut question = Self::new(id, prompt, QuestionKind::SingleChoice);
        question.options = options.into_iter().map(Into::into).collect();
        question
    }

    pub fn multi_select<I, S>(id: impl Into<String>, prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut question = Self::new(id, prompt, QuestionKind::MultiSelect);
        question.options = options.into_iter().map(Into::into).collect();
        question
    }

    pub fn free_text(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(id, prompt, QuestionKind::FreeText)
    }

    pub fn numeric(
        id: impl Into<String>,
        prompt: impl Into<String>,
        range: Option<NumericRange>,
    ) -> Self {
        let mut question = Self::new(id, prompt, QuestionKind::Numeric);
        question.range = range;
        question
    }

    /// Rating on a `1..=scale` whole-number scale.
    pub fn rating(id: impl Into<String>, prompt: impl Into<String>, scale: u8) -> Self {
        let mut question = Self::new(id, prompt, QuestionKind::Rating);
        question.range = Some(NumericRange::new(1.0, f64::from(scale)));
        question
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_range(mut self, range: NumericRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn range(&self) -> Option<NumericRange> {
        self.range
    }

    /// Range enforced during collection; ratings fall back to a 1-5 scale.
    pub fn effective_range(&self) -> Option<NumericRange> {
        match (self.kind, self.range) {
            (_, Some(range)) => Some(range),
            (QuestionKind::Rating, None) => Some(DEFAULT_RATING_SCALE),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.id.trim().is_empty() {
            return Err(ConfigurationError::BlankQuestionId);
        }

        if self.kind.has_options() {
            if self.options.is_empty() {
                return Err(ConfigurationError::MissingOptions {
                    question_id: self.id.clone(),
                });
            }

            let mut seen = HashSet::new();
            for option in &self.options {
                if !seen.insert(option.as_str()) {
                    return Err(ConfigurationError::DuplicateOption {
                        question_id: self.id.clone(),
                        option: option.clone(),
                    });
                }
            }
        } else if !self.options.is_empty() {
            return Err(ConfigurationError::UnexpectedOptions {
                question_id: self.id.clone(),
                kind: self.kind,
            });
        }

        if let Some(range) = self.range {
            if !self.kind.is_numeric() {
                return Err(ConfigurationError::UnexpectedRange {
                    question_id: self.id.clone(),
                    kind: self.kind,
                });
            }

            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(ConfigurationError::InvalidRange {
                    question_id: self.id.clone(),
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(())
    }
}

/// Metadata copied into exported results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetInfo {
    pub name: String,
    pub description: String,
    pub category: Category,
}

/// Named, categorized, ordered sequence of questions. Validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    id: String,
    info: SetInfo,
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        questions: Vec<Question>,
    ) -> Result<Self, ConfigurationError> {
        let id = id.into();
        if questions.is_empty() {
            return Err(ConfigurationError::EmptySet { set_id: id });
        }

        let mut seen = HashSet::new();
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id()) {
                return Err(ConfigurationError::DuplicateQuestionId {
                    set_id: id,
                    question_id: question.id().to_string(),
                });
            }
        }

        Ok(Self {
            id,
            info: SetInfo {
                name: name.into(),
                description: description.into(),
                category,
            },
            questions,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn description(&self) -> &str {
        &self.info.description
    }

    pub fn category(&self) -> &Category {
        &self.info.category
    }

    pub fn info(&self) -> &SetInfo {
        &self.info
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }
}

/// Malformed question set definitions. Raised before any prompting begins.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("question id must not be blank")]
    BlankQuestionId,
    #[error("question '{question_id}' needs at least one option")]
    MissingOptions { question_id: String },
    #[error("question '{question_id}' lists option '{option}' more than once")]
    DuplicateOption { question_id: String, option: String },
    #[error("question '{question_id}' is {} and cannot declare options", .kind.label())]
    UnexpectedOptions {
        question_id: String,
        kind: QuestionKind,
    },
    #[error("question '{question_id}' is {} and cannot declare a numeric range", .kind.label())]
    UnexpectedRange {
        question_id: String,
        kind: QuestionKind,
    },
    #[error("question '{question_id}' has an invalid range [{min}, {max}]")]
    InvalidRange {
        question_id: String,
        min: f64,
        max: f64,
    },
    #[error("question set '{set_id}' repeats question id '{question_id}'")]
    DuplicateQuestionId { set_id: String, question_id: String },
    #[error("question set '{set_id}' has no questions")]
    EmptySet { set_id: String },
    #[error("question set '{set_id}' is already registered")]
    DuplicateSet { set_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(questions: Vec<Question>) -> Result<QuestionSet, ConfigurationError> {
        QuestionSet::new("sample", "Sample", "Sample set", Category::Business, questions)
    }

    #[test]
    fn choice_questions_require_options() {
        let empty: Vec<String> = Vec::new();
        let error = build(vec![Question::single_choice("pick", "Pick one", empty)])
            .expect_err("choice without options is rejected");

        assert_eq!(
            error,
            ConfigurationError::MissingOptions {
                question_id: "pick".to_string()
            }
        );
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let error = build(vec![
            Question::free_text("notes", "Notes"),
            Question::free_text("notes", "More notes"),
        ])
        .expect_err("duplicate ids rejected");

        match error {
            ConfigurationError::DuplicateQuestionId { question_id, .. } => {
                assert_eq!(question_id, "notes")
            }
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let error = build(vec![Question::numeric(
            "headcount",
            "Headcount",
            Some(NumericRange::new(10.0, 1.0)),
        )])
        .expect_err("inverted range rejected");

        assert!(matches!(error, ConfigurationError::InvalidRange { .. }));
    }

    #[test]
    fn range_on_text_question_is_rejected() {
        let error = build(vec![
            Question::free_text("notes", "Notes").with_range(NumericRange::new(0.0, 1.0))
        ])
        .expect_err("range on text rejected");

        assert!(matches!(error, ConfigurationError::UnexpectedRange { .. }));
    }

    #[test]
    fn rating_defaults_to_five_point_scale() {
        let mut question = Question::rating("score", "Score", 10);
        assert_eq!(question.effective_range(), Some(NumericRange::new(1.0, 10.0)));

        question.range = None;
        assert_eq!(question.effective_range(), Some(NumericRange::new(1.0, 5.0)));
    }

    #[test]
    fn category_round_trips_through_strings() {
        assert_eq!(Category::from("finance".to_string()), Category::Finance);
        assert_eq!(Category::custom("hr"), Category::Custom("hr".to_string()));
        assert_eq!(String::from(Category::Management), "management");
        assert_eq!(Category::custom("hr").to_string(), "hr");
    }
}
