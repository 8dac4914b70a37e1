use super::question::{QuestionKind, QuestionSet};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Validated answer to one question. The shape follows the question kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    SingleChoice(String),
    /// Distinct option labels in the order they were entered.
    MultiSelect(Vec<String>),
    Text(String),
    Number(f64),
}

impl Answer {
    /// Rebuild an answer from its exported JSON form using the question kind.
    pub fn from_json(kind: QuestionKind, value: &Value) -> Option<Self> {
        match (kind, value) {
            (QuestionKind::SingleChoice, Value::String(choice)) => {
                Some(Self::SingleChoice(choice.clone()))
            }
            (QuestionKind::MultiSelect, Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::MultiSelect),
            (QuestionKind::FreeText, Value::String(text)) => Some(Self::Text(text.clone())),
            (QuestionKind::Numeric | QuestionKind::Rating, Value::Number(number)) => {
                number.as_f64().map(Self::Number)
            }
            _ => None,
        }
    }

    pub const fn shape(&self) -> &'static str {
        match self {
            Self::SingleChoice(_) => "single_choice",
            Self::MultiSelect(_) => "multi_select",
            Self::Text(_) => "free_text",
            Self::Number(_) => "number",
        }
    }

    /// Human readable rendering used by the console report and CSV export.
    pub fn display_value(&self) -> String {
        match self {
            Self::SingleChoice(value) | Self::Text(value) => value.clone(),
            Self::MultiSelect(values) => values.join(", "),
            Self::Number(value) => format_number(*value),
        }
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Answers keyed by question id. Skipped optional questions have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponseMap {
    answers: BTreeMap<String, Answer>,
}

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, answer: Answer) {
        self.answers.insert(question_id.into(), answer);
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.answers
            .iter()
            .map(|(question_id, answer)| (question_id.as_str(), answer))
    }

    /// Required questions of `set` that have no answer.
    pub fn missing_required<'s>(&self, set: &'s QuestionSet) -> Vec<&'s str> {
        set.questions()
            .iter()
            .filter(|question| question.is_required() && !self.contains(question.id()))
            .map(|question| question.id())
            .collect()
    }

    pub fn is_complete_for(&self, set: &QuestionSet) -> bool {
        self.missing_required(set).is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for ResponseMap {
    fn from_iter<T: IntoIterator<Item = (K, Answer)>>(iter: T) -> Self {
        let mut responses = Self::new();
        for (question_id, answer) in iter {
            responses.insert(question_id, answer);
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::question::{Category, Question};
    use serde_json::json;

    #[test]
    fn answers_serialize_without_tags() {
        let responses: ResponseMap = [
            ("growth_rate", Answer::SingleChoice("Stable".to_string())),
            (
                "challenges",
                Answer::MultiSelect(vec!["Pricing".to_string(), "Talent".to_string()]),
            ),
            ("score", Answer::Number(4.0)),
        ]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&responses).expect("serializes");
        assert_eq!(
            value,
            json!({
                "challenges": ["Pricing", "Talent"],
                "growth_rate": "Stable",
                "score": 4.0
            })
        );
    }

    #[test]
    fn from_json_rejects_mismatched_shapes() {
        assert_eq!(
            Answer::from_json(QuestionKind::Rating, &json!(7)),
            Some(Answer::Number(7.0))
        );
        assert_eq!(
            Answer::from_json(QuestionKind::FreeText, &json!("notes")),
            Some(Answer::Text("notes".to_string()))
        );
        assert!(Answer::from_json(QuestionKind::SingleChoice, &json!(3)).is_none());
        assert!(Answer::from_json(QuestionKind::MultiSelect, &json!(["a", 1])).is_none());
    }

    #[test]
    fn missing_required_ignores_optional_questions() {
        let set = QuestionSet::new(
            "sample",
            "Sample",
            "Sample set",
            Category::Customer,
            vec![
                Question::free_text("name", "Name"),
                Question::free_text("notes", "Notes").optional(),
            ],
        )
        .expect("valid set");

        let responses = ResponseMap::new();
        assert_eq!(responses.missing_required(&set), vec!["name"]);

        let responses: ResponseMap = [("name", Answer::Text("Ada".to_string()))]
            .into_iter()
            .collect();
        assert!(responses.is_complete_for(&set));
    }

    #[test]
    fn display_value_formats_whole_numbers_without_fraction() {
        assert_eq!(Answer::Number(8.0).display_value(), "8");
        assert_eq!(Answer::Number(2.5).display_value(), "2.5");
    }
}
