use crate::questionnaire::answer::{Answer, ResponseMap};
use crate::questionnaire::insights::{InsightEngine, InsightReport};
use crate::questionnaire::question::{Question, QuestionKind, QuestionSet};
use crate::questionnaire::registry::QuestionSetRegistry;

pub(super) fn engine() -> InsightEngine {
    InsightEngine::standard()
}

pub(super) fn registry() -> QuestionSetRegistry {
    QuestionSetRegistry::standard().expect("built-in sets are valid")
}

pub(super) fn choice(value: &str) -> Answer {
    Answer::SingleChoice(value.to_string())
}

pub(super) fn multi(values: &[&str]) -> Answer {
    Answer::MultiSelect(values.iter().map(|value| value.to_string()).collect())
}

pub(super) fn responses<const N: usize>(entries: [(&str, Answer); N]) -> ResponseMap {
    entries.into_iter().collect()
}

/// A plausible answer for `question`: first option, top of the range, or filler text.
pub(super) fn default_answer(question: &Question) -> Answer {
    match question.kind() {
        QuestionKind::SingleChoice => choice(&question.options()[0]),
        QuestionKind::MultiSelect => multi(&[question.options()[0].as_str()]),
        QuestionKind::FreeText => Answer::Text("n/a".to_string()),
        QuestionKind::Numeric | QuestionKind::Rating => Answer::Number(
            question
                .effective_range()
                .map(|range| range.max)
                .unwrap_or(1.0),
        ),
    }
}

pub(super) fn complete_responses(set: &QuestionSet) -> ResponseMap {
    set.questions()
        .iter()
        .map(|question| (question.id(), default_answer(question)))
        .collect()
}

pub(super) fn serialized(report: &InsightReport) -> String {
    serde_json::to_string(report).expect("report serializes")
}
