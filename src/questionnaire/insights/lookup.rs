//! Response readers and table lookups shared by the analysis routines.
//!
//! Readers never fail: a missing answer reads as absent and a wrong-shaped answer
//! is logged and treated the same way, so every routine can still emit its topics.

use crate::questionnaire::answer::{Answer, ResponseMap};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::warn;

/// Placeholder emitted for answers with no mapped insight.
pub const UNKNOWN: &str = "Unknown";

pub(crate) const UNKNOWN_LIST: &[&str] = &[UNKNOWN];

pub(crate) type Table<T> = [(&'static str, T)];

pub(crate) fn choice<'r>(responses: &'r ResponseMap, question_id: &str) -> Option<&'r str> {
    match responses.get(question_id)? {
        Answer::SingleChoice(value) => Some(value),
        other => {
            warn!(question_id, shape = other.shape(), "expected a single choice answer");
            None
        }
    }
}

/// Selected labels of a multi-select answer; absent reads as no selection.
pub(crate) fn selections<'r>(responses: &'r ResponseMap, question_id: &str) -> Vec<&'r str> {
    match responses.get(question_id) {
        None => Vec::new(),
        Some(Answer::MultiSelect(values)) => values.iter().map(String::as_str).collect(),
        Some(other) => {
            warn!(question_id, shape = other.shape(), "expected a multi-select answer");
            Vec::new()
        }
    }
}

pub(crate) fn number(responses: &ResponseMap, question_id: &str) -> Option<f64> {
    match responses.get(question_id)? {
        Answer::Number(value) => Some(*value),
        other => {
            warn!(question_id, shape = other.shape(), "expected a numeric answer");
            None
        }
    }
}

/// Find `value` in `table`. Misses are logged.
pub(crate) fn lookup<T: Copy>(table: &Table<T>, question_id: &str, value: &str) -> Option<T> {
    let found = table
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, entry)| *entry);
    if found.is_none() {
        warn!(question_id, value, "no insight mapped for answer");
    }
    found
}

/// Look up a single choice answer, returning the echoed value and its entry.
pub(crate) fn lookup_choice<'r, T: Copy>(
    table: &Table<T>,
    responses: &'r ResponseMap,
    question_id: &str,
) -> (&'r str, Option<T>) {
    match choice(responses, question_id) {
        Some(value) => (value, lookup(table, question_id, value)),
        None => (UNKNOWN, None),
    }
}

pub(crate) fn text_or_unknown(entry: Option<&str>) -> Value {
    json!(entry.unwrap_or(UNKNOWN))
}

pub(crate) fn list_or_unknown(entry: Option<&[&str]>) -> Value {
    json!(entry.unwrap_or(UNKNOWN_LIST))
}

/// Map every selection through `table`, falling back to `default` for unmapped labels.
pub(crate) fn per_selection<T: Copy + Serialize>(
    table: &Table<T>,
    question_id: &str,
    selected: &[&str],
    default: T,
) -> Map<String, Value> {
    selected
        .iter()
        .map(|item| {
            let entry = lookup(table, question_id, item).unwrap_or(default);
            (item.to_string(), json!(entry))
        })
        .collect()
}

/// Selections excluding the explicit "None" option.
pub(crate) fn substantive_count(selected: &[&str]) -> usize {
    selected.iter().filter(|item| **item != "None").count()
}
