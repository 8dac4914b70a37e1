use super::answer::{format_number, Answer, ResponseMap};
use super::console::Console;
use super::question::{Question, QuestionKind, QuestionSet};
use std::collections::HashSet;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Failures that end a collection session. Invalid answers never surface here.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input closed before the questionnaire was completed")]
    InputClosed,
}

/// Reasons a raw answer is rejected. Shown to the user before re-prompting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("this question is required, please provide an answer")]
    Required,
    #[error("input is not valid UTF-8 text")]
    InvalidEncoding,
    #[error("'{input}' is not an option number")]
    NotAnIndex { input: String },
    #[error("option {index} does not exist, choose between 1 and {max}")]
    OptionOutOfRange { index: usize, max: usize },
    #[error("option {index} was selected more than once")]
    DuplicateOption { index: usize },
    #[error("'{input}' is not a valid number")]
    NotANumber { input: String },
    #[error("ratings must be whole numbers, got {value}")]
    NotWholeNumber { value: f64 },
    #[error("{value} is outside the allowed range {min} to {max}")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// Walks a question set and gathers one validated answer per question.
pub struct ResponseCollector<'c, R, W> {
    console: &'c mut Console<R, W>,
}

impl<'c, R: BufRead, W: Write> ResponseCollector<'c, R, W> {
    pub fn new(console: &'c mut Console<R, W>) -> Self {
        Self { console }
    }

    pub fn collect(&mut self, set: &QuestionSet) -> Result<ResponseMap, CollectError> {
        info!(set_id = set.id(), "starting questionnaire");
        self.console.line(format_args!(
            "\nStarting {} questionnaire...\n{}",
            set.name(),
            "=".repeat(60)
        ))?;

        let total = set.questions().len();
        let mut responses = ResponseMap::new();
        for (index, question) in set.questions().iter().enumerate() {
            match self.ask(index + 1, total, question)? {
                Some(answer) => responses.insert(question.id(), answer),
                None => debug!(question_id = question.id(), "optional question skipped"),
            }
        }

        debug_assert!(responses.is_complete_for(set));
        info!(set_id = set.id(), answered = responses.len(), "questionnaire completed");
        Ok(responses)
    }

    fn ask(
        &mut self,
        position: usize,
        total: usize,
        question: &Question,
    ) -> Result<Option<Answer>, CollectError> {
        loop {
            self.present(position, total, question)?;
            let raw = self.console.ask_bytes(&input_prompt(question))?;
            let parsed = match String::from_utf8(raw) {
                Ok(text) => parse_answer(question, &text),
                Err(_) => Err(ValidationError::InvalidEncoding),
            };
            match parsed {
                Ok(answer) => return Ok(answer),
                Err(err) => {
                    debug!(question_id = question.id(), %err, "answer rejected");
                    self.console.line(format_args!("Invalid answer: {err}"))?;
                }
            }
        }
    }

    fn present(
        &mut self,
        position: usize,
        total: usize,
        question: &Question,
    ) -> Result<(), CollectError> {
        self.console
            .line(format_args!("\nQuestion {position} of {total}"))?;
        self.console.line(question.prompt())?;
        if question.is_required() {
            self.console.line("(Required)")?;
        } else {
            self.console.line("(Optional - press Enter to skip)")?;
        }

        for (index, option) in question.options().iter().enumerate() {
            self.console.line(format_args!("  {}. {}", index + 1, option))?;
        }

        Ok(())
    }
}

fn input_prompt(question: &Question) -> String {
    let count = question.options().len();
    match question.kind() {
        QuestionKind::SingleChoice => format!("Enter your choice (1-{count}): "),
        QuestionKind::MultiSelect => {
            "Enter the numbers of your choices separated by commas (e.g., 1,3,5): ".to_string()
        }
        QuestionKind::FreeText => "Your response: ".to_string(),
        QuestionKind::Numeric => match question.effective_range() {
            Some(range) => format!(
                "Enter a number between {} and {}: ",
                format_number(range.min),
                format_number(range.max)
            ),
            None => "Enter numeric value: ".to_string(),
        },
        QuestionKind::Rating => match question.effective_range() {
            Some(range) => format!(
                "Your rating ({}-{}): ",
                format_number(range.min),
                format_number(range.max)
            ),
            None => "Your rating: ".to_string(),
        },
    }
}

/// Validate one raw line for `question`. `Ok(None)` means an optional question was skipped.
pub fn parse_answer(question: &Question, raw: &str) -> Result<Option<Answer>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return if question.is_required() {
            Err(ValidationError::Required)
        } else {
            Ok(None)
        };
    }

    let answer = match question.kind() {
        QuestionKind::SingleChoice => {
            let index = parse_index(raw, question.options().len())?;
            Answer::SingleChoice(question.options()[index].clone())
        }
        QuestionKind::MultiSelect => {
            let count = question.options().len();
            let mut seen = HashSet::new();
            let mut selected = Vec::new();
            for token in raw.split(',') {
                let index = parse_index(token, count)?;
                if !seen.insert(index) {
                    return Err(ValidationError::DuplicateOption { index: index + 1 });
                }
                selected.push(question.options()[index].clone());
            }
            Answer::MultiSelect(selected)
        }
        QuestionKind::FreeText => Answer::Text(raw.to_string()),
        QuestionKind::Numeric | QuestionKind::Rating => {
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ValidationError::NotANumber {
                    input: raw.to_string(),
                })?;

            if question.kind() == QuestionKind::Rating && value.fract() != 0.0 {
                return Err(ValidationError::NotWholeNumber { value });
            }

            if let Some(range) = question.effective_range() {
                if !range.contains(value) {
                    return Err(ValidationError::OutOfRange {
                        value,
                        min: range.min,
                        max: range.max,
                    });
                }
            }

            Answer::Number(value)
        }
    };

    Ok(Some(answer))
}

/// Resolve a 1-based option number to a zero-based index.
fn parse_index(token: &str, count: usize) -> Result<usize, ValidationError> {
    let token = token.trim();
    let index = token
        .parse::<usize>()
        .map_err(|_| ValidationError::NotAnIndex {
            input: token.to_string(),
        })?;

    if index == 0 || index > count {
        return Err(ValidationError::OptionOutOfRange { index, max: count });
    }

    Ok(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::question::{Category, NumericRange};
    use std::io::Cursor;

    fn colors() -> Question {
        Question::multi_select("colors", "Favourite colors?", ["Red", "Green", "Blue"])
    }

    fn sample_set() -> QuestionSet {
        QuestionSet::new(
            "sample",
            "Sample",
            "Sample set",
            Category::Business,
            vec![
                Question::single_choice("size", "Size?", ["Small", "Large"]),
                colors(),
                Question::free_text("notes", "Notes?").optional(),
                Question::numeric("budget", "Budget?", Some(NumericRange::new(0.0, 100.0))),
                Question::rating("score", "Score?", 5),
            ],
        )
        .expect("valid set")
    }

    fn collect(input: &str) -> (Result<ResponseMap, CollectError>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = ResponseCollector::new(&mut console).collect(&sample_set());
        let output = String::from_utf8(console.into_output()).expect("utf8 output");
        (result, output)
    }

    #[test]
    fn single_choice_resolves_to_declared_option() {
        let question = Question::single_choice("size", "Size?", ["Small", "Large"]);

        assert_eq!(
            parse_answer(&question, " 2 "),
            Ok(Some(Answer::SingleChoice("Large".to_string())))
        );
        assert_eq!(
            parse_answer(&question, "3"),
            Err(ValidationError::OptionOutOfRange { index: 3, max: 2 })
        );
        assert_eq!(
            parse_answer(&question, "Large"),
            Err(ValidationError::NotAnIndex {
                input: "Large".to_string()
            })
        );
        assert_eq!(
            parse_answer(&question, "0"),
            Err(ValidationError::OptionOutOfRange { index: 0, max: 2 })
        );
    }

    #[test]
    fn multi_select_rejects_duplicate_indices() {
        assert_eq!(
            parse_answer(&colors(), "1,1,2"),
            Err(ValidationError::DuplicateOption { index: 1 })
        );
        assert_eq!(
            parse_answer(&colors(), "3, 1"),
            Ok(Some(Answer::MultiSelect(vec![
                "Blue".to_string(),
                "Red".to_string()
            ])))
        );
        assert_eq!(
            parse_answer(&colors(), "1,,2"),
            Err(ValidationError::NotAnIndex {
                input: String::new()
            })
        );
    }

    #[test]
    fn empty_input_skips_only_optional_questions() {
        assert_eq!(parse_answer(&colors(), ""), Err(ValidationError::Required));
        assert_eq!(parse_answer(&colors().optional(), "   "), Ok(None));
        assert_eq!(
            parse_answer(&Question::free_text("notes", "Notes?").optional(), ""),
            Ok(None)
        );
    }

    #[test]
    fn numeric_answers_respect_range_and_finiteness() {
        let question = Question::numeric("budget", "Budget?", Some(NumericRange::new(0.0, 100.0)));

        assert_eq!(
            parse_answer(&question, "42.5"),
            Ok(Some(Answer::Number(42.5)))
        );
        assert_eq!(
            parse_answer(&question, "100.5"),
            Err(ValidationError::OutOfRange {
                value: 100.5,
                min: 0.0,
                max: 100.0
            })
        );
        assert_eq!(
            parse_answer(&question, "NaN"),
            Err(ValidationError::NotANumber {
                input: "NaN".to_string()
            })
        );
        assert_eq!(
            parse_answer(&Question::numeric("any", "Any?", None), "-1e3"),
            Ok(Some(Answer::Number(-1000.0)))
        );
    }

    #[test]
    fn ratings_must_be_whole_numbers_within_scale() {
        let question = Question::rating("score", "Score?", 10);

        assert_eq!(parse_answer(&question, "10"), Ok(Some(Answer::Number(10.0))));
        assert_eq!(
            parse_answer(&question, "7.5"),
            Err(ValidationError::NotWholeNumber { value: 7.5 })
        );
        assert_eq!(
            parse_answer(&question, "0"),
            Err(ValidationError::OutOfRange {
                value: 0.0,
                min: 1.0,
                max: 10.0
            })
        );
    }

    #[test]
    fn collect_reprompts_until_each_answer_validates() {
        let input = "5\n1\n1,1,2\n2,3\n\n150\n75\n9\n4\n";
        let (result, output) = collect(input);
        let responses = result.expect("collection completes");

        assert_eq!(
            responses.get("size"),
            Some(&Answer::SingleChoice("Small".to_string()))
        );
        assert_eq!(
            responses.get("colors"),
            Some(&Answer::MultiSelect(vec![
                "Green".to_string(),
                "Blue".to_string()
            ]))
        );
        assert!(!responses.contains("notes"));
        assert_eq!(responses.get("budget"), Some(&Answer::Number(75.0)));
        assert_eq!(responses.get("score"), Some(&Answer::Number(4.0)));

        assert!(output.contains("option 5 does not exist"));
        assert!(output.contains("option 1 was selected more than once"));
        assert!(output.contains("150 is outside the allowed range 0 to 100"));
        assert_eq!(output.matches("Question 2 of 5").count(), 2);
    }

    #[test]
    fn undecodable_line_is_rejected_and_reprompted() {
        let set = QuestionSet::new(
            "sizing",
            "Sizing",
            "Sizing set",
            Category::Business,
            vec![
                Question::single_choice("size", "Size?", ["Small", "Large"]),
                Question::free_text("notes", "Notes?"),
            ],
        )
        .expect("valid set");
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"1\n");
        input.extend_from_slice(&[b'o', b'k', 0xc3, b'\n']);
        input.extend_from_slice("café\n".as_bytes());
        let mut console = Console::new(Cursor::new(input), Vec::new());

        let responses = ResponseCollector::new(&mut console)
            .collect(&set)
            .expect("collection completes");

        assert_eq!(
            responses.get("size"),
            Some(&Answer::SingleChoice("Small".to_string()))
        );
        assert_eq!(responses.get("notes"), Some(&Answer::Text("café".to_string())));
        let output = String::from_utf8(console.into_output()).expect("utf8 output");
        assert_eq!(output.matches("input is not valid UTF-8 text").count(), 2);
    }

    #[test]
    fn collect_fails_when_input_ends_early() {
        let (result, _) = collect("1\n");

        match result {
            Err(CollectError::InputClosed) => {}
            other => panic!("expected closed input, got {other:?}"),
        }
    }
}
