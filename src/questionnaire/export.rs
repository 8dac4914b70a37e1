use super::answer::{Answer, ResponseMap};
use super::insights::InsightReport;
use super::question::{QuestionSet, SetInfo};
use super::registry::QuestionSetRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// One completed questionnaire: what was asked, what was answered, what it means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    pub question_set: String,
    pub set_info: SetInfo,
    pub responses: ResponseMap,
    pub analysis: InsightReport,
}

impl ResultRecord {
    pub fn new(
        set: &QuestionSet,
        responses: ResponseMap,
        analysis: InsightReport,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            question_set: set.id().to_string(),
            set_info: set.info().clone(),
            responses,
            analysis,
        }
    }
}

/// Wire form used when reading a record back; responses are re-typed afterwards.
#[derive(Deserialize)]
struct StoredRecord {
    timestamp: DateTime<Utc>,
    question_set: String,
    set_info: SetInfo,
    responses: Map<String, Value>,
    analysis: InsightReport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported export format '{other}'")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode result as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode result as csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write results to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("result references unknown question set '{set_id}'")]
    UnknownQuestionSet { set_id: String },
    #[error("result answers '{question_id}', which is not part of question set '{set_id}'")]
    UnknownQuestion { set_id: String, question_id: String },
    #[error("stored answer to '{question_id}' does not fit a {kind} question")]
    AnswerShape {
        question_id: String,
        kind: &'static str,
    },
}

impl ExportError {
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Serializes result records and publishes them to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultExporter {
    format: ExportFormat,
}

impl ResultExporter {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn export(&self, record: &ResultRecord) -> Result<Vec<u8>, ExportError> {
        match self.format {
            ExportFormat::Json => Ok(serde_json::to_vec_pretty(record)?),
            ExportFormat::Csv => csv_rows(record),
        }
    }

    /// `<set id without underscores>_analysis_<YYYYmmdd_HHMMSS>.<ext>`
    pub fn default_filename(&self, record: &ResultRecord) -> String {
        format!(
            "{}_analysis_{}.{}",
            record.question_set.replace('_', ""),
            record.timestamp.format("%Y%m%d_%H%M%S"),
            self.format.extension()
        )
    }

    /// Where a record should be written: an explicit file, a file inside an explicit
    /// directory, or the default name inside `output_dir`.
    pub fn destination(
        &self,
        record: &ResultRecord,
        requested: Option<&Path>,
        output_dir: &Path,
    ) -> PathBuf {
        match requested {
            Some(path) if path.is_dir() => path.join(self.default_filename(record)),
            Some(path) => path.to_path_buf(),
            None => output_dir.join(self.default_filename(record)),
        }
    }

    /// Write the record next to `destination` and rename it into place, so readers
    /// never observe a partial file.
    pub fn write_to(&self, record: &ResultRecord, destination: &Path) -> Result<(), ExportError> {
        let bytes = self.export(record)?;
        let io_error = |source: std::io::Error| ExportError::Io {
            path: destination.to_path_buf(),
            source,
        };

        let file_name = destination
            .file_name()
            .ok_or_else(|| {
                io_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "destination has no file name",
                ))
            })?
            .to_string_lossy();
        let staging = destination.with_file_name(format!(".{file_name}.tmp"));

        fs::write(&staging, &bytes).map_err(io_error)?;
        if let Err(source) = fs::rename(&staging, destination) {
            let _ = fs::remove_file(&staging);
            return Err(io_error(source));
        }

        info!(
            path = %destination.display(),
            format = %self.format,
            bytes = bytes.len(),
            "results exported"
        );
        Ok(())
    }

    /// Read a JSON record back, re-typing each response through its question set.
    pub fn parse(
        bytes: &[u8],
        registry: &QuestionSetRegistry,
    ) -> Result<ResultRecord, ExportError> {
        let stored: StoredRecord = serde_json::from_slice(bytes)?;
        let set = registry.get(&stored.question_set).ok_or_else(|| {
            ExportError::UnknownQuestionSet {
                set_id: stored.question_set.clone(),
            }
        })?;

        let mut responses = ResponseMap::new();
        for (question_id, value) in &stored.responses {
            let question = set
                .question(question_id)
                .ok_or_else(|| ExportError::UnknownQuestion {
                    set_id: set.id().to_string(),
                    question_id: question_id.clone(),
                })?;
            let answer = Answer::from_json(question.kind(), value).ok_or_else(|| {
                ExportError::AnswerShape {
                    question_id: question_id.clone(),
                    kind: question.kind().label(),
                }
            })?;
            responses.insert(question_id.as_str(), answer);
        }

        debug!(set_id = set.id(), responses = responses.len(), "parsed stored result");
        Ok(ResultRecord {
            timestamp: stored.timestamp,
            question_set: stored.question_set,
            set_info: stored.set_info,
            responses,
            analysis: stored.analysis,
        })
    }
}

fn csv_rows(record: &ResultRecord) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["section", "field", "value"])?;

    let timestamp = record.timestamp.to_rfc3339();
    writer.write_record(["metadata", "timestamp", timestamp.as_str()])?;
    writer.write_record(["metadata", "question_set", record.question_set.as_str()])?;
    writer.write_record(["metadata", "name", record.set_info.name.as_str()])?;
    writer.write_record(["metadata", "description", record.set_info.description.as_str()])?;
    writer.write_record(["metadata", "category", record.set_info.category.id()])?;

    for (question_id, answer) in record.responses.iter() {
        writer.write_record(["response", question_id, answer.display_value().as_str()])?;
    }

    let mut flattened = Vec::new();
    for (topic, payload) in &record.analysis.topics {
        flatten(topic, payload, &mut flattened);
    }
    for (field, value) in &flattened {
        writer.write_record(["analysis", field.as_str(), value.as_str()])?;
    }

    let assessment = &record.analysis.overall_assessment;
    let risk_score = assessment.risk_score.to_string();
    let rows = [
        ("risk_level", assessment.risk_level.label().to_string()),
        ("risk_score", risk_score),
        ("overall_health", assessment.overall_health.label().to_string()),
        ("flagged_conditions", assessment.flagged_conditions.join("; ")),
        ("recommendations", assessment.recommendations.join("; ")),
        ("guidance", assessment.guidance.join("; ")),
    ];
    for (field, value) in &rows {
        writer.write_record(["overall_assessment", *field, value.as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Csv(csv::Error::from(err.into_error())))
}

/// Flatten nested topic payloads into dotted field paths.
fn flatten(path: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(entries) => {
            for (key, nested) in entries {
                flatten(&format!("{path}.{key}"), nested, rows);
            }
        }
        Value::Array(items) if items.iter().all(|item| !item.is_object()) => {
            let joined: Vec<String> = items.iter().map(scalar).collect();
            rows.push((path.to_string(), joined.join("; ")));
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                flatten(&format!("{path}.{index}"), nested, rows);
            }
        }
        other => rows.push((path.to_string(), scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::catalog;
    use crate::questionnaire::insights::InsightEngine;
    use chrono::TimeZone;

    fn registry() -> QuestionSetRegistry {
        QuestionSetRegistry::standard().expect("built-in sets are valid")
    }

    fn business_record() -> ResultRecord {
        let set = catalog::business_analysis().expect("valid set");
        let responses: ResponseMap = [
            ("business_type", Answer::SingleChoice("Technology".to_string())),
            ("company_size", Answer::SingleChoice("51-200 employees".to_string())),
            ("annual_revenue", Answer::SingleChoice("$1M-$5M".to_string())),
            ("growth_rate", Answer::SingleChoice("Negative".to_string())),
            (
                "challenges",
                Answer::MultiSelect(vec![
                    "Market competition".to_string(),
                    "Talent acquisition".to_string(),
                ]),
            ),
            ("opportunities", Answer::Text("Expand into Europe".to_string())),
        ]
        .into_iter()
        .collect();
        let analysis = InsightEngine::standard()
            .analyze(&responses, set.category())
            .expect("analysis succeeds");
        let timestamp = Utc
            .with_ymd_and_hms(2026, 10, 19, 9, 30, 5)
            .single()
            .expect("valid timestamp");

        ResultRecord::new(&set, responses, analysis, timestamp)
    }

    #[test]
    fn json_document_has_expected_top_level_fields() {
        let bytes = ResultExporter::new(ExportFormat::Json)
            .export(&business_record())
            .expect("exports");
        let value: Value = serde_json::from_slice(&bytes).expect("valid json");

        let keys: Vec<_> = value.as_object().expect("object").keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["timestamp", "question_set", "set_info", "responses", "analysis"]
        );
        assert_eq!(value["question_set"], "business_analysis");
        assert_eq!(value["set_info"]["category"], "business");
        assert_eq!(value["responses"]["growth_rate"], "Negative");
        assert_eq!(
            value["responses"]["challenges"],
            serde_json::json!(["Market competition", "Talent acquisition"])
        );
        assert_eq!(value["analysis"]["overall_assessment"]["risk_level"], "Medium");
        assert_eq!(value["timestamp"], "2026-10-19T09:30:05Z");
    }

    #[test]
    fn json_export_round_trips_through_parse() {
        let record = business_record();
        let bytes = ResultExporter::new(ExportFormat::Json)
            .export(&record)
            .expect("exports");

        let parsed = ResultExporter::parse(&bytes, &registry()).expect("parses");

        assert_eq!(parsed.responses, record.responses);
        assert_eq!(parsed.analysis, record.analysis);
        assert_eq!(parsed, record);
    }

    #[test]
    fn parse_rejects_answers_that_do_not_fit_their_question() {
        let record = business_record();
        let mut value = serde_json::to_value(&record).expect("serializes");
        value["responses"]["growth_rate"] = serde_json::json!(3);
        let bytes = serde_json::to_vec(&value).expect("encodes");

        match ResultExporter::parse(&bytes, &registry()) {
            Err(ExportError::AnswerShape { question_id, kind }) => {
                assert_eq!(question_id, "growth_rate");
                assert_eq!(kind, "single_choice");
            }
            other => panic!("expected answer shape error, got {other:?}"),
        }
    }

    #[test]
    fn parse_requires_a_registered_question_set() {
        let mut value = serde_json::to_value(business_record()).expect("serializes");
        value["question_set"] = serde_json::json!("retired_set");
        let bytes = serde_json::to_vec(&value).expect("encodes");

        match ResultExporter::parse(&bytes, &registry()) {
            Err(ExportError::UnknownQuestionSet { set_id }) => assert_eq!(set_id, "retired_set"),
            other => panic!("expected unknown set error, got {other:?}"),
        }
    }

    #[test]
    fn csv_export_flattens_sections() {
        let bytes = ResultExporter::new(ExportFormat::Csv)
            .export(&business_record())
            .expect("exports");
        let text = String::from_utf8(bytes).expect("utf8");

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("section,field,value"));
        assert!(text.contains("metadata,question_set,business_analysis"));
        assert!(text.contains("response,challenges,\"Market competition, Talent acquisition\""));
        assert!(text.contains(
            "analysis,growth_analysis.stage,Decline phase - Focus on turnaround strategies"
        ));
        assert!(
            text.contains("analysis,challenges_analysis.priority_levels.Market competition,High")
        );
        assert!(text.contains("overall_assessment,risk_level,Medium"));
        assert!(text.contains("overall_assessment,risk_score,3"));
    }

    #[test]
    fn default_filename_uses_set_id_and_timestamp() {
        let record = business_record();

        assert_eq!(
            ResultExporter::new(ExportFormat::Json).default_filename(&record),
            "businessanalysis_analysis_20261019_093005.json"
        );
        assert_eq!(
            ResultExporter::new(ExportFormat::Csv).default_filename(&record),
            "businessanalysis_analysis_20261019_093005.csv"
        );
    }

    #[test]
    fn write_to_publishes_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("temp dir");
        let exporter = ResultExporter::new(ExportFormat::Json);
        let record = business_record();
        let destination = exporter.destination(&record, None, dir.path());

        exporter.write_to(&record, &destination).expect("writes");

        let written = fs::read(&destination).expect("file exists");
        assert_eq!(
            ResultExporter::parse(&written, &registry()).expect("parses"),
            record
        );
        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("lists dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn destination_inside_requested_directory_uses_default_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let exporter = ResultExporter::new(ExportFormat::Csv);
        let record = business_record();

        let destination = exporter.destination(&record, Some(dir.path()), Path::new("."));

        assert_eq!(
            destination,
            dir.path().join("businessanalysis_analysis_20261019_093005.csv")
        );
    }

    #[test]
    fn write_failure_reports_destination() {
        let dir = tempfile::tempdir().expect("temp dir");
        let destination = dir.path().join("missing").join("result.json");

        let error = ResultExporter::new(ExportFormat::Json)
            .write_to(&business_record(), &destination)
            .expect_err("parent directory does not exist");

        assert!(error.is_io());
        match error {
            ExportError::Io { path, .. } => assert_eq!(path, destination),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
