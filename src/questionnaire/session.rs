use super::collector::{CollectError, ResponseCollector};
use super::console::Console;
use super::export::{ExportError, ResultExporter, ResultRecord};
use super::insights::{AnalysisError, InsightEngine};
use super::question::QuestionSet;
use super::registry::QuestionSetRegistry;
use super::render;
use chrono::Utc;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// Whether results are written after the analysis is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    #[default]
    Ask,
    Always,
    Never,
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub set_id: Option<String>,
    pub output: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub save: SavePolicy,
}

#[derive(Debug)]
pub struct SessionOutcome {
    pub record: ResultRecord,
    pub saved_to: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown question set '{set_id}'")]
    UnknownSet { set_id: String },
    #[error("no question sets are registered")]
    EmptyRegistry,
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        Self::Collect(CollectError::Io(err))
    }
}

/// One interactive pass: choose a set, collect answers, analyze, show, save.
pub struct Session<'a> {
    registry: &'a QuestionSetRegistry,
    engine: &'a InsightEngine,
    exporter: ResultExporter,
}

impl<'a> Session<'a> {
    pub fn new(
        registry: &'a QuestionSetRegistry,
        engine: &'a InsightEngine,
        exporter: ResultExporter,
    ) -> Self {
        Self {
            registry,
            engine,
            exporter,
        }
    }

    pub fn select_set<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        requested: Option<&str>,
    ) -> Result<&'a QuestionSet, SessionError> {
        if let Some(set_id) = requested {
            return self
                .registry
                .get(set_id)
                .ok_or_else(|| SessionError::UnknownSet {
                    set_id: set_id.to_string(),
                });
        }

        let sets = self.registry.sets();
        if sets.is_empty() {
            return Err(SessionError::EmptyRegistry);
        }

        let entries: Vec<String> = sets
            .iter()
            .map(|set| format!("{} - {}", set.name(), set.description()))
            .collect();
        let index = console.choose("\nAvailable question sets:", &entries)?;
        Ok(&sets[index])
    }

    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        options: &SessionOptions,
    ) -> Result<SessionOutcome, SessionError> {
        let set = self.select_set(console, options.set_id.as_deref())?;
        console.line(format_args!("\nSelected: {}\n{}", set.name(), set.description()))?;

        let responses = ResponseCollector::new(console).collect(set)?;
        console.line("\nAnalyzing your responses...")?;
        let analysis = self.engine.analyze_set(&responses, set)?;
        render::render_report(console.writer(), set.info(), &analysis)?;

        let record = ResultRecord::new(set, responses, analysis, Utc::now());
        let saved_to = self.save(console, &record, options)?;

        console.line("\nAnalysis complete! Thank you for using the analysis questionnaire.")?;
        Ok(SessionOutcome { record, saved_to })
    }

    fn save<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        record: &ResultRecord,
        options: &SessionOptions,
    ) -> Result<Option<PathBuf>, SessionError> {
        let mut requested = options.output.clone();
        match options.save {
            SavePolicy::Never => return Ok(None),
            SavePolicy::Always => {}
            SavePolicy::Ask => {
                if !console.confirm("\nWould you like to save the results? (y/n): ")? {
                    return Ok(None);
                }
                if requested.is_none() {
                    requested = ask_path(console, "Enter filename (or press Enter for default): ")?;
                }
            }
        }

        let mut destination =
            self.exporter
                .destination(record, requested.as_deref(), &options.output_dir);
        loop {
            match self.exporter.write_to(record, &destination) {
                Ok(()) => {
                    console.line(format_args!("\nResults saved to: {}", destination.display()))?;
                    return Ok(Some(destination));
                }
                Err(err) if err.is_io() => {
                    warn!(path = %destination.display(), error = %err, "saving results failed");
                    console.line(format_args!("Error saving results: {err}"))?;
                    if !console.confirm("Try again? (y/n): ")? {
                        info!("results discarded after failed save");
                        return Ok(None);
                    }
                    if let Some(path) =
                        ask_path(console, "Enter filename (or press Enter to reuse the same): ")?
                    {
                        destination = self.exporter.destination(
                            record,
                            Some(&path),
                            &options.output_dir,
                        );
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Re-read a saved JSON result and recompute its analysis with the current routines.
    pub fn reanalyze(&self, bytes: &[u8]) -> Result<ResultRecord, SessionError> {
        let mut record = ResultExporter::parse(bytes, self.registry)?;
        let set = self
            .registry
            .get(&record.question_set)
            .ok_or_else(|| SessionError::UnknownSet {
                set_id: record.question_set.clone(),
            })?;
        record.analysis = self.engine.analyze_set(&record.responses, set)?;
        info!(
            set_id = %record.question_set,
            risk_level = %record.analysis.overall_assessment.risk_level,
            "re-analyzed stored result"
        );
        Ok(record)
    }
}

fn ask_path<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<Option<PathBuf>, SessionError> {
    let raw = console.ask(prompt)?;
    Ok((!raw.is_empty()).then(|| PathBuf::from(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::export::ExportFormat;
    use crate::questionnaire::insights::RiskLevel;
    use std::io::Cursor;

    const PROJECT_ANSWERS: &str = "1\n2\n2\n2\n3\n2\n1,2,3\n3\n\n\n";

    fn fixtures() -> (QuestionSetRegistry, InsightEngine) {
        (
            QuestionSetRegistry::standard().expect("built-in sets are valid"),
            InsightEngine::standard(),
        )
    }

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn run_collects_analyzes_and_skips_saving_when_declined() {
        let (registry, engine) = fixtures();
        let session = Session::new(&registry, &engine, ResultExporter::default());
        let mut console = console(&format!("3\n{PROJECT_ANSWERS}n\n"));

        let outcome = session
            .run(&mut console, &SessionOptions::default())
            .expect("session completes");

        assert_eq!(outcome.record.question_set, "project_management");
        assert!(outcome.saved_to.is_none());
        let assessment = &outcome.record.analysis.overall_assessment;
        assert_eq!(assessment.risk_score, 6);
        assert_eq!(assessment.risk_level, RiskLevel::High);

        let output = String::from_utf8(console.into_output()).expect("utf8");
        assert!(output.contains("PROJECT MANAGEMENT - ANALYSIS RESULTS"));
        assert!(output.contains("Risk Level: High"));
    }

    #[test]
    fn unknown_set_is_reported() {
        let (registry, engine) = fixtures();
        let session = Session::new(&registry, &engine, ResultExporter::default());
        let options = SessionOptions {
            set_id: Some("astrology".to_string()),
            ..SessionOptions::default()
        };

        match session.run(&mut console(""), &options) {
            Err(SessionError::UnknownSet { set_id }) => assert_eq!(set_id, "astrology"),
            other => panic!("expected unknown set, got {other:?}"),
        }
    }

    #[test]
    fn failed_save_can_be_retried_elsewhere() {
        let (registry, engine) = fixtures();
        let session = Session::new(&registry, &engine, ResultExporter::new(ExportFormat::Json));
        let dir = tempfile::tempdir().expect("temp dir");
        let retry_path = dir.path().join("retry.json");
        let options = SessionOptions {
            set_id: Some("project_management".to_string()),
            output: Some(dir.path().join("missing").join("first.json")),
            output_dir: dir.path().to_path_buf(),
            save: SavePolicy::Always,
        };
        let input = format!("{PROJECT_ANSWERS}y\n{}\n", retry_path.display());
        let mut console = console(&input);

        let outcome = session.run(&mut console, &options).expect("session completes");

        assert_eq!(outcome.saved_to.as_deref(), Some(retry_path.as_path()));
        let saved = std::fs::read(&retry_path).expect("retry file written");
        let reloaded = session.reanalyze(&saved).expect("reanalyzes");
        assert_eq!(reloaded.responses, outcome.record.responses);
        assert_eq!(reloaded.analysis, outcome.record.analysis);

        let output = String::from_utf8(console.into_output()).expect("utf8");
        assert!(output.contains("Error saving results"));
    }
}
