use crate::config::AppConfig;
use crate::error::AppError;
use crate::questionnaire::collector::CollectError;
use crate::questionnaire::console::Console;
use crate::questionnaire::export::{ExportFormat, ResultExporter};
use crate::questionnaire::insights::InsightEngine;
use crate::questionnaire::registry::QuestionSetRegistry;
use crate::questionnaire::render;
use crate::questionnaire::session::{SavePolicy, Session, SessionError, SessionOptions};
use crate::telemetry;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Analysis Questionnaire",
    about = "Answer a guided questionnaire and receive a rule-based analysis",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List analysis categories and question sets
    List,
    /// Answer a question set interactively (default command)
    Run(RunArgs),
    /// Re-load a saved JSON result and recompute its analysis
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Question set id; prompts with a menu when omitted
    #[arg(long = "set")]
    set_id: Option<String>,
    /// File or directory for saved results
    #[arg(long)]
    output: Option<PathBuf>,
    /// Export format (defaults to APP_EXPORT_FORMAT)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Save results without asking
    #[arg(long, conflicts_with = "no_save")]
    save: bool,
    /// Never save results
    #[arg(long)]
    no_save: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Saved JSON result to re-analyze
    #[arg(long)]
    input: PathBuf,
    /// Write the recomputed result to this file or directory
    #[arg(long)]
    output: Option<PathBuf>,
    /// Export format for --output
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

impl RunArgs {
    fn save_policy(&self) -> SavePolicy {
        if self.save {
            SavePolicy::Always
        } else if self.no_save {
            SavePolicy::Never
        } else {
            SavePolicy::Ask
        }
    }
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "configuration loaded");

    let registry = QuestionSetRegistry::standard()?;
    let engine = InsightEngine::standard();

    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::List => {
            let stdout = std::io::stdout();
            render::render_catalog(&mut stdout.lock(), &registry)?;
            Ok(())
        }
        Command::Run(args) => run_session(&config, &registry, &engine, args),
        Command::Analyze(args) => run_analyze(&config, &registry, &engine, args),
    }
}

fn run_session(
    config: &AppConfig,
    registry: &QuestionSetRegistry,
    engine: &InsightEngine,
    args: RunArgs,
) -> Result<(), AppError> {
    let format = args.format.map(ExportFormat::from).unwrap_or(config.export.format);
    let options = SessionOptions {
        save: args.save_policy(),
        set_id: args.set_id,
        output: args.output,
        output_dir: config.export.output_dir.clone(),
    };

    let mut console = Console::stdio();
    writeln!(console.writer(), "Analysis Questionnaire\n{}", "=".repeat(50))?;

    let session = Session::new(registry, engine, ResultExporter::new(format));
    match session.run(&mut console, &options) {
        Ok(_) => Ok(()),
        Err(SessionError::Collect(CollectError::InputClosed)) => {
            info!("input closed before the questionnaire finished");
            writeln!(console.writer(), "\nQuestionnaire cancelled.")?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn run_analyze(
    config: &AppConfig,
    registry: &QuestionSetRegistry,
    engine: &InsightEngine,
    args: AnalyzeArgs,
) -> Result<(), AppError> {
    let bytes = std::fs::read(&args.input)?;
    let format = args.format.map(ExportFormat::from).unwrap_or(config.export.format);
    let exporter = ResultExporter::new(format);
    let record = Session::new(registry, engine, exporter).reanalyze(&bytes)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render::render_report(&mut out, &record.set_info, &record.analysis)?;

    if let Some(output) = args.output.as_deref() {
        let destination = exporter.destination(&record, Some(output), &config.export.output_dir);
        exporter.write_to(&record, &destination)?;
        writeln!(out, "\nResults saved to: {}", destination.display())?;
    }
    Ok(())
}
