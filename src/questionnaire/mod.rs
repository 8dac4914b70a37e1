pub mod answer;
pub mod catalog;
pub mod collector;
pub mod console;
pub mod export;
pub mod insights;
pub mod question;
pub mod registry;
pub mod render;
pub mod session;

pub use answer::{Answer, ResponseMap};
pub use collector::{CollectError, ResponseCollector, ValidationError};
pub use console::Console;
pub use export::{ExportError, ExportFormat, ResultExporter, ResultRecord};
pub use insights::{AnalysisError, AnalysisRoutine, InsightEngine, InsightReport, RiskLevel};
pub use question::{Category, ConfigurationError, Question, QuestionKind, QuestionSet, SetInfo};
pub use registry::QuestionSetRegistry;
pub use session::{SavePolicy, Session, SessionError, SessionOptions, SessionOutcome};
