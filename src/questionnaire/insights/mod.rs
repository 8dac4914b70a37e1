//! Rule-based insight generation.
//!
//! Each category is served by an [`AnalysisRoutine`] registered with the
//! [`InsightEngine`]. A routine reads answers by question id, maps them through
//! static lookup tables into topics, and flags risk conditions that the engine
//! folds into the overall assessment.

mod business;
mod customer;
mod employee;
mod generic;
mod investment;
mod lookup;
mod project;
mod report;

#[cfg(test)]
mod tests;

pub use business::BusinessRoutine;
pub use customer::CustomerRoutine;
pub use employee::EmployeeRoutine;
pub use generic::GenericRoutine;
pub use investment::InvestmentRoutine;
pub use lookup::UNKNOWN;
pub use project::ProjectRoutine;
pub use report::{
    HealthRating, InsightReport, OverallAssessment, ReportBuilder, RiskLevel, RiskThresholds,
};

use super::answer::ResponseMap;
use super::catalog::HR_CATEGORY;
use super::question::{Category, QuestionSet};
use std::collections::HashMap;
use tracing::{debug, info};

/// Category specific analysis. Implementations must be pure functions of the responses.
pub trait AnalysisRoutine {
    fn name(&self) -> &'static str;

    /// Question ids whose absence makes analysis impossible.
    fn required_responses(&self) -> &'static [&'static str] {
        &[]
    }

    fn thresholds(&self) -> RiskThresholds {
        RiskThresholds::STANDARD
    }

    fn analyze(&self, responses: &ResponseMap, report: &mut ReportBuilder);

    fn guidance(&self, level: RiskLevel) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("cannot analyze {category} responses without an answer to '{question_id}'")]
    MissingResponse {
        category: String,
        question_id: String,
    },
    #[error("an analysis routine is already registered for category {category}")]
    DuplicateRoutine { category: String },
}

/// Dispatches responses to the routine registered for their category.
pub struct InsightEngine {
    routines: HashMap<Category, Box<dyn AnalysisRoutine>>,
    fallback: Box<dyn AnalysisRoutine>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with no category routines; everything uses the generic summary.
    pub fn new() -> Self {
        Self {
            routines: HashMap::new(),
            fallback: Box::new(GenericRoutine),
        }
    }

    /// Built-in routines plus the employee satisfaction routine under the `hr` category.
    pub fn standard() -> Self {
        let mut routines: HashMap<Category, Box<dyn AnalysisRoutine>> = HashMap::new();
        routines.insert(Category::Business, Box::new(BusinessRoutine));
        routines.insert(Category::Finance, Box::new(InvestmentRoutine));
        routines.insert(Category::Management, Box::new(ProjectRoutine));
        routines.insert(Category::Customer, Box::new(CustomerRoutine));
        routines.insert(Category::custom(HR_CATEGORY), Box::new(EmployeeRoutine));

        Self {
            routines,
            fallback: Box::new(GenericRoutine),
        }
    }

    pub fn register<R>(&mut self, category: Category, routine: R) -> Result<(), AnalysisError>
    where
        R: AnalysisRoutine + 'static,
    {
        if self.routines.contains_key(&category) {
            return Err(AnalysisError::DuplicateRoutine {
                category: category.to_string(),
            });
        }

        debug!(%category, routine = routine.name(), "registered analysis routine");
        self.routines.insert(category, Box::new(routine));
        Ok(())
    }

    pub fn has_routine(&self, category: &Category) -> bool {
        self.routines.contains_key(category)
    }

    pub fn analyze(
        &self,
        responses: &ResponseMap,
        category: &Category,
    ) -> Result<InsightReport, AnalysisError> {
        self.run(responses, category, ReportBuilder::new())
    }

    /// Analyze responses collected for `set`, so routines can see the set's size.
    pub fn analyze_set(
        &self,
        responses: &ResponseMap,
        set: &QuestionSet,
    ) -> Result<InsightReport, AnalysisError> {
        let builder = ReportBuilder::for_set(set.questions().len());
        self.run(responses, set.category(), builder)
    }

    fn run(
        &self,
        responses: &ResponseMap,
        category: &Category,
        mut builder: ReportBuilder,
    ) -> Result<InsightReport, AnalysisError> {
        let routine = match self.routines.get(category) {
            Some(routine) => routine.as_ref(),
            None => {
                debug!(%category, "no routine registered, using generic analysis");
                self.fallback.as_ref()
            }
        };

        if let Some(missing) = routine
            .required_responses()
            .iter()
            .find(|question_id| !responses.contains(question_id))
        {
            return Err(AnalysisError::MissingResponse {
                category: category.to_string(),
                question_id: missing.to_string(),
            });
        }

        routine.analyze(responses, &mut builder);
        let report = builder.finish(routine.thresholds(), |level| routine.guidance(level));

        info!(
            %category,
            routine = routine.name(),
            risk_level = %report.overall_assessment.risk_level,
            risk_score = report.overall_assessment.risk_score,
            "analysis completed"
        );
        Ok(report)
    }
}

/// Copy a static string list into owned guidance.
pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
