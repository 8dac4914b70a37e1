use super::catalog::{self, AnalysisCategoryInfo};
use super::question::{ConfigurationError, QuestionSet};
use tracing::debug;

/// Question sets available to a session, in menu order.
#[derive(Debug, Clone, Default)]
pub struct QuestionSetRegistry {
    sets: Vec<QuestionSet>,
}

impl QuestionSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in question sets.
    pub fn standard() -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();
        for set in catalog::standard_question_sets()? {
            registry.register(set)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, set: QuestionSet) -> Result<(), ConfigurationError> {
        if self.get(set.id()).is_some() {
            return Err(ConfigurationError::DuplicateSet {
                set_id: set.id().to_string(),
            });
        }

        debug!(set_id = set.id(), questions = set.questions().len(), "registered question set");
        self.sets.push(set);
        Ok(())
    }

    pub fn get(&self, set_id: &str) -> Option<&QuestionSet> {
        self.sets.iter().find(|set| set.id() == set_id)
    }

    pub fn sets(&self) -> &[QuestionSet] {
        &self.sets
    }

    pub fn ids(&self) -> Vec<&str> {
        self.sets.iter().map(QuestionSet::id).collect()
    }

    /// Category groupings restricted to sets present in this registry.
    pub fn categories(&self) -> Vec<AnalysisCategoryInfo> {
        catalog::analysis_categories()
            .into_iter()
            .map(|mut info| {
                info.question_sets.retain(|set_id| self.get(set_id).is_some());
                info
            })
            .filter(|info| !info.question_sets.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::question::{Category, Question};

    #[test]
    fn standard_registry_lists_sets_in_menu_order() {
        let registry = QuestionSetRegistry::standard().expect("built-in sets are valid");

        assert_eq!(
            registry.ids(),
            vec![
                "business_analysis",
                "investment_analysis",
                "project_management",
                "customer_satisfaction",
                "employee_satisfaction",
            ]
        );
        let business = registry.get("business_analysis").expect("business set");
        assert_eq!(business.category(), &Category::Business);
        assert_eq!(business.questions().len(), 9);
    }

    #[test]
    fn registering_duplicate_set_fails() {
        let mut registry = QuestionSetRegistry::standard().expect("built-in sets are valid");
        let duplicate = catalog::business_analysis().expect("valid set");

        match registry.register(duplicate) {
            Err(ConfigurationError::DuplicateSet { set_id }) => {
                assert_eq!(set_id, "business_analysis")
            }
            other => panic!("expected duplicate set error, got {other:?}"),
        }
    }

    #[test]
    fn categories_only_reference_registered_sets() {
        let mut registry = QuestionSetRegistry::new();
        registry
            .register(catalog::project_management().expect("valid set"))
            .expect("registers");
        registry
            .register(
                QuestionSet::new(
                    "pulse",
                    "Pulse",
                    "Weekly pulse",
                    Category::custom("pulse"),
                    vec![Question::rating("mood", "Mood", 5)],
                )
                .expect("valid set"),
            )
            .expect("registers");

        let categories = registry.categories();
        let names: Vec<_> = categories.iter().map(|info| info.name).collect();
        assert_eq!(names, vec!["Business Analysis", "Management Analysis"]);
        assert_eq!(categories[0].question_sets, vec!["project_management"]);
    }
}
