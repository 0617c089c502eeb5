use crate::core::prompt::PromptTemplate;
use crate::domain::catalog::DepartmentCatalog;
use crate::domain::model::{PatientInfo, RecommendationResult};
use crate::domain::ports::CompletionService;
use crate::utils::error::RecommendError;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Turns a validated patient into a department recommendation via one completion call.
///
/// Holds only read-only state, so a single instance is shared by every request task.
pub struct Recommender {
    completion: Arc<dyn CompletionService>,
    prompt: PromptTemplate,
    catalog: DepartmentCatalog,
    strict_catalog: bool,
}

impl Recommender {
    pub fn new(completion: Arc<dyn CompletionService>, catalog: DepartmentCatalog) -> Self {
        Self {
            completion,
            prompt: PromptTemplate::new(&catalog),
            catalog,
            strict_catalog: false,
        }
    }

    /// 嚴格模式：模型回覆必須是清單中的科別名稱
    pub fn with_strict_catalog(mut self, strict: bool) -> Self {
        self.strict_catalog = strict;
        self
    }

    pub fn model(&self) -> &str {
        self.completion.model()
    }

    pub fn strict_catalog(&self) -> bool {
        self.strict_catalog
    }

    #[instrument(
        name = "recommend",
        skip_all,
        fields(age = patient.age, symptom_count = patient.symptoms.len())
    )]
    pub async fn recommend(
        &self,
        patient: &PatientInfo,
    ) -> Result<RecommendationResult, RecommendError> {
        let prompt = self.prompt.render(patient);
        debug!(prompt_len = prompt.len(), model = %self.model(), "Sending triage prompt");

        let completion = self.completion.complete(&prompt).await?;
        let department = completion.trim();

        let recommended_department = if self.strict_catalog {
            match self.catalog.find(department) {
                Some(dept) => dept.name.to_string(),
                None => {
                    warn!(department, "Completion is not a known department");
                    return Err(RecommendError::UnknownDepartment(department.to_string()));
                }
            }
        } else {
            department.to_string()
        };

        info!(department = %recommended_department, "✅ Recommendation ready");
        Ok(RecommendationResult {
            recommended_department,
        })
    }
}
