use serde::Serialize;

/// 單次請求的病患資料，處理完即丟棄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientInfo {
    pub gender: String,
    pub age: i64,
    pub symptoms: Vec<String>,
}

impl PatientInfo {
    /// Symptoms rendered the way the prompt expects them: `"a, b, c"`.
    pub fn symptoms_joined(&self) -> String {
        self.symptoms.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResult {
    pub recommended_department: String,
}
