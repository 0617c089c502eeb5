use crate::domain::catalog::DepartmentCatalog;
use crate::domain::model::PatientInfo;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const TRIAGE_TEMPLATE: &str = "\
Given a patient with:
- Gender: {gender}
- Age: {age}
- Symptoms: {symptoms}

Recommend the most relevant hospital department for triage from the following list only:
{departments}
Based on the symptoms, gender, and age, select the most appropriate department from the list above. \
Return only the department name as a single word or phrase (e.g., Neurology).
";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(gender|age|symptoms)\}").expect("placeholder pattern is a valid regex")
});

/// 預先嵌入科別清單的 prompt 模板；每次請求只替換病患欄位
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(catalog: &DepartmentCatalog) -> Self {
        Self {
            template: TRIAGE_TEMPLATE.replacen("{departments}", &catalog.render(""), 1),
        }
    }

    /// Substitutes the patient fields in a single pass, so placeholder-looking text
    /// inside user input is never expanded a second time.
    pub fn render(&self, patient: &PatientInfo) -> String {
        let age = patient.age.to_string();
        let symptoms = patient.symptoms_joined();

        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures| match &caps[1] {
                "gender" => patient.gender.clone(),
                "age" => age.clone(),
                _ => symptoms.clone(),
            })
            .into_owned()
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(&DepartmentCatalog::standard())
    }
}
