//! 固定的科別清單，逐字嵌入每一個 prompt

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    pub name: &'static str,
    pub description: &'static str,
    pub symptom_lead: &'static str,
    /// (Indonesian keyword, English translation)
    pub keywords: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy)]
pub struct DepartmentCatalog {
    departments: &'static [Department],
}

const DEPARTMENTS: &[Department] = &[
    Department {
        name: "Neurology",
        symptom_lead: "Treats symptoms like",
        description: "Specializes in brain, spinal cord, and nervous system disorders.",
        keywords: &[
            ("pusing", "dizziness"),
            ("sakit kepala", "headache"),
            ("sulit berjalan", "difficulty walking"),
            ("kehilangan keseimbangan", "loss of balance"),
            ("kejang", "seizures"),
            ("kesemutan", "numbness/tingling"),
        ],
    },
    Department {
        name: "Cardiology",
        symptom_lead: "Manages symptoms such as",
        description: "Focuses on heart and blood vessel conditions.",
        keywords: &[
            ("nyeri dada", "chest pain"),
            ("sesak napas", "shortness of breath"),
            ("jantungan", "palpitations"),
            ("pingsan", "fainting"),
            ("kaki bengkak", "swollen legs due to heart issues"),
        ],
    },
    Department {
        name: "Gastroenterology",
        symptom_lead: "Handles symptoms like",
        description: "Addresses digestive system disorders (stomach, intestines, liver).",
        keywords: &[
            ("mual", "nausea"),
            ("muntah", "vomiting"),
            ("sakit perut", "abdominal pain"),
            ("diare", "diarrhea"),
            ("sembelit", "constipation"),
            ("perut kembung", "bloating"),
        ],
    },
    Department {
        name: "Pulmonology",
        symptom_lead: "Manages symptoms including",
        description: "Treats lung and respiratory system diseases.",
        keywords: &[
            ("batuk", "cough"),
            ("sesak napas", "shortness of breath"),
            ("demam", "fever with respiratory issues"),
            ("mengi", "wheezing"),
            ("dahak berdarah", "blood in sputum"),
        ],
    },
    Department {
        name: "Orthopedics",
        symptom_lead: "Treats symptoms like",
        description: "Deals with musculoskeletal system (bones, joints, muscles).",
        keywords: &[
            ("nyeri sendi", "joint pain"),
            ("nyeri punggung", "back pain"),
            ("sulit berjalan", "difficulty walking due to joint/muscle issues"),
            ("patah tulang", "fractures"),
            ("kaku sendi", "joint stiffness"),
        ],
    },
    Department {
        name: "Endokrinologi",
        symptom_lead: "Handles symptoms such as",
        description: "Manages hormone-related disorders (thyroid, diabetes, etc.).",
        keywords: &[
            ("lelah berlebihan", "excessive fatigue"),
            ("haus berlebihan", "excessive thirst"),
            ("sering kencing", "frequent urination"),
            ("berat badan turun tiba-tiba", "sudden weight loss"),
            ("tremor", "tremors"),
        ],
    },
    Department {
        name: "Psikiatri",
        symptom_lead: "Treats symptoms like",
        description: "Focuses on mental health and behavioral disorders.",
        keywords: &[
            ("susah tidur", "insomnia"),
            ("cemas berlebihan", "excessive anxiety"),
            ("sedih berkepanjangan", "prolonged sadness"),
            ("halusinasi", "hallucinations"),
            ("sulit konsentrasi", "difficulty concentrating"),
        ],
    },
    Department {
        name: "Dermatologi",
        symptom_lead: "Manages symptoms including",
        description: "Specializes in skin, hair, and nail conditions.",
        keywords: &[
            ("gatal", "itching"),
            ("ruam kulit", "skin rash"),
            ("kemerahan", "redness"),
            ("jerawat parah", "severe acne"),
            ("luka tidak sembuh", "non-healing sores"),
        ],
    },
];

impl DepartmentCatalog {
    pub const fn standard() -> Self {
        Self {
            departments: DEPARTMENTS,
        }
    }

    pub fn departments(&self) -> &'static [Department] {
        self.departments
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Case-insensitive lookup by department name.
    pub fn find(&self, name: &str) -> Option<&'static Department> {
        self.departments
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// 將清單渲染成 prompt 內的項目列表，每個科別一行
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();
        for dept in self.departments {
            let keywords = dept
                .keywords
                .iter()
                .map(|(kw, translation)| format!("{} ({})", kw, translation))
                .collect::<Vec<_>>();
            let listed = match keywords.split_last() {
                Some((last, rest)) if !rest.is_empty() => {
                    format!("{}, or {}", rest.join(", "), last)
                }
                Some((last, _)) => last.clone(),
                None => String::new(),
            };
            // String 的 fmt::Write 不會失敗
            let _ = writeln!(
                out,
                "{}- {}: {} {} {}.",
                indent,
                dept.name,
                dept.description,
                dept.symptom_lead,
                listed
            );
        }
        out
    }
}

impl Default for DepartmentCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
