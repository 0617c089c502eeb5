//! Request validation: raw JSON body in, `PatientInfo` out.
//!
//! Errors mirror the shape FastAPI/pydantic clients already understand:
//! `{"type", "loc", "msg", "input"}` per offending field, all reported at once.

use crate::domain::model::PatientInfo;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocItem {
    Key(String),
    Index(usize),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        LocItem::Key(key.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<LocItem>,
    pub msg: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    fn new(kind: &'static str, loc: Vec<LocItem>, msg: &str, input: Value) -> Self {
        Self {
            kind,
            loc,
            msg: msg.to_string(),
            input,
            ctx: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{} validation error(s) for PatientInfo", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

const MSG_MISSING: &str = "Field required";
const MSG_STRING: &str = "Input should be a valid string";
const MSG_INT: &str = "Input should be a valid integer";
const MSG_INT_PARSING: &str = "Input should be a valid integer, unable to parse string as an integer";
const MSG_INT_FROM_FLOAT: &str = "Input should be a valid integer, got a number with a fractional part";
const MSG_INT_SIZE: &str = "Input should be a valid integer, unable to parse input as an integer";
const MSG_LIST: &str = "Input should be a valid list";
const MSG_OBJECT: &str = "Input should be a valid dictionary or object to extract fields from";

fn body_loc(field: &str) -> Vec<LocItem> {
    vec!["body".into(), field.into()]
}

/// 解析並驗證請求內容；任何欄位錯誤都不會進入後續處理
pub fn parse_patient_info(body: &[u8]) -> Result<PatientInfo, ValidationErrors> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        let mut err = FieldError::new(
            "json_invalid",
            vec!["body".into()],
            "JSON decode error",
            Value::Object(Map::new()),
        );
        err.ctx = Some(serde_json::json!({ "error": e.to_string() }));
        ValidationErrors(vec![err])
    })?;

    validate_patient_info(&value)
}

pub fn validate_patient_info(value: &Value) -> Result<PatientInfo, ValidationErrors> {
    let Some(obj) = value.as_object() else {
        return Err(ValidationErrors(vec![FieldError::new(
            "model_attributes_type",
            vec!["body".into()],
            MSG_OBJECT,
            value.clone(),
        )]));
    };

    let mut errors = Vec::new();

    let gender = match obj.get("gender") {
        None => {
            errors.push(FieldError::new("missing", body_loc("gender"), MSG_MISSING, value.clone()));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::new("string_type", body_loc("gender"), MSG_STRING, other.clone()));
            None
        }
    };

    let age = match obj.get("age") {
        None => {
            errors.push(FieldError::new("missing", body_loc("age"), MSG_MISSING, value.clone()));
            None
        }
        Some(raw) => match coerce_int(raw) {
            Ok(n) => Some(n),
            Err((kind, msg)) => {
                errors.push(FieldError::new(kind, body_loc("age"), msg, raw.clone()));
                None
            }
        },
    };

    let symptoms = match obj.get("symptoms") {
        None => {
            errors.push(FieldError::new("missing", body_loc("symptoms"), MSG_MISSING, value.clone()));
            None
        }
        Some(Value::Array(items)) => {
            let mut symptoms = Vec::with_capacity(items.len());
            let mut ok = true;
            for (idx, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => symptoms.push(s.clone()),
                    other => {
                        ok = false;
                        let mut loc = body_loc("symptoms");
                        loc.push(LocItem::Index(idx));
                        errors.push(FieldError::new("string_type", loc, MSG_STRING, other.clone()));
                    }
                }
            }
            ok.then_some(symptoms)
        }
        Some(other) => {
            errors.push(FieldError::new("list_type", body_loc("symptoms"), MSG_LIST, other.clone()));
            None
        }
    };

    match (gender, age, symptoms) {
        (Some(gender), Some(age), Some(symptoms)) if errors.is_empty() => Ok(PatientInfo {
            gender,
            age,
            symptoms,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

/// Lax integer coercion: integers, integral floats and integer strings are accepted.
///
/// Booleans are rejected with `int_type`, unlike pydantic's lax mode which maps
/// `true`/`false` to `1`/`0`; an age of `true` is treated as a client mistake.
fn coerce_int(value: &Value) -> Result<i64, (&'static str, &'static str)> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Err(("int_parsing_size", MSG_INT_SIZE))
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if !f.is_finite() || f.fract() != 0.0 {
                    Err(("int_from_float", MSG_INT_FROM_FLOAT))
                } else if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                    Err(("int_parsing_size", MSG_INT_SIZE))
                } else {
                    Ok(f as i64)
                }
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ("int_parsing", MSG_INT_PARSING)),
        _ => Err(("int_type", MSG_INT)),
    }
}
