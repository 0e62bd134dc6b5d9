//! Synthesis plan returned by the query stage.

use crate::error::{ComeviewError, ComeviewResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SPEED_SCALE_KEY: &str = "speedScale";

/// Structured plan produced by the query stage and consumed unchanged,
/// apart from explicit adjustments, by the synthesis stage.
///
/// The plan is kept as a JSON object so fields the engine adds in newer
/// versions survive the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynthesisPlan(Map<String, Value>);

impl SynthesisPlan {
    /// Build a plan from a decoded JSON value
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the value is not a JSON object.
    pub fn from_value(value: Value) -> ComeviewResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ComeviewError::malformed(format!(
                "Synthesis plan must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a plan from raw response bytes
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the bytes are not a JSON object.
    pub fn from_slice(bytes: &[u8]) -> ComeviewResult<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Speed multiplier recorded in the plan, if present
    #[must_use]
    pub fn speed_scale(&self) -> Option<f64> {
        self.0.get(SPEED_SCALE_KEY).and_then(Value::as_f64)
    }

    /// Set the speed multiplier
    #[must_use]
    pub fn with_speed_scale(mut self, speed_scale: f64) -> Self {
        self.0
            .insert(SPEED_SCALE_KEY.to_string(), Value::from(speed_scale));
        self
    }

    /// Look up a raw field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The underlying JSON object
    #[must_use]
    pub const fn as_json(&self) -> &Map<String, Value> {
        &self.0
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_from_object() {
        let plan = SynthesisPlan::from_value(json!({
            "accent_phrases": [],
            "speedScale": 1.0,
            "kana": "コンニチワ"
        }))
        .unwrap();

        assert_eq!(plan.speed_scale(), Some(1.0));
        assert_eq!(plan.get("kana"), Some(&json!("コンニチワ")));
        assert_eq!(plan.as_json().len(), 3);
    }

    #[test]
    fn test_plan_rejects_non_object() {
        let err = SynthesisPlan::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ComeviewError::MalformedResponse { .. }));
        assert!(err.to_string().contains("an array"));

        let err = SynthesisPlan::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, ComeviewError::MalformedResponse { .. }));
    }

    #[test]
    fn test_with_speed_scale_keeps_other_fields() {
        let plan = SynthesisPlan::from_slice(br#"{"speedScale": 1.0, "pitchScale": 0.1}"#)
            .unwrap()
            .with_speed_scale(1.5);

        assert_eq!(plan.speed_scale(), Some(1.5));
        assert_eq!(plan.get("pitchScale"), Some(&json!(0.1)));
    }

    #[test]
    fn test_plan_serializes_transparently() {
        let plan = SynthesisPlan::from_value(json!({"speedScale": 2.0})).unwrap();
        assert_eq!(serde_json::to_value(&plan).unwrap(), json!({"speedScale": 2.0}));
    }
}
