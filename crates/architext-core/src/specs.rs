use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A value in an open-ended specification map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum SpecValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Map(IndexMap<String, SpecValue>),
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        SpecValue::Text(s.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(s: String) -> Self {
        SpecValue::Text(s)
    }
}

impl From<bool> for SpecValue {
    fn from(b: bool) -> Self {
        SpecValue::Bool(b)
    }
}

impl From<i32> for SpecValue {
    fn from(n: i32) -> Self {
        SpecValue::Number(n.into())
    }
}

impl From<u64> for SpecValue {
    fn from(n: u64) -> Self {
        SpecValue::Number(n.into())
    }
}

impl From<i64> for SpecValue {
    fn from(n: i64) -> Self {
        SpecValue::Number(n.into())
    }
}

impl From<f64> for SpecValue {
    fn from(n: f64) -> Self {
        // NaN and infinities have no JSON number form
        serde_json::Number::from_f64(n)
            .map(SpecValue::Number)
            .unwrap_or_else(|| SpecValue::Text(n.to_string()))
    }
}

impl From<Specifications> for SpecValue {
    fn from(s: Specifications) -> Self {
        SpecValue::Map(s.0)
    }
}

/// Specifications and projected usage of a component, e.g.
/// `{ "sku": "P1v2", "instanceCount": 2 }`. Keys keep insertion order, and
/// re-inserting a key keeps its original position.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(transparent)]
pub struct Specifications(pub IndexMap<String, SpecValue>);

impl Specifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SpecValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SpecValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Compact JSON form used when interpolating into prompts.
    pub fn to_compact_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_json_keeps_insertion_order_and_integers() {
        let specs = Specifications::new()
            .with("tier", "Standard")
            .with("instanceCount", 2)
            .with("zoneRedundant", false)
            .with("storage", Specifications::new().with("gb", 512.5));

        assert_eq!(
            specs.to_compact_json(),
            r#"{"tier":"Standard","instanceCount":2,"zoneRedundant":false,"storage":{"gb":512.5}}"#
        );
    }

    #[test]
    fn derived_cost_specs_render_tier_first() {
        let specs = Specifications::new()
            .with("tier", "Standard")
            .with("purpose", "UI");
        assert_eq!(specs.to_compact_json(), r#"{"tier":"Standard","purpose":"UI"}"#);

        let mut specs = specs;
        specs.insert("tier", "Premium");
        assert_eq!(specs.to_compact_json(), r#"{"tier":"Premium","purpose":"UI"}"#);
    }

    #[test]
    fn deserialized_maps_keep_document_order() {
        let specs: Specifications =
            serde_json::from_str(r#"{"z":1,"a":{"y":true,"b":"x"}}"#).unwrap();
        assert_eq!(specs.to_compact_json(), r#"{"z":1,"a":{"y":true,"b":"x"}}"#);
    }

    #[test]
    fn deserializes_tagged_values() {
        let specs: Specifications =
            serde_json::from_str(r#"{"a":true,"b":3,"c":"x","d":{"e":1.5}}"#).unwrap();
        assert_eq!(specs.get("a"), Some(&SpecValue::Bool(true)));
        assert_eq!(specs.get("b"), Some(&SpecValue::from(3)));
        assert_eq!(specs.get("c"), Some(&SpecValue::from("x")));
        assert!(matches!(specs.get("d"), Some(SpecValue::Map(m)) if m.len() == 1));
    }

    #[test]
    fn non_finite_numbers_fall_back_to_text() {
        assert_eq!(SpecValue::from(f64::INFINITY), SpecValue::Text("inf".into()));
    }
}
