use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_k() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MknnParams {
    #[serde(default = "default_k")]
    #[schemars(
        title = "Number of neighbors (k)",
        description = "Nearest training instances consulted per prediction.",
        range(min = 1),
        default = "default_k"
    )]
    pub k: usize,

    #[serde(default)]
    #[schemars(
        title = "Weight voting?",
        description = "Also scale each vote by 1/(distance + 0.5)."
    )]
    pub weighted: bool,

    #[serde(default)]
    #[schemars(
        title = "Validity threshold",
        description = "Exclude neighbors whose validity is below this value (0–1).",
        range(min = 0.0, max = 1.0)
    )]
    pub validity_threshold: Option<f64>,
}

impl Default for MknnParams {
    fn default() -> Self {
        Self {
            k: default_k(),
            weighted: false,
            validity_threshold: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(LearnerKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum LearnerChoice {
    #[strum_discriminants(strum(
        message = "Modified K-Nearest Neighbors",
        detailed_message = "KNN refined with per-instance validity scores and optional weight voting."
    ))]
    Mknn(MknnParams),
}

impl UIChoice for LearnerChoice {
    type Kind = LearnerKind;

    fn schema() -> Schema {
        schema_for!(LearnerChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a learner:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            LearnerKind::Mknn => serde_json::to_value(MknnParams::default()).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use strum::EnumMessage;

    fn root_props_of<T: JsonSchema>() -> Value {
        let root = schema_for!(T);
        let v = serde_json::to_value(root).expect("schema to JSON");
        v.get("schema")
            .cloned()
            .unwrap_or(v)
            .get("properties")
            .cloned()
            .unwrap_or_else(|| json!({}))
    }

    #[test]
    fn params_default_matches_classifier_default() {
        let p = MknnParams::default();
        assert_eq!(p.k, 3);
        assert!(!p.weighted);
        assert_eq!(p.validity_threshold, None);
    }

    #[test]
    fn serde_roundtrip_params() {
        let p0 = MknnParams {
            k: 7,
            weighted: true,
            validity_threshold: Some(0.4),
        };
        let j = serde_json::to_string(&p0).unwrap();
        let p1: MknnParams = serde_json::from_str(&j).unwrap();
        assert_eq!(p0, p1);
    }

    #[test]
    fn serde_missing_fields_apply_defaults() {
        let p: MknnParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p, MknnParams::default());
    }

    #[test]
    fn tagged_enum_serialization() {
        let choice = LearnerChoice::Mknn(MknnParams::default());
        let v = serde_json::to_value(choice).unwrap();
        assert_eq!(v.get("type").and_then(Value::as_str), Some("mknn"));
        assert_eq!(
            v.get("params").and_then(|p| p.get("k")).and_then(Value::as_u64),
            Some(3)
        );
    }

    #[test]
    fn from_parts_rebuilds_the_default() {
        let v = <LearnerChoice as UIChoice>::default_params(LearnerKind::Mknn);
        let rebuilt = <LearnerChoice as UIChoice>::from_parts(LearnerKind::Mknn, v).unwrap();
        let LearnerChoice::Mknn(p) = rebuilt;
        assert_eq!(p, MknnParams::default());
    }

    #[test]
    fn schema_has_titles_ranges_and_defaults() {
        let props = root_props_of::<MknnParams>();
        let obj = props.as_object().unwrap();

        let k = obj.get("k").unwrap().as_object().unwrap();
        assert_eq!(
            k.get("title").and_then(Value::as_str),
            Some("Number of neighbors (k)")
        );
        assert_eq!(k.get("minimum").and_then(Value::as_f64), Some(1.0));
        assert_eq!(k.get("default").and_then(Value::as_u64), Some(3));

        let t = obj.get("validity_threshold").unwrap().as_object().unwrap();
        assert_eq!(t.get("minimum").and_then(Value::as_f64), Some(0.0));
        assert_eq!(t.get("maximum").and_then(Value::as_f64), Some(1.0));

        assert!(obj.get("weighted").unwrap().get("title").is_some());
    }

    #[test]
    fn discriminant_messages_are_available() {
        assert_eq!(
            LearnerKind::Mknn.get_message(),
            Some("Modified K-Nearest Neighbors")
        );
        assert!(LearnerKind::Mknn.get_detailed_message().is_some());
    }
}
