use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_num_classes() -> usize {
    2
}
fn default_num_features() -> usize {
    2
}
fn default_spread() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct ArffParameters {
    #[schemars(
        with = "String",
        title = "ARFF Path",
        description = "Path to .arff file",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["arff"]
        )
    )]
    pub path: PathBuf,

    #[schemars(
        title = "Class Index",
        description = "Zero-based index of the class column",
        range(min = 0)
    )]
    pub class_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClustersParameters {
    #[serde(default = "default_num_classes")]
    #[schemars(
        title = "Classes",
        description = "Number of labeled clusters (each owns one centroid)",
        range(min = 2),
        default = "default_num_classes"
    )]
    pub num_classes: usize,

    #[serde(default = "default_num_features")]
    #[schemars(
        title = "Features",
        description = "Numeric attributes per instance",
        range(min = 1),
        default = "default_num_features"
    )]
    pub num_features: usize,

    #[serde(default = "default_spread")]
    #[schemars(
        title = "Spread",
        description = "Uniform jitter around each centroid (centroids sit 10 apart)",
        range(min = 0.01),
        default = "default_spread"
    )]
    pub spread: f64,

    #[serde(default)]
    #[schemars(
        title = "Max Instances",
        description = "Upper bound on instances; empty = infinite"
    )]
    pub max_instances: Option<u64>,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for ClustersParameters {
    fn default() -> Self {
        Self {
            num_classes: default_num_classes(),
            num_features: default_num_features(),
            spread: default_spread(),
            max_instances: None,
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StreamKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum StreamChoice {
    #[strum_discriminants(strum(
        message = "Arff File Stream",
        detailed_message = "A stream read from an ARFF file."
    ))]
    ArffFile(ArffParameters),

    #[strum_discriminants(strum(
        message = "Clusters Generator",
        detailed_message = "Seeded synthetic clusters around per-class centroids."
    ))]
    ClustersGenerator(ClustersParameters),
}

impl UIChoice for StreamChoice {
    type Kind = StreamKind;

    fn schema() -> Schema {
        schema_for!(StreamChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a stream:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            StreamKind::ArffFile => serde_json::to_value(ArffParameters::default()).unwrap(),
            StreamKind::ClustersGenerator => {
                serde_json::to_value(ClustersParameters::default()).unwrap()
            }
        }
    }
}
