use crate::ui::cli::wizard::prompt_choice;
use crate::ui::types::choices::{EvaluatorChoice, LearnerChoice, StreamChoice, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrainTestParams {
    #[schemars(skip)]
    pub learner: LearnerChoice,
    #[schemars(skip)]
    pub train_stream: StreamChoice,
    #[schemars(skip)]
    pub test_stream: StreamChoice,
    #[schemars(skip)]
    pub evaluator: EvaluatorChoice,

    #[serde(default)]
    #[schemars(
        title = "Max Train Instances",
        description = "Train on at most this many instances (None = all)"
    )]
    pub max_train_instances: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Max Test Instances",
        description = "Evaluate at most this many instances (None = all)"
    )]
    pub max_test_instances: Option<u64>,

    #[schemars(
        title = "Sample Frequency",
        description = "Emit metrics every N test instances",
        range(min = 1)
    )]
    pub sample_frequency: u64,

    #[schemars(
        title = "Memory Check Frequency",
        description = "Check memory every N test instances",
        range(min = 1)
    )]
    pub mem_check_frequency: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Evaluate Train/Test",
        detailed_message = "Fit on a train stream, then report metrics over a test stream."
    ))]
    EvaluateTrainTest(TrainTestParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::EvaluateTrainTest => json!({
                "max_train_instances": null,
                "max_test_instances": null,
                "sample_frequency": 1_000,
                "mem_check_frequency": 1_000,
            }),
        }
    }

    fn subprompts<D: crate::ui::cli::drivers::PromptDriver>(
        driver: &D,
        kind: Self::Kind,
    ) -> anyhow::Result<Option<Map<String, Value>>> {
        match kind {
            TaskKind::EvaluateTrainTest => {
                let learner = prompt_choice::<LearnerChoice, _>(driver)?;
                println!("Train stream:");
                let train = prompt_choice::<StreamChoice, _>(driver)?;
                println!("Test stream:");
                let test = prompt_choice::<StreamChoice, _>(driver)?;
                let evaluator = prompt_choice::<EvaluatorChoice, _>(driver)?;

                let mut m = Map::new();
                m.insert("learner".into(), serde_json::to_value(learner)?);
                m.insert("train_stream".into(), serde_json::to_value(train)?);
                m.insert("test_stream".into(), serde_json::to_value(test)?);
                m.insert("evaluator".into(), serde_json::to_value(evaluator)?);
                Ok(Some(m))
            }
        }
    }

    fn from_parts(kind: Self::Kind, params: Value) -> anyhow::Result<Self> {
        match kind {
            TaskKind::EvaluateTrainTest => {
                let p: TrainTestParams = serde_json::from_value(params)?;
                Ok(TaskChoice::EvaluateTrainTest(p))
            }
        }
    }
}
