mod evaluators;
mod measurement;
mod preview;

pub use evaluators::{
    BasicClassificationEvaluator, BasicRegressionEvaluator, PerformanceEvaluator,
    PerformanceEvaluatorExt,
};
pub use measurement::Measurement;
pub use preview::{EvaluationTrace, Snapshot, TraceFormat};
