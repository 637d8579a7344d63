mod evaluation_trace;
mod snapshot;

pub use evaluation_trace::{EvaluationTrace, TraceFormat};
pub use snapshot::Snapshot;
