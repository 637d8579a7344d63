mod error;
mod evaluators;
mod learners;
mod streams;

pub use error::BuildError;

pub use evaluators::build_evaluator;
pub use learners::build_learner;
pub use streams::build_stream;
