pub mod classifier;
mod error;
mod mknn;

pub use classifier::{BatchClassifier, Prediction};
pub use error::ClassifierError;
pub use mknn::MknnClassifier;
