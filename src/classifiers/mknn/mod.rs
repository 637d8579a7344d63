mod distance;
mod mknn;
mod neighbors;
mod schema;
mod validity;
mod votes;

pub use mknn::MknnClassifier;
