pub mod arff;
pub mod generators;
mod stream;

pub use arff::ArffFileStream;
pub use generators::ClustersGenerator;
pub use stream::Stream;
