use crate::streams::{ArffFileStream, ClustersGenerator, Stream};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::StreamChoice;

mod arff_file;
mod clusters;

pub fn build_stream(choice: StreamChoice) -> Result<Box<dyn Stream>, BuildError> {
    match choice {
        StreamChoice::ArffFile(p) => Ok(Box::new(ArffFileStream::try_from(p)?)),
        StreamChoice::ClustersGenerator(p) => Ok(Box::new(ClustersGenerator::try_from(p)?)),
    }
}
