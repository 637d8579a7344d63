use crate::classifiers::BatchClassifier;
use crate::classifiers::MknnClassifier;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::LearnerChoice;

mod mknn;

pub fn build_learner(choice: LearnerChoice) -> Result<Box<dyn BatchClassifier>, BuildError> {
    match choice {
        LearnerChoice::Mknn(p) => Ok(Box::new(MknnClassifier::try_from(p)?)),
    }
}
