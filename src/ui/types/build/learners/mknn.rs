use crate::classifiers::{ClassifierError, MknnClassifier};
use crate::ui::types::choices::MknnParams;

impl TryFrom<MknnParams> for MknnClassifier {
    type Error = ClassifierError;

    fn try_from(p: MknnParams) -> Result<Self, Self::Error> {
        let classifier = MknnClassifier::new(p.k, p.weighted)?;
        match p.validity_threshold {
            Some(threshold) => classifier.with_validity_threshold(threshold),
            None => Ok(classifier),
        }
    }
}
