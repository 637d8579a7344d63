use crate::evaluation::{
    BasicClassificationEvaluator, BasicRegressionEvaluator, PerformanceEvaluator,
};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::EvaluatorChoice;

pub fn build_evaluator(
    choice: EvaluatorChoice,
) -> Result<Box<dyn PerformanceEvaluator>, BuildError> {
    match choice {
        EvaluatorChoice::BasicClassification(p) => {
            // the confusion matrix grows with the classes it actually sees
            Ok(Box::new(BasicClassificationEvaluator::new(
                0,
                p.precision_recall_output,
                p.precision_per_class,
                p.recall_per_class,
                p.f1_per_class,
            )))
        }
        EvaluatorChoice::BasicRegression(_) => Ok(Box::new(BasicRegressionEvaluator::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{BasicClassificationParameters, NoParams};

    #[test]
    fn builds_both_evaluator_kinds() {
        assert!(
            build_evaluator(EvaluatorChoice::BasicClassification(
                BasicClassificationParameters::default()
            ))
            .is_ok()
        );
        assert!(build_evaluator(EvaluatorChoice::BasicRegression(NoParams::default())).is_ok());
    }
}
