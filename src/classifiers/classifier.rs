use crate::classifiers::error::ClassifierError;
use crate::core::instances::{Dataset, Instance};

/// Outcome of a single prediction: a class probability distribution for
/// nominal classes, a point estimate for numeric ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Distribution(Vec<f64>),
    Value(f64),
}

impl Prediction {
    pub fn distribution(&self) -> Option<&[f64]> {
        match self {
            Prediction::Distribution(votes) => Some(votes),
            Prediction::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Prediction::Distribution(_) => None,
            Prediction::Value(y) => Some(*y),
        }
    }

    /// Vote-vector form consumed by evaluators: distributions pass through,
    /// numeric estimates travel as a single-element vector.
    pub fn into_votes(self) -> Vec<f64> {
        match self {
            Prediction::Distribution(votes) => votes,
            Prediction::Value(y) => vec![y],
        }
    }

    /// Index of the highest-scoring class, if this is a distribution.
    pub fn predicted_class(&self) -> Option<usize> {
        let votes = self.distribution()?;
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for (i, &v) in votes.iter().enumerate() {
            if v.is_finite() && (best.is_none() || v > best_value) {
                best = Some(i);
                best_value = v;
            }
        }
        best
    }
}

/// Batch supervised learner: train once over a full dataset, then answer
/// queries against the fitted state. Each `fit` replaces the previous model
/// wholesale; `predict` takes `&self`, so a fitted learner can serve
/// concurrent queries.
pub trait BatchClassifier {
    fn fit(&mut self, data: &Dataset) -> Result<(), ClassifierError>;

    fn predict(&self, instance: &dyn Instance) -> Result<Prediction, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_accessors() {
        let p = Prediction::Distribution(vec![0.2, 0.7, 0.1]);
        assert_eq!(p.distribution(), Some(&[0.2, 0.7, 0.1][..]));
        assert_eq!(p.value(), None);
        assert_eq!(p.predicted_class(), Some(1));
        assert_eq!(p.into_votes(), vec![0.2, 0.7, 0.1]);
    }

    #[test]
    fn value_accessors() {
        let p = Prediction::Value(4.25);
        assert_eq!(p.value(), Some(4.25));
        assert_eq!(p.distribution(), None);
        assert_eq!(p.predicted_class(), None);
        assert_eq!(p.into_votes(), vec![4.25]);
    }

    #[test]
    fn predicted_class_skips_non_finite_scores() {
        let p = Prediction::Distribution(vec![f64::NAN, 0.3, f64::INFINITY]);
        assert_eq!(p.predicted_class(), Some(1));
    }
}
