use crate::core::instances::Instance;
use crate::evaluation::Measurement;
use std::collections::HashMap;

/// Evaluator of predictive performance over a sequence of labeled examples.
///
/// A `PerformanceEvaluator` consumes ground-truth examples together with
/// their prediction scores and exposes aggregated metrics via
/// [`performance`](PerformanceEvaluator::performance). Classification scores
/// are one vote per class; regression estimates travel as a single-element
/// vote vector.
pub trait PerformanceEvaluator {
    /// Clears accumulated metrics (the schema does not change).
    fn reset(&mut self);

    /// Feeds one labeled example and its prediction scores.
    ///
    /// Implementations may skip updates for examples with a missing class
    /// or unusable scores.
    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>);

    /// Returns a snapshot of current metrics.
    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// Returns (name, Some(value)|None) for each requested metric, preserving order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().unwrap().1
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ms = self.performance();
        let map: HashMap<_, _> = ms.into_iter().map(|m| (m.name, m.value)).collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
