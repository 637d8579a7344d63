use crate::core::instances::Instance;
use crate::evaluation::{Measurement, PerformanceEvaluator};

/// Holdout regression evaluator.
///
/// Estimates arrive as single-element vote vectors. Reports
/// `mean_absolute_error` and `root_mean_squared_error`, plus
/// `relative_absolute_error` / `relative_squared_error` against the
/// predict-the-running-mean baseline (each example is scored against the
/// mean of the targets seen before it, so the baseline never peeks ahead).
pub struct BasicRegressionEvaluator {
    total_weight: f64,
    abs_error_sum: f64,
    sq_error_sum: f64,
    target_sum: f64,
    baseline_abs_sum: f64,
    baseline_sq_sum: f64,
}

impl BasicRegressionEvaluator {
    pub fn new() -> Self {
        Self {
            total_weight: 0.0,
            abs_error_sum: 0.0,
            sq_error_sum: 0.0,
            target_sum: 0.0,
            baseline_abs_sum: 0.0,
            baseline_sq_sum: 0.0,
        }
    }
}

impl Default for BasicRegressionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceEvaluator for BasicRegressionEvaluator {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>) {
        let Some(y) = example.class_value() else {
            return;
        };
        if !y.is_finite() {
            return;
        }
        let Some(&estimate) = class_votes.first() else {
            return;
        };
        if !estimate.is_finite() {
            return;
        }
        let w = example.weight();
        if w <= 0.0 {
            return;
        }

        if self.total_weight > 0.0 {
            let mean_so_far = self.target_sum / self.total_weight;
            self.baseline_abs_sum += w * (y - mean_so_far).abs();
            self.baseline_sq_sum += w * (y - mean_so_far) * (y - mean_so_far);
        }

        self.abs_error_sum += w * (y - estimate).abs();
        self.sq_error_sum += w * (y - estimate) * (y - estimate);
        self.target_sum += w * y;
        self.total_weight += w;
    }

    fn performance(&self) -> Vec<Measurement> {
        if self.total_weight <= 0.0 {
            return vec![
                Measurement::new("mean_absolute_error", f64::NAN),
                Measurement::new("root_mean_squared_error", f64::NAN),
                Measurement::new("relative_absolute_error", f64::NAN),
                Measurement::new("relative_squared_error", f64::NAN),
            ];
        }

        let mae = self.abs_error_sum / self.total_weight;
        let rmse = (self.sq_error_sum / self.total_weight).sqrt();
        let rae = if self.baseline_abs_sum > 0.0 {
            self.abs_error_sum / self.baseline_abs_sum
        } else {
            f64::NAN
        };
        let rse = if self.baseline_sq_sum > 0.0 {
            self.sq_error_sum / self.baseline_sq_sum
        } else {
            f64::NAN
        };

        vec![
            Measurement::new("mean_absolute_error", mae),
            Measurement::new("root_mean_squared_error", rmse),
            Measurement::new("relative_absolute_error", rae),
            Measurement::new("relative_squared_error", rse),
        ]
    }
}
