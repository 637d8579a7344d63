use crate::core::instances::Instance;
use crate::evaluation::{Measurement, PerformanceEvaluator};

/// Holdout classification evaluator backed by a weighted confusion matrix.
///
/// Always reports:
/// - `accuracy`;
/// - `kappa` (Cohen's κ against the chance agreement of the marginals);
/// - `kappa_m` (κ against the predict-the-majority-class baseline).
///
/// Optionally (flag-gated):
/// - macro-averaged `precision` / `recall` / `f1`;
/// - per-class `precision_class_i` / `recall_class_i` / `f1_class_i`.
///
/// The matrix grows on demand if votes or labels mention classes beyond the
/// constructor hint.
pub struct BasicClassificationEvaluator {
    /// `confusion[truth][predicted]`, accumulated example weight.
    confusion: Vec<Vec<f64>>,
    total_weight: f64,
    num_classes: usize,
    show_pr_summary: bool,
    show_precision_per_class: bool,
    show_recall_per_class: bool,
    show_f1_per_class: bool,
}

impl BasicClassificationEvaluator {
    pub fn new(
        num_classes: usize,
        show_pr_summary: bool,
        show_precision_per_class: bool,
        show_recall_per_class: bool,
        show_f1_per_class: bool,
    ) -> Self {
        Self {
            confusion: vec![vec![0.0; num_classes]; num_classes],
            total_weight: 0.0,
            num_classes,
            show_pr_summary,
            show_precision_per_class,
            show_recall_per_class,
            show_f1_per_class,
        }
    }

    pub fn new_with_default_flags(num_classes: usize) -> Self {
        Self::new(num_classes, false, false, false, false)
    }

    #[inline]
    fn argmax(v: &[f64]) -> Option<usize> {
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for (i, &x) in v.iter().enumerate() {
            if !x.is_finite() {
                continue;
            }
            if best.is_none() || x > best_value {
                best = Some(i);
                best_value = x;
            }
        }
        best
    }

    #[inline]
    fn ensure_capacity(&mut self, k_hint: usize) {
        if k_hint <= self.num_classes {
            return;
        }
        for row in &mut self.confusion {
            row.resize(k_hint, 0.0);
        }
        self.confusion.resize_with(k_hint, || vec![0.0; k_hint]);
        self.num_classes = k_hint;
    }

    /// Weight of examples whose true class is `c`.
    fn truth_weight(&self, c: usize) -> f64 {
        self.confusion[c].iter().sum()
    }

    /// Weight of examples predicted as class `c`.
    fn predicted_weight(&self, c: usize) -> f64 {
        self.confusion.iter().map(|row| row[c]).sum()
    }

    fn correct_weight(&self) -> f64 {
        (0..self.num_classes).map(|c| self.confusion[c][c]).sum()
    }

    fn precision_of(&self, c: usize) -> f64 {
        let denom = self.predicted_weight(c);
        if denom > 0.0 {
            self.confusion[c][c] / denom
        } else {
            f64::NAN
        }
    }

    fn recall_of(&self, c: usize) -> f64 {
        let denom = self.truth_weight(c);
        if denom > 0.0 {
            self.confusion[c][c] / denom
        } else {
            f64::NAN
        }
    }

    fn f1_of(&self, c: usize) -> f64 {
        let p = self.precision_of(c);
        let r = self.recall_of(c);
        let s = p + r;
        if p.is_finite() && r.is_finite() && s > f64::EPSILON {
            2.0 * (p * r) / s
        } else {
            f64::NAN
        }
    }
}

impl PerformanceEvaluator for BasicClassificationEvaluator {
    fn reset(&mut self) {
        for row in &mut self.confusion {
            row.fill(0.0);
        }
        self.total_weight = 0.0;
    }

    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>) {
        let Some(yf) = example.class_value() else {
            return;
        };
        if !yf.is_finite() || yf < 0.0 {
            return;
        }
        let y = yf as usize;

        let Some(yhat) = Self::argmax(&class_votes) else {
            return;
        };

        let w = example.weight();
        if w <= 0.0 {
            return;
        }

        self.ensure_capacity(class_votes.len().max(y + 1));
        self.confusion[y][yhat] += w;
        self.total_weight += w;
    }

    fn performance(&self) -> Vec<Measurement> {
        if self.total_weight <= 0.0 {
            return vec![
                Measurement::new("accuracy", f64::NAN),
                Measurement::new("kappa", 0.0),
                Measurement::new("kappa_m", 0.0),
            ];
        }

        let p_o = self.correct_weight() / self.total_weight;
        let mut m = vec![Measurement::new("accuracy", p_o)];

        let mut p_e = 0.0;
        let mut acc_majority: f64 = 0.0;
        for c in 0..self.num_classes {
            let truth = self.truth_weight(c) / self.total_weight;
            let predicted = self.predicted_weight(c) / self.total_weight;
            p_e += truth * predicted;
            acc_majority = acc_majority.max(truth);
        }

        let kappa = {
            let d = 1.0 - p_e;
            if d.abs() > f64::EPSILON {
                (p_o - p_e) / d
            } else {
                f64::NAN
            }
        };
        let kappa_m = {
            let d = 1.0 - acc_majority;
            if d.abs() > f64::EPSILON {
                (p_o - acc_majority) / d
            } else {
                f64::NAN
            }
        };
        m.push(Measurement::new("kappa", kappa));
        m.push(Measurement::new("kappa_m", kappa_m));

        if self.show_pr_summary {
            let mut p_sum = 0.0;
            let mut p_cnt = 0usize;
            let mut r_sum = 0.0;
            let mut r_cnt = 0usize;
            for c in 0..self.num_classes {
                let p = self.precision_of(c);
                if p.is_finite() {
                    p_sum += p;
                    p_cnt += 1;
                }
                let r = self.recall_of(c);
                if r.is_finite() {
                    r_sum += r;
                    r_cnt += 1;
                }
            }

            let macro_precision = if p_cnt > 0 {
                p_sum / (p_cnt as f64)
            } else {
                f64::NAN
            };
            let macro_recall = if r_cnt > 0 {
                r_sum / (r_cnt as f64)
            } else {
                f64::NAN
            };
            let macro_f1 = {
                let s = macro_precision + macro_recall;
                if macro_precision.is_finite() && macro_recall.is_finite() && s > f64::EPSILON {
                    2.0 * (macro_precision * macro_recall) / s
                } else {
                    f64::NAN
                }
            };

            m.push(Measurement::new("precision", macro_precision));
            m.push(Measurement::new("recall", macro_recall));
            m.push(Measurement::new("f1", macro_f1));
        }

        if self.show_precision_per_class {
            for c in 0..self.num_classes {
                m.push(Measurement::new(
                    &format!("precision_class_{c}"),
                    self.precision_of(c),
                ));
            }
        }
        if self.show_recall_per_class {
            for c in 0..self.num_classes {
                m.push(Measurement::new(
                    &format!("recall_class_{c}"),
                    self.recall_of(c),
                ));
            }
        }
        if self.show_f1_per_class {
            for c in 0..self.num_classes {
                m.push(Measurement::new(&format!("f1_class_{c}"), self.f1_of(c)));
            }
        }
        m
    }
}
