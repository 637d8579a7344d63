use crate::classifiers::classifier::{BatchClassifier, Prediction};
use crate::classifiers::error::ClassifierError;
use crate::classifiers::mknn::neighbors::find_neighbors;
use crate::classifiers::mknn::schema::UsableSchema;
use crate::classifiers::mknn::validity::compute_validity;
use crate::classifiers::mknn::votes::{VoteConfig, class_distribution, weighted_estimate};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{Dataset, DenseInstance, Instance};
use std::sync::Arc;

/// Modified K-nearest-neighbor classifier.
///
/// Plain KNN refined two ways: each stored row carries a *validity* score —
/// the class agreement of its own K nearest neighbors, computed once at
/// training time — that scales its vote, and with `weighted` enabled each
/// vote is further scaled by the inverse of the neighbor's distance to the
/// query (`1 / (distance + 0.5)`).
///
/// `fit` snapshots the training set (rows with a missing class label are
/// dropped first) into an immutable model that each subsequent `fit`
/// replaces wholesale. `predict` only reads that model, so a fitted
/// classifier can answer queries from multiple threads.
pub struct MknnClassifier {
    k: usize,
    weighted: bool,
    validity_threshold: Option<f64>,
    model: Option<Arc<FittedModel>>,
}

/// Everything `predict` needs, frozen at fit time.
struct FittedModel {
    rows: Vec<DenseInstance>,
    schema: UsableSchema,
    validity: Vec<f64>,
    num_classes: usize,
    class_is_nominal: bool,
}

pub const DEFAULT_K: usize = 3;

impl MknnClassifier {
    pub fn new(k: usize, weighted: bool) -> Result<MknnClassifier, ClassifierError> {
        if k == 0 {
            return Err(ClassifierError::InvalidOption(
                "k must be at least 1".into(),
            ));
        }
        Ok(MknnClassifier {
            k,
            weighted,
            validity_threshold: None,
            model: None,
        })
    }

    /// Excludes neighbors with validity below `threshold` from voting.
    pub fn with_validity_threshold(
        mut self,
        threshold: f64,
    ) -> Result<MknnClassifier, ClassifierError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ClassifierError::InvalidOption(format!(
                "validity threshold {threshold} outside [0, 1]"
            )));
        }
        self.validity_threshold = Some(threshold);
        Ok(self)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn validity_threshold(&self) -> Option<f64> {
        self.validity_threshold
    }

    /// Number of stored training rows, once fitted.
    pub fn num_training(&self) -> Option<usize> {
        self.model.as_ref().map(|m| m.rows.len())
    }

    /// Per-row validity scores of the fitted model, in row order.
    pub fn validity_scores(&self) -> Option<&[f64]> {
        self.model.as_ref().map(|m| m.validity.as_slice())
    }

    fn check_capabilities(header: &InstanceHeader) -> Result<(), ClassifierError> {
        if header.class_index() >= header.number_of_attributes() {
            return Err(ClassifierError::IncompatibleData(format!(
                "class index {} out of range for {} attributes",
                header.class_index(),
                header.number_of_attributes()
            )));
        }
        for attr in &header.attributes {
            if !attr.is_nominal() && !attr.is_numeric() {
                return Err(ClassifierError::IncompatibleData(format!(
                    "attribute '{}' is neither nominal nor numeric",
                    attr.name()
                )));
            }
        }
        Ok(())
    }

    fn check_labels(
        rows: &[DenseInstance],
        num_classes: usize,
    ) -> Result<(), ClassifierError> {
        for row in rows {
            let Some(label) = row.class_value() else {
                continue;
            };
            if !label.is_finite() || label < 0.0 || label.fract() != 0.0 {
                return Err(ClassifierError::IncompatibleData(format!(
                    "class label {label} is not a valid label code"
                )));
            }
            if label as usize >= num_classes {
                return Err(ClassifierError::IncompatibleData(format!(
                    "class label {label} outside the declared set of {num_classes} labels"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MknnClassifier {
    fn default() -> Self {
        MknnClassifier {
            k: DEFAULT_K,
            weighted: false,
            validity_threshold: None,
            model: None,
        }
    }
}

impl BatchClassifier for MknnClassifier {
    fn fit(&mut self, data: &Dataset) -> Result<(), ClassifierError> {
        let header = data.header();
        Self::check_capabilities(header)?;

        let schema = UsableSchema::from_header(header);
        if schema.num_usable() == 0 {
            return Err(ClassifierError::EmptySchema);
        }

        let rows: Vec<DenseInstance> = data
            .rows()
            .iter()
            .filter(|row| !row.is_class_missing())
            .cloned()
            .collect();

        let class_is_nominal = header.class_is_nominal();
        let num_classes = header.number_of_classes();
        if class_is_nominal {
            Self::check_labels(&rows, num_classes)?;
        }

        let validity = compute_validity(&rows, &schema, self.k);

        self.model = Some(Arc::new(FittedModel {
            rows,
            schema,
            validity,
            num_classes,
            class_is_nominal,
        }));
        Ok(())
    }

    fn predict(&self, instance: &dyn Instance) -> Result<Prediction, ClassifierError> {
        let model = self.model.as_ref().ok_or(ClassifierError::NotFitted)?;
        if model.rows.is_empty() {
            return Err(ClassifierError::EmptyNeighborhood);
        }

        let query = instance.to_vec();
        let k = self.k.min(model.rows.len());
        let neighbors = find_neighbors(&model.rows, &model.schema, &query, k, None);

        let config = VoteConfig {
            weighted: self.weighted,
            validity_threshold: self.validity_threshold,
        };
        if model.class_is_nominal {
            Ok(Prediction::Distribution(class_distribution(
                &neighbors,
                &model.rows,
                &model.validity,
                model.num_classes,
                &config,
            )))
        } else {
            Ok(Prediction::Value(weighted_estimate(
                &neighbors,
                &model.rows,
                &model.validity,
                &config,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{
        dataset_of, header_numeric_features, query_of, regression_dataset_of,
    };
    use std::sync::Arc as StdArc;

    const EPS: f64 = 1e-9;

    fn four_point_dataset() -> Dataset {
        // 1 usable numeric attribute, values [0, 1, 2, 10], classes [A, A, A, B]
        dataset_of(&[
            (vec![0.0], 0),
            (vec![1.0], 0),
            (vec![2.0], 0),
            (vec![10.0], 1),
        ])
    }

    #[test]
    fn ctor_rejects_zero_k_and_bad_threshold() {
        assert!(matches!(
            MknnClassifier::new(0, false),
            Err(ClassifierError::InvalidOption(_))
        ));
        let c = MknnClassifier::new(3, false).unwrap();
        assert!(matches!(
            c.with_validity_threshold(1.5),
            Err(ClassifierError::InvalidOption(_))
        ));
    }

    #[test]
    fn default_k_is_three() {
        let c = MknnClassifier::default();
        assert_eq!(c.k(), DEFAULT_K);
        assert_eq!(c.k(), 3);
        assert!(!c.is_weighted());
        assert!(c.validity_threshold().is_none());
    }

    #[test]
    fn predict_before_fit_fails() {
        let c = MknnClassifier::default();
        let q = query_of(&header_numeric_features(1), &[0.0]);
        assert!(matches!(c.predict(&q), Err(ClassifierError::NotFitted)));
    }

    #[test]
    fn fit_drops_missing_class_rows() {
        let mut d = four_point_dataset();
        let h = StdArc::clone(d.header());
        d.push(DenseInstance::new(StdArc::clone(&h), vec![5.0, f64::NAN], 1.0))
            .unwrap();

        let mut c = MknnClassifier::default();
        c.fit(&d).unwrap();
        assert_eq!(c.num_training(), Some(4));
    }

    #[test]
    fn empty_after_dropping_missing_classes_yields_empty_neighborhood() {
        let h = header_numeric_features(1);
        let mut d = Dataset::new(StdArc::clone(&h));
        d.push(DenseInstance::new(StdArc::clone(&h), vec![1.0, f64::NAN], 1.0))
            .unwrap();
        d.push(DenseInstance::new(StdArc::clone(&h), vec![2.0, f64::NAN], 1.0))
            .unwrap();

        let mut c = MknnClassifier::default();
        c.fit(&d).unwrap();
        assert_eq!(c.num_training(), Some(0));

        let q = query_of(&h, &[0.0]);
        assert!(matches!(
            c.predict(&q),
            Err(ClassifierError::EmptyNeighborhood)
        ));
    }

    #[test]
    fn class_only_schema_is_rejected() {
        use crate::core::attributes::{AttributeRef, NominalAttribute};
        use crate::core::instance_header::InstanceHeader;

        let attrs: Vec<AttributeRef> = vec![StdArc::new(NominalAttribute::from_labels(
            "class",
            vec!["A".into(), "B".into()],
        ))];
        let h = StdArc::new(InstanceHeader::new("degenerate".into(), attrs, 0));
        let mut d = Dataset::new(StdArc::clone(&h));
        d.push(DenseInstance::new(StdArc::clone(&h), vec![0.0], 1.0))
            .unwrap();

        let mut c = MknnClassifier::default();
        assert!(matches!(c.fit(&d), Err(ClassifierError::EmptySchema)));
        // a failed fit leaves the classifier unfitted
        assert!(c.num_training().is_none());
    }

    #[test]
    fn out_of_range_label_codes_are_rejected() {
        let d = dataset_of(&[(vec![0.0], 0), (vec![1.0], 7)]);
        let mut c = MknnClassifier::default();
        assert!(matches!(
            c.fit(&d),
            Err(ClassifierError::IncompatibleData(_))
        ));
    }

    #[test]
    fn hand_computed_validity_and_prediction() {
        let d = four_point_dataset();
        let mut c = MknnClassifier::new(3, false).unwrap();
        c.fit(&d).unwrap();

        let v = c.validity_scores().unwrap();
        assert!((v[0] - 2.0 / 3.0).abs() < EPS);

        // query 0.5: neighbors are rows 0, 1, 2 - all class A
        let q = query_of(d.header(), &[0.5]);
        let p = c.predict(&q).unwrap();
        let dist = p.distribution().unwrap();
        // prior mass is 2/4 against ~2.0 of accumulated votes
        assert!(dist[0] > 0.89, "dist = {dist:?}");
        assert!((dist.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert_eq!(p.predicted_class(), Some(0));
    }

    #[test]
    fn distribution_always_sums_to_one() {
        let d = dataset_of(&[
            (vec![0.0], 0),
            (vec![3.0], 1),
            (vec![4.0], 1),
            (vec![8.0], 0),
            (vec![9.0], 1),
        ]);
        for k in 1..=5 {
            for weighted in [false, true] {
                let mut c = MknnClassifier::new(k, weighted).unwrap();
                c.fit(&d).unwrap();
                let p = c.predict(&query_of(d.header(), &[3.7])).unwrap();
                let sum: f64 = p.distribution().unwrap().iter().sum();
                assert!((sum - 1.0).abs() < EPS, "k={k} weighted={weighted}");
            }
        }
    }

    #[test]
    fn k_equal_to_dataset_size_is_deterministic() {
        let d = four_point_dataset();
        let mut c = MknnClassifier::new(4, true).unwrap();
        c.fit(&d).unwrap();
        let q = query_of(d.header(), &[1.5]);
        let first = c.predict(&q).unwrap();
        for _ in 0..10 {
            assert_eq!(c.predict(&q).unwrap(), first);
        }
    }

    #[test]
    fn k_larger_than_dataset_is_clamped() {
        let d = four_point_dataset();
        let mut c = MknnClassifier::new(100, false).unwrap();
        c.fit(&d).unwrap();
        let p = c.predict(&query_of(d.header(), &[0.0])).unwrap();
        assert!(p.distribution().is_some());
    }

    #[test]
    fn refit_replaces_the_model_wholesale() {
        let mut c = MknnClassifier::default();
        c.fit(&four_point_dataset()).unwrap();
        assert_eq!(c.num_training(), Some(4));

        let smaller = dataset_of(&[(vec![0.0], 1), (vec![1.0], 1)]);
        c.fit(&smaller).unwrap();
        assert_eq!(c.num_training(), Some(2));
        let p = c.predict(&query_of(smaller.header(), &[0.5])).unwrap();
        assert_eq!(p.predicted_class(), Some(1));
    }

    #[test]
    fn validity_threshold_gates_unreliable_rows() {
        // rows 0/1: class 0 cluster; row 2: a class-1 point inside it whose
        // neighborhood disagrees with it entirely (validity 0)
        let d = dataset_of(&[(vec![0.0], 0), (vec![0.4], 0), (vec![0.2], 1)]);
        let mut gated = MknnClassifier::new(3, false)
            .unwrap()
            .with_validity_threshold(0.5)
            .unwrap();
        gated.fit(&d).unwrap();

        let q = query_of(d.header(), &[0.2]);
        let p = gated.predict(&q).unwrap();
        // the outlier's vote is gated out, class 0 wins decisively
        assert_eq!(p.predicted_class(), Some(0));
        let dist = p.distribution().unwrap();
        assert!(dist[0] > 0.75, "dist = {dist:?}");
    }

    #[test]
    fn numeric_class_predicts_weighted_average() {
        let d = regression_dataset_of(&[
            (vec![0.0], 10.0),
            (vec![1.0], 20.0),
            (vec![10.0], 100.0),
        ]);
        let mut c = MknnClassifier::new(2, false).unwrap();
        c.fit(&d).unwrap();

        let p = c.predict(&query_of(d.header(), &[0.5])).unwrap();
        let y = p.value().unwrap();
        // exact-equality validity over real targets is 0, so the estimate
        // falls back to the plain neighbor mean
        assert!((y - 15.0).abs() < EPS);
    }

    #[test]
    fn queries_with_missing_values_still_predict() {
        let d = dataset_of(&[
            (vec![0.0, 0.0], 0),
            (vec![1.0, 1.0], 0),
            (vec![9.0, 9.0], 1),
        ]);
        let mut c = MknnClassifier::default();
        c.fit(&d).unwrap();
        let p = c.predict(&query_of(d.header(), &[f64::NAN, 0.5])).unwrap();
        let sum: f64 = p.distribution().unwrap().iter().sum();
        assert!((sum - 1.0).abs() < EPS);
    }
}
