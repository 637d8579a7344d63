use std::io::{Error, ErrorKind};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::stream::Stream;

/// Synthetic labeled-cluster stream for demos and tests.
///
/// Each class `c` owns a centroid at `(10c, 10c, ...)` in
/// `num_features`-dimensional space; every emitted instance picks a class
/// round-robin and jitters each coordinate uniformly by `±spread` around the
/// centroid. With `spread` well below the centroid gap the classes are
/// linearly separable, which makes the generator a convenient oracle for
/// nearest-neighbor tests.
#[derive(Debug)]
pub struct ClustersGenerator {
    seed: u64,
    rng: StdRng,
    num_classes: usize,
    num_features: usize,
    spread: f64,
    header: Arc<InstanceHeader>,
    max_instances: Option<u64>,
    produced: u64,
    next_class: usize,
}

const CENTROID_GAP: f64 = 10.0;

impl ClustersGenerator {
    pub fn new(
        num_classes: usize,
        num_features: usize,
        spread: f64,
        max_instances: Option<u64>,
        seed: u64,
    ) -> Result<Self, Error> {
        if num_classes < 2 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "clusters generator needs at least 2 classes",
            ));
        }
        if num_features == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "clusters generator needs at least 1 feature",
            ));
        }
        if !(spread > 0.0) || !spread.is_finite() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "spread must be a positive finite number",
            ));
        }

        let mut attributes: Vec<AttributeRef> = (0..num_features)
            .map(|i| Arc::new(NumericAttribute::new(format!("attrib{}", i + 1))) as AttributeRef)
            .collect();
        let labels: Vec<String> = (0..num_classes).map(|c| format!("cluster{c}")).collect();
        attributes.push(Arc::new(NominalAttribute::from_labels("class", labels)));
        let header = Arc::new(InstanceHeader::new(
            "clusters".into(),
            attributes,
            num_features,
        ));

        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            num_classes,
            num_features,
            spread,
            header,
            max_instances,
            produced: 0,
            next_class: 0,
        })
    }
}

impl Stream for ClustersGenerator {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.max_instances.is_none_or(|max| self.produced < max)
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        if !self.has_more_instances() {
            return None;
        }

        let class = self.next_class;
        self.next_class = (self.next_class + 1) % self.num_classes;

        let centroid = class as f64 * CENTROID_GAP;
        let mut values = Vec::with_capacity(self.num_features + 1);
        for _ in 0..self.num_features {
            values.push(centroid + self.rng.random_range(-self.spread..=self.spread));
        }
        values.push(class as f64);

        self.produced += 1;
        Some(Box::new(DenseInstance::new(
            Arc::clone(&self.header),
            values,
            1.0,
        )))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        self.next_class = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_shape() {
        let g = ClustersGenerator::new(3, 2, 1.0, Some(1), 42).unwrap();
        let h = g.header();
        assert_eq!(h.number_of_attributes(), 3);
        assert_eq!(h.class_index(), 2);
        assert_eq!(h.number_of_classes(), 3);
        assert_eq!(h.attribute_at_index(0).unwrap().name(), "attrib1");
        assert_eq!(h.attribute_at_index(2).unwrap().name(), "class");
    }

    #[test]
    fn classes_round_robin_and_points_stay_near_centroids() {
        let mut g = ClustersGenerator::new(2, 2, 1.0, Some(20), 7).unwrap();
        for i in 0..20 {
            let inst = g.next_instance().unwrap();
            let v = inst.to_vec();
            let class = v[2] as usize;
            assert_eq!(class, i % 2);
            let centroid = class as f64 * CENTROID_GAP;
            assert!((v[0] - centroid).abs() <= 1.0);
            assert!((v[1] - centroid).abs() <= 1.0);
        }
        assert!(!g.has_more_instances());
    }

    #[test]
    fn restart_replays_the_same_sequence() {
        let mut g = ClustersGenerator::new(2, 3, 0.5, Some(50), 12345).unwrap();
        let first: Vec<Vec<f64>> = (0..30).map(|_| g.next_instance().unwrap().to_vec()).collect();
        g.restart().unwrap();
        let second: Vec<Vec<f64>> = (0..30).map(|_| g.next_instance().unwrap().to_vec()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            ClustersGenerator::new(1, 2, 1.0, None, 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            ClustersGenerator::new(2, 0, 1.0, None, 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            ClustersGenerator::new(2, 2, 0.0, None, 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }
}
