use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
    pub weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> DenseInstance {
        DenseInstance {
            header,
            values,
            weight,
        }
    }

    /// Raw value slice, class position included.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn is_missing_at_index(&self, index: usize) -> bool {
        self.values.get(index).map(|v| v.is_nan()).unwrap_or(true)
    }

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.header.attribute_at_index(index)
    }

    fn class_index(&self) -> usize {
        self.header.class_index()
    }

    fn class_value(&self) -> Option<f64> {
        self.values.get(self.header.class_index()).copied()
    }

    fn is_class_missing(&self) -> bool {
        self.class_value().map(|v| v.is_nan()).unwrap_or(true)
    }

    fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::header_numeric_features;

    #[test]
    fn value_access_and_bounds() {
        let h = header_numeric_features(2);
        let inst = DenseInstance::new(Arc::clone(&h), vec![1.0, 2.0, 0.0], 1.0);
        assert_eq!(inst.value_at_index(0), Some(1.0));
        assert_eq!(inst.value_at_index(3), None);
        assert_eq!(inst.number_of_attributes(), 3);
        assert_eq!(inst.to_vec(), vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn class_accessors() {
        let h = header_numeric_features(2);
        let inst = DenseInstance::new(Arc::clone(&h), vec![1.0, 2.0, 1.0], 1.0);
        assert_eq!(inst.class_index(), 2);
        assert_eq!(inst.class_value(), Some(1.0));
        assert!(!inst.is_class_missing());
        assert_eq!(inst.number_of_classes(), 2);
    }

    #[test]
    fn nan_is_missing() {
        let h = header_numeric_features(2);
        let inst = DenseInstance::new(Arc::clone(&h), vec![f64::NAN, 2.0, f64::NAN], 1.0);
        assert!(inst.is_missing_at_index(0));
        assert!(!inst.is_missing_at_index(1));
        assert!(inst.is_class_missing());
        // out of bounds counts as missing
        assert!(inst.is_missing_at_index(9));
    }
}
