use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;

/// One labeled example. Values are `f64`; missing values are encoded as NaN.
/// Nominal values are stored as the label's index in the attribute's value
/// set. Stored instances are never mutated after construction.
pub trait Instance {
    fn weight(&self) -> f64;

    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn is_missing_at_index(&self, index: usize) -> bool;

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute>;

    fn class_index(&self) -> usize;

    fn class_value(&self) -> Option<f64>;

    fn is_class_missing(&self) -> bool;

    fn number_of_attributes(&self) -> usize;

    fn number_of_classes(&self) -> usize;

    fn to_vec(&self) -> Vec<f64>;

    fn header(&self) -> &InstanceHeader;
}
