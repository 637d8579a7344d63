use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};

/// Immutable schema shared by every instance of a dataset or stream:
/// relation name, ordered attributes and the designated class position.
#[derive(Debug)]
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
    pub class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|a| {
            let attr: &dyn Attribute = a.as_ref();
            attr
        })
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name() == name)
    }

    /// Number of class labels for a nominal class attribute, 0 otherwise.
    pub fn number_of_classes(&self) -> usize {
        match self.attributes.get(self.class_index) {
            Some(attr) => attr
                .as_any()
                .downcast_ref::<NominalAttribute>()
                .map(|nominal| nominal.values.len())
                .unwrap_or(0),
            None => 0,
        }
    }

    /// True when the class attribute is nominal.
    pub fn class_is_nominal(&self) -> bool {
        self.attributes
            .get(self.class_index)
            .map(|attr| attr.is_nominal())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{NominalAttribute, NumericAttribute};
    use std::sync::Arc;

    fn header() -> InstanceHeader {
        let attrs: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("x".into())),
            Arc::new(NominalAttribute::from_labels(
                "class",
                vec!["A".into(), "B".into()],
            )),
        ];
        InstanceHeader::new("toy".into(), attrs, 1)
    }

    #[test]
    fn accessors() {
        let h = header();
        assert_eq!(h.relation_name(), "toy");
        assert_eq!(h.number_of_attributes(), 2);
        assert_eq!(h.class_index(), 1);
        assert_eq!(h.index_of_attribute("x"), Some(0));
        assert_eq!(h.index_of_attribute("missing"), None);
        assert_eq!(h.attribute_at_index(0).unwrap().name(), "x");
        assert!(h.attribute_at_index(2).is_none());
    }

    #[test]
    fn nominal_class_counts_labels() {
        let h = header();
        assert!(h.class_is_nominal());
        assert_eq!(h.number_of_classes(), 2);
    }

    #[test]
    fn numeric_class_has_zero_classes() {
        let attrs: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("x".into())),
            Arc::new(NumericAttribute::new("y".into())),
        ];
        let h = InstanceHeader::new("reg".into(), attrs, 1);
        assert!(!h.class_is_nominal());
        assert_eq!(h.number_of_classes(), 0);
    }
}
