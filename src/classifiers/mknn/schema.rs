use crate::core::instance_header::InstanceHeader;

/// Per-position attribute usability, computed once per fit and threaded
/// through the fitted model. An attribute is usable when it is not the class
/// attribute and is nominal or numeric; `num_usable` is the normalizer of
/// the distance metric and must be at least 1 for distances to exist.
pub struct UsableSchema {
    usable: Vec<bool>,
    nominal: Vec<bool>,
    num_usable: usize,
}

impl UsableSchema {
    pub fn from_header(header: &InstanceHeader) -> UsableSchema {
        let class_index = header.class_index();
        let mut usable = Vec::with_capacity(header.number_of_attributes());
        let mut nominal = Vec::with_capacity(header.number_of_attributes());
        for (i, attr) in header.attributes.iter().enumerate() {
            usable.push(i != class_index && (attr.is_nominal() || attr.is_numeric()));
            nominal.push(attr.is_nominal());
        }
        let num_usable = usable.iter().filter(|u| **u).count();
        UsableSchema {
            usable,
            nominal,
            num_usable,
        }
    }

    pub fn len(&self) -> usize {
        self.usable.len()
    }

    pub fn is_usable(&self, index: usize) -> bool {
        self.usable.get(index).copied().unwrap_or(false)
    }

    pub fn is_nominal(&self, index: usize) -> bool {
        self.nominal.get(index).copied().unwrap_or(false)
    }

    pub fn num_usable(&self) -> usize {
        self.num_usable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
    use std::sync::Arc;

    #[test]
    fn class_attribute_is_not_usable() {
        let attrs: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("x".into())),
            Arc::new(NominalAttribute::from_labels("color", vec!["r".into(), "g".into()])),
            Arc::new(NominalAttribute::from_labels("class", vec!["A".into(), "B".into()])),
        ];
        let header = InstanceHeader::new("toy".into(), attrs, 2);
        let schema = UsableSchema::from_header(&header);

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.num_usable(), 2);
        assert!(schema.is_usable(0));
        assert!(schema.is_usable(1));
        assert!(!schema.is_usable(2));
        assert!(!schema.is_nominal(0));
        assert!(schema.is_nominal(1));
    }

    #[test]
    fn class_only_header_has_no_usable_attributes() {
        let attrs: Vec<AttributeRef> = vec![Arc::new(NominalAttribute::from_labels(
            "class",
            vec!["A".into(), "B".into()],
        ))];
        let header = InstanceHeader::new("degenerate".into(), attrs, 0);
        let schema = UsableSchema::from_header(&header);
        assert_eq!(schema.num_usable(), 0);
    }

    #[test]
    fn out_of_range_positions_are_not_usable() {
        let attrs: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("x".into())),
            Arc::new(NumericAttribute::new("y".into())),
        ];
        let header = InstanceHeader::new("reg".into(), attrs, 1);
        let schema = UsableSchema::from_header(&header);
        assert!(!schema.is_usable(5));
        assert!(!schema.is_nominal(5));
    }
}
