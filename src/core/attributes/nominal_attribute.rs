use crate::core::attributes::Attribute;
use std::any::Any;
use std::collections::HashMap;

/// Attribute taking one of a fixed, ordered set of labels. Values are stored
/// in instances as the label's index in `values`.
#[derive(Debug)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new(name: String) -> NominalAttribute {
        NominalAttribute {
            name,
            values: Vec::new(),
            label_to_index: HashMap::new(),
        }
    }

    pub fn with_values(
        name: String,
        values: Vec<String>,
        label_to_index: HashMap<String, usize>,
    ) -> NominalAttribute {
        NominalAttribute {
            name,
            values,
            label_to_index,
        }
    }

    /// Builds the label→index map from the label list itself.
    pub fn from_labels<S: Into<String>>(name: S, labels: Vec<String>) -> NominalAttribute {
        let label_to_index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        NominalAttribute {
            name: name.into(),
            values: labels,
            label_to_index,
        }
    }

    pub fn index_of_value(&self, v: &str) -> Option<usize> {
        self.label_to_index.get(v).copied()
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_nominal(&self) -> bool {
        true
    }

    fn is_numeric(&self) -> bool {
        false
    }

    fn arff_representation(&self) -> String {
        format!("@attribute {} {{ {} }}", self.name, self.values.join(", "))
    }
}
