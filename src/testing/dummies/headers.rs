use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{Dataset, DenseInstance};
use std::sync::Arc;

/// `features` numeric attributes `x1..xN` plus a nominal class `{A, B}` at
/// the last position.
pub fn header_numeric_features(features: usize) -> Arc<InstanceHeader> {
    let mut attrs: Vec<AttributeRef> = (1..=features)
        .map(|i| Arc::new(NumericAttribute::new(format!("x{i}"))) as AttributeRef)
        .collect();
    attrs.push(Arc::new(NominalAttribute::from_labels(
        "class",
        vec!["A".to_string(), "B".to_string()],
    )));
    Arc::new(InstanceHeader::new("dummy".into(), attrs, features))
}

/// `features` numeric attributes plus a numeric target at the last position.
pub fn header_numeric_target(features: usize) -> Arc<InstanceHeader> {
    let mut attrs: Vec<AttributeRef> = (1..=features)
        .map(|i| Arc::new(NumericAttribute::new(format!("x{i}"))) as AttributeRef)
        .collect();
    attrs.push(Arc::new(NumericAttribute::new("target".into())));
    Arc::new(InstanceHeader::new("dummy-reg".into(), attrs, features))
}

/// Classification dataset from `(features, label_code)` rows.
pub fn dataset_of(rows: &[(Vec<f64>, usize)]) -> Dataset {
    let features = rows.first().map(|(f, _)| f.len()).unwrap_or(1);
    let header = header_numeric_features(features);
    let mut dataset = Dataset::new(Arc::clone(&header));
    for (features, label) in rows {
        let mut values = features.clone();
        values.push(*label as f64);
        dataset
            .push(DenseInstance::new(Arc::clone(&header), values, 1.0))
            .expect("dummy row matches dummy header");
    }
    dataset
}

/// Regression dataset from `(features, target)` rows.
pub fn regression_dataset_of(rows: &[(Vec<f64>, f64)]) -> Dataset {
    let features = rows.first().map(|(f, _)| f.len()).unwrap_or(1);
    let header = header_numeric_target(features);
    let mut dataset = Dataset::new(Arc::clone(&header));
    for (features, target) in rows {
        let mut values = features.clone();
        values.push(*target);
        dataset
            .push(DenseInstance::new(Arc::clone(&header), values, 1.0))
            .expect("dummy row matches dummy header");
    }
    dataset
}

/// Query instance against `header` with the class slot left missing.
pub fn query_of(header: &Arc<InstanceHeader>, features: &[f64]) -> DenseInstance {
    let mut values = features.to_vec();
    values.push(f64::NAN);
    DenseInstance::new(Arc::clone(header), values, 1.0)
}
