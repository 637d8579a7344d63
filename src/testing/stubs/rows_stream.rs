use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::Stream;
use crate::testing::dummies::header_numeric_features;
use std::io::Error;
use std::sync::Arc;

/// In-memory stream over `(features, label_code)` rows against the shared
/// dummy header (numeric features, nominal class `{A, B}` last).
pub struct RowsStream {
    pub header: Arc<InstanceHeader>,
    pub rows: Vec<(Vec<f64>, usize)>,
    idx: usize,
}

impl RowsStream {
    pub fn new(rows: Vec<(Vec<f64>, usize)>) -> Self {
        let features = rows.first().map(|(f, _)| f.len()).unwrap_or(1);
        Self {
            header: header_numeric_features(features),
            rows,
            idx: 0,
        }
    }
}

impl Stream for RowsStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.idx < self.rows.len()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        if !self.has_more_instances() {
            return None;
        }

        let (features, label) = &self.rows[self.idx];
        self.idx += 1;
        let mut values = features.clone();
        values.push(*label as f64);
        Some(Box::new(DenseInstance::new(
            Arc::clone(&self.header),
            values,
            1.0,
        )))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.idx = 0;
        Ok(())
    }
}
