use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::Stream;
use std::io::{Error, ErrorKind};
use std::sync::Arc;

/// Ordered batch of instances sharing one header. This is the training-set
/// container consumed by batch learners; rows keep their insertion order so
/// classifiers can refer to them by index.
pub struct Dataset {
    header: Arc<InstanceHeader>,
    rows: Vec<DenseInstance>,
}

impl Dataset {
    pub fn new(header: Arc<InstanceHeader>) -> Dataset {
        Dataset {
            header,
            rows: Vec::new(),
        }
    }

    /// Drains up to `max_instances` rows (all when `None`) from a stream.
    pub fn from_stream(
        stream: &mut dyn Stream,
        max_instances: Option<u64>,
    ) -> Result<Dataset, Error> {
        let src = stream.header();
        let header = Arc::new(InstanceHeader::new(
            src.relation_name().to_string(),
            src.attributes.clone(),
            src.class_index(),
        ));
        let mut dataset = Dataset::new(Arc::clone(&header));

        while stream.has_more_instances() {
            if let Some(max) = max_instances {
                if dataset.len() as u64 >= max {
                    break;
                }
            }
            let Some(instance) = stream.next_instance() else {
                break;
            };
            dataset.push(DenseInstance::new(
                Arc::clone(&header),
                instance.to_vec(),
                instance.weight(),
            ))?;
        }
        Ok(dataset)
    }

    /// Appends a row. The row must match the dataset's attribute count.
    pub fn push(&mut self, row: DenseInstance) -> Result<(), Error> {
        if row.values().len() != self.header.number_of_attributes() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "row has {} values, header declares {} attributes",
                    row.values().len(),
                    self.header.number_of_attributes()
                ),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&DenseInstance> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[DenseInstance] {
        &self.rows
    }
}
