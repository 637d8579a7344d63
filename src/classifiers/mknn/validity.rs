use crate::classifiers::mknn::neighbors::find_neighbors;
use crate::classifiers::mknn::schema::UsableSchema;
use crate::core::instances::{DenseInstance, Instance};
use std::thread;

/// Computes the validity score of every training row: the fraction of the
/// row's own K nearest *other* rows that share its class label, in [0, 1].
///
/// This is the O(N²)-distance step of training and bounds the scale the
/// learner is suited for (small-to-moderate datasets). Per-row scores are
/// independent, so rows are fanned out across worker threads, each writing a
/// disjoint chunk of the output. The result is identical to the sequential
/// computation.
pub fn compute_validity(rows: &[DenseInstance], schema: &UsableSchema, k: usize) -> Vec<f64> {
    let n = rows.len();
    let mut validity = vec![0.0; n];
    if n == 0 {
        return validity;
    }

    let workers = thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
        .min(n);

    if workers <= 1 {
        for (row, slot) in validity.iter_mut().enumerate() {
            *slot = validity_of_row(rows, schema, k, row);
        }
        return validity;
    }

    let chunk_len = n.div_ceil(workers);
    thread::scope(|scope| {
        for (chunk, out) in validity.chunks_mut(chunk_len).enumerate() {
            let start = chunk * chunk_len;
            scope.spawn(move || {
                for (offset, slot) in out.iter_mut().enumerate() {
                    *slot = validity_of_row(rows, schema, k, start + offset);
                }
            });
        }
    });
    validity
}

/// A row with no neighbors (single-row training set) scores 0.
fn validity_of_row(rows: &[DenseInstance], schema: &UsableSchema, k: usize, row: usize) -> f64 {
    let query = rows[row].values();
    let neighbors = find_neighbors(rows, schema, query, k, Some(row));
    if neighbors.is_empty() {
        return 0.0;
    }

    let label = rows[row].class_value();
    let agree = neighbors
        .iter()
        .filter(|nb| rows[nb.row].class_value() == label)
        .count();
    agree as f64 / neighbors.len() as f64
}
