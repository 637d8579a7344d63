use crate::classifiers::mknn::distance::normalized_distance;
use crate::classifiers::mknn::schema::UsableSchema;
use crate::core::instances::DenseInstance;

/// One search hit: a training-set row index and its distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

/// Exhaustive K-nearest-neighbor search over the stored rows.
///
/// Every row is scanned (no pruning), sorted ascending by distance with ties
/// broken by row index, and the first `k` are returned — all rows when fewer
/// than `k` exist. `exclude` removes one row from consideration, which the
/// validity pass uses so a row is never its own neighbor.
pub fn find_neighbors(
    rows: &[DenseInstance],
    schema: &UsableSchema,
    query: &[f64],
    k: usize,
    exclude: Option<usize>,
) -> Vec<Neighbor> {
    let mut scanned: Vec<Neighbor> = rows
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != exclude)
        .map(|(i, row)| Neighbor {
            row: i,
            distance: normalized_distance(query, row.values(), schema),
        })
        .collect();

    scanned.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.row.cmp(&b.row)));
    scanned.truncate(k);
    scanned
}
