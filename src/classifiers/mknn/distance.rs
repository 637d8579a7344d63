use crate::classifiers::mknn::schema::UsableSchema;

/// Normalized root-mean-square difference between two value vectors over the
/// usable attributes: numeric positions contribute their squared difference,
/// nominal positions 0 when equal and 1 when different, and a missing value
/// on either side contributes the fixed penalty 1. The sum is divided by the
/// number of usable attributes before the square root.
///
/// Symmetric and deterministic. The missing-value penalty means a distance
/// of zero does not imply equality once missing values are involved.
/// Callers must guarantee `schema.num_usable() >= 1` (enforced at fit).
pub fn normalized_distance(a: &[f64], b: &[f64], schema: &UsableSchema) -> f64 {
    debug_assert!(schema.num_usable() > 0);

    let mut sum = 0.0;
    for i in 0..schema.len() {
        if !schema.is_usable(i) {
            continue;
        }
        let va = a.get(i).copied().unwrap_or(f64::NAN);
        let vb = b.get(i).copied().unwrap_or(f64::NAN);
        let diff = if va.is_nan() || vb.is_nan() {
            1.0
        } else if schema.is_nominal(i) {
            if va == vb { 0.0 } else { 1.0 }
        } else {
            va - vb
        };
        sum += diff * diff;
    }
    (sum / schema.num_usable() as f64).sqrt()
}
