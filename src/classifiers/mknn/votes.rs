use crate::classifiers::mknn::neighbors::Neighbor;
use crate::core::instances::{DenseInstance, Instance};

/// Voting knobs fixed at prediction time.
pub struct VoteConfig {
    /// Scale each vote by `1 / (distance + 0.5)` on top of its validity.
    pub weighted: bool,
    /// Exclude neighbors whose validity falls below this value.
    pub validity_threshold: Option<f64>,
}

impl VoteConfig {
    fn admits(&self, validity: f64) -> bool {
        self.validity_threshold.is_none_or(|t| validity >= t)
    }

    fn vote_weight(&self, validity: f64, distance: f64) -> f64 {
        if self.weighted {
            // the +0.5 keeps zero-distance neighbors from dominating outright
            validity / (distance + 0.5)
        } else {
            validity
        }
    }
}

/// Accumulates neighbor votes into a class probability distribution.
///
/// Buckets start from a Laplace-style prior of `1 / max(1, N)` per class so
/// no class ever carries exactly zero mass; each admitted neighbor then adds
/// `validity * (1/(distance+0.5) when weighted)` to its class bucket.
/// Accumulation follows the neighbor order (ascending distance, ties by row
/// index), and the final distribution is normalized to sum 1.
pub fn class_distribution(
    neighbors: &[Neighbor],
    rows: &[DenseInstance],
    validity: &[f64],
    num_classes: usize,
    config: &VoteConfig,
) -> Vec<f64> {
    let n = rows.len().max(1);
    let mut distribution = vec![1.0 / n as f64; num_classes];
    let mut total = num_classes as f64 / n as f64;

    for neighbor in neighbors {
        let score = validity[neighbor.row];
        if !config.admits(score) {
            continue;
        }
        let Some(label) = rows[neighbor.row].class_value() else {
            continue;
        };
        let class = label as usize;
        if class >= num_classes {
            continue;
        }
        let weight = config.vote_weight(score, neighbor.distance);
        distribution[class] += weight;
        total += weight;
    }

    if total > 0.0 {
        for mass in &mut distribution {
            *mass /= total;
        }
    }
    distribution
}

/// Validity-and-distance-weighted average of neighbor class values, for
/// numeric classes.
///
/// When every admitted weight is zero the unweighted mean of the admitted
/// neighbors is returned; when the validity threshold admits no neighbor at
/// all, the unweighted mean over the whole neighborhood. `neighbors` must be
/// non-empty (the classifier raises `EmptyNeighborhood` first).
pub fn weighted_estimate(
    neighbors: &[Neighbor],
    rows: &[DenseInstance],
    validity: &[f64],
    config: &VoteConfig,
) -> f64 {
    debug_assert!(!neighbors.is_empty());

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut admitted_sum = 0.0;
    let mut admitted = 0usize;
    let mut all_sum = 0.0;
    let mut all = 0usize;

    for neighbor in neighbors {
        let Some(y) = rows[neighbor.row].class_value() else {
            continue;
        };
        all_sum += y;
        all += 1;

        let score = validity[neighbor.row];
        if !config.admits(score) {
            continue;
        }
        admitted_sum += y;
        admitted += 1;

        let weight = config.vote_weight(score, neighbor.distance);
        weighted_sum += weight * y;
        weight_total += weight;
    }

    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else if admitted > 0 {
        admitted_sum / admitted as f64
    } else if all > 0 {
        all_sum / all as f64
    } else {
        f64::NAN
    }
}
