//! Set-overlap similarity between token sets

use std::collections::HashSet;

/// Jaccard similarity between two token sets: |A ∩ B| / |A ∪ B|.
///
/// Returns a score in [0, 1]. An empty set on either side scores 0, so a
/// message stripped bare by normalization can never match a sample.
pub fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
