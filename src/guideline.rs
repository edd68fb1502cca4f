//! Snap guideline selection: the clouds nearest to the current target.
//!
//! For every non-selected top-level cloud the score is the smallest distance
//! between any corner of the target rect and any corner of the cloud (16
//! pairs). Scores live in a side-table for the duration of one call. The scan
//! is linear in the number of clouds and runs on every drag frame.

#[cfg(test)]
#[path = "guideline_test.rs"]
mod guideline_test;

use std::collections::HashMap;

use crate::doc::{Cloud, CloudId};
use crate::geom::Quad;

/// Up to `limit` clouds from `clouds`, nearest first, excluding `selected`.
#[must_use]
pub fn nearest_clouds<'a>(rect: &Quad, clouds: &'a [Cloud], selected: &[CloudId], limit: usize) -> Vec<&'a Cloud> {
    let scores: HashMap<&str, f64> = clouds
        .iter()
        .filter(|cloud| !selected.contains(&cloud.id))
        .map(|cloud| (cloud.id.as_str(), rect.min_corner_distance(&cloud.quad())))
        .collect();

    let mut candidates: Vec<&Cloud> = clouds.iter().filter(|cloud| scores.contains_key(cloud.id.as_str())).collect();
    candidates.sort_by(|a, b| {
        let da = scores.get(a.id.as_str()).copied().unwrap_or(f64::INFINITY);
        let db = scores.get(b.id.as_str()).copied().unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });
    candidates.truncate(limit);
    candidates
}
