//! Nearest-mesh-vertex distance queries.

use glam::Vec3;
use rstar::RTree;

use crate::options::NearestSearch;

impl NearestSearch {
    /// Distance from each point to its nearest vertex, in point order.
    ///
    /// Every entry is `f32::INFINITY` when `vertices` is empty.
    #[must_use]
    pub fn min_distances(self, points: &[Vec3], vertices: &[Vec3]) -> Vec<f32> {
        match self {
            Self::BruteForce => min_vertex_distances(points, vertices),
            Self::RTree => min_vertex_distances_rtree(points, vertices),
        }
    }
}

/// Brute-force nearest-vertex distances: every point against every vertex.
#[must_use]
pub fn min_vertex_distances(points: &[Vec3], vertices: &[Vec3]) -> Vec<f32> {
    points
        .iter()
        .map(|p| {
            vertices
                .iter()
                .map(|v| p.distance_squared(*v))
                .fold(f32::INFINITY, f32::min)
                .sqrt()
        })
        .collect()
}

fn min_vertex_distances_rtree(points: &[Vec3], vertices: &[Vec3]) -> Vec<f32> {
    let tree = RTree::bulk_load(vertices.iter().map(|v| v.to_array()).collect());
    points
        .iter()
        .map(|p| {
            tree.nearest_neighbor(&p.to_array())
                .map_or(f32::INFINITY, |n| p.distance(Vec3::from_array(*n)))
        })
        .collect()
}
