//! Structure patch extraction: the atoms lying close to a surface mesh.
//!
//! A patch is the set of atom identifiers whose distance to the nearest
//! mesh vertex is strictly below a threshold. [`extract_patch`] computes it
//! by brute force; [`PatchExtractor`] does the same with a configurable
//! [`NearestSearch`] strategy. [`extract_patch_into`] runs the whole
//! workflow against a [`StructureHost`].

mod host;
mod search;
mod sequence;

use std::collections::BTreeSet;

use glam::Vec3;

pub use self::host::{extract_patch_into, PatchRequest, StructureHost};
pub use self::search::min_vertex_distances;
pub use self::sequence::{find_sequence, patch_sequence, ResidueSpan};
use crate::mesh::Mesh;
use crate::options::{NearestSearch, PatchOptions};

/// Atom identifier, unique within one loaded structure.
pub type AtomId = u32;

/// An atom as handed over by the structure host. Read-only input.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    /// Host identifier of the atom.
    pub id: AtomId,
    /// Cartesian position in angstroms.
    pub position: Vec3,
    /// Three-letter residue name, e.g. `LYS`.
    pub residue_name: String,
    /// Residue sequence number.
    pub residue_number: i32,
    /// Chain identifier.
    pub chain: String,
}

impl StructureAtom {
    /// Atom record from its parts.
    pub fn new(
        id: AtomId,
        position: Vec3,
        residue_name: impl Into<String>,
        residue_number: i32,
        chain: impl Into<String>,
    ) -> Self {
        Self {
            id,
            position,
            residue_name: residue_name.into(),
            residue_number,
            chain: chain.into(),
        }
    }
}

/// Brute-force patch: ids of atoms closer than `distance_threshold` to any
/// vertex of `mesh`.
#[must_use]
pub fn extract_patch(
    atoms: &[StructureAtom],
    mesh: &Mesh,
    distance_threshold: f32,
) -> BTreeSet<AtomId> {
    PatchExtractor::new(distance_threshold).extract(atoms, mesh)
}

/// Patch extraction with a fixed threshold and search strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchExtractor {
    distance_threshold: f32,
    search: NearestSearch,
}

impl PatchExtractor {
    /// Brute-force extractor for `distance_threshold` angstroms.
    #[must_use]
    pub fn new(distance_threshold: f32) -> Self {
        Self {
            distance_threshold,
            search: NearestSearch::BruteForce,
        }
    }

    /// Extractor configured from options.
    #[must_use]
    pub fn from_options(options: &PatchOptions) -> Self {
        Self {
            distance_threshold: options.distance_threshold,
            search: options.search,
        }
    }

    /// Same extractor with a different search strategy.
    #[must_use]
    pub fn with_search(mut self, search: NearestSearch) -> Self {
        self.search = search;
        self
    }

    /// Distance threshold in angstroms.
    #[must_use]
    pub fn distance_threshold(&self) -> f32 {
        self.distance_threshold
    }

    /// Ids of the atoms whose nearest mesh vertex is strictly closer than
    /// the threshold. Empty atoms or an empty mesh give an empty set.
    #[must_use]
    pub fn extract(
        &self,
        atoms: &[StructureAtom],
        mesh: &Mesh,
    ) -> BTreeSet<AtomId> {
        if atoms.is_empty() || mesh.vertices().is_empty() {
            return BTreeSet::new();
        }

        let positions: Vec<Vec3> = atoms.iter().map(|a| a.position).collect();
        let distances = self.search.min_distances(&positions, mesh.vertices());

        let (nearest, farthest) = distances
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| {
                (lo.min(d), hi.max(d))
            });
        log::debug!(
            "{} atoms vs {} vertices: nearest {nearest:.2} Å, farthest \
             {farthest:.2} Å",
            atoms.len(),
            mesh.vertex_count()
        );

        let selected: BTreeSet<AtomId> = atoms
            .iter()
            .zip(&distances)
            .filter(|(_, &d)| d < self.distance_threshold)
            .map(|(a, _)| a.id)
            .collect();

        log::info!(
            "patch: {} of {} atoms within {:.2} Å of the surface",
            selected.len(),
            atoms.len(),
            self.distance_threshold
        );
        selected
    }
}
