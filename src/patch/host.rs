//! Patch extraction against a structure host.

use std::collections::BTreeSet;
use std::path::Path;

use super::{AtomId, PatchExtractor, StructureAtom};
use crate::error::SurfpatchError;
use crate::loader;
use crate::options::Options;

/// The molecular viewer that owns structures and selections.
///
/// Implementations translate these calls into the host's own object model.
pub trait StructureHost {
    /// Atoms matched by a host selection expression, in host order.
    fn atoms(
        &self,
        selection: &str,
    ) -> Result<Vec<StructureAtom>, SurfpatchError>;

    /// Create structure `name` from the atoms `ids` of `source`.
    fn create_structure(
        &mut self,
        name: &str,
        source: &str,
        ids: &BTreeSet<AtomId>,
    ) -> Result<(), SurfpatchError>;

    /// Delete the structure or selection called `name`.
    fn delete_structure(&mut self, name: &str) -> Result<(), SurfpatchError>;
}

/// What to extract and where to put it.
#[derive(Debug, Clone, Copy)]
pub struct PatchRequest<'a> {
    /// Name of the structure to create.
    pub patch_name: &'a str,
    /// Surface mesh file.
    pub mesh_path: &'a Path,
    /// Host selection providing the candidate atoms.
    pub source: &'a str,
}

impl<'a> PatchRequest<'a> {
    /// Request over every atom the host knows (`all`).
    pub fn new(patch_name: &'a str, mesh_path: &'a Path) -> Self {
        Self {
            patch_name,
            mesh_path,
            source: "all",
        }
    }

    /// Restrict candidates to a host selection.
    #[must_use]
    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = source;
        self
    }
}

/// Load the request's mesh, select the atoms of `source` near it, and have
/// the host create the patch structure.
///
/// An empty patch creates nothing and leaves the source in place. When
/// `options.patch.remove_source` is set, the source is deleted after the
/// patch has been created. Two calls writing the same `patch_name` must be
/// serialized by the caller.
pub fn extract_patch_into<H: StructureHost + ?Sized>(
    host: &mut H,
    request: &PatchRequest<'_>,
    options: &Options,
) -> Result<BTreeSet<AtomId>, SurfpatchError> {
    let atoms = host.atoms(request.source)?;
    let mesh = loader::load_with_options(request.mesh_path, &options.loader)?;
    let ids = PatchExtractor::from_options(&options.patch).extract(&atoms, &mesh);

    if ids.is_empty() {
        log::warn!(
            "no atoms of '{}' within {:.2} Å of {}; '{}' not created",
            request.source,
            options.patch.distance_threshold,
            request.mesh_path.display(),
            request.patch_name
        );
        return Ok(ids);
    }

    host.create_structure(request.patch_name, request.source, &ids)?;
    if options.patch.remove_source {
        host.delete_structure(request.source)?;
    }
    Ok(ids)
}
