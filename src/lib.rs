// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Surface mesh loading and structure patch extraction.
//!
//! Surfpatch reads triangulated molecular surfaces (PLY, optionally OBJ) into
//! a uniform [`mesh::Mesh`] and selects the atoms of a structure that lie
//! within a distance of that surface.
//!
//! # Key entry points
//!
//! - [`loader::load`] - read a mesh with the best available backend
//! - [`mesh::Mesh`] - vertices, triangles, and `vertex_`/`face_` attributes
//! - [`patch::extract_patch`] - atom ids within a threshold of a mesh
//! - [`patch::extract_patch_into`] - the full workflow against a
//!   [`patch::StructureHost`]
//! - [`util::ranges::compress`] - `A1-3,A7` style integer ranges
//! - [`options::Options`] - TOML-backed extraction and loader settings
//!
//! # Architecture
//!
//! Loading goes through [`loader::MeshBackend`]: the `ply-rs` and `obj`
//! cargo features compile in richer backends, and the built-in ASCII PLY
//! reader is always there. The set of usable backends is decided once per
//! process. Everything else is a synchronous, stateless computation over
//! borrowed inputs.

pub mod error;
pub mod loader;
pub mod mesh;
pub mod options;
pub mod patch;
pub mod util;

pub use error::SurfpatchError;
pub use loader::{load, MeshBackend, MeshFormat};
pub use mesh::Mesh;
pub use patch::{extract_patch, AtomId, PatchExtractor, StructureAtom};
