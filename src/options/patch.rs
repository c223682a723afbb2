use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the nearest mesh vertex is found for each atom.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NearestSearch {
    /// Full atom × vertex distance scan.
    #[default]
    BruteForce,
    /// R-tree over the mesh vertices.
    RTree,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Patch", inline)]
#[serde(default)]
/// Structure patch extraction parameters.
pub struct PatchOptions {
    /// Atoms closer than this to any mesh vertex (angstroms) join the patch.
    #[schemars(
        title = "Distance Threshold",
        range(min = 0.0, max = 20.0),
        extend("step" = 0.1)
    )]
    pub distance_threshold: f32,
    /// Nearest-vertex search strategy.
    #[schemars(title = "Search")]
    pub search: NearestSearch,
    /// Delete the source structure once the patch has been carved out.
    #[schemars(title = "Remove Source")]
    pub remove_source: bool,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            distance_threshold: 4.0,
            search: NearestSearch::BruteForce,
            remove_source: false,
        }
    }
}
