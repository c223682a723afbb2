use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Loader", inline)]
#[serde(default)]
/// Mesh loading options.
pub struct LoaderOptions {
    /// Read PLY files with the built-in reader even when a richer backend
    /// is compiled in.
    #[schemars(title = "Prefer Built-in Reader")]
    pub prefer_builtin: bool,
}
