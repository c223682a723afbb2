use rustc_hash::FxHashMap;

/// Prefix of per-vertex attribute names.
pub const VERTEX_PREFIX: &str = "vertex_";
/// Prefix of per-face attribute names.
pub const FACE_PREFIX: &str = "face_";

/// Which mesh element an attribute is defined on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeDomain {
    /// One value per vertex (`vertex_` prefix).
    Vertex,
    /// One value per face (`face_` prefix).
    Face,
}

impl AttributeDomain {
    /// Domain implied by an attribute name's prefix, if any.
    #[must_use]
    pub fn of(name: &str) -> Option<Self> {
        if name.starts_with(VERTEX_PREFIX) {
            Some(Self::Vertex)
        } else if name.starts_with(FACE_PREFIX) {
            Some(Self::Face)
        } else {
            None
        }
    }
}

/// A named scalar array attached to vertices or faces.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Attribute {
    pub(crate) name: String,
    pub(crate) domain: AttributeDomain,
    pub(crate) values: Vec<f32>,
}

/// Ordered attribute storage with O(1) name lookup.
///
/// Vertex attributes precede face attributes; within a domain, names keep
/// the order they were inserted in.
#[derive(Debug, Clone, Default)]
pub(crate) struct AttributeStore {
    entries: Vec<Attribute>,
    index: FxHashMap<String, usize>,
}

impl AttributeStore {
    /// Build the store, reordering vertex attributes ahead of face
    /// attributes. Returns the first duplicate name on conflict.
    pub(crate) fn from_entries(
        mut entries: Vec<Attribute>,
    ) -> Result<Self, String> {
        // Stable sort keeps declaration order inside each domain.
        entries.sort_by_key(|a| a.domain == AttributeDomain::Face);

        let mut index = FxHashMap::default();
        for (i, attr) in entries.iter().enumerate() {
            if index.insert(attr.name.clone(), i).is_some() {
                return Err(attr.name.clone());
            }
        }
        Ok(Self { entries, index })
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Attribute> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|a| a.name.as_str())
    }
}

impl PartialEq for AttributeStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
