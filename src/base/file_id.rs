use indexmap::IndexMap;
use std::fmt;

/// Identifier of a model file, stable for the lifetime of a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interns model file names (`Folder/File`, no extension) into [`FileId`]s.
///
/// Ids are never reused: removing a file from a store keeps its slot so
/// that diagnostics and ids held by callers stay meaningful.
#[derive(Clone, Debug, Default)]
pub struct FileRegistry {
    names: IndexMap<String, FileId>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id for a name, allocating one on first use.
    pub fn intern(&mut self, name: &str) -> FileId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }
        let id = FileId::new(self.names.len() as u32);
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<FileId> {
        self.names.get(name).copied()
    }

    pub fn name(&self, id: FileId) -> Option<&str> {
        self.names
            .get_index(id.index())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
