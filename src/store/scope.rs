//! Name scopes used to resolve references.
//!
//! Domains and files are global. Classes and decorators are looked up from
//! the file holding the reference: its own declarations first, then what
//! its aliases bring in, then the files it `uses`, in declaration order.
//! Lookups through a `uses` entry mark it as needed, which is how unused
//! imports are found.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::FileId;
use crate::model::{AliasedEntity, ClassId, DecoratorId, DomainId};

use super::ModelStore;

/// Where a visible name comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    Local,
    /// Index of the `uses` entry.
    Use(usize),
}

#[derive(Debug, Default)]
struct FileScope {
    classes: FxHashMap<String, (ClassId, Origin)>,
    decorators: FxHashMap<String, (DecoratorId, Origin)>,
}

/// Lookup tables for one link pass.
#[derive(Debug, Default)]
pub(super) struct Scopes {
    files: FxHashMap<String, FileId>,
    domains: FxHashMap<String, DomainId>,
    per_file: FxHashMap<FileId, FileScope>,
    used_imports: FxHashSet<(FileId, usize)>,
    used_domains: FxHashSet<DomainId>,
}

impl Scopes {
    /// Global tables: file names and domains. The first declaration of a
    /// domain name wins; duplicates are reported by validation.
    pub fn global(store: &ModelStore) -> Self {
        let mut scopes = Scopes::default();
        for file in store.files() {
            scopes.files.insert(file.name.clone(), file.id);
            for domain in &file.domains {
                scopes.domains.entry(domain.name().to_string()).or_insert(domain.id);
            }
        }
        scopes
    }

    /// Per-file class and decorator scopes. Needs resolved uses and aliases.
    pub fn build_file_scopes(&mut self, store: &ModelStore) {
        for file in store.files() {
            let mut scope = FileScope::default();
            for class in &file.classes {
                scope
                    .classes
                    .entry(class.name().to_string())
                    .or_insert((class.id, Origin::Local));
            }
            for decorator in &file.decorators {
                scope
                    .decorators
                    .entry(decorator.name().to_string())
                    .or_insert((decorator.id, Origin::Local));
            }
            for resolved in &file.resolved_aliases {
                let AliasedEntity::Class(id) = resolved.entity else {
                    continue;
                };
                if let Some(class) = store.class(id) {
                    scope
                        .classes
                        .entry(class.name().to_string())
                        .or_insert((id, Origin::Local));
                }
            }
            for (index, used) in file.uses.iter().enumerate() {
                let Some(used) = used.target().and_then(|id| store.file(id)) else {
                    continue;
                };
                for class in &used.classes {
                    scope
                        .classes
                        .entry(class.name().to_string())
                        .or_insert((class.id, Origin::Use(index)));
                }
                for decorator in &used.decorators {
                    scope
                        .decorators
                        .entry(decorator.name().to_string())
                        .or_insert((decorator.id, Origin::Use(index)));
                }
            }
            self.per_file.insert(file.id, scope);
        }
    }

    pub fn file(&self, name: &str) -> Option<FileId> {
        self.files.get(name).copied()
    }

    pub fn domain(&mut self, name: &str) -> Option<DomainId> {
        let id = self.domains.get(name).copied()?;
        self.used_domains.insert(id);
        Some(id)
    }

    pub fn class(&mut self, from: FileId, name: &str) -> Option<ClassId> {
        let (id, origin) = *self.per_file.get(&from)?.classes.get(name)?;
        self.mark(from, origin);
        Some(id)
    }

    pub fn decorator(&mut self, from: FileId, name: &str) -> Option<DecoratorId> {
        let (id, origin) = *self.per_file.get(&from)?.decorators.get(name)?;
        self.mark(from, origin);
        Some(id)
    }

    fn mark(&mut self, from: FileId, origin: Origin) {
        if let Origin::Use(index) = origin {
            self.used_imports.insert((from, index));
        }
    }

    pub fn is_import_used(&self, file: FileId, index: usize) -> bool {
        self.used_imports.contains(&(file, index))
    }

    pub fn is_domain_used(&self, id: DomainId) -> bool {
        self.used_domains.contains(&id)
    }
}
