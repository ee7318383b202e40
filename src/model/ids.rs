use crate::base::FileId;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            pub file: FileId,
            pub index: u32,
        }

        impl $name {
            pub const fn new(file: FileId, index: u32) -> Self {
                Self { file, index }
            }

            pub const fn index(self) -> usize {
                self.index as usize
            }
        }
    };
}

entity_id!(
    /// A class, addressed by its file and declaration index.
    ClassId
);
entity_id!(
    /// A domain, addressed by its file and declaration index.
    DomainId
);
entity_id!(
    /// A decorator, addressed by its file and declaration index.
    DecoratorId
);
entity_id!(
    /// An endpoint, addressed by its file and declaration index.
    EndpointId
);
entity_id!(
    /// A file-level alias block, addressed by its file and declaration index.
    AliasId
);

/// The entity a property belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyOwner {
    Class(ClassId),
    Decorator(DecoratorId),
    EndpointParam(EndpointId),
    EndpointReturn(EndpointId),
}

impl PropertyOwner {
    pub fn file(self) -> FileId {
        match self {
            PropertyOwner::Class(id) => id.file,
            PropertyOwner::Decorator(id) => id.file,
            PropertyOwner::EndpointParam(id) | PropertyOwner::EndpointReturn(id) => id.file,
        }
    }

    pub fn class(self) -> Option<ClassId> {
        match self {
            PropertyOwner::Class(id) => Some(id),
            _ => None,
        }
    }
}

/// A property, addressed by its owner and position in the owner's list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId {
    pub owner: PropertyOwner,
    pub index: u32,
}

impl PropertyId {
    pub const fn new(owner: PropertyOwner, index: u32) -> Self {
        Self { owner, index }
    }

    pub const fn index(self) -> usize {
        self.index as usize
    }
}
