//! Natural keys and entity paths
//!
//! Entities are matched by natural key, never by server-assigned identifier.
//! An `EntityPath` locates an entity in the application graph for display,
//! e.g. `services/http/github/webhooks/onPush`.

use std::fmt;

/// An entity identified by a natural key within its sibling collection
pub trait Keyed {
    /// Collection name used in entity paths (`pipelines`, `webhooks`, ...)
    const COLLECTION: &'static str;

    /// Singular noun used in messages
    const NOUN: &'static str;

    /// The key that identifies this entity among its siblings
    fn natural_key(&self) -> String;
}

/// Location of an entity inside the application graph
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityPath(String);

impl EntityPath {
    /// The application root
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn child(&self, collection: &str, key: &str) -> Self {
        if self.0.is_empty() {
            Self(format!("{}/{}", collection, key))
        } else {
            Self(format!("{}/{}/{}", self.0, collection, key))
        }
    }

    /// Path of a root-level attribute (`app/name`)
    pub fn attribute(name: &str) -> Self {
        Self(format!("app/{}", name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
