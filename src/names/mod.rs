//! Mangled-name interning
//!
//! The frontend hands the analysis raw textual identifiers; this module turns
//! them into canonical interned names. Interning is injective: two raw
//! strings map to the same [`MangledName`] exactly when they are equal, so a
//! name comparison never has to touch the pool again.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Process-wide pool of interned names, shared by all analysis workers.
static POOL: Lazy<Mutex<HashSet<Arc<str>>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// An interned, canonical identifier
///
/// Equality, ordering and hashing are by content; clones share the interned
/// allocation, so a `MangledName` is cheap to use as a map or set key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MangledName(Arc<str>);

impl MangledName {
    /// Intern a raw textual name, returning its canonical representation
    pub fn from_raw(raw: &str) -> Self {
        let mut pool = POOL.lock().expect("name pool poisoned");
        if let Some(existing) = pool.get(raw) {
            return MangledName(Arc::clone(existing));
        }
        log::trace!("interning new name: {}", raw);
        let interned: Arc<str> = Arc::from(raw);
        pool.insert(Arc::clone(&interned));
        MangledName(interned)
    }

    /// The interned textual form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MangledName {
    fn from(raw: &str) -> Self {
        MangledName::from_raw(raw)
    }
}

impl fmt::Display for MangledName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MangledName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MangledName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(MangledName::from_raw(&raw))
    }
}
