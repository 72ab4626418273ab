use crate::names::MangledName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of an analyzed procedure
///
/// The variable core never looks inside a procedure name; it only stores it,
/// compares it and embeds it in procedure-scoped variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcName {
    name: MangledName,
}

impl ProcName {
    pub fn new(name: &str) -> Self {
        Self {
            name: MangledName::from_raw(name),
        }
    }

    /// The procedure's mangled name
    pub fn name(&self) -> &MangledName {
        &self.name
    }
}

impl fmt::Display for ProcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
