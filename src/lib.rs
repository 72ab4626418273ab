//! ir-vars-rs: variable identity and classification core for a static-analysis IR
//!
//! This library defines how an analysis uniquely identifies and classifies
//! the program variables of its intermediate representation: a closed set of
//! variable kinds (local, callee, global, seed), collision-free naming and
//! mangling, exact and receiver-insensitive comparison, and the metadata
//! downstream analyses consume (constant-ness, POD status, declaring
//! procedure, translation unit).

pub mod error;
pub mod ir;
pub mod names;

pub use error::{Error as IrError, Result as IrResult};

// Re-export commonly used types
pub use ir::{
    GlobalOptions, PrintEnv, PrintMode, ProcName, ProgramVar, SourceFile, SourceLoc,
    TmpNameGenerator, VarKind, VarMap, VarSet,
};
pub use names::MangledName;
