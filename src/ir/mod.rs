//! Intermediate-representation core types
//!
//! This module collects the identities the analysis passes around: program
//! variables and the narrow collaborator types they are built from
//! (procedure names, source files and locations, print configuration).

pub mod pp;
pub mod procname;
pub mod pvar;
pub mod source;

pub use pp::{PrintEnv, PrintMode};
pub use procname::ProcName;
pub use pvar::{
    pp_translation_unit, GlobalOptions, ProgramVar, TmpNameGenerator, VarKind, VarMap, VarSet,
    MATERIALIZED_CPP_TEMPORARY_TAG, RETURN_PARAM_VAR_NAME, RETURN_VAR_NAME,
};
pub use source::{SourceFile, SourceLoc};
