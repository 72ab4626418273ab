//! Program variable identity and classification
//!
//! Every variable the analysis tracks is a [`ProgramVar`]: an immutable value
//! pairing a mangled name with a kind tag. Kinds form a closed set — a local
//! of a procedure, a callee variable standing for the same name inside a
//! recursive invocation, a global, or a seed capturing a parameter's value at
//! procedure entry. Values never change kind in place; reclassification
//! produces a new value.
//!
//! Synthetic names (temporaries, callee/seed variants, abduced values) are
//! derived from the base name plus a tag built around the reserved `$`
//! character, which the frontend mangler never emits inside a source-level
//! identifier. Source names and synthetic names therefore cannot collide.

use crate::error::{Error, Result};
use crate::ir::pp::{PrintEnv, PrintMode};
use crate::ir::procname::ProcName;
use crate::ir::source::{SourceFile, SourceLoc};
use crate::names::MangledName;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Marker prefix of every frontend-introduced temporary
pub const FRONTEND_TMP_MARKER: &str = "$tmp$";

/// Marker prefix of temporaries emitted by the Clang-based frontend
pub const CLANG_TMP_MARKER: &str = "$tmp$clang$";

/// Marker prefix of frontend temporaries assigned exactly once on every
/// non-looping control-flow path
pub const SSA_TMP_MARKER: &str = "$tmp$ssa$";

/// Prefix passed to [`ProgramVar::fresh_tmp`] for temporaries that stand for
/// compiler-materialized C++ temporary objects, as opposed to temporaries the
/// frontend introduces for its own bookkeeping
pub const MATERIALIZED_CPP_TEMPORARY_TAG: &str = "clang$materialized";

/// Name of the canonical variable holding a procedure's return value
pub const RETURN_VAR_NAME: &str = "return";

/// Name of the canonical out-parameter slot used when a procedure returns
/// through memory
pub const RETURN_PARAM_VAR_NAME: &str = "$return_param";

// Full marker of materialized C++ temporaries; keep in sync with
// FRONTEND_TMP_MARKER + MATERIALIZED_CPP_TEMPORARY_TAG.
const MATERIALIZED_CPP_TMP_MARKER: &str = "$tmp$clang$materialized";

const CALLEE_TAG: &str = "$callee";
const SEED_TAG: &str = "$seed";
const ABDUCED_RET_MARKER: &str = "$abduced_ret$";
const ABDUCED_REF_PARAM_MARKER: &str = "$abduced_refparam$";
const INITIALIZER_PROC_PREFIX: &str = "$initializer$";

/// Ordered set of program variables
pub type VarSet = BTreeSet<ProgramVar>;

/// Ordered map keyed by program variables, for per-variable analysis facts
pub type VarMap<V> = BTreeMap<ProgramVar, V>;

/// Kind-specific payload of a global variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlobalData {
    translation_unit: Option<SourceFile>,
    is_constexpr: bool,
    is_ice: bool,
    is_pod: bool,
    is_static_local: bool,
    is_static_global: bool,
}

/// Options recognized by [`ProgramVar::global`]
///
/// Omitted options default to the conservative values: `is_pod` is `true`,
/// every other flag is `false`, and there is no translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalOptions {
    /// Compile-time constant
    pub is_constexpr: bool,
    /// Integral constant expression
    pub is_ice: bool,
    /// Plain-old-data type
    pub is_pod: bool,
    /// Declared inside a function but with global storage
    pub is_static_local: bool,
    /// Declared `static` at file scope
    pub is_static_global: bool,
    pub translation_unit: Option<SourceFile>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            is_constexpr: false,
            is_ice: false,
            is_pod: true,
            is_static_local: false,
            is_static_global: false,
            translation_unit: None,
        }
    }
}

/// Kind tag of a program variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VarKind {
    /// Ordinary stack or parameter variable of a procedure
    Local(ProcName),
    /// The same-named variable as seen from a recursive call site, distinct
    /// from the caller frame's binding
    Callee(ProcName),
    /// Global or file-static variable; carries no owning procedure even when
    /// flagged static-local
    Global(GlobalData),
    /// Snapshot of a formal parameter's value at procedure entry, used to
    /// relate post-state back to pre-state
    Seed(ProcName),
}

/// Allocator for run-unique temporary-variable names
///
/// Holds the single piece of mutable state in this core: a monotonic counter
/// consumed by [`ProgramVar::fresh_tmp`]. The shared process-wide instance is
/// initialized at analysis-run start and never reset; the counter is atomic
/// so per-procedure analysis workers can allocate concurrently without
/// breaking uniqueness. Tests inject their own instances for reproducible
/// naming sequences.
#[derive(Debug, Default)]
pub struct TmpNameGenerator {
    counter: AtomicU64,
}

impl TmpNameGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// The process-wide generator shared by all analysis workers
    pub fn default_generator() -> &'static TmpNameGenerator {
        static GENERATOR: Lazy<TmpNameGenerator> = Lazy::new(TmpNameGenerator::new);
        &GENERATOR
    }

    fn next_id(&self) -> u64 {
        self.counter.fetch_add(1, AtomicOrdering::Relaxed)
    }
}

/// A program variable: local, callee, global or seed
///
/// Immutable value type. Hashable and totally ordered, so it can key the
/// maps and sets that track per-variable analysis facts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramVar {
    name: MangledName,
    kind: VarKind,
}

impl ProgramVar {
    /// Create an ordinary local or parameter variable of `proc`
    pub fn local(name: &str, proc: &ProcName) -> Self {
        Self {
            name: MangledName::from_raw(name),
            kind: VarKind::Local(proc.clone()),
        }
    }

    /// Create a global variable
    pub fn global(name: &str, opts: GlobalOptions) -> Self {
        Self {
            name: MangledName::from_raw(name),
            kind: VarKind::Global(GlobalData {
                translation_unit: opts.translation_unit,
                is_constexpr: opts.is_constexpr,
                is_ice: opts.is_ice,
                is_pod: opts.is_pod,
                is_static_local: opts.is_static_local,
                is_static_global: opts.is_static_global,
            }),
        }
    }

    /// Create a callee variable: `name` as bound inside a recursive
    /// invocation of `proc`
    pub fn callee(name: &str, proc: &ProcName) -> Self {
        Self {
            name: MangledName::from_raw(&format!("{}{}", name, CALLEE_TAG)),
            kind: VarKind::Callee(proc.clone()),
        }
    }

    /// Allocate a fresh temporary local of `proc`
    ///
    /// The name is unique for the lifetime of the run: it consumes one tick
    /// of `names`'s monotonic counter.
    pub fn fresh_tmp(names: &TmpNameGenerator, prefix: &str, proc: &ProcName) -> Self {
        let id = names.next_id();
        let name = format!("{}{}${}", FRONTEND_TMP_MARKER, prefix, id);
        log::debug!("fresh temporary {} in {}", name, proc);
        Self {
            name: MangledName::from_raw(&name),
            kind: VarKind::Local(proc.clone()),
        }
    }

    /// Synthetic local standing for the unknown return value of a call at
    /// `loc`, which symbolic execution must hypothesize rather than observe.
    /// Deterministic in `(proc, loc)` so repeated passes produce the same
    /// identity for the same call site.
    pub fn abduced_return(proc: &ProcName, loc: &SourceLoc) -> Self {
        let name = format!("{}{}", ABDUCED_RET_MARKER, loc);
        Self {
            name: MangledName::from_raw(&name),
            kind: VarKind::Local(proc.clone()),
        }
    }

    /// Synthetic local standing for the unknown post-call value of the
    /// by-reference parameter at `index`. Deterministic in
    /// `(proc, index, loc)`.
    pub fn abduced_ref_param(proc: &ProcName, index: usize, loc: &SourceLoc) -> Self {
        let name = format!("{}{}${}", ABDUCED_REF_PARAM_MARKER, index, loc);
        Self {
            name: MangledName::from_raw(&name),
            kind: VarKind::Local(proc.clone()),
        }
    }

    /// The canonical variable naming the slot that holds `proc`'s result
    pub fn return_variable(proc: &ProcName) -> Self {
        Self::local(RETURN_VAR_NAME, proc)
    }

    /// The canonical out-parameter slot used when `proc` returns through
    /// memory
    pub fn return_param_variable(proc: &ProcName) -> Self {
        Self::local(RETURN_PARAM_VAR_NAME, proc)
    }

    /// Reclassify this variable as a callee variable scoped to `proc`, so
    /// the binding inside a recursive invocation stays distinct from the
    /// caller frame's binding of the same name
    pub fn to_callee(&self, proc: &ProcName) -> Self {
        Self {
            name: MangledName::from_raw(&format!("{}{}", self.name.as_str(), CALLEE_TAG)),
            kind: VarKind::Callee(proc.clone()),
        }
    }

    /// Reclassify a local into a seed variable capturing its value at
    /// procedure entry
    ///
    /// Calling this on a global is a caller bug: globals have no owning
    /// procedure to scope the seed to.
    pub fn to_seed(&self) -> Self {
        let proc = match &self.kind {
            VarKind::Local(p) | VarKind::Callee(p) | VarKind::Seed(p) => p.clone(),
            VarKind::Global(_) => {
                panic!("to_seed called on global variable {}", self.name)
            }
        };
        Self {
            name: MangledName::from_raw(&format!("{}{}", self.name.as_str(), SEED_TAG)),
            kind: VarKind::Seed(proc),
        }
    }

    /// The variable's mangled base identifier
    pub fn name(&self) -> &MangledName {
        &self.name
    }

    /// The kind tag
    pub fn kind(&self) -> &VarKind {
        &self.kind
    }

    /// Human-facing name with synthetic decorations stripped
    pub fn simplified_name(&self) -> &str {
        let mut name = self.name.as_str();
        while let Some(stripped) = name
            .strip_suffix(CALLEE_TAG)
            .or_else(|| name.strip_suffix(SEED_TAG))
        {
            name = stripped;
        }
        name.strip_prefix(FRONTEND_TMP_MARKER).unwrap_or(name)
    }

    /// Base name composed with the declaring procedure, for flattened
    /// namespaces where the same local name repeats across procedures.
    /// Globals are already namespace-wide and keep their bare name.
    pub fn qualified_name(&self) -> MangledName {
        match self.declaring_procedure() {
            Some(proc) => MangledName::from_raw(&format!("{}::{}", proc, self.name)),
            None => self.name.clone(),
        }
    }

    /// Total-order comparison over the full identity (kind, name, owning
    /// procedure or translation unit, flags). Consistent with equality.
    pub fn compare(&self, other: &ProgramVar) -> Ordering {
        self.cmp(other)
    }

    /// Like [`ProgramVar::compare`], except that every receiver variable
    /// (simplified name `this` or `self`) compares equal to every other
    /// receiver variable, regardless of owning procedure. Used by matching
    /// that must be insensitive to which method's receiver is referenced.
    pub fn compare_modulo_this(&self, other: &ProgramVar) -> Ordering {
        if self.is_receiver() && other.is_receiver() {
            Ordering::Equal
        } else {
            self.cmp(other)
        }
    }

    fn is_receiver(&self) -> bool {
        self.is_this() || self.is_self()
    }

    pub fn is_local(&self) -> bool {
        matches!(self.kind, VarKind::Local(_))
    }

    pub fn is_callee(&self) -> bool {
        matches!(self.kind, VarKind::Callee(_))
    }

    pub fn is_global(&self) -> bool {
        matches!(self.kind, VarKind::Global(_))
    }

    pub fn is_seed(&self) -> bool {
        matches!(self.kind, VarKind::Seed(_))
    }

    /// Global declared inside a function but with global storage
    pub fn is_static_local(&self) -> bool {
        matches!(&self.kind, VarKind::Global(data) if data.is_static_local)
    }

    /// Global declared `static` at file scope
    pub fn is_static_global(&self) -> bool {
        matches!(&self.kind, VarKind::Global(data) if data.is_static_global)
    }

    /// Whether this is the canonical return-value variable of its procedure
    pub fn is_return(&self) -> bool {
        self.name.as_str() == RETURN_VAR_NAME
    }

    pub fn is_this(&self) -> bool {
        self.simplified_name() == "this"
    }

    pub fn is_self(&self) -> bool {
        self.simplified_name() == "self"
    }

    /// Whether the identity was hypothesized rather than observed: callee
    /// variables and abduced return/ref-param variables
    pub fn is_abduced(&self) -> bool {
        self.is_callee()
            || self.name.as_str().starts_with(ABDUCED_RET_MARKER)
            || self.name.as_str().starts_with(ABDUCED_REF_PARAM_MARKER)
    }

    /// Whether the variable was synthesized by the code-to-IR translation
    /// step rather than written by the programmer
    pub fn is_frontend_tmp(&self) -> bool {
        self.name.as_str().starts_with(FRONTEND_TMP_MARKER)
    }

    /// Frontend temporary emitted by the Clang-based frontend
    pub fn is_clang_tmp(&self) -> bool {
        self.name.as_str().starts_with(CLANG_TMP_MARKER)
    }

    /// Frontend temporary assigned exactly once on every non-looping
    /// control-flow path
    pub fn is_ssa_frontend_tmp(&self) -> bool {
        self.name.as_str().starts_with(SSA_TMP_MARKER)
    }

    /// Temporary standing for a compiler-materialized C++ temporary object,
    /// with the lifetime rules of the source language
    pub fn is_cpp_temporary(&self) -> bool {
        self.name.as_str().starts_with(MATERIALIZED_CPP_TMP_MARKER)
    }

    /// Whether the variable is a compile-time constant
    ///
    /// Only known for globals; any other kind reports the conservative
    /// default `false`. A best-effort hint, not a guarantee.
    pub fn is_compile_constant(&self) -> bool {
        matches!(&self.kind, VarKind::Global(data) if data.is_constexpr)
    }

    /// Whether the variable is an integral constant expression; conservative
    /// default `false` for any non-global
    pub fn is_integral_constant_expr(&self) -> bool {
        matches!(&self.kind, VarKind::Global(data) if data.is_ice)
    }

    /// Whether the variable's type is plain old data; conservative default
    /// `true` for any non-global
    pub fn is_plain_old_data(&self) -> bool {
        match &self.kind {
            VarKind::Global(data) => data.is_pod,
            _ => true,
        }
    }

    /// The procedure the variable is declared in. Globals have none, static
    /// locals included.
    pub fn declaring_procedure(&self) -> Option<&ProcName> {
        match &self.kind {
            VarKind::Local(p) | VarKind::Callee(p) | VarKind::Seed(p) => Some(p),
            VarKind::Global(_) => None,
        }
    }

    /// The translation unit a global is declared in, exactly as it was
    /// stored at construction
    ///
    /// Calling this on any non-global reports [`Error::InvalidUsage`]: the
    /// call site misclassified the variable. Such an error marks a
    /// programming bug and should not be caught and retried.
    pub fn translation_unit(&self) -> Result<Option<&SourceFile>> {
        match &self.kind {
            VarKind::Global(data) => Ok(data.translation_unit.as_ref()),
            _ => Err(Error::invalid_usage(format!(
                "translation_unit on non-global variable {}",
                self.name
            ))),
        }
    }

    /// The synthesized routine that runs a global's initializer. `None` for
    /// any non-global.
    pub fn initializer_procedure(&self) -> Option<ProcName> {
        match &self.kind {
            VarKind::Global(_) => Some(ProcName::new(&format!(
                "{}{}",
                INITIALIZER_PROC_PREFIX, self.name
            ))),
            _ => None,
        }
    }

    /// Render the variable as a location under `env`
    pub fn pp(&self, env: &PrintEnv, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (env.mode, &self.kind) {
            (PrintMode::Plain, _) => write!(f, "&{}", self.name),
            (PrintMode::Verbose, VarKind::Local(p)) => write!(f, "&{}@{}", self.name, p),
            (PrintMode::Verbose, VarKind::Callee(p)) => {
                write!(f, "&{}@callee[{}]", self.name, p)
            }
            (PrintMode::Verbose, VarKind::Seed(p)) => write!(f, "&{}@seed[{}]", self.name, p),
            (PrintMode::Verbose, VarKind::Global(data)) => {
                write!(f, "&{}@global", self.name)?;
                if let Some(tu) = &data.translation_unit {
                    write!(f, "[{}]", tu)?;
                }
                Ok(())
            }
        }
    }

    /// Render the variable as the value it holds rather than as a location;
    /// presentation only, identity is unaffected
    pub fn pp_value(&self, env: &PrintEnv, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match env.mode {
            PrintMode::Plain => f.write_str(self.simplified_name()),
            PrintMode::Verbose => f.write_str(self.name.as_str()),
        }
    }

    /// Display adapter over [`ProgramVar::pp`]
    pub fn display<'a>(&'a self, env: &'a PrintEnv) -> impl fmt::Display + 'a {
        DisplayAdapter {
            var: self,
            env,
            value: false,
        }
    }

    /// Display adapter over [`ProgramVar::pp_value`]
    pub fn display_value<'a>(&'a self, env: &'a PrintEnv) -> impl fmt::Display + 'a {
        DisplayAdapter {
            var: self,
            env,
            value: true,
        }
    }
}

impl fmt::Display for ProgramVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

struct DisplayAdapter<'a> {
    var: &'a ProgramVar,
    env: &'a PrintEnv,
    value: bool,
}

impl fmt::Display for DisplayAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value {
            self.var.pp_value(self.env, f)
        } else {
            self.var.pp(self.env, f)
        }
    }
}

/// Print an optional translation unit
pub fn pp_translation_unit(f: &mut fmt::Formatter<'_>, tu: Option<&SourceFile>) -> fmt::Result {
    match tu {
        Some(file) => write!(f, "{}", file),
        None => f.write_str("<unknown translation unit>"),
    }
}
