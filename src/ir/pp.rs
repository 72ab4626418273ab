//! Print configuration for IR renderers
//!
//! A [`PrintEnv`] is threaded through every printer in the IR. The variable
//! core only switches on the mode; richer configuration belongs to the
//! surrounding system.

use serde::{Deserialize, Serialize};

/// Rendering mode for IR printers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrintMode {
    /// Bare simplified names, for user-facing reports
    #[default]
    Plain,
    /// Kind and scope decorations, for analysis traces
    Verbose,
}

/// Print configuration threaded through IR printers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PrintEnv {
    pub mode: PrintMode,
}

impl PrintEnv {
    pub fn verbose() -> Self {
        Self {
            mode: PrintMode::Verbose,
        }
    }
}
