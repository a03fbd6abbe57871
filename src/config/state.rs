// Server state module
// Immutable per-process state shared by all connections

use super::types::Config;
use std::path::PathBuf;

/// Shared server state: the startup configuration plus the canonicalized
/// serving root. Read-only for the lifetime of the process.
pub struct ServerState {
    pub config: Config,
    pub root: PathBuf,
}

impl ServerState {
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
