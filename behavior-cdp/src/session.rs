// Debug session context
//
// Mutable pause/registration state plus handles to the collaborators. One
// session is owned by one bridge loop and passed by reference into every
// operation.

use crate::fs::SourceFiles;
use crate::store::SessionStore;
use crate::types::PauseData;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub source_root: PathBuf,
    pub source_glob: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            source_glob: "**/*.lua".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    /// Script ids already announced to the frontend
    pub script_parsed_files: HashSet<String>,
    /// Injected-script counter, advanced once per pause event
    pub frame_script_id_count: u64,
    pub active_breakpoints: bool,
    /// Last pause payload; cleared on resume
    pub debugger_pause_data: Option<PauseData>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            script_parsed_files: HashSet::new(),
            frame_script_id_count: 0,
            active_breakpoints: true,
            debugger_pause_data: None,
        }
    }
}

pub struct Session {
    pub state: SessionState,
    pub store: Arc<dyn SessionStore>,
    pub files: Arc<dyn SourceFiles>,
    pub project: ProjectConfig,
}

impl Session {
    pub fn new(
        store: Arc<dyn SessionStore>,
        files: Arc<dyn SourceFiles>,
        project: ProjectConfig,
    ) -> Self {
        Self {
            state: SessionState::default(),
            store,
            files,
            project,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state.debugger_pause_data.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}
