// Shared fixtures for unit tests

use crate::emitter::{Emitter, Outbound};
use crate::fs::LocalFiles;
use crate::protocol::{BackendCommand, FrontendMessage, Notification, Response};
use crate::session::{ProjectConfig, Session};
use crate::store::MemoryStore;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

pub fn session_at(root: &Path) -> Session {
    Session::new(
        Arc::new(MemoryStore::new()),
        Arc::new(LocalFiles),
        ProjectConfig {
            source_root: root.to_path_buf(),
            source_glob: "**/*.lua".to_string(),
        },
    )
}

pub fn session() -> Session {
    session_at(Path::new("."))
}

pub fn drain(rx: &mut UnboundedReceiver<Outbound>) -> Vec<Outbound> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

pub fn notifications(out: &[Outbound]) -> Vec<&Notification> {
    out.iter()
        .filter_map(|msg| match msg {
            Outbound::Frontend(FrontendMessage::Notification(n)) => Some(n),
            _ => None,
        })
        .collect()
}

pub fn responses(out: &[Outbound]) -> Vec<&Response> {
    out.iter()
        .filter_map(|msg| match msg {
            Outbound::Frontend(FrontendMessage::Response(r)) => Some(r),
            _ => None,
        })
        .collect()
}

pub fn backend(out: &[Outbound]) -> Vec<&BackendCommand> {
    out.iter()
        .filter_map(|msg| match msg {
            Outbound::Backend(cmd) => Some(cmd),
            _ => None,
        })
        .collect()
}

pub fn channel() -> (Emitter, UnboundedReceiver<Outbound>) {
    Emitter::channel()
}
