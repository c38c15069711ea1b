// CDP <-> behavior protocol translation engine
//
// Lets a Chrome-DevTools-style debugger frontend drive a script runtime that
// only speaks behavior.* commands:
// - Request routing and response suppression
// - Pause-state reconstruction (call frames, scope chains, hit location)
// - Frontend action -> backend command translation
// - Script registration and event replay

pub mod protocol;
pub mod commands;
pub mod types;
pub mod emitter;
pub mod session;
pub mod store;
pub mod fs;
pub mod registry;
pub mod stack;
pub mod translator;
pub mod replay;
pub mod handlers;
pub mod backend;
pub mod dispatch;

#[cfg(test)]
mod testing;

pub use dispatch::{FrontendCall, RequestRouter};
pub use emitter::{Emitter, Outbound};
pub use fs::{LocalFiles, SourceFiles};
pub use protocol::{
    BackendCommand, BackendMessage, BridgeError, BridgeResult, FrontendMessage, Reply, Request,
};
pub use session::{ProjectConfig, Session};
pub use store::{MemoryStore, SessionStore};
