// Frontend request routing
//
// Resolves "Domain.action" to a typed call, runs its handler and decides
// whether a response goes back.

use crate::backend;
use crate::emitter::Emitter;
use crate::handlers;
use crate::protocol::{BackendMessage, Request};
use crate::session::Session;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Runtime,
    Debugger,
    Log,
}

impl Domain {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Runtime" => Some(Domain::Runtime),
            "Debugger" => Some(Domain::Debugger),
            "Log" => Some(Domain::Log),
            _ => None,
        }
    }
}

/// Every frontend method the bridge answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendCall {
    RuntimeEnable,
    RuntimeRunIfWaitingForDebugger,
    RuntimeGetIsolateId,
    RuntimeGetProperties,
    RuntimeEvaluate,
    DebuggerEnable,
    DebuggerDisable,
    DebuggerSetAsyncCallStackDepth,
    DebuggerResume,
    DebuggerStepOver,
    DebuggerStepInto,
    DebuggerStepOut,
    DebuggerSetSkipAllPauses,
    DebuggerSetPauseOnExceptions,
    DebuggerSetBreakpointsActive,
    DebuggerSetBreakpointByUrl,
    DebuggerRemoveBreakpoint,
    DebuggerSetBlackboxPatterns,
    DebuggerGetScriptSource,
    DebuggerEvaluateOnCallFrame,
    LogEnable,
}

impl FrontendCall {
    /// Single split on the first `.`; anything unrecognised is `None`
    pub fn parse(method: &str) -> Option<Self> {
        let (domain, action) = method.split_once('.')?;
        let domain = Domain::parse(domain)?;

        let call = match (domain, action) {
            (Domain::Runtime, "enable") => FrontendCall::RuntimeEnable,
            (Domain::Runtime, "runIfWaitingForDebugger") => {
                FrontendCall::RuntimeRunIfWaitingForDebugger
            }
            (Domain::Runtime, "getIsolateId") => FrontendCall::RuntimeGetIsolateId,
            (Domain::Runtime, "getProperties") => FrontendCall::RuntimeGetProperties,
            (Domain::Runtime, "evaluate") => FrontendCall::RuntimeEvaluate,
            (Domain::Debugger, "enable") => FrontendCall::DebuggerEnable,
            (Domain::Debugger, "disable") => FrontendCall::DebuggerDisable,
            (Domain::Debugger, "setAsyncCallStackDepth") => {
                FrontendCall::DebuggerSetAsyncCallStackDepth
            }
            (Domain::Debugger, "resume") => FrontendCall::DebuggerResume,
            (Domain::Debugger, "stepOver") => FrontendCall::DebuggerStepOver,
            (Domain::Debugger, "stepInto") => FrontendCall::DebuggerStepInto,
            (Domain::Debugger, "stepOut") => FrontendCall::DebuggerStepOut,
            (Domain::Debugger, "setSkipAllPauses") => FrontendCall::DebuggerSetSkipAllPauses,
            (Domain::Debugger, "setPauseOnExceptions") => {
                FrontendCall::DebuggerSetPauseOnExceptions
            }
            (Domain::Debugger, "setBreakpointsActive") => {
                FrontendCall::DebuggerSetBreakpointsActive
            }
            (Domain::Debugger, "setBreakpointByUrl") => FrontendCall::DebuggerSetBreakpointByUrl,
            (Domain::Debugger, "removeBreakpoint") => FrontendCall::DebuggerRemoveBreakpoint,
            (Domain::Debugger, "setBlackboxPatterns") => FrontendCall::DebuggerSetBlackboxPatterns,
            (Domain::Debugger, "getScriptSource") => FrontendCall::DebuggerGetScriptSource,
            (Domain::Debugger, "evaluateOnCallFrame") => FrontendCall::DebuggerEvaluateOnCallFrame,
            (Domain::Log, "enable") => FrontendCall::LogEnable,
            _ => return None,
        };

        Some(call)
    }
}

/// Owns the session and routes traffic from both parties into it
pub struct RequestRouter {
    session: Session,
    emitter: Emitter,
}

impl RequestRouter {
    pub fn new(session: Session, emitter: Emitter) -> Self {
        Self { session, emitter }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle one frontend request.
    ///
    /// Unknown methods and failing handlers produce no response; handler
    /// failures are logged.
    pub async fn deliver(&mut self, request: Request) {
        let Some(call) = FrontendCall::parse(&request.method) else {
            debug!("No handler for {} (id={})", request.method, request.id);
            return;
        };

        match handlers::invoke(call, &request, &mut self.session, &self.emitter).await {
            Ok(reply) => {
                if let Some(result) = reply.into_result() {
                    self.emitter.respond(request.id, result);
                }
            }
            Err(e) => {
                error!("Handler for {} (id={}) failed: {}", request.method, request.id, e);
            }
        }
    }

    /// Handle one message pushed by the runtime
    pub async fn handle_backend(&mut self, message: BackendMessage) {
        let method = message.method.clone();
        if let Err(e) = backend::handle_message(message, &mut self.session, &self.emitter).await {
            error!("Backend message {} failed: {}", method, e);
        }
    }
}
