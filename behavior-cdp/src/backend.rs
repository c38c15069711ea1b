// Runtime -> frontend direction
//
// Pause/resume notifications, answers to suppressed queries and console/log
// output pushed by the runtime.

use crate::commands::{backend_events, frontend_events};
use crate::emitter::Emitter;
use crate::protocol::{
    normalize_result, BackendMessage, BridgeError, BridgeResult, Notification, RequestId,
};
use crate::session::Session;
use crate::stack;
use crate::types::PauseData;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Parrot {
    id: RequestId,
}

/// Answer to a scope, watch or REPL query
#[derive(Debug, Deserialize)]
struct ParrotReply {
    parrot: Parrot,
    #[serde(default)]
    result: Value,
}

pub async fn handle_message(
    message: BackendMessage,
    session: &mut Session,
    emitter: &Emitter,
) -> BridgeResult<()> {
    debug!("<- backend {}", message.method);

    match message.method.as_str() {
        backend_events::PAUSE => {
            // A new pause supersedes the held one even if it cannot be rebuilt
            session.state.debugger_pause_data = None;
            let pause: PauseData = decode(&message)?;
            stack::restore_pause(&pause, session, emitter)?;
            session.state.debugger_pause_data = Some(pause);
            Ok(())
        }
        backend_events::RESUME => {
            stack::restore_resume(session, emitter);
            Ok(())
        }
        backend_events::PARROT => {
            let reply: ParrotReply = decode(&message)?;
            emitter.respond(reply.parrot.id, normalize_result(reply.result));
            Ok(())
        }
        backend_events::CONSOLE => {
            let method = frontend_events::CONSOLE_API_CALLED;
            record_and_forward(method, message.params, session, emitter).await
        }
        backend_events::LOG => {
            record_and_forward(frontend_events::ENTRY_ADDED, message.params, session, emitter).await
        }
        other => {
            debug!("Ignoring backend message {}", other);
            Ok(())
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(message: &BackendMessage) -> BridgeResult<T> {
    serde_json::from_value(message.params.clone())
        .map_err(|e| BridgeError::invalid_params(&message.method, e.to_string()))
}

/// Persist for later replay, then forward to the attached frontend
async fn record_and_forward(
    method: &str,
    params: Value,
    session: &Session,
    emitter: &Emitter,
) -> BridgeResult<()> {
    let event = Notification::new(method, params);
    session.store.event_add(event.clone()).await?;
    emitter.forward(event);
    Ok(())
}
