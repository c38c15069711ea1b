// Frontend request handlers
//
// One function per FrontendCall. Handlers emit whatever backend commands or
// notifications the call implies and return the reply for the router.

use crate::commands::{execution_context, frontend_events};
use crate::dispatch::FrontendCall;
use crate::emitter::Emitter;
use crate::protocol::{BridgeError, BridgeResult, Reply, Request};
use crate::registry;
use crate::replay::{replay_events, ReplayChannel};
use crate::session::Session;
use crate::stack;
use crate::translator;
use crate::types::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

const DEBUGGER_ID: &str = "behavior-bridge";
const ISOLATE_ID: &str = "behavior";

pub async fn invoke(
    call: FrontendCall,
    request: &Request,
    session: &mut Session,
    emitter: &Emitter,
) -> BridgeResult<Reply> {
    debug!("Handling {:?} (id={})", call, request.id);

    match call {
        FrontendCall::RuntimeEnable => runtime_enable(session, emitter).await,
        FrontendCall::RuntimeRunIfWaitingForDebugger
        | FrontendCall::DebuggerDisable
        | FrontendCall::DebuggerSetAsyncCallStackDepth => Ok(Reply::empty()),
        FrontendCall::RuntimeGetIsolateId => Ok(Reply::Respond(json!({ "id": ISOLATE_ID }))),
        FrontendCall::RuntimeGetProperties => get_properties(request, emitter),
        FrontendCall::RuntimeEvaluate => evaluate(request, emitter),
        FrontendCall::DebuggerEnable => debugger_enable(session, emitter).await,
        FrontendCall::DebuggerResume => step(None, emitter),
        FrontendCall::DebuggerStepOver => step(Some(StepType::Over), emitter),
        FrontendCall::DebuggerStepInto => step(Some(StepType::Into), emitter),
        FrontendCall::DebuggerStepOut => step(Some(StepType::Out), emitter),
        FrontendCall::DebuggerSetSkipAllPauses => set_skip_all_pauses(request, emitter),
        FrontendCall::DebuggerSetPauseOnExceptions => set_pause_on_exceptions(request, emitter),
        FrontendCall::DebuggerSetBreakpointsActive => {
            set_breakpoints_active(request, session, emitter).await
        }
        FrontendCall::DebuggerSetBreakpointByUrl => {
            set_breakpoint_by_url(request, session, emitter).await
        }
        FrontendCall::DebuggerRemoveBreakpoint => {
            remove_breakpoint(request, session, emitter).await
        }
        FrontendCall::DebuggerSetBlackboxPatterns => {
            set_blackbox_patterns(request, session, emitter).await
        }
        FrontendCall::DebuggerGetScriptSource => get_script_source(request, session).await,
        FrontendCall::DebuggerEvaluateOnCallFrame => {
            evaluate_on_call_frame(request, session, emitter)
        }
        FrontendCall::LogEnable => {
            replay_events(ReplayChannel::Log, session, emitter).await?;
            Ok(Reply::empty())
        }
    }
}

fn params<T: DeserializeOwned>(request: &Request) -> BridgeResult<T> {
    serde_json::from_value(request.params.clone())
        .map_err(|e| BridgeError::invalid_params(&request.method, e.to_string()))
}

async fn runtime_enable(session: &Session, emitter: &Emitter) -> BridgeResult<Reply> {
    emitter.notify(
        frontend_events::EXECUTION_CONTEXT_CREATED,
        json!({
            "context": {
                "id": execution_context::ID,
                "origin": "",
                "name": execution_context::NAME,
                "auxData": {
                    "isDefault": true,
                    "type": "default",
                    "frameId": execution_context::FRAME_ID,
                },
            }
        }),
    );

    replay_events(ReplayChannel::Console, session, emitter).await?;
    Ok(Reply::empty())
}

async fn debugger_enable(session: &mut Session, emitter: &Emitter) -> BridgeResult<Reply> {
    registry::script_parse_project(session, emitter).await?;
    sync_breakpoints(session, emitter).await?;
    sync_blackboxes(session, emitter).await?;

    if let Some(pause) = session.state.debugger_pause_data.clone() {
        info!("Frontend attached while paused, restoring pause state");
        stack::restore_pause(&pause, session, emitter)?;
    }

    Ok(Reply::Respond(json!({ "debuggerId": DEBUGGER_ID })))
}

async fn sync_breakpoints(session: &Session, emitter: &Emitter) -> BridgeResult<()> {
    let records = session.store.breakpoint_get_all().await?;
    emitter.send_backend(translator::set_pause_breakpoints(
        &records,
        session.state.active_breakpoints,
    ));
    Ok(())
}

async fn sync_blackboxes(session: &Session, emitter: &Emitter) -> BridgeResult<()> {
    let records = session.store.blackbox_get_all().await?;
    emitter.send_backend(translator::set_skip_blackboxes(&records));
    Ok(())
}

/// Set (or clear) the step mode, then let the runtime continue
fn step(step_type: Option<StepType>, emitter: &Emitter) -> BridgeResult<Reply> {
    emitter.send_backend(translator::set_pause_pace(step_type));
    emitter.send_backend(translator::execute_resume());
    Ok(Reply::empty())
}

#[derive(Deserialize)]
struct SkipAllPausesParams {
    skip: bool,
}

fn set_skip_all_pauses(request: &Request, emitter: &Emitter) -> BridgeResult<Reply> {
    let p: SkipAllPausesParams = params(request)?;
    emitter.send_backend(translator::set_skip_situation(p.skip));
    Ok(Reply::empty())
}

#[derive(Deserialize)]
struct PauseOnExceptionsParams {
    state: String,
}

fn set_pause_on_exceptions(request: &Request, emitter: &Emitter) -> BridgeResult<Reply> {
    let p: PauseOnExceptionsParams = params(request)?;
    emitter.send_backend(translator::set_pause_trapper(&p.state));
    Ok(Reply::empty())
}

#[derive(Deserialize)]
struct BreakpointsActiveParams {
    active: bool,
}

async fn set_breakpoints_active(
    request: &Request,
    session: &mut Session,
    emitter: &Emitter,
) -> BridgeResult<Reply> {
    let p: BreakpointsActiveParams = params(request)?;
    session.state.active_breakpoints = p.active;
    sync_breakpoints(session, emitter).await?;
    Ok(Reply::empty())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetBreakpointByUrlParams {
    line_number: i64,
    url: Option<String>,
    url_regex: Option<String>,
    #[serde(default)]
    column_number: i64,
    #[serde(default)]
    condition: String,
}

async fn set_breakpoint_by_url(
    request: &Request,
    session: &mut Session,
    emitter: &Emitter,
) -> BridgeResult<Reply> {
    let p: SetBreakpointByUrlParams = params(request)?;
    // The runtime matches breakpoint urls literally
    if p.url_regex.is_some() {
        return Err(BridgeError::invalid_params(
            &request.method,
            "urlRegex breakpoints are not supported",
        ));
    }
    let url = p
        .url
        .ok_or_else(|| BridgeError::invalid_params(&request.method, "missing url"))?;

    let record = session
        .store
        .breakpoint_add(BreakpointSpec {
            url,
            line_number: p.line_number,
            column_number: p.column_number,
            condition: p.condition,
        })
        .await?;

    info!(
        "Breakpoint {} set at {}:{}",
        record.breakpoint_id, record.spec.url, record.spec.line_number
    );
    sync_breakpoints(session, emitter).await?;

    Ok(Reply::Respond(json!({
        "breakpointId": record.breakpoint_id,
        "locations": [],
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveBreakpointParams {
    breakpoint_id: String,
}

async fn remove_breakpoint(
    request: &Request,
    session: &mut Session,
    emitter: &Emitter,
) -> BridgeResult<Reply> {
    let p: RemoveBreakpointParams = params(request)?;
    if !session.store.breakpoint_remove(&p.breakpoint_id).await? {
        warn!("Breakpoint not found: {}", p.breakpoint_id);
    }
    sync_breakpoints(session, emitter).await?;
    Ok(Reply::empty())
}

#[derive(Deserialize)]
struct BlackboxPatternsParams {
    patterns: Vec<String>,
}

async fn set_blackbox_patterns(
    request: &Request,
    session: &mut Session,
    emitter: &Emitter,
) -> BridgeResult<Reply> {
    let p: BlackboxPatternsParams = params(request)?;
    let records = session.store.blackbox_replace(p.patterns).await?;
    emitter.send_backend(translator::set_skip_blackboxes(&records));
    Ok(Reply::empty())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptSourceParams {
    script_id: String,
}

async fn get_script_source(request: &Request, session: &Session) -> BridgeResult<Reply> {
    let p: ScriptSourceParams = params(request)?;

    let source = if is_virtual_script(&p.script_id) {
        let path = session.project.source_root.join(display_path(&p.script_id));
        session.files.read_to_string(&path).await?
    } else {
        String::new()
    };

    Ok(Reply::Respond(json!({ "scriptSource": source })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetPropertiesParams {
    object_id: String,
}

fn get_properties(request: &Request, emitter: &Emitter) -> BridgeResult<Reply> {
    let p: GetPropertiesParams = params(request)?;
    let object: ScopeObjectId = decode_id(&p.object_id)
        .map_err(|e| BridgeError::invalid_params(&request.method, format!("objectId: {}", e)))?;

    emitter.send_backend(translator::query_scope(
        request.id,
        &object.keys,
        object.level,
        object.group,
    ));
    Ok(Reply::Suppress)
}

#[derive(Deserialize)]
struct EvaluateParams {
    expression: String,
}

fn evaluate(request: &Request, emitter: &Emitter) -> BridgeResult<Reply> {
    let p: EvaluateParams = params(request)?;
    emitter.send_backend(translator::query_repl(request.id, &p.expression));
    Ok(Reply::Suppress)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateOnCallFrameParams {
    call_frame_id: String,
    expression: String,
}

fn evaluate_on_call_frame(
    request: &Request,
    session: &Session,
    emitter: &Emitter,
) -> BridgeResult<Reply> {
    let p: EvaluateOnCallFrameParams = params(request)?;
    let frame: CallFrameId = decode_id(&p.call_frame_id).map_err(|e| {
        BridgeError::invalid_params(&request.method, format!("callFrameId: {}", e))
    })?;

    if frame.injected_script_id != session.state.frame_script_id_count {
        return Err(BridgeError::invalid_params(
            &request.method,
            format!(
                "call frame from pause {} is stale (current pause {})",
                frame.injected_script_id, session.state.frame_script_id_count
            ),
        ));
    }

    emitter.send_backend(translator::query_watch(
        request.id,
        frame.ordinal,
        &p.expression,
    ));
    Ok(Reply::Suppress)
}
