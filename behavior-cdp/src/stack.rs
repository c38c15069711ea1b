// Pause-state reconstruction
//
// Turns the runtime's raw stack into CDP call frames, scope chains and a
// breakpoint-hit location. Each pause advances the injected-script counter
// so object ids from earlier pauses never collide with current ones.

use crate::commands::{frontend_events, HOST_FRAME_MARKER};
use crate::emitter::Emitter;
use crate::protocol::{BridgeError, BridgeResult};
use crate::registry::script_parsed;
use crate::session::Session;
use crate::types::*;
use serde_json::json;
use tracing::{debug, info};

/// Result of stripping the optional host frame from a raw stack
#[derive(Debug)]
struct WorkingStack {
    frames: Vec<RawStackFrame>,
    shifted: bool,
}

impl WorkingStack {
    fn from_raw(stacks: &[RawStackFrame]) -> Self {
        let mut frames = stacks.to_vec();
        let shifted = frames
            .first()
            .is_some_and(|frame| frame.file.contains(HOST_FRAME_MARKER));

        if shifted {
            frames.remove(0);
        }

        Self { frames, shifted }
    }

    /// Ordinal reported for a post-shift position
    fn ordinal(&self, index: usize) -> usize {
        if self.shifted {
            index + 1
        } else {
            index
        }
    }
}

/// Hit location string for the top raw frame: `file:///{path}:{line-1}:0`
pub fn hit_location(frame: &RawStackFrame) -> String {
    format!(
        "file:///{}:{}:0",
        display_path(&frame.file),
        frame.line.saturating_sub(1)
    )
}

pub fn build_call_frame(
    frame: &RawStackFrame,
    ordinal: usize,
    injected_script_id: u64,
) -> CallFrame {
    let location = Location::from_frame(frame);
    let call_frame_id = CallFrameId {
        ordinal,
        injected_script_id,
    };

    CallFrame {
        call_frame_id: encode_id(&call_frame_id),
        function_name: frame.func.clone(),
        function_location: location.clone(),
        location,
        url: file_url(&frame.file),
        scope_chain: [ScopeGroup::Locals, ScopeGroup::Upvalues]
            .into_iter()
            .map(|group| Scope {
                kind: group.scope_type(),
                object: RemoteObject::scope(encode_id(&ScopeObjectId::new(ordinal, group))),
            })
            .collect(),
        this: RemoteObject::undefined(),
    }
}

/// Emit `Debugger.paused` for a runtime pause payload.
///
/// Every frame's script is announced before the pause notification. An
/// empty stack still consumes a counter value but emits nothing.
pub fn restore_pause(
    pause: &PauseData,
    session: &mut Session,
    emitter: &Emitter,
) -> BridgeResult<()> {
    session.state.frame_script_id_count += 1;
    let injected_script_id = session.state.frame_script_id_count;

    let Some(top) = pause.stacks.first() else {
        return Err(BridgeError::EmptyStack);
    };

    let stack = WorkingStack::from_raw(&pause.stacks);
    if stack.shifted {
        debug!("Dropped host frame {} from pause stack", top.file);
    }

    for frame in &stack.frames {
        script_parsed(&frame.file, session, emitter, None);
    }

    let call_frames: Vec<CallFrame> = stack
        .frames
        .iter()
        .enumerate()
        .map(|(index, frame)| build_call_frame(frame, stack.ordinal(index), injected_script_id))
        .collect();

    info!(
        "Paused at {}:{} ({} frame(s), injected script {})",
        top.file,
        top.line,
        call_frames.len(),
        injected_script_id
    );

    emitter.notify(
        frontend_events::PAUSED,
        json!({
            "callFrames": call_frames,
            "hitBreakpoints": [hit_location(top)],
            "reason": "other",
            "data": { "step": pause.step },
        }),
    );

    Ok(())
}

/// Forget the held pause and tell the frontend execution continued
pub fn restore_resume(session: &mut Session, emitter: &Emitter) {
    session.state.debugger_pause_data = None;
    emitter.notify(frontend_events::RESUMED, json!({}));
}
