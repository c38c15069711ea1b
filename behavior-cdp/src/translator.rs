// Frontend action -> backend command translation
//
// Each builder produces exactly one command. Commands that switch a runtime
// feature off carry `null` params.

use crate::commands::{backend_commands, TRAPPER_NONE};
use crate::protocol::{BackendCommand, RequestId};
use crate::types::{
    BlackboxPattern, BlackboxRecord, BreakpointRecord, BreakpointSpec, ScopeGroup, StepType,
};
use serde_json::json;

pub fn execute_resume() -> BackendCommand {
    BackendCommand::cleared(backend_commands::EXECUTE_RESUME)
}

pub fn set_skip_situation(skip: bool) -> BackendCommand {
    if skip {
        BackendCommand::new(backend_commands::SET_SKIP_SITUATION, json!({ "state": "always" }))
    } else {
        BackendCommand::cleared(backend_commands::SET_SKIP_SITUATION)
    }
}

pub fn set_pause_trapper(state: &str) -> BackendCommand {
    if state == TRAPPER_NONE {
        BackendCommand::cleared(backend_commands::SET_PAUSE_TRAPPER)
    } else {
        BackendCommand::new(backend_commands::SET_PAUSE_TRAPPER, json!({ "state": state }))
    }
}

pub fn set_pause_pace(step_type: Option<StepType>) -> BackendCommand {
    match step_type {
        Some(step_type) => BackendCommand::new(
            backend_commands::SET_PAUSE_PACE,
            json!({ "step_type": step_type }),
        ),
        None => BackendCommand::cleared(backend_commands::SET_PAUSE_PACE),
    }
}

/// Breakpoint list with store ids stripped; empty while breakpoints are
/// deactivated
pub fn set_pause_breakpoints(records: &[BreakpointRecord], active: bool) -> BackendCommand {
    let specs: Vec<&BreakpointSpec> = if active {
        records.iter().map(|record| &record.spec).collect()
    } else {
        Vec::new()
    };

    BackendCommand::new(backend_commands::SET_PAUSE_BREAKPOINTS, json!(specs))
}

pub fn set_skip_blackboxes(records: &[BlackboxRecord]) -> BackendCommand {
    let patterns: Vec<&BlackboxPattern> = records.iter().map(|record| &record.pattern).collect();
    BackendCommand::new(backend_commands::SET_SKIP_BLACKBOXES, json!(patterns))
}

/// Runtime levels are 1-based where frame ordinals are 0-based
pub fn query_scope(
    id: RequestId,
    keys: &[String],
    level: usize,
    group: ScopeGroup,
) -> BackendCommand {
    BackendCommand::new(
        backend_commands::QUERY_SCOPE,
        json!({
            "parrot": { "id": id, "keys": keys },
            "level": level + 1,
            "type": group,
        }),
    )
}

pub fn query_watch(id: RequestId, level: usize, code: &str) -> BackendCommand {
    BackendCommand::new(
        backend_commands::QUERY_WATCH,
        json!({
            "parrot": { "id": id },
            "level": level + 1,
            "code": code,
        }),
    )
}

pub fn query_repl(id: RequestId, code: &str) -> BackendCommand {
    BackendCommand::new(
        backend_commands::QUERY_REPL,
        json!({
            "parrot": { "id": id },
            "code": code,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn breakpoint(id: &str, line: i64) -> BreakpointRecord {
        BreakpointRecord {
            breakpoint_id: id.to_string(),
            spec: BreakpointSpec {
                url: "file:///a.lua".to_string(),
                line_number: line,
                column_number: 0,
                condition: "x > 1".to_string(),
            },
        }
    }

    #[test]
    fn test_resume_has_null_params() {
        let cmd = execute_resume();
        assert_eq!(cmd.method, "behavior.executeResume");
        assert_eq!(cmd.params, None);
    }

    #[test]
    fn test_skip_situation_shapes() {
        assert_eq!(set_skip_situation(true).params, Some(json!({"state": "always"})));
        assert_eq!(set_skip_situation(false).params, None);
        assert_eq!(set_skip_situation(false).method, "behavior.setSkipSituation");
    }

    #[test]
    fn test_pause_trapper_none_clears() {
        assert_eq!(set_pause_trapper("none").params, None);
        assert_eq!(set_pause_trapper("uncaught").params, Some(json!({"state": "uncaught"})));
    }

    #[test]
    fn test_pause_pace_step_type() {
        assert_eq!(set_pause_pace(Some(StepType::Into)).params, Some(json!({"step_type": "into"})));
        assert_eq!(set_pause_pace(None).params, None);
    }

    #[test]
    fn test_breakpoints_strip_internal_id() {
        let cmd = set_pause_breakpoints(&[breakpoint("bp_1", 3), breakpoint("bp_2", 8)], true);
        let list = cmd.params.unwrap();
        let list = list.as_array().unwrap();

        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|bp| bp.get("breakpointId").is_none()));
        assert_eq!(list[0]["lineNumber"], 3);
        assert_eq!(list[1]["condition"], "x > 1");
    }

    #[test]
    fn test_inactive_breakpoints_send_empty_list() {
        let cmd = set_pause_breakpoints(&[breakpoint("bp_1", 3)], false);
        assert_eq!(cmd.params, Some(json!([])));
    }

    #[test]
    fn test_blackboxes_strip_internal_id() {
        let records = vec![BlackboxRecord {
            blackbox_id: "bb_1".to_string(),
            pattern: BlackboxPattern {
                pattern: "^lib/".to_string(),
            },
        }];
        let cmd = set_skip_blackboxes(&records);
        assert_eq!(cmd.method, "behavior.setSkipBlackBoxes");
        assert_eq!(cmd.params, Some(json!([{"pattern": "^lib/"}])));
    }

    #[test]
    fn test_queries_shift_level_and_carry_parrot() {
        let scope = query_scope(11, &["t".to_string()], 0, ScopeGroup::Upvalues);
        assert_eq!(
            scope.params,
            Some(json!({"parrot": {"id": 11, "keys": ["t"]}, "level": 1, "type": "upvalues"}))
        );

        let watch = query_watch(12, 2, "a + b");
        assert_eq!(
            watch.params,
            Some(json!({"parrot": {"id": 12}, "level": 3, "code": "a + b"}))
        );

        let repl = query_repl(13, "print(1)");
        assert_eq!(repl.method, "behavior.queryRepl");
        assert_eq!(repl.params.as_ref().and_then(|p| p.get("level")), None::<&Value>);
    }
}
