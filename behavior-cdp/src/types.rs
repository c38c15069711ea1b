// Bridge type definitions
//
// Records shared by the reconstructor, translator and handlers

use crate::commands::VIRTUAL_SCRIPT_MARKER;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Script ids are opaque strings; `@`-prefixed ids name runtime source files
pub type ScriptId = String;

pub fn is_virtual_script(script_id: &str) -> bool {
    script_id.starts_with(VIRTUAL_SCRIPT_MARKER)
}

/// Strip the `@` marker and one leading `./`
pub fn display_path(script_id: &str) -> &str {
    let path = script_id
        .strip_prefix(VIRTUAL_SCRIPT_MARKER)
        .unwrap_or(script_id);
    path.strip_prefix("./").unwrap_or(path)
}

pub fn file_url(script_id: &str) -> String {
    format!("file:///{}", display_path(script_id))
}

// Raw frame as supplied by the runtime (1-based line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStackFrame {
    pub file: ScriptId,
    pub line: i64,
    #[serde(default)]
    pub func: String,
}

// Payload of a runtime pause event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PauseData {
    #[serde(default)]
    pub stacks: Vec<RawStackFrame>,
    #[serde(default)]
    pub step: Value,
}

// Zero-based code position as the frontend sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub column_number: i64,
    pub line_number: i64,
    pub script_id: ScriptId,
}

impl Location {
    /// Translate a 1-based runtime line; columns are not tracked
    pub fn from_frame(frame: &RawStackFrame) -> Self {
        Self {
            column_number: 0,
            line_number: frame.line.saturating_sub(1),
            script_id: frame.file.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl RemoteObject {
    pub fn undefined() -> Self {
        Self {
            kind: "undefined".to_string(),
            class_name: None,
            description: None,
            object_id: None,
        }
    }

    pub fn scope(object_id: String) -> Self {
        Self {
            kind: "object".to_string(),
            class_name: Some("Object".to_string()),
            description: Some("Object".to_string()),
            object_id: Some(object_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    Local,
    Closure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "type")]
    pub kind: ScopeType,
    pub object: RemoteObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    pub call_frame_id: String,
    pub function_name: String,
    pub function_location: Location,
    pub location: Location,
    pub url: String,
    pub scope_chain: Vec<Scope>,
    pub this: RemoteObject,
}

/// Structured form of a `callFrameId`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrameId {
    pub ordinal: usize,
    pub injected_script_id: u64,
}

/// Variable group a scope object exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeGroup {
    Locals,
    Upvalues,
}

impl ScopeGroup {
    pub fn scope_type(self) -> ScopeType {
        match self {
            ScopeGroup::Locals => ScopeType::Local,
            ScopeGroup::Upvalues => ScopeType::Closure,
        }
    }
}

/// Structured form of a scope `objectId`
///
/// `keys` is the table path below the scope root; it is empty for the scope
/// objects built at pause time and left off the encoded id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeObjectId {
    pub level: usize,
    pub group: ScopeGroup,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

impl ScopeObjectId {
    pub fn new(level: usize, group: ScopeGroup) -> Self {
        Self {
            level,
            group,
            keys: Vec::new(),
        }
    }
}

/// Compact JSON encoding used for every opaque composite id
pub fn encode_id<T: Serialize>(id: &T) -> String {
    // Plain structs of integers, strings and enums cannot fail to serialize
    serde_json::to_string(id).unwrap_or_default()
}

pub fn decode_id<'a, T: Deserialize<'a>>(raw: &'a str) -> serde_json::Result<T> {
    serde_json::from_str(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Over,
    Into,
    Out,
}

/// Breakpoint fields the runtime receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointSpec {
    pub url: String,
    pub line_number: i64,
    #[serde(default)]
    pub column_number: i64,
    #[serde(default)]
    pub condition: String,
}

/// Stored breakpoint; `breakpoint_id` never leaves the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointRecord {
    pub breakpoint_id: String,
    #[serde(flatten)]
    pub spec: BreakpointSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackboxPattern {
    pub pattern: String,
}

/// Stored blackbox pattern; `blackbox_id` never leaves the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackboxRecord {
    pub blackbox_id: String,
    #[serde(flatten)]
    pub pattern: BlackboxPattern,
}
