// Method names on both wires
//
// Backend commands (bridge -> runtime) and backend events (runtime -> bridge)
// use the behavior.* namespace; frontend events use CDP domain names.

// Commands sent to the runtime
pub mod backend_commands {
    pub const EXECUTE_RESUME: &str = "behavior.executeResume";
    pub const SET_SKIP_SITUATION: &str = "behavior.setSkipSituation";
    pub const SET_PAUSE_TRAPPER: &str = "behavior.setPauseTrapper";
    pub const SET_PAUSE_PACE: &str = "behavior.setPausePace";
    pub const SET_PAUSE_BREAKPOINTS: &str = "behavior.setPauseBreakpoints";
    pub const SET_SKIP_BLACKBOXES: &str = "behavior.setSkipBlackBoxes";
    pub const QUERY_SCOPE: &str = "behavior.queryScope";
    pub const QUERY_WATCH: &str = "behavior.queryWatch";
    pub const QUERY_REPL: &str = "behavior.queryRepl";
}

// Messages sent by the runtime
pub mod backend_events {
    pub const PAUSE: &str = "behavior.pause";
    pub const RESUME: &str = "behavior.resume";
    pub const PARROT: &str = "behavior.parrot";
    pub const CONSOLE: &str = "behavior.console";
    pub const LOG: &str = "behavior.log";
}

// Notifications sent to the frontend
pub mod frontend_events {
    pub const SCRIPT_PARSED: &str = "Debugger.scriptParsed";
    pub const PAUSED: &str = "Debugger.paused";
    pub const RESUMED: &str = "Debugger.resumed";
    pub const EXECUTION_CONTEXT_CREATED: &str = "Runtime.executionContextCreated";
    pub const CONSOLE_API_CALLED: &str = "Runtime.consoleAPICalled";
    pub const ENTRY_ADDED: &str = "Log.entryAdded";
}

// Execution context metadata announced with every script
pub mod execution_context {
    pub const ID: u32 = 1;
    pub const NAME: &str = "default";
    pub const FRAME_ID: &str = "default";
}

/// Substring identifying a host/VM synthetic frame at the top of a stack
pub const HOST_FRAME_MARKER: &str = "[C]";

/// Prefix marking a script id as a runtime-known source file
pub const VIRTUAL_SCRIPT_MARKER: char = '@';

/// Pause-on-exceptions state that disables the trapper
pub const TRAPPER_NONE: &str = "none";
