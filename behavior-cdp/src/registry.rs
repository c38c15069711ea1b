// Script registry
//
// Announces each runtime script to the frontend exactly once per session

use crate::commands::{execution_context, frontend_events};
use crate::emitter::Emitter;
use crate::fs::slash_path;
use crate::protocol::BridgeResult;
use crate::session::Session;
use crate::types::{display_path, file_url, is_virtual_script};
use serde_json::json;
use tracing::{debug, info};

/// Uppercase hex MD5 of the script id, used as its content fingerprint
pub fn script_hash(script_id: &str) -> String {
    format!("{:X}", md5::compute(script_id.as_bytes()))
}

/// Emit `Debugger.scriptParsed` for a virtual script not yet announced.
///
/// Returns true when a notification was emitted.
pub fn script_parsed(
    script_id: &str,
    session: &mut Session,
    emitter: &Emitter,
    end_line: Option<usize>,
) -> bool {
    if !is_virtual_script(script_id) {
        return false;
    }

    if !session.state.script_parsed_files.insert(script_id.to_string()) {
        return false;
    }

    debug!("Registering script {} ({})", script_id, display_path(script_id));

    emitter.notify(
        frontend_events::SCRIPT_PARSED,
        json!({
            "scriptId": script_id,
            "url": file_url(script_id),
            "startLine": 0,
            "startColumn": 0,
            "endLine": end_line.unwrap_or(0),
            "endColumn": 0,
            "executionContextId": execution_context::ID,
            "hash": script_hash(script_id),
            "executionContextAuxData": {
                "isDefault": true,
                "type": "default",
                "frameId": execution_context::FRAME_ID,
            },
            "isLiveEdit": false,
            "sourceMapURL": "",
            "hasSourceURL": false,
            "isModule": false,
        }),
    );

    true
}

/// Pre-register every project source file matching the configured glob,
/// in discovery order
pub async fn script_parse_project(session: &mut Session, emitter: &Emitter) -> BridgeResult<usize> {
    let root = session.project.source_root.clone();
    let files = session
        .files
        .expand(&root, &session.project.source_glob)
        .await?;

    let mut registered = 0;
    for relative in files {
        let content = session.files.read_to_string(&root.join(&relative)).await?;
        let script_id = format!("@./{}", slash_path(&relative));

        if script_parsed(&script_id, session, emitter, Some(content.lines().count())) {
            registered += 1;
        }
    }

    info!("Registered {} project script(s) from {}", registered, root.display());
    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{channel, drain, notifications, session, session_at};

    #[test]
    fn test_hash_is_uppercase_md5_of_id() {
        assert_eq!(script_hash("@./a.lua"), "EAD479755F594A68E15A095BDEF1C1CA");
        assert_eq!(script_hash("@./src/main.lua"), "E4A23EE7565D753D6CFF10A92370A7E9");
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut session = session();
        let (emitter, mut rx) = channel();

        assert!(script_parsed("@./a.lua", &mut session, &emitter, None));
        assert!(!script_parsed("@./a.lua", &mut session, &emitter, Some(12)));

        let out = drain(&mut rx);
        let parsed = notifications(&out);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].method, "Debugger.scriptParsed");
        assert_eq!(parsed[0].params["scriptId"], "@./a.lua");
        assert_eq!(parsed[0].params["url"], "file:///a.lua");
        assert_eq!(parsed[0].params["endLine"], 0);
        assert_eq!(parsed[0].params["executionContextId"], 1);
        assert_eq!(parsed[0].params["hash"], "EAD479755F594A68E15A095BDEF1C1CA");
    }

    #[test]
    fn test_non_virtual_ids_are_ignored() {
        let mut session = session();
        let (emitter, mut rx) = channel();

        assert!(!script_parsed("=[C]", &mut session, &emitter, None));
        assert!(!script_parsed("main.lua", &mut session, &emitter, None));
        assert!(drain(&mut rx).is_empty());
        assert!(session.state.script_parsed_files.is_empty());
    }

    #[tokio::test]
    async fn test_project_scan_registers_each_file_with_line_count() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("lib")).unwrap();
        std::fs::write(dir.path().join("main.lua"), "local a = 1\nprint(a)\n").unwrap();
        std::fs::write(dir.path().join("lib/util.lua"), "return {}\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip me\n").unwrap();

        let mut session = session_at(dir.path());
        let (emitter, mut rx) = channel();

        let count = script_parse_project(&mut session, &emitter).await.unwrap();
        assert_eq!(count, 2);

        let out = drain(&mut rx);
        let parsed = notifications(&out);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].params["scriptId"], "@./lib/util.lua");
        assert_eq!(parsed[0].params["endLine"], 1);
        assert_eq!(parsed[1].params["scriptId"], "@./main.lua");
        assert_eq!(parsed[1].params["endLine"], 2);
    }
}
