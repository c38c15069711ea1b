// File-system collaborator
//
// Source discovery and reading for script pre-registration and
// Debugger.getScriptSource

use crate::protocol::{BridgeError, BridgeResult};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[async_trait]
pub trait SourceFiles: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> BridgeResult<String>;

    /// Files under `root` matching `pattern`, as paths relative to `root`,
    /// in a stable order
    async fn expand(&self, root: &Path, pattern: &str) -> BridgeResult<Vec<PathBuf>>;
}

/// Local disk access
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFiles;

#[async_trait]
impl SourceFiles for LocalFiles {
    async fn read_to_string(&self, path: &Path) -> BridgeResult<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn expand(&self, root: &Path, pattern: &str) -> BridgeResult<Vec<PathBuf>> {
        let matcher = glob_to_regex(pattern)?;
        let root = root.to_path_buf();

        tokio::task::spawn_blocking(move || walk_matching(&root, &matcher))
            .await
            .map_err(|e| BridgeError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    }
}

fn walk_matching(root: &Path, matcher: &Regex) -> BridgeResult<Vec<PathBuf>> {
    let mut matches = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if matcher.is_match(&slash_path(relative)) {
            matches.push(relative.to_path_buf());
        }
    }

    debug!("{} source file(s) under {}", matches.len(), root.display());
    Ok(matches)
}

/// Relative path rendered with `/` separators on every platform
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Translate a source glob into an anchored regex.
///
/// `**/` matches any directory depth (including none), `*` and `?` stay
/// within one path segment.
pub fn glob_to_regex(pattern: &str) -> BridgeResult<Regex> {
    let mut re = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    re.push_str("(?:.*/)?");
                } else {
                    re.push_str(".*");
                }
            }
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            other => re.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');

    Regex::new(&re).map_err(|e| BridgeError::InvalidPattern(format!("{}: {}", pattern, e)))
}
