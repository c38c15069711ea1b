// Bridge configuration
//
// Command-line flags with environment fallbacks

use behavior_cdp::ProjectConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "behavior-bridge",
    version,
    about = "CDP debugger bridge for behavior-protocol runtimes"
)]
pub struct Config {
    /// Runtime debug endpoint (host:port)
    #[arg(long, env = "BEHAVIOR_BRIDGE_BACKEND", default_value = "127.0.0.1:8172")]
    pub backend: String,

    /// Project directory scripts are resolved against
    #[arg(long, env = "BEHAVIOR_BRIDGE_SOURCE_ROOT", default_value = ".")]
    pub source_root: PathBuf,

    /// Glob selecting project scripts under the source root
    #[arg(long, env = "BEHAVIOR_BRIDGE_SOURCE_GLOB", default_value = "**/*.lua")]
    pub source_glob: String,

    /// Log filter directives, used when RUST_LOG is unset
    #[arg(
        long,
        env = "BEHAVIOR_BRIDGE_LOG",
        default_value = "behavior_bridge=info,behavior_cdp=info"
    )]
    pub log: String,
}

impl Config {
    pub fn project(&self) -> ProjectConfig {
        ProjectConfig {
            source_root: self.source_root.clone(),
            source_glob: self.source_glob.clone(),
        }
    }
}
