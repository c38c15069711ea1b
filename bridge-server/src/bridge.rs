// Bridge event loop
//
// One loop owns the router and alternates between frontend requests (stdio)
// and runtime messages (TCP). A separate task drains the outbound channel to
// whichever party each message targets.

use crate::config::Config;
use crate::transport::{write_line, LineReader};
use anyhow::{Context, Result};
use behavior_cdp::{
    BackendMessage, Emitter, LocalFiles, MemoryStore, Outbound, Request, RequestRouter, Session,
};
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub async fn run(config: &Config) -> Result<()> {
    info!("Connecting to runtime at {}", config.backend);
    let stream = TcpStream::connect(&config.backend)
        .await
        .with_context(|| format!("Failed to connect to runtime at {}", config.backend))?;
    let (backend_read, backend_write) = stream.into_split();

    let (emitter, outbound_rx) = Emitter::channel();
    let writer = tokio::spawn(async move {
        let mut frontend = tokio::io::stdout();
        let mut backend = backend_write;
        pump_outbound(outbound_rx, &mut frontend, &mut backend).await
    });

    let session = Session::new(
        Arc::new(MemoryStore::new()),
        Arc::new(LocalFiles),
        config.project(),
    );
    let mut router = RequestRouter::new(session, emitter);

    let mut frontend = LineReader::new(tokio::io::stdin());
    let mut backend = LineReader::new(backend_read);

    info!("Bridge ready, waiting for frontend requests...");

    loop {
        tokio::select! {
            line = frontend.next_line() => match line {
                Ok(Some(line)) => handle_frontend_line(&mut router, &line).await,
                Ok(None) => {
                    info!("Frontend disconnected");
                    break;
                }
                Err(e) => {
                    error!("Frontend read error: {}", e);
                    break;
                }
            },
            line = backend.next_line() => match line {
                Ok(Some(line)) => handle_backend_line(&mut router, &line).await,
                Ok(None) => {
                    info!("Runtime disconnected");
                    break;
                }
                Err(e) => {
                    error!("Runtime read error: {}", e);
                    break;
                }
            },
        }
    }

    // Dropping the router closes the outbound channel and ends the writer
    drop(router);
    writer.await.context("Outbound writer panicked")??;
    Ok(())
}

pub async fn handle_frontend_line(router: &mut RequestRouter, line: &str) {
    debug!("Frontend: {}", line);
    match serde_json::from_str::<Request>(line) {
        Ok(request) => router.deliver(request).await,
        Err(e) => warn!("Invalid frontend request: {}", e),
    }
}

pub async fn handle_backend_line(router: &mut RequestRouter, line: &str) {
    debug!("Runtime: {}", line);
    match serde_json::from_str::<BackendMessage>(line) {
        Ok(message) => router.handle_backend(message).await,
        Err(e) => warn!("Invalid runtime message: {}", e),
    }
}

/// Write outbound messages in emission order until every emitter is dropped
pub async fn pump_outbound<F, B>(
    mut rx: mpsc::UnboundedReceiver<Outbound>,
    frontend: &mut F,
    backend: &mut B,
) -> std::io::Result<()>
where
    F: AsyncWrite + Unpin,
    B: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        match message {
            Outbound::Frontend(msg) => write_line(frontend, &msg).await?,
            Outbound::Backend(cmd) => write_line(backend, &cmd).await?,
        }
    }

    debug!("Outbound channel closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use behavior_cdp::ProjectConfig;
    use serde_json::Value;

    fn router() -> (RequestRouter, mpsc::UnboundedReceiver<Outbound>) {
        let session = Session::new(
            Arc::new(MemoryStore::new()),
            Arc::new(LocalFiles),
            ProjectConfig::default(),
        );
        let (emitter, rx) = Emitter::channel();
        (RequestRouter::new(session, emitter), rx)
    }

    fn lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_messages_reach_their_party() {
        let (mut router, rx) = router();

        let step = r#"{"id":1,"method":"Debugger.stepInto","params":{}}"#;
        handle_frontend_line(&mut router, step).await;
        handle_frontend_line(&mut router, "not json").await;
        handle_backend_line(&mut router, r#"{"method":"behavior.resume"}"#).await;
        drop(router);

        let mut frontend = Vec::new();
        let mut backend = Vec::new();
        pump_outbound(rx, &mut frontend, &mut backend).await.unwrap();

        let to_frontend = lines(&frontend);
        assert_eq!(to_frontend.len(), 2);
        assert_eq!(to_frontend[0]["id"], 1);
        assert_eq!(to_frontend[1]["method"], "Debugger.resumed");

        let to_backend = lines(&backend);
        assert_eq!(to_backend.len(), 2);
        assert_eq!(to_backend[0]["method"], "behavior.setPausePace");
        assert_eq!(to_backend[0]["params"]["step_type"], "into");
        assert_eq!(to_backend[1]["method"], "behavior.executeResume");
        assert_eq!(to_backend[1]["params"], Value::Null);
    }
}
