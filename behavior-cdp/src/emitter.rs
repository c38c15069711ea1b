// Outbound emission point
//
// Everything the core sends, to either party, goes through one ordered
// channel so script announcements always precede the pause that uses them.

use crate::protocol::{BackendCommand, FrontendMessage, Notification, RequestId, Response};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Message leaving the bridge
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Frontend(FrontendMessage),
    Backend(BackendCommand),
}

/// Cloneable handle for emitting to the frontend and backend
#[derive(Clone, Debug)]
pub struct Emitter {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl Emitter {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, method: &str, params: Value) {
        debug!("-> frontend {}", method);
        self.send(Outbound::Frontend(FrontendMessage::Notification(
            Notification::new(method, params),
        )));
    }

    pub fn forward(&self, notification: Notification) {
        debug!("-> frontend {} (replayed)", notification.method);
        self.send(Outbound::Frontend(FrontendMessage::Notification(notification)));
    }

    pub fn respond(&self, id: RequestId, result: Value) {
        debug!("-> frontend response id={}", id);
        self.send(Outbound::Frontend(FrontendMessage::Response(Response { id, result })));
    }

    pub fn send_backend(&self, command: BackendCommand) {
        debug!("-> backend {}", command.method);
        self.send(Outbound::Backend(command));
    }

    fn send(&self, message: Outbound) {
        if self.tx.send(message).is_err() {
            warn!("Outbound receiver dropped, message discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emission_order_is_preserved() {
        let (emitter, mut rx) = Emitter::channel();

        emitter.notify("Debugger.scriptParsed", json!({}));
        emitter.send_backend(BackendCommand::cleared("behavior.executeResume"));
        emitter.respond(4, json!({}));

        assert!(matches!(
            rx.try_recv().unwrap(),
            Outbound::Frontend(FrontendMessage::Notification(_))
        ));
        assert!(matches!(rx.try_recv().unwrap(), Outbound::Backend(_)));
        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Frontend(FrontendMessage::Response(Response {
                id: 4,
                result: json!({})
            }))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_after_receiver_drop_does_not_panic() {
        let (emitter, rx) = Emitter::channel();
        drop(rx);
        emitter.notify("Debugger.resumed", json!({}));
    }
}
