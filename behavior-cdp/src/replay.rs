// Stored event replay
//
// A newly attached frontend receives the console/log history it missed.

use crate::commands::frontend_events;
use crate::emitter::Emitter;
use crate::protocol::BridgeResult;
use crate::session::Session;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayChannel {
    Log,
    Console,
}

impl ReplayChannel {
    pub fn method(self) -> &'static str {
        match self {
            ReplayChannel::Log => frontend_events::ENTRY_ADDED,
            ReplayChannel::Console => frontend_events::CONSOLE_API_CALLED,
        }
    }
}

/// Forward every stored event of the channel's method, in stored order
pub async fn replay_events(
    channel: ReplayChannel,
    session: &Session,
    emitter: &Emitter,
) -> BridgeResult<usize> {
    let events = session.store.event_get_by_method(channel.method()).await?;
    let count = events.len();

    for event in events {
        emitter.forward(event);
    }

    debug!("Replayed {} {} event(s)", count, channel.method());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Notification;
    use crate::testing::{channel, drain, notifications, session};
    use serde_json::json;

    #[tokio::test]
    async fn test_replay_preserves_order_and_filters_method() {
        let session = session();
        for n in 0..3 {
            session
                .store
                .event_add(Notification::new("Log.entryAdded", json!({"entry": {"text": n}})))
                .await
                .unwrap();
            session
                .store
                .event_add(Notification::new("Runtime.consoleAPICalled", json!({"n": n})))
                .await
                .unwrap();
        }

        let (emitter, mut rx) = channel();
        let count = replay_events(ReplayChannel::Log, &session, &emitter).await.unwrap();
        assert_eq!(count, 3);

        let out = drain(&mut rx);
        let replayed = notifications(&out);
        assert_eq!(replayed.len(), 3);
        for (n, event) in replayed.iter().enumerate() {
            assert_eq!(event.method, "Log.entryAdded");
            assert_eq!(event.params["entry"]["text"], n);
        }
    }

    #[tokio::test]
    async fn test_replay_with_no_events_emits_nothing() {
        let session = session();
        let (emitter, mut rx) = channel();

        let count = replay_events(ReplayChannel::Console, &session, &emitter).await.unwrap();
        assert_eq!(count, 0);
        assert!(drain(&mut rx).is_empty());
    }
}
