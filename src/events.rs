//! 实时事件广播。
//!
//! [`EventHub`] 基于 `tokio::sync::broadcast`，发送方不等待任何确认；
//! 订阅者落后超过缓冲区时直接跳过丢失的事件。客户端通过 SSE 订阅。

use std::convert::Infallible;

use actix_web::web::Bytes;
use futures_util::Stream;
use log::{debug, warn};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use utoipa::ToSchema;

use crate::utils::format_cents;

pub const JACKPOT_WON_EVENT: &str = "jackpot-won";

/// 一条已序列化的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubEvent {
    pub name: String,
    pub data: String,
}

impl HubEvent {
    /// Server-Sent Events 帧格式
    pub fn to_sse_frame(&self) -> String {
        let mut frame = format!("event: {}\n", self.name);
        for line in self.data.lines() {
            frame.push_str("data: ");
            frame.push_str(line);
            frame.push('\n');
        }
        frame.push('\n');
        frame
    }
}

/// `jackpot-won` 事件负载
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JackpotWonEvent {
    /// 奖池名称
    #[serde(rename = "type")]
    pub jackpot_type: String,
    #[schema(example = "100.00")]
    pub amount_won: String,
}

impl JackpotWonEvent {
    pub fn new(name: impl Into<String>, amount_cents: i64) -> Self {
        Self {
            jackpot_type: name.into(),
            amount_won: format_cents(amount_cents),
        }
    }
}

#[derive(Clone)]
pub struct EventHub {
    sender: broadcast::Sender<HubEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 广播事件，没有订阅者时直接丢弃
    pub fn emit<P: Serialize>(&self, name: &str, payload: &P) {
        let data = match serde_json::to_string(payload) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to serialize {name} event: {e}");
                return;
            }
        };
        let receivers = self
            .sender
            .send(HubEvent {
                name: name.to_string(),
                data,
            })
            .unwrap_or(0);
        debug!("Emitted {name} event to {receivers} subscriber(s)");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// 订阅并转换为 SSE 字节流，先发送一条注释帧让客户端确认连接
    pub fn sse_stream(&self) -> impl Stream<Item = Result<Bytes, Infallible>> + 'static {
        let receiver = self.subscribe();
        futures_util::stream::unfold((receiver, true), |(mut receiver, first)| async move {
            if first {
                return Some((Ok(Bytes::from_static(b": connected\n\n")), (receiver, false)));
            }
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        let frame = Bytes::from(event.to_sse_frame());
                        return Some((Ok(frame), (receiver, false)));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("SSE subscriber lagged, skipped {skipped} event(s)");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let hub = EventHub::new(8);
        let mut rx = hub.subscribe();

        hub.emit(JACKPOT_WON_EVENT, &JackpotWonEvent::new("Mega", 10000));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, "jackpot-won");
        assert_eq!(event.data, r#"{"type":"Mega","amount_won":"100.00"}"#);
    }

    #[test]
    fn test_emit_without_subscribers_is_noop() {
        let hub = EventHub::new(8);
        hub.emit(JACKPOT_WON_EVENT, &JackpotWonEvent::new("Mega", 1));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_sse_frame() {
        let event = HubEvent {
            name: "jackpot-won".into(),
            data: r#"{"type":"Mega"}"#.into(),
        };
        assert_eq!(
            event.to_sse_frame(),
            "event: jackpot-won\ndata: {\"type\":\"Mega\"}\n\n"
        );
    }

    #[tokio::test]
    async fn test_sse_stream_skips_lagged_events() {
        let hub = EventHub::new(1);
        let mut stream = Box::pin(hub.sse_stream());

        let hello = stream.next().await.unwrap().unwrap();
        assert_eq!(&hello[..], b": connected\n\n");

        hub.emit("first", &1);
        hub.emit("second", &2);

        let frame = stream.next().await.unwrap().unwrap();
        assert_eq!(&frame[..], b"event: second\ndata: 2\n\n");
    }
}
