use crate::{Subscriber, SubscriberState, WsSubscriber};

use std::time::Duration;

use axum::extract::ws::{Message, Utf8Bytes};
use futures::StreamExt;
use futures::channel::mpsc;

const FRAME: &str = r#"{"type":"sample","t":1,"v":2.0}"#;

async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached");
}

#[test]
fn given_new_subscriber_when_created_then_connecting_with_empty_backlog() {
    let (subscriber, _outbox) = WsSubscriber::new();

    assert_eq!(subscriber.state(), SubscriberState::Connecting);
    assert_eq!(subscriber.backlog_bytes(), 0);
}

#[test]
fn given_closed_subscriber_when_mark_open_then_stays_closed() {
    let (subscriber, _outbox) = WsSubscriber::new();

    subscriber.mark_closed();
    subscriber.mark_open();

    assert_eq!(subscriber.state(), SubscriberState::Closed);
}

#[test]
fn given_unflushed_messages_when_sent_then_backlog_counts_their_bytes() {
    let (subscriber, _outbox) = WsSubscriber::new();
    subscriber.mark_open();

    subscriber.send(&Utf8Bytes::from_static(FRAME));
    subscriber.send(&Utf8Bytes::from_static(FRAME));

    assert_eq!(subscriber.backlog_bytes(), 2 * FRAME.len());
}

#[tokio::test]
async fn given_running_pump_when_message_flushed_then_backlog_released() {
    let (subscriber, outbox) = WsSubscriber::new();
    let (sink, mut frames) = mpsc::unbounded::<Message>();
    subscriber.mark_open();

    let pump = tokio::spawn(WsSubscriber::pump(outbox, sink));
    subscriber.send(&Utf8Bytes::from_static(FRAME));

    let frame = frames.next().await.unwrap();
    assert_eq!(frame, Message::Text(Utf8Bytes::from_static(FRAME)));
    eventually(|| subscriber.backlog_bytes() == 0).await;

    drop(subscriber);
    pump.await.unwrap();
}

#[tokio::test]
async fn given_failing_transport_when_pumped_then_subscriber_closes() {
    let (subscriber, outbox) = WsSubscriber::new();
    let (sink, frames) = mpsc::unbounded::<Message>();
    drop(frames);
    subscriber.mark_open();

    subscriber.send(&Utf8Bytes::from_static(FRAME));
    let pump = tokio::spawn(WsSubscriber::pump(outbox, sink));

    eventually(|| subscriber.state() == SubscriberState::Closed).await;
    assert_eq!(subscriber.backlog_bytes(), 0);
    pump.await.unwrap();
}

#[test]
fn given_outbox_dropped_when_send_then_closed_without_backlog() {
    let (subscriber, outbox) = WsSubscriber::new();
    subscriber.mark_open();
    drop(outbox);

    subscriber.send(&Utf8Bytes::from_static(FRAME));

    assert_eq!(subscriber.state(), SubscriberState::Closed);
    assert_eq!(subscriber.backlog_bytes(), 0);
}
