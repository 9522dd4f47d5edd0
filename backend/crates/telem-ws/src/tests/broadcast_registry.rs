use super::RecordingSubscriber;
use crate::{BroadcastRegistry, ConnectionId, FanoutOutcome, Subscriber, SubscriberState};

use telem_core::Sample;

use std::sync::Arc;

const THRESHOLD: usize = 262_144;

fn register(
    registry: &mut BroadcastRegistry,
    subscriber: RecordingSubscriber,
) -> (ConnectionId, Arc<RecordingSubscriber>) {
    let id = ConnectionId::new();
    let subscriber = Arc::new(subscriber);
    registry.register(id, Arc::clone(&subscriber) as Arc<dyn Subscriber>);
    (id, subscriber)
}

#[test]
fn given_no_subscribers_when_fanout_then_nothing_happens() {
    let mut registry = BroadcastRegistry::new(THRESHOLD);

    let outcome = registry.fanout(&Sample::new(1, 1.0)).unwrap();

    assert_eq!(outcome, FanoutOutcome::default());
}

#[test]
fn given_open_subscriber_when_fanout_then_receives_encoded_sample() {
    let mut registry = BroadcastRegistry::new(THRESHOLD);
    let (_, subscriber) = register(&mut registry, RecordingSubscriber::open());

    let outcome = registry.fanout(&Sample::new(1_700_000_000_000, 3.5)).unwrap();

    assert_eq!(outcome.delivered, 1);
    assert_eq!(
        subscriber.received(),
        vec![r#"{"type":"sample","t":1700000000000,"v":3.5}"#.to_string()]
    );
}

#[test]
fn given_slow_and_fast_subscribers_when_fanout_then_only_slow_one_misses_sample() {
    let mut registry = BroadcastRegistry::new(THRESHOLD);
    let (_, slow) = register(&mut registry, RecordingSubscriber::open().with_backlog(300_000));
    let (_, fast) = register(&mut registry, RecordingSubscriber::open());

    let outcome = registry.fanout(&Sample::new(7, 42.0)).unwrap();

    assert_eq!(outcome.delivered, 1);
    assert_eq!(outcome.dropped, 1);
    assert!(slow.received().is_empty());
    assert_eq!(fast.received().len(), 1);
}

#[test]
fn given_backlog_exactly_at_threshold_when_fanout_then_still_delivered() {
    let mut registry = BroadcastRegistry::new(THRESHOLD);
    let (_, subscriber) = register(&mut registry, RecordingSubscriber::open().with_backlog(THRESHOLD));

    let outcome = registry.fanout(&Sample::new(1, 0.0)).unwrap();

    assert_eq!(outcome.delivered, 1);
    assert_eq!(outcome.dropped, 0);
    assert_eq!(subscriber.received().len(), 1);
}

#[test]
fn given_connecting_subscriber_when_fanout_then_skipped_but_kept() {
    let mut registry = BroadcastRegistry::new(THRESHOLD);
    let (_, subscriber) = register(
        &mut registry,
        RecordingSubscriber::with_state(SubscriberState::Connecting),
    );

    let outcome = registry.fanout(&Sample::new(1, 0.0)).unwrap();

    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.dropped, 0);
    assert!(subscriber.received().is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn given_subscriber_closed_mid_stream_when_fanout_then_pruned() {
    let mut registry = BroadcastRegistry::new(THRESHOLD);
    let (id, subscriber) = register(&mut registry, RecordingSubscriber::open());
    registry.fanout(&Sample::new(1, 0.0)).unwrap();

    subscriber.set_state(SubscriberState::Closed);
    let outcome = registry.fanout(&Sample::new(2, 0.0)).unwrap();

    assert_eq!(outcome.skipped, 1);
    assert_eq!(subscriber.received().len(), 1);
    assert!(registry.is_empty());
    assert!(!registry.unregister(id));
}

#[test]
fn given_registered_subscriber_when_unregistered_then_no_longer_receives() {
    let mut registry = BroadcastRegistry::new(THRESHOLD);
    let (id, subscriber) = register(&mut registry, RecordingSubscriber::open());

    assert!(registry.unregister(id));
    registry.fanout(&Sample::new(1, 0.0)).unwrap();

    assert!(subscriber.received().is_empty());
}
