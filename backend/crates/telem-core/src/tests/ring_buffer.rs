use crate::{CoreError, RingBuffer, Sample};

fn timestamps(samples: &[Sample]) -> Vec<i64> {
    samples.iter().map(|s| s.t).collect()
}

#[test]
fn given_zero_capacity_when_created_then_error() {
    let result = RingBuffer::new(0);
    assert!(matches!(result, Err(CoreError::InvalidCapacity { .. })));
}

#[test]
fn given_new_buffer_when_snapshot_then_empty() {
    let buffer = RingBuffer::new(4).unwrap();

    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 4);
    assert!(buffer.snapshot().is_empty());
}

#[test]
fn given_capacity_3_when_four_appended_then_oldest_evicted() {
    let mut buffer = RingBuffer::new(3).unwrap();
    for t in 1..=4 {
        buffer.append(Sample::new(t, t as f64 * 10.0));
    }

    let snapshot = buffer.snapshot();
    assert_eq!(timestamps(&snapshot), vec![2, 3, 4]);
    assert_eq!(snapshot[0].v, 20.0);
    assert_eq!(buffer.len(), 3);
}

#[test]
fn given_fewer_than_capacity_when_snapshot_then_all_in_order() {
    let mut buffer = RingBuffer::new(10).unwrap();
    for t in 0..4 {
        buffer.append(Sample::new(t, 0.5));
    }

    assert_eq!(timestamps(&buffer.snapshot()), vec![0, 1, 2, 3]);
    assert_eq!(buffer.len(), 4);
}

#[test]
fn given_exactly_capacity_when_snapshot_then_all_in_order() {
    let mut buffer = RingBuffer::new(5).unwrap();
    for t in 0..5 {
        buffer.append(Sample::new(t, 1.0));
    }

    assert_eq!(timestamps(&buffer.snapshot()), vec![0, 1, 2, 3, 4]);
}

#[test]
fn given_many_wraps_when_snapshot_then_last_capacity_samples() {
    let mut buffer = RingBuffer::new(7).unwrap();
    for t in 0..1000 {
        buffer.append(Sample::new(t, 0.0));
    }

    assert_eq!(timestamps(&buffer.snapshot()), (993..1000).collect::<Vec<_>>());
}

#[test]
fn given_snapshot_taken_when_more_appended_then_snapshot_unchanged() {
    let mut buffer = RingBuffer::new(2).unwrap();
    buffer.append(Sample::new(1, 1.0));
    buffer.append(Sample::new(2, 2.0));

    let before = buffer.snapshot();
    buffer.append(Sample::new(3, 3.0));

    assert_eq!(timestamps(&before), vec![1, 2]);
    assert_eq!(timestamps(&buffer.snapshot()), vec![2, 3]);
}

#[test]
fn given_capacity_one_when_appended_then_holds_latest_only() {
    let mut buffer = RingBuffer::new(1).unwrap();
    buffer.append(Sample::new(1, 1.0));
    buffer.append(Sample::new(2, 2.0));

    assert_eq!(buffer.snapshot(), vec![Sample::new(2, 2.0)]);
}
