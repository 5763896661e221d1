//! Tests for the capacity growth policy

use std::time::Duration;

use crate::{BufferConfig, ByteQueue, GrowthPolicy};

fn policy(step: usize, threshold: f64, max_capacity: usize) -> GrowthPolicy {
    GrowthPolicy::new(&BufferConfig {
        initial_capacity: 0, // unused by the policy itself
        resize_step: step,
        resize_threshold: threshold,
        max_capacity,
    })
}

#[test]
fn test_default_config() {
    let config = BufferConfig::default();
    assert_eq!(config.initial_capacity, 4096);
    assert_eq!(config.resize_step, 2048);
    assert_eq!(config.resize_threshold, 0.2);
    assert_eq!(config.max_capacity, 1024 * 1024);
}

#[test]
fn test_no_growth_when_mostly_free() {
    let queue = ByteQueue::new(100);
    queue.try_push(&[0u8; 10]).unwrap();

    let grown = policy(50, 0.3, 1000).check(&queue).unwrap();
    assert!(!grown);
    assert_eq!(queue.capacity(), 100);
}

#[test]
fn test_grows_at_threshold() {
    // capacity=100, step=50, threshold=0.3: 90 bytes pushed leaves a free
    // ratio of 0.10, so the next check grows to 150.
    let queue = ByteQueue::new(100);
    queue.try_push(&[0u8; 90]).unwrap();

    let grown = policy(50, 0.3, 1000).check(&queue).unwrap();
    assert!(grown);
    assert_eq!(queue.capacity(), 150);
    assert_eq!(queue.len(), 90);
}

#[tokio::test]
async fn test_growth_keeps_bytes_in_order() {
    let queue = ByteQueue::new(100);
    let input: Vec<u8> = (0..90u8).collect();
    queue.try_push(&input).unwrap();

    policy(50, 0.3, 1000).check(&queue).unwrap();

    let out = queue.pop_available(Duration::from_millis(10)).await;
    assert_eq!(&out[..], &input[..]);
}

#[test]
fn test_growth_capped_at_max_capacity() {
    let queue = ByteQueue::new(100);
    queue.try_push(&[0u8; 95]).unwrap();

    let p = policy(50, 0.3, 120);
    assert!(p.check(&queue).unwrap());
    assert_eq!(queue.capacity(), 120);

    // At the ceiling: no further growth even though the ratio qualifies.
    assert!(!p.check(&queue).unwrap());
    assert_eq!(queue.capacity(), 120);
}

#[test]
fn test_repeated_checks_grow_monotonically() {
    let queue = ByteQueue::new(64);
    queue.try_push(&[0u8; 60]).unwrap();

    let p = policy(64, 0.2, 4096);
    let mut last = queue.capacity();
    while p.check(&queue).unwrap() {
        let now = queue.capacity();
        assert!(now > last);
        last = now;
    }
    // Stops once the free ratio clears the threshold.
    let (free, capacity) = queue.usage();
    assert!(free as f64 / capacity as f64 > 0.2);
}
