//! Tests for the bounded byte queue

use std::sync::Arc;
use std::time::Duration;

use crate::{ByteQueue, QueueError};

const SHORT: Duration = Duration::from_millis(10);

// =============================================================================
// Basic push/pop
// =============================================================================

#[tokio::test]
async fn test_push_then_pop_returns_same_bytes() {
    let queue = ByteQueue::new(64);
    queue.try_push(b"hello world").unwrap();

    let out = queue.pop_available(SHORT).await;
    assert_eq!(&out[..], b"hello world");
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_pop_drains_multiple_pushes_in_order() {
    let queue = ByteQueue::new(64);
    queue.try_push(b"one ").unwrap();
    queue.try_push(b"two ").unwrap();
    queue.try_push(b"three").unwrap();

    let out = queue.pop_available(SHORT).await;
    assert_eq!(&out[..], b"one two three");
}

#[tokio::test]
async fn test_empty_pop_returns_after_wait() {
    let queue = ByteQueue::new(16);

    let start = std::time::Instant::now();
    let out = queue.pop_available(Duration::from_millis(50)).await;
    assert!(out.is_empty());
    // Bounded wait: must not hang past the timeout (generous upper bound
    // for slow CI schedulers).
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_pop_wakes_on_push() {
    let queue = Arc::new(ByteQueue::new(16));

    let popper = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move { queue.pop_available(Duration::from_secs(30)).await })
    };

    tokio::time::sleep(SHORT).await;
    queue.try_push(b"data").unwrap();

    let out = popper.await.unwrap();
    assert_eq!(&out[..], b"data");
}

// =============================================================================
// Wrap-around
// =============================================================================

#[tokio::test]
async fn test_fifo_across_wrap_around() {
    let queue = ByteQueue::new(8);

    // Advance head so the next push wraps.
    queue.try_push(b"abcdef").unwrap();
    assert_eq!(&queue.pop_available(SHORT).await[..], b"abcdef");

    queue.try_push(b"123456").unwrap();
    assert_eq!(&queue.pop_available(SHORT).await[..], b"123456");
}

// =============================================================================
// try_push limits
// =============================================================================

#[test]
fn test_try_push_full_reports_sizes() {
    let queue = ByteQueue::new(8);
    queue.try_push(b"abcde").unwrap();

    match queue.try_push(b"fghij") {
        Err(QueueError::Full { needed, free }) => {
            assert_eq!(needed, 5);
            assert_eq!(free, 3);
        }
        other => panic!("expected Full, got {:?}", other),
    }

    // Failed push must not mutate the queue.
    assert_eq!(queue.len(), 5);
}

#[test]
fn test_free_space_tracks_pushes() {
    let queue = ByteQueue::new(100);
    assert_eq!(queue.free_space(), 100);
    queue.try_push(&[0u8; 90]).unwrap();
    assert_eq!(queue.free_space(), 10);
    assert_eq!(queue.capacity(), 100);
}

// =============================================================================
// Backpressure (a push larger than free space blocks until drains free
// enough cumulative space)
// =============================================================================

#[tokio::test]
async fn test_push_blocks_until_drained() {
    let queue = Arc::new(ByteQueue::new(100));
    queue.try_push(&[1u8; 100]).unwrap();

    let pusher = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move { queue.push(&[2u8; 50]).await })
    };

    tokio::time::sleep(SHORT).await;
    assert!(!pusher.is_finished(), "push returned with the queue full");

    let first = queue.pop_available(SHORT).await;
    assert_eq!(first.len(), 100);

    pusher.await.unwrap().unwrap();
    let second = queue.pop_available(SHORT).await;
    assert_eq!(&second[..], &[2u8; 50][..]);
}

#[tokio::test]
async fn test_oversized_push_completes_across_drain_cycles() {
    // Push of capacity + 1 bytes: must complete once enough cumulative
    // space has been freed, and the drained concatenation must equal the
    // input in order.
    let capacity = 100;
    let queue = Arc::new(ByteQueue::new(capacity));
    let payload: Vec<u8> = (0..=capacity as u32).map(|i| (i % 251) as u8).collect();
    assert_eq!(payload.len(), capacity + 1);

    let pusher = {
        let queue = Arc::clone(&queue);
        let payload = payload.clone();
        tokio::spawn(async move { queue.push(&payload).await })
    };

    let mut drained = Vec::new();
    while drained.len() < payload.len() {
        let chunk = queue.pop_available(Duration::from_secs(5)).await;
        drained.extend_from_slice(&chunk);
    }

    pusher.await.unwrap().unwrap();
    assert_eq!(drained, payload);
}

// =============================================================================
// Resize
// =============================================================================

#[tokio::test]
async fn test_resize_preserves_content_and_order() {
    let queue = ByteQueue::new(16);
    queue.try_push(b"0123456789").unwrap();

    queue.resize_to(32).unwrap();
    assert_eq!(queue.capacity(), 32);
    assert_eq!(queue.len(), 10);

    assert_eq!(&queue.pop_available(SHORT).await[..], b"0123456789");
}

#[tokio::test]
async fn test_resize_preserves_wrapped_content() {
    let queue = ByteQueue::new(8);
    queue.try_push(b"abcdef").unwrap();
    let _ = queue.pop_available(SHORT).await;
    // head is now at offset 6; this push wraps
    queue.try_push(b"ABCDEFG").unwrap();

    queue.resize_to(24).unwrap();
    assert_eq!(&queue.pop_available(SHORT).await[..], b"ABCDEFG");
}

#[test]
fn test_resize_never_shrinks() {
    let queue = ByteQueue::new(64);
    queue.resize_to(16).unwrap();
    assert_eq!(queue.capacity(), 64);
}

#[tokio::test]
async fn test_resize_unblocks_waiting_producer() {
    let queue = Arc::new(ByteQueue::new(10));
    queue.try_push(&[0u8; 10]).unwrap();

    let pusher = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move { queue.push(&[1u8; 5]).await })
    };

    tokio::time::sleep(SHORT).await;
    assert!(!pusher.is_finished());

    queue.resize_to(20).unwrap();
    pusher.await.unwrap().unwrap();
    assert_eq!(queue.len(), 15);
}

#[tokio::test]
async fn test_no_loss_across_resize_mid_stream() {
    // Push N bytes with a resize in the middle, drain, and the output must
    // equal the input byte for byte.
    let queue = ByteQueue::new(64);
    let input: Vec<u8> = (0..200u32).map(|i| (i % 256) as u8).collect();

    queue.try_push(&input[..50]).unwrap();
    queue.resize_to(128).unwrap();
    queue.try_push(&input[50..120]).unwrap();
    queue.resize_to(256).unwrap();
    queue.try_push(&input[120..]).unwrap();

    let out = queue.pop_available(SHORT).await;
    assert_eq!(&out[..], &input[..]);
}

// =============================================================================
// Close semantics
// =============================================================================

#[tokio::test]
async fn test_push_after_close_fails() {
    let queue = ByteQueue::new(16);
    queue.close();

    assert!(matches!(queue.try_push(b"x"), Err(QueueError::Closed)));
    assert!(matches!(queue.push(b"x").await, Err(QueueError::Closed)));
}

#[tokio::test]
async fn test_close_wakes_blocked_producer() {
    let queue = Arc::new(ByteQueue::new(4));
    queue.try_push(&[0u8; 4]).unwrap();

    let pusher = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move { queue.push(&[1u8; 4]).await })
    };

    tokio::time::sleep(SHORT).await;
    queue.close();

    assert!(matches!(pusher.await.unwrap(), Err(QueueError::Closed)));
}

#[tokio::test]
async fn test_buffered_bytes_survive_close() {
    let queue = ByteQueue::new(16);
    queue.try_push(b"leftover").unwrap();
    queue.close();

    assert_eq!(&queue.pop_available(SHORT).await[..], b"leftover");
    assert!(queue.pop_available(SHORT).await.is_empty());
}
