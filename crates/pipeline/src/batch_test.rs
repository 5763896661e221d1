//! Tests for the write batch

use crate::batch::WriteBatch;

#[test]
fn test_append_within_capacity() {
    let mut batch = WriteBatch::new(16);
    assert_eq!(batch.append(b"hello"), 5);
    assert_eq!(batch.remaining(), 11);
    assert_eq!(batch.as_slice(), b"hello");
}

#[test]
fn test_append_truncates_at_capacity() {
    let mut batch = WriteBatch::new(8);
    assert_eq!(batch.append(b"0123456789"), 8);
    assert_eq!(batch.remaining(), 0);
    assert_eq!(batch.as_slice(), b"01234567");
}

#[test]
fn test_clear_resets_index() {
    let mut batch = WriteBatch::new(8);
    batch.append(b"abcd");
    batch.clear();

    assert!(batch.is_empty());
    assert_eq!(batch.capacity(), 8);
    batch.append(b"xy");
    assert_eq!(batch.as_slice(), b"xy");
}

#[test]
#[should_panic(expected = "non-zero")]
fn test_zero_capacity_panics() {
    let _ = WriteBatch::new(0);
}
