//! Time-bucketed cyclic rotation.
//!
//! The leading element advances by one position per elapsed bucket, so every
//! element leads equally often without any stored cursor. Within a bucket the
//! output is fixed.

use std::time::Duration;

/// Width of one rotation bucket in milliseconds (10 minutes).
pub const ROTATION_BUCKET_MS: i64 = 10 * 60 * 1000;

pub const ROTATION_BUCKET: Duration = Duration::from_millis(ROTATION_BUCKET_MS as u64);

/// Number of whole buckets elapsed since the epoch.
pub fn bucket_number(now_millis: i64) -> i64 {
    now_millis.div_euclid(ROTATION_BUCKET_MS)
}

/// Start of the bucket containing `now_millis`.
pub fn bucket_start_millis(now_millis: i64) -> i64 {
    bucket_number(now_millis) * ROTATION_BUCKET_MS
}

/// `ceil(now / bucket) * bucket - now`. Zero exactly on a boundary.
pub fn millis_until_next_bucket(now_millis: i64) -> i64 {
    let next = (now_millis + ROTATION_BUCKET_MS - 1).div_euclid(ROTATION_BUCKET_MS) * ROTATION_BUCKET_MS;
    next - now_millis
}

pub fn rotation_index(len: usize, now_millis: i64) -> usize {
    if len <= 1 {
        return 0;
    }
    bucket_number(now_millis).rem_euclid(len as i64) as usize
}

pub fn rotate_by<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    let index = index % items.len();
    let mut rotated = Vec::with_capacity(items.len());
    rotated.extend_from_slice(&items[index..]);
    rotated.extend_from_slice(&items[..index]);
    rotated
}

/// Rotates `items` left by the rotation index for `now_millis`.
pub fn rotate<T: Clone>(items: &[T], now_millis: i64) -> Vec<T> {
    rotate_by(items, rotation_index(items.len(), now_millis))
}
