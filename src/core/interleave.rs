//! Merges boosted listings into a rotated regular list at even spacing.

use crate::core::rotation::bucket_start_millis;
use crate::domain::model::{Listing, PresentedListing, Scope};

/// Minimum gap between boosted insertions: at least one regular entry
/// separates two boosted ones.
pub const MIN_SPACING: usize = 2;

/// `max(floor(primary / boosted), 2)`. Only meaningful for `boosted_len > 0`.
pub fn spacing(primary_len: usize, boosted_len: usize) -> usize {
    if boosted_len == 0 {
        return MIN_SPACING;
    }
    (primary_len / boosted_len).max(MIN_SPACING)
}

/// Where an entry came from in the merge, used to build its presentation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Regular entry at this primary position.
    Regular(usize),
    /// Boosted entry inserted after this primary position.
    Boosted(usize),
    /// Boosted entry appended after the primary list ran out.
    Remaining(usize),
}

pub fn presentation_key(scope: Scope, id: &str, slot: Slot, bucket_start: i64) -> String {
    match slot {
        Slot::Regular(index) => format!("{}-regular-{}-{}-{}", scope, id, index, bucket_start),
        Slot::Boosted(index) => format!("{}-boosted-{}-{}-{}", scope, id, index, bucket_start),
        Slot::Remaining(index) => {
            format!("{}-boosted-{}-remaining-{}-{}", scope, id, index, bucket_start)
        }
    }
}

fn present(listing: &Listing, scope: Scope, slot: Slot, bucket_start: i64) -> PresentedListing {
    PresentedListing {
        listing: listing.clone(),
        presentation_key: presentation_key(scope, &listing.id, slot, bucket_start),
    }
}

/// Walks `primary` in order and, after every `spacing`-th entry, places the
/// next boosted entry. Boosted entries left over once `primary` is exhausted
/// are appended at the end, so the output always holds `M + K` entries.
///
/// Both inputs are expected to be rotated already.
pub fn interleave(
    primary: &[Listing],
    boosted: &[Listing],
    scope: Scope,
    now_millis: i64,
) -> Vec<PresentedListing> {
    let bucket_start = bucket_start_millis(now_millis);
    let mut result = Vec::with_capacity(primary.len() + boosted.len());

    if boosted.is_empty() {
        result.extend(
            primary
                .iter()
                .enumerate()
                .map(|(index, listing)| present(listing, scope, Slot::Regular(index), bucket_start)),
        );
        return result;
    }

    let spacing = spacing(primary.len(), boosted.len());
    let mut pending = boosted.iter().enumerate().peekable();

    for (index, listing) in primary.iter().enumerate() {
        result.push(present(listing, scope, Slot::Regular(index), bucket_start));

        if (index + 1) % spacing == 0 {
            if let Some((_, next)) = pending.next() {
                result.push(present(next, scope, Slot::Boosted(index), bucket_start));
            }
        }
    }

    if pending.peek().is_some() {
        tracing::debug!(
            scope = %scope,
            spacing,
            remaining = pending.len(),
            "appending boosted listings past the end of the regular list"
        );
    }
    for (boosted_index, listing) in pending {
        result.push(present(listing, scope, Slot::Remaining(boosted_index), bucket_start));
    }

    result
}
