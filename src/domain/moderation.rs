//! Admin workflow rules for listing status and tier changes.
//!
//! These operate on in-memory listings only; writing the result back to the
//! data store is the caller's concern.

use crate::domain::model::{Listing, Status, Tier};
use crate::utils::error::{Result, RotationError};
use chrono::{DateTime, Utc};

pub fn can_transition(from: Status, to: Status) -> bool {
    matches!(
        (from, to),
        (Status::Pending, Status::Approved)
            | (Status::Pending, Status::Rejected)
            | (Status::Pending, Status::Live)
            | (Status::Approved, Status::Live)
    )
}

/// Moves a listing to `to`. Going live stamps the schedule with `now`,
/// rejection clears it.
pub fn transition(listing: &mut Listing, to: Status, now: DateTime<Utc>) -> Result<()> {
    if !can_transition(listing.status, to) {
        return Err(RotationError::InvalidTransition {
            id: listing.id.clone(),
            from: listing.status,
            to,
        });
    }

    match to {
        Status::Live => listing.scheduled_for = Some(now),
        Status::Rejected => listing.scheduled_for = None,
        _ => {}
    }

    tracing::info!(id = %listing.id, from = %listing.status, to = %to, "listing status changed");
    listing.status = to;
    Ok(())
}

/// Tier only changes on approved or live listings. The board picks the new
/// tier up on its next re-partition.
pub fn change_tier(listing: &mut Listing, tier: Tier) -> Result<()> {
    if !matches!(listing.status, Status::Approved | Status::Live) {
        return Err(RotationError::TierChangeNotAllowed {
            id: listing.id.clone(),
            tier,
            status: listing.status,
        });
    }

    tracing::info!(id = %listing.id, from = %listing.tier, to = %tier, "listing tier changed");
    listing.tier = tier;
    Ok(())
}
