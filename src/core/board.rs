use crate::core::interleave::interleave;
use crate::core::rotation::{bucket_start_millis, rotate, ROTATION_BUCKET_MS};
use crate::core::week::{countdown_to_next_week, week_window, WeekWindow};
use crate::domain::model::{BoardView, Listing, Scope, Status, Tier};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};

/// Tier partitions of one listing snapshot. Callers keep this around and only
/// rebuild it when the snapshot changes or a new week starts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub premium: Vec<Listing>,
    pub boosted: Vec<Listing>,
    pub regular: Vec<Listing>,
    pub weekly_regular: Vec<Listing>,
    pub week: Option<WeekWindow>,
}

impl Partition {
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.week.is_some_and(|week| week.contains(now))
    }

    pub fn len(&self) -> usize {
        self.premium.len() + self.boosted.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Listings shown under the "all" tab: scheduled or live.
pub fn all_scope(listings: &[Listing]) -> impl Iterator<Item = &Listing> {
    listings.iter().filter(|l| l.status.is_public())
}

/// Listings shown under the "weekly" tab: scheduled inside `week`.
pub fn weekly_scope<'a>(
    listings: &'a [Listing],
    week: &'a WeekWindow,
) -> impl Iterator<Item = &'a Listing> {
    listings.iter().filter(move |l| {
        l.status == Status::Scheduled && l.scheduled_for.is_some_and(|at| week.contains(at))
    })
}

fn with_tier<'a>(
    listings: impl Iterator<Item = &'a Listing>,
    tier: Tier,
) -> Vec<Listing> {
    listings.filter(|l| l.tier == tier).cloned().collect()
}

#[derive(Debug, Clone, Copy)]
pub struct LaunchBoard {
    offset: FixedOffset,
}

impl Default for LaunchBoard {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }
}

impl LaunchBoard {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.utc_offset()?))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn partition(&self, listings: &[Listing], now: DateTime<Utc>) -> Partition {
        let week = week_window(now, self.offset);
        let partition = Partition {
            premium: with_tier(all_scope(listings), Tier::Premium),
            boosted: with_tier(all_scope(listings), Tier::Boosted),
            regular: with_tier(all_scope(listings), Tier::Regular),
            weekly_regular: with_tier(weekly_scope(listings, &week), Tier::Regular),
            week: Some(week),
        };

        tracing::debug!(
            premium = partition.premium.len(),
            boosted = partition.boosted.len(),
            regular = partition.regular.len(),
            weekly = partition.weekly_regular.len(),
            "partitioned listing snapshot"
        );
        partition
    }

    /// Builds the board for the bucket containing `now`. Premium keeps its
    /// input order; each scope rotates its regular list and the boosted
    /// pool independently before interleaving.
    pub fn compose(&self, partition: &Partition, now: DateTime<Utc>) -> BoardView {
        let now_millis = now.timestamp_millis();
        let bucket_start = bucket_start_millis(now_millis);

        let weekly = interleave(
            &rotate(&partition.weekly_regular, now_millis),
            &rotate(&partition.boosted, now_millis),
            Scope::Weekly,
            now_millis,
        );
        let all = interleave(
            &rotate(&partition.regular, now_millis),
            &rotate(&partition.boosted, now_millis),
            Scope::All,
            now_millis,
        );

        let bucket_start_at = now - Duration::milliseconds(now_millis - bucket_start);
        BoardView {
            bucket_start: bucket_start_at,
            next_rotation: bucket_start_at + Duration::milliseconds(ROTATION_BUCKET_MS),
            countdown: countdown_to_next_week(now, self.offset),
            premium: partition.premium.clone(),
            weekly,
            all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn listing(id: &str, tier: Tier, status: Status, scheduled_for: Option<&str>) -> Listing {
        let mut listing = Listing::new(id, tier);
        listing.status = status;
        listing.scheduled_for = scheduled_for.map(at);
        listing
    }

    fn ids(listings: &[Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    fn snapshot() -> Vec<Listing> {
        vec![
            listing("p1", Tier::Premium, Status::Live, None),
            listing("b1", Tier::Boosted, Status::Live, None),
            listing("r1", Tier::Regular, Status::Scheduled, Some("2026-10-12T09:00:00Z")),
            listing("r2", Tier::Regular, Status::Live, Some("2026-10-01T09:00:00Z")),
            listing("r3", Tier::Regular, Status::Scheduled, Some("2026-10-20T09:00:00Z")),
            listing("r4", Tier::Regular, Status::Pending, Some("2026-10-12T09:00:00Z")),
            listing("r5", Tier::Regular, Status::Scheduled, Some("2026-10-15T09:00:00Z")),
        ]
    }

    #[test]
    fn test_partition_scopes_and_tiers() {
        let board = LaunchBoard::default();
        let partition = board.partition(&snapshot(), at("2026-10-16T12:00:00Z"));

        assert_eq!(ids(&partition.premium), vec!["p1"]);
        assert_eq!(ids(&partition.boosted), vec!["b1"]);
        assert_eq!(ids(&partition.regular), vec!["r1", "r2", "r3", "r5"]);
        assert_eq!(ids(&partition.weekly_regular), vec!["r1", "r5"]);
        assert!(partition.is_current(at("2026-10-17T20:00:00Z")));
        assert!(!partition.is_current(at("2026-10-18T00:00:00Z")));
    }

    #[test]
    fn test_compose_places_boosted_in_both_scopes() {
        let board = LaunchBoard::default();
        let now = at("2026-10-16T12:03:00Z");
        let partition = board.partition(&snapshot(), now);
        let view = board.compose(&partition, now);

        assert_eq!(view.premium.len(), 1);
        assert_eq!(view.weekly.len(), 3);
        assert_eq!(view.all.len(), 5);
        assert!(view.weekly.iter().any(|e| e.id() == "b1"));
        assert!(view.all.iter().any(|e| e.id() == "b1"));
        assert!(view.weekly.iter().all(|e| e.presentation_key.starts_with("weekly-")));
        assert!(view.all.iter().all(|e| e.presentation_key.starts_with("all-")));
        assert_eq!(view.bucket_start, at("2026-10-16T12:00:00Z"));
        assert_eq!(view.next_rotation, at("2026-10-16T12:10:00Z"));
    }

    #[test]
    fn test_compose_is_stable_within_bucket_and_moves_after() {
        let board = LaunchBoard::default();
        let now = at("2026-10-16T12:00:00Z");
        let partition = board.partition(&snapshot(), now);

        let first = board.compose(&partition, now);
        let same = board.compose(&partition, at("2026-10-16T12:09:59Z"));
        let next = board.compose(&partition, at("2026-10-16T12:10:00Z"));

        assert_eq!(first.all, same.all);
        assert_eq!(first.weekly, same.weekly);
        assert_ne!(first.all[0].id(), next.all[0].id());
    }

    #[test]
    fn test_board_offset_from_config() {
        let settings = crate::config::Settings {
            utc_offset_minutes: -300,
            ..Default::default()
        };
        let board = LaunchBoard::from_config(&settings).unwrap();
        assert_eq!(board.offset().local_minus_utc(), -300 * 60);

        let out_of_range = crate::config::Settings {
            utc_offset_minutes: 100_000,
            ..Default::default()
        };
        assert!(LaunchBoard::from_config(&out_of_range).is_err());
    }

    #[test]
    fn test_empty_snapshot_composes_empty_board() {
        let board = LaunchBoard::default();
        let now = at("2026-10-16T12:00:00Z");
        let partition = board.partition(&[], now);
        assert!(partition.is_empty());
        let view = board.compose(&partition, now);
        assert!(view.premium.is_empty() && view.weekly.is_empty() && view.all.is_empty());
    }
}
