use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Visibility class of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Premium,
    Boosted,
    #[default]
    Regular,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Premium => "premium",
            Tier::Boosted => "boosted",
            Tier::Regular => "regular",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Scheduled,
    #[default]
    Pending,
    Approved,
    Rejected,
    Live,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Scheduled => "scheduled",
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Live => "live",
        }
    }

    /// Whether listings in this status are shown on the public board.
    pub fn is_public(&self) -> bool {
        matches!(self, Status::Scheduled | Status::Live)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display scope a presented entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Weekly,
    All,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Weekly => "weekly",
            Scope::All => "all",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One startup submission as stored by the submission workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "listingType", default, deserialize_with = "tier_or_regular")]
    pub tier: Tier,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub do_follow_backlink: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub launch_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn new(id: impl Into<String>, tier: Tier) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            logo: String::new(),
            description: String::new(),
            website: String::new(),
            category: String::new(),
            tier,
            status: Status::Scheduled,
            do_follow_backlink: false,
            launch_date: None,
            submitted_at: None,
            scheduled_for: None,
        }
    }

    /// Launch date, falling back to the schedule and then the submission time.
    pub fn effective_launch_date(&self) -> Option<DateTime<Utc>> {
        self.launch_date.or(self.scheduled_for).or(self.submitted_at)
    }

    /// Fills derived fields the stored document may omit.
    pub fn normalize(mut self) -> Self {
        self.launch_date = self.effective_launch_date();
        self
    }
}

/// A missing, null or empty `listingType` means regular.
fn tier_or_regular<'de, D>(deserializer: D) -> std::result::Result<Tier, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") | Some("regular") => Ok(Tier::Regular),
        Some("premium") => Ok(Tier::Premium),
        Some("boosted") => Ok(Tier::Boosted),
        Some(other) => Err(serde::de::Error::unknown_variant(
            other,
            &["premium", "boosted", "regular"],
        )),
    }
}

/// RFC 3339 timestamps, or bare `YYYY-MM-DD` dates read as midnight UTC.
/// Null and empty strings are treated as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };
    let raw = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

impl Validate for Listing {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("id", &self.id)?;
        // Website is optional on older submissions.
        if !self.website.is_empty() {
            validate_url("website", &self.website)?;
        }
        Ok(())
    }
}

/// A listing placed on the board, keyed for one scope and one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub presentation_key: String,
}

impl PresentedListing {
    pub fn id(&self) -> &str {
        &self.listing.id
    }

    pub fn tier(&self) -> Tier {
        self.listing.tier
    }
}

/// Time left until the next weekly launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Everything the presentation layer needs for one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub bucket_start: DateTime<Utc>,
    pub next_rotation: DateTime<Utc>,
    pub countdown: Countdown,
    pub premium: Vec<Listing>,
    pub weekly: Vec<PresentedListing>,
    pub all: Vec<PresentedListing>,
}

impl BoardView {
    pub fn scope(&self, scope: Scope) -> &[PresentedListing] {
        match scope {
            Scope::Weekly => &self.weekly,
            Scope::All => &self.all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_defaults_when_fields_missing() {
        let listing: Listing = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(listing.tier, Tier::Regular);
        assert_eq!(listing.status, Status::Pending);
        assert!(listing.effective_launch_date().is_none());
    }

    #[test]
    fn test_listing_parses_camel_case_document() {
        let json = r#"{
            "id": "s1",
            "name": "Acme",
            "website": "https://acme.dev",
            "listingType": "boosted",
            "status": "scheduled",
            "doFollowBacklink": true,
            "scheduledFor": "2026-10-14T09:00:00Z"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.tier, Tier::Boosted);
        assert_eq!(listing.status, Status::Scheduled);
        assert!(listing.do_follow_backlink);
        assert_eq!(
            listing.effective_launch_date(),
            Some("2026-10-14T09:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_missing_tier_variants_mean_regular() {
        for json in [
            r#"{"id": "a", "listingType": null}"#,
            r#"{"id": "a", "listingType": ""}"#,
            r#"{"id": "a"}"#,
        ] {
            let listing: Listing = serde_json::from_str(json).unwrap();
            assert_eq!(listing.tier, Tier::Regular, "{}", json);
        }
        assert!(serde_json::from_str::<Listing>(r#"{"id": "a", "listingType": "gold"}"#).is_err());
    }

    #[test]
    fn test_timestamps_accept_dates_and_nulls() {
        let listing: Listing = serde_json::from_str(
            r#"{"id": "a", "scheduledFor": "2026-10-14", "submittedAt": null, "launchDate": ""}"#,
        )
        .unwrap();
        assert_eq!(listing.scheduled_for, Some("2026-10-14T00:00:00Z".parse().unwrap()));
        assert!(listing.submitted_at.is_none());
        assert!(listing.launch_date.is_none());

        let offset: Listing =
            serde_json::from_str(r#"{"id": "a", "scheduledFor": "2026-10-14T11:00:00+02:00"}"#)
                .unwrap();
        assert_eq!(offset.scheduled_for, Some("2026-10-14T09:00:00Z".parse().unwrap()));
    }

    #[test]
    fn test_normalize_fills_launch_date() {
        let mut listing = Listing::new("a", Tier::Regular);
        listing.submitted_at = Some("2026-10-01T08:00:00Z".parse().unwrap());
        assert_eq!(listing.clone().normalize().launch_date, listing.submitted_at);

        listing.scheduled_for = Some("2026-10-14T08:00:00Z".parse().unwrap());
        assert_eq!(listing.clone().normalize().launch_date, listing.scheduled_for);
    }

    #[test]
    fn test_listing_validation() {
        let mut listing = Listing::new("a", Tier::Regular);
        assert!(listing.validate().is_ok());

        listing.website = "not a url".to_string();
        assert!(listing.validate().is_err());

        listing.website = "https://a.example".to_string();
        listing.id = "  ".to_string();
        assert!(listing.validate().is_err());
    }

    #[test]
    fn test_presented_listing_flattens_fields() {
        let presented = PresentedListing {
            listing: Listing::new("a", Tier::Regular),
            presentation_key: "all-regular-a-0-0".to_string(),
        };
        let value = serde_json::to_value(&presented).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["presentationKey"], "all-regular-a-0-0");
        assert_eq!(value["listingType"], "regular");
    }
}
