use crate::domain::model::Listing;
use crate::utils::error::{Result, RotationError};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listings_path(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> &str;
    fn utc_offset_minutes(&self) -> i32;

    fn utc_offset(&self) -> Result<FixedOffset> {
        let minutes = self.utc_offset_minutes();
        FixedOffset::east_opt(minutes * 60).ok_or_else(|| RotationError::InvalidConfigValueError {
            field: "utc_offset_minutes".to_string(),
            value: minutes.to_string(),
            reason: "Offset out of range".to_string(),
        })
    }
}

/// Supplies the raw listing snapshot the board is derived from.
///
/// Sources fail closed: an unreachable or malformed backend yields an empty
/// snapshot rather than an error.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listings(&self) -> Vec<Listing>;
}

/// Wall-clock access, injected so rotation stays a pure function of time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
