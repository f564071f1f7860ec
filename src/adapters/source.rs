use crate::domain::model::Listing;
use crate::domain::ports::{ConfigProvider, ListingSource, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Reads a listing snapshot exported from the data store as JSON.
///
/// Accepts either a bare array or an object with a `startups` array.
/// Invalid entries are dropped individually; an unreadable or unparsable
/// file yields an empty snapshot.
pub struct JsonFileSource<S: Storage> {
    storage: S,
    path: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Bare(Vec<Value>),
    Wrapped { startups: Vec<Value> },
}

impl<S: Storage> JsonFileSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self::new(storage, config.listings_path())
    }

    /// Reads the raw entries. Fails only when the file itself is unreadable
    /// or not a listing document.
    pub async fn load(&self) -> Result<Vec<Value>> {
        let bytes = self.storage.read_file(&self.path).await?;
        let entries = match serde_json::from_slice::<Document>(&bytes)? {
            Document::Bare(entries) => entries,
            Document::Wrapped { startups } => startups,
        };
        Ok(entries)
    }
}

fn entry_id(entry: &Value) -> &str {
    entry.get("id").and_then(Value::as_str).unwrap_or("<no id>")
}

/// Decodes and validates each entry on its own, dropping the ones that fail.
pub fn parse_entries(entries: Vec<Value>) -> Vec<Listing> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let id = entry_id(&entry).to_string();
            match serde_json::from_value::<Listing>(entry) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    tracing::warn!(id = %id, "skipping unreadable listing: {}", e);
                    None
                }
            }
        })
        .filter(|listing| match listing.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(id = %listing.id, "skipping listing: {}", e);
                false
            }
        })
        .map(Listing::normalize)
        .collect()
}

#[async_trait]
impl<S: Storage> ListingSource for JsonFileSource<S> {
    async fn fetch_listings(&self) -> Vec<Listing> {
        match self.load().await {
            Ok(entries) => {
                let listings = parse_entries(entries);
                tracing::info!(path = %self.path, count = listings.len(), "loaded listings");
                listings
            }
            Err(e) => {
                tracing::warn!(path = %self.path, "failed to load listings, showing none: {}", e);
                Vec::new()
            }
        }
    }
}

/// Fixed in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    listings: Vec<Listing>,
}

impl MemorySource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

#[async_trait]
impl ListingSource for MemorySource {
    async fn fetch_listings(&self) -> Vec<Listing> {
        self.listings.clone()
    }
}
