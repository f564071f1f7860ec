pub mod board;
pub mod interleave;
pub mod rotation;
pub mod scheduler;
pub mod week;

pub use crate::domain::model::{BoardView, Listing, PresentedListing};
pub use crate::domain::ports::{Clock, ConfigProvider, ListingSource, Storage};
pub use crate::utils::error::Result;
