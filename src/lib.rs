pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, Settings};

pub use crate::core::{
    board::LaunchBoard,
    interleave::interleave,
    rotation::{rotate, ROTATION_BUCKET_MS},
    scheduler::RefreshScheduler,
};
pub use domain::model::{BoardView, Listing, PresentedListing, Scope, Status, Tier};
pub use utils::error::{Result, RotationError};
