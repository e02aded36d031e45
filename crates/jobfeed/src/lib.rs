pub mod classify;
pub mod config;
pub mod db;
pub mod ingest;
pub mod listings;
pub mod outcome;
pub mod postings;
pub mod refresh;
pub mod search;

pub use config::{Config, RefreshStrategy};
pub use outcome::JobOutcome;
